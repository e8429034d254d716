use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::{Component, Path};
use walkdir::{DirEntry, WalkDir};

use crate::error::PackagerError;

/// Собирает набор шаблонов.
///
/// `*` не переходит через `/`: `*.sublime-menu` совпадает только с файлами в корне,
/// а `**/` означает ноль и более папок.
pub(crate) fn build_globset(patterns: &[String]) -> Result<GlobSet, PackagerError> {
  let mut builder = GlobSetBuilder::new();
  for pattern in patterns {
    let glob = GlobBuilder::new(pattern)
      .literal_separator(true)
      .build()
      .map_err(|source| PackagerError::InvalidPattern { pattern: pattern.clone(), source })?;
    builder.add(glob);
  }
  builder.build().map_err(|source| PackagerError::InvalidPattern { pattern: patterns.join(", "), source })
}

/// Относительный путь с разделителем `/`, как он записывается в архив.
///
/// Имена не в UTF-8 приводятся с потерями: файл всё равно проверяется шаблонами.
pub(crate) fn relative_name(root: &Path, path: &Path) -> Option<String> {
  let rel = path.strip_prefix(root).ok()?;
  let parts = rel
    .components()
    .map(|c| match c {
      Component::Normal(part) => Some(part.to_string_lossy()),
      _ => None,
    })
    .collect::<Option<Vec<_>>>()?;
  if parts.is_empty() { return None }
  if path.to_str().is_none() {
    crate::rw::log(format!("Non UTF-8 name: {}", path.display()));
  }
  Some(parts.join("/"))
}

fn is_hidden(entry: &DirEntry) -> bool {
  entry.file_name().to_string_lossy().starts_with('.')
}

/// Обход рабочего дерева.
///
/// Скрытые файлы и папки (с точки в начале имени) пропускаются вместе с содержимым.
/// Ссылки на папки не разворачиваются.
pub(crate) fn walk_tree(root: &Path) -> impl Iterator<Item = walkdir::Result<DirEntry>> {
  WalkDir::new(root)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
}

/// Обычный файл или ссылка на обычный файл. Битые ссылки не считаются.
pub(crate) fn is_tree_file(entry: &DirEntry) -> bool {
  entry.file_type().is_file()
    || (entry.path_is_symlink() && std::fs::metadata(entry.path()).is_ok_and(|m| m.is_file()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::configs::PackagerOptions;

  #[test]
  fn default_include_set() {
    let set = build_globset(&PackagerOptions::default().include).unwrap();
    for yes in ["a.py", "pkg/a.py", "pkg/deep/native.pyd", "lib/x.so", "Default.sublime-keymap", "Main.sublime-menu", "App.sublime-settings", "LICENSE"] {
      assert!(set.is_match(yes), "`{}` should match", yes);
    }
    for no in ["a.pyc", "README.md", "sub/Main.sublime-menu", "docs/LICENSE", "py", "a.py.bak"] {
      assert!(!set.is_match(no), "`{}` should not match", no);
    }
  }

  #[test]
  fn broken_pattern_is_reported() {
    let err = build_globset(&["a{b".to_string()]).unwrap_err();
    assert!(matches!(err, PackagerError::InvalidPattern { .. }));
  }

  #[test]
  fn relative_names_use_forward_slashes() {
    let root = Path::new("work");
    assert_eq!(relative_name(root, &root.join("pkg").join("a.py")).as_deref(), Some("pkg/a.py"));
    assert_eq!(relative_name(root, root), None);
    assert_eq!(relative_name(root, Path::new("other/a.py")), None);
  }

  fn tree_names(root: &Path) -> Vec<String> {
    walk_tree(root)
      .filter_map(Result::ok)
      .filter(is_tree_file)
      .filter_map(|e| relative_name(root, e.path()))
      .collect()
  }

  #[test]
  fn walk_skips_hidden_entries() {
    let dir = tempfile::tempdir().unwrap();
    for f in ["a.py", ".hidden.py", ".venv/lib/site.py", "pkg/.cache/x.pyc", "pkg/b.py"] {
      let path = dir.path().join(f);
      std::fs::create_dir_all(path.parent().unwrap()).unwrap();
      std::fs::write(path, "").unwrap();
    }
    assert_eq!(tree_names(dir.path()), vec!["a.py", "pkg/b.py"]);
  }

  #[cfg(unix)]
  #[test]
  fn walk_follows_file_links_only() {
    use std::os::unix::fs::symlink;

    let dir = tempfile::tempdir().unwrap();
    let outside = tempfile::tempdir().unwrap();
    std::fs::write(outside.path().join("real.so"), "elf").unwrap();
    std::fs::create_dir_all(outside.path().join("lib")).unwrap();
    std::fs::write(outside.path().join("lib/far.py"), "").unwrap();

    symlink(outside.path().join("real.so"), dir.path().join("native.so")).unwrap();
    symlink(outside.path().join("lib"), dir.path().join("linked")).unwrap();
    symlink(dir.path().join("missing.py"), dir.path().join("broken.py")).unwrap();

    assert_eq!(tree_names(dir.path()), vec!["native.so"]);
  }

  #[cfg(target_os = "linux")]
  #[test]
  fn non_utf8_names_are_still_named() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let root = Path::new("work");
    let path = root.join(OsStr::from_bytes(b"bad\xff.pyc"));
    let name = relative_name(root, &path).unwrap();
    assert!(name.starts_with("bad") && name.ends_with(".pyc"));
  }
}
