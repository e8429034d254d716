//! Упаковка рабочего дерева в zip.
//!
//! Архив сначала пишется во временный файл рядом с целевым и только потом
//! переименовывается, поэтому под итоговым именем не остаётся обрезанного архива.
//! Временный файл скрытый, так что обход дерева его не видит.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use zip::{write::FileOptions, CompressionMethod, ZipWriter};

use crate::configs::{FailurePolicy, PackagerOptions};
use crate::entities::{environment::PackEnvironment, traits::Execute};
use crate::error::PackagerError;
use crate::i18n;
use crate::rw::log;
use crate::utils::{build_globset, is_tree_file, relative_name, walk_tree};

static PART_SUFFIX: &str = ".part";

/// Описание одного архива.
#[derive(Clone, Debug)]
pub(crate) struct ArchiveSpec {
  pub(crate) title: String,
  /// Путь к архиву; относительный путь считается от рабочего дерева.
  pub(crate) archive_path: PathBuf,
  pub(crate) include: Vec<String>,
  pub(crate) allow_empty: bool,
  pub(crate) failure: FailurePolicy,
}

/// Файл, попадающий в архив.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ArchiveEntry {
  /// Имя внутри архива (`/` как разделитель).
  pub(crate) name: String,
  pub(crate) path: PathBuf,
}

impl ArchiveSpec {
  pub(crate) fn new(title: impl Into<String>, archive_path: PathBuf, opts: &PackagerOptions) -> Self {
    Self {
      title: title.into(),
      archive_path,
      include: opts.include.clone(),
      allow_empty: opts.allow_empty,
      failure: FailurePolicy::Fatal,
    }
  }

  pub(crate) fn with_failure(mut self, failure: FailurePolicy) -> Self {
    self.failure = failure;
    self
  }

  fn resolved_path(&self, root: &Path) -> PathBuf {
    root.join(&self.archive_path)
  }

  /// Все подходящие файлы рабочего дерева, отсортированные по имени.
  pub(crate) fn collect(&self, root: &Path) -> Result<Vec<ArchiveEntry>, PackagerError> {
    let set = build_globset(&self.include)?;
    let own_path = self.resolved_path(root);
    let mut entries = vec![];

    for entry in walk_tree(root) {
      let entry = entry.map_err(|e| {
        let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
        PackagerError::fs(path, e.into())
      })?;
      if !is_tree_file(&entry) || entry.path() == own_path { continue }

      let Some(name) = relative_name(root, entry.path()) else { continue };
      if set.is_match(&name) {
        entries.push(ArchiveEntry { name, path: entry.path().to_path_buf() });
      }
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
  }

  /// Пишет архив, заменяя существующий. Возвращает записанные файлы.
  pub(crate) fn write(&self, root: &Path) -> Result<Vec<ArchiveEntry>, PackagerError> {
    let entries = self.collect(root)?;
    if entries.is_empty() && !self.allow_empty {
      return Err(PackagerError::Packaging(i18n::ARCHIVE_EMPTY.to_string()))
    }

    let target = self.resolved_path(root);
    let parent = match target.parent() {
      Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
      _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(|e| PackagerError::fs(&parent, e))?;

    let file_name = target
      .file_name()
      .and_then(|n| n.to_str())
      .ok_or_else(|| PackagerError::Packaging(format!("`{}` has no file name", target.display())))?;
    let part = parent.join(format!(".{}.{}{}", file_name, Uuid::new_v4(), PART_SUFFIX));

    if let Err(e) = write_zip(&part, &entries) {
      let _ = std::fs::remove_file(&part);
      return Err(e)
    }
    if let Err(e) = std::fs::rename(&part, &target) {
      let _ = std::fs::remove_file(&part);
      return Err(PackagerError::fs(&target, e))
    }

    Ok(entries)
  }
}

fn write_zip(part: &Path, entries: &[ArchiveEntry]) -> Result<(), PackagerError> {
  let file = File::create(part).map_err(|e| PackagerError::fs(part, e))?;
  let mut zip = ZipWriter::new(BufWriter::new(file));
  let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

  for entry in entries {
    log(format!("-> {}", entry.name));
    zip.start_file(entry.name.as_str(), options)?;
    let mut src = File::open(&entry.path).map_err(|e| PackagerError::fs(&entry.path, e))?;
    std::io::copy(&mut src, &mut zip).map_err(|e| PackagerError::fs(&entry.path, e))?;
  }

  let mut writer = zip.finish()?;
  std::io::Write::flush(&mut writer).map_err(|e| PackagerError::fs(part, e))?;
  Ok(())
}

impl Execute for ArchiveSpec {
  fn title(&self) -> String {
    self.title.clone()
  }

  fn execute(&self, env: PackEnvironment) -> Result<Vec<String>, PackagerError> {
    let entries = self.write(env.root_dir)?;
    Ok(vec![
      format!("{}: {}", i18n::ARCHIVE_ENTRIES, entries.len()),
      format!("{}: {}", i18n::ARCHIVE_PATH, self.resolved_path(env.root_dir).display()),
    ])
  }

  fn on_failure(&self) -> FailurePolicy {
    self.failure
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use std::io::Read;

  fn tree(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (f, content) in files {
      let path = dir.path().join(f);
      fs::create_dir_all(path.parent().unwrap()).unwrap();
      fs::write(path, content).unwrap();
    }
    dir
  }

  fn spec(path: &str) -> ArchiveSpec {
    ArchiveSpec::new("test", PathBuf::from(path), &PackagerOptions::default())
  }

  fn zip_names(path: &Path) -> Vec<String> {
    let mut zip = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..zip.len()).map(|i| zip.by_index(i).unwrap().name().to_string()).collect()
  }

  #[test]
  fn archives_exactly_the_matching_files() {
    let dir = tree(&[
      ("a.py", "print(1)"),
      ("b.pyc", "bytecode"),
      ("LICENSE", "MIT"),
      ("pkg/mod.py", ""),
      ("pkg/native.pyd", ""),
      ("lib/x.so", ""),
      ("Default.sublime-keymap", "[]"),
      ("nested/Other.sublime-settings", "{}"),
      ("README.md", "#"),
    ]);

    let written = spec("build/App.zip").write(dir.path()).unwrap();
    let names = zip_names(&dir.path().join("build/App.zip"));

    assert_eq!(names, vec!["Default.sublime-keymap", "LICENSE", "a.py", "lib/x.so", "pkg/mod.py", "pkg/native.pyd"]);
    assert_eq!(written.iter().map(|e| e.name.clone()).collect::<Vec<_>>(), names);
  }

  #[test]
  fn content_is_preserved() {
    let dir = tree(&[("pkg/a.py", "import os\n")]);
    spec("out.zip").write(dir.path()).unwrap();

    let mut zip = zip::ZipArchive::new(File::open(dir.path().join("out.zip")).unwrap()).unwrap();
    let mut body = String::new();
    zip.by_name("pkg/a.py").unwrap().read_to_string(&mut body).unwrap();
    assert_eq!(body, "import os\n");
  }

  #[test]
  fn overwrites_previous_archive() {
    let dir = tree(&[("a.py", "")]);
    fs::create_dir_all(dir.path().join("build")).unwrap();
    fs::write(dir.path().join("build/App.zip"), "stale").unwrap();

    spec("build/App.zip").write(dir.path()).unwrap();
    assert_eq!(zip_names(&dir.path().join("build/App.zip")), vec!["a.py"]);

    fs::write(dir.path().join("b.py"), "").unwrap();
    spec("build/App.zip").write(dir.path()).unwrap();
    assert_eq!(zip_names(&dir.path().join("build/App.zip")), vec!["a.py", "b.py"]);

    let leftovers = fs::read_dir(dir.path().join("build")).unwrap().count();
    assert_eq!(leftovers, 1);
  }

  #[test]
  fn archive_never_contains_itself() {
    let dir = tree(&[("a.py", "")]);
    let mut s = spec("self.zip");
    s.include.push("*.zip".into());
    s.write(dir.path()).unwrap();
    s.write(dir.path()).unwrap();
    assert_eq!(zip_names(&dir.path().join("self.zip")), vec!["a.py"]);
  }

  #[test]
  fn hidden_files_and_folders_are_left_out() {
    let dir = tree(&[("a.py", ""), (".hidden.py", ""), (".venv/lib/site.py", ""), ("pkg/.tox/t.py", "")]);
    let names = spec("out.zip").collect(dir.path()).unwrap().into_iter().map(|e| e.name).collect::<Vec<_>>();
    assert_eq!(names, vec!["a.py"]);
  }

  #[cfg(unix)]
  #[test]
  fn linked_native_module_is_packaged() {
    let dir = tree(&[("a.py", "")]);
    let outside = tempfile::tempdir().unwrap();
    fs::write(outside.path().join("real.so"), "elf").unwrap();
    std::os::unix::fs::symlink(outside.path().join("real.so"), dir.path().join("native.so")).unwrap();

    spec("out.zip").write(dir.path()).unwrap();

    let mut zip = zip::ZipArchive::new(File::open(dir.path().join("out.zip")).unwrap()).unwrap();
    let mut body = String::new();
    zip.by_name("native.so").unwrap().read_to_string(&mut body).unwrap();
    assert_eq!(body, "elf");
  }

  #[test]
  fn empty_match_set_is_an_error() {
    let dir = tree(&[("notes.txt", "")]);
    let err = spec("build/App.zip").write(dir.path()).unwrap_err();
    assert!(matches!(err, PackagerError::Packaging(_)));
    assert!(!dir.path().join("build").exists());
  }

  #[test]
  fn empty_archive_when_allowed() {
    let dir = tree(&[("notes.txt", "")]);
    let mut s = spec("build/App.zip");
    s.allow_empty = true;
    assert!(s.write(dir.path()).unwrap().is_empty());
    assert!(zip_names(&dir.path().join("build/App.zip")).is_empty());
  }

  #[test]
  fn unwritable_destination_is_a_filesystem_error() {
    let dir = tree(&[("a.py", ""), ("blocker", "")]);
    let err = spec("blocker/App.zip").write(dir.path()).unwrap_err();
    assert!(matches!(err, PackagerError::FileSystem { .. }));
  }
}
