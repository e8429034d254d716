use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::configs::PackagerOptions;
use crate::entities::{environment::PackEnvironment, traits::Execute};
use crate::error::PackagerError;
use crate::i18n;
use crate::rw::log;
use crate::utils::{build_globset, is_tree_file, relative_name, walk_tree};

/// Удаление скомпилированного байткода из рабочего дерева.
#[derive(Clone, Debug)]
pub(crate) struct CleanAction {
  pub(crate) patterns: Vec<String>,
}

#[derive(Debug, Default)]
pub(crate) struct CleanReport {
  pub(crate) removed: Vec<String>,
  pub(crate) failed: Vec<(PathBuf, std::io::Error)>,
}

impl CleanAction {
  pub(crate) fn from_options(opts: &PackagerOptions) -> Self {
    Self { patterns: opts.clean.clone() }
  }

  /// Удаляет все подходящие файлы, не останавливаясь на ошибках.
  pub(crate) fn clean(&self, root: &Path) -> Result<CleanReport, PackagerError> {
    let set = build_globset(&self.patterns)?;
    let mut report = CleanReport::default();

    for entry in walk_tree(root) {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
          report.failed.push((path, e.into()));
          continue
        },
      };
      if !is_tree_file(&entry) { continue }

      let Some(name) = relative_name(root, entry.path()) else { continue };
      if !set.is_match(&name) { continue }

      match std::fs::remove_file(entry.path()) {
        Ok(_) => {
          log(format!("-> {}", name));
          report.removed.push(name);
        },
        Err(e) => report.failed.push((entry.path().to_path_buf(), e)),
      }
    }

    Ok(report)
  }
}

impl Execute for CleanAction {
  fn title(&self) -> String {
    i18n::STEP_CLEAN.to_string()
  }

  fn execute(&self, env: PackEnvironment) -> Result<Vec<String>, PackagerError> {
    self.clean(env.root_dir)?.into_output()
  }
}

impl CleanReport {
  /// Строки отчёта; если хоть один файл не удалён, очистка считается проваленной.
  pub(crate) fn into_output(self) -> Result<Vec<String>, PackagerError> {
    for (path, e) in &self.failed {
      eprintln!("{} `{}`: {}", i18n::CLEAN_CANT_REMOVE.red(), path.display(), e);
    }
    if let Some((first, _)) = self.failed.first() {
      return Err(PackagerError::CleanFailed { first: first.clone(), failed: self.failed.len() })
    }

    if self.removed.is_empty() {
      Ok(vec![i18n::CLEAN_NOTHING.to_string()])
    } else {
      Ok(vec![format!("{}: {}", i18n::CLEAN_REMOVED, self.removed.len())])
    }
  }
}
