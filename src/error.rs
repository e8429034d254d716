use std::path::PathBuf;
use thiserror::Error;

/// Ошибки упаковщика.
#[derive(Error, Debug)]
pub(crate) enum PackagerError {
  /// Ошибка файловой системы: удаление, создание папки, запись архива.
  #[error("filesystem error at `{}`: {source}", .path.display())]
  FileSystem {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Очистка прошла до конца, но часть файлов удалить не удалось.
  #[error("can't remove {failed} file(s), first is `{}`", .first.display())]
  CleanFailed {
    first: PathBuf,
    failed: usize,
  },

  /// Ошибка создания архива.
  #[error("packaging failed: {0}")]
  Packaging(String),

  #[error("invalid path segment `{segment}`: {reason}")]
  InvalidSegment {
    segment: String,
    reason: &'static str,
  },

  #[error("invalid glob pattern `{pattern}`: {source}")]
  InvalidPattern {
    pattern: String,
    #[source]
    source: globset::Error,
  },

  #[error("can't read options from `{}`: {reason}", .path.display())]
  Config {
    path: PathBuf,
    reason: String,
  },
}

impl PackagerError {
  pub(crate) fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::FileSystem { path: path.into(), source }
  }
}

impl From<zip::result::ZipError> for PackagerError {
  fn from(e: zip::result::ZipError) -> Self {
    Self::Packaging(e.to_string())
  }
}
