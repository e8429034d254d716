//! Пути назначения для архивов.
//!
//! Путь собирается из корня и проверенных сегментов, а не подстановкой строк в шаблон:
//! значение из окружения не может подняться выше корня или добавить лишний уровень папок.

use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::configs::PackagerOptions;
use crate::entities::context::BuildContext;
use crate::error::PackagerError;

static FORBIDDEN_CHARS: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"[<>:"/\\|?*\x00-\x1f]"#).expect("forbidden chars regex")
});

/// Один проверенный компонент пути.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PathSegment(String);

impl PathSegment {
  pub(crate) fn new(segment: impl Into<String>) -> Result<Self, PackagerError> {
    let segment = segment.into();
    let invalid = |reason| Err(PackagerError::InvalidSegment { segment: segment.clone(), reason });

    if segment.is_empty() { return invalid("segment is empty") }
    if segment == "." || segment == ".." { return invalid("relative segments are not allowed") }
    if FORBIDDEN_CHARS.is_match(&segment) { return invalid("contains a reserved character") }
    if segment.ends_with(' ') || segment.ends_with('.') { return invalid("ends with a space or a dot") }

    Ok(Self(segment))
  }
}

impl AsRef<Path> for PathSegment {
  fn as_ref(&self) -> &Path {
    Path::new(&self.0)
  }
}

impl fmt::Display for PathSegment {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Папка, в которую кладётся архив.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DestinationPath(PathBuf);

impl DestinationPath {
  fn under(root: &Path, segments: &[&PathSegment]) -> Self {
    let mut path = root.to_path_buf();
    for segment in segments { path.push(segment); }
    Self(path)
  }

  pub(crate) fn as_path(&self) -> &Path {
    &self.0
  }

  /// Полный путь к архиву в этой папке.
  pub(crate) fn archive_path(&self, archive_name: &PathSegment) -> PathBuf {
    self.0.join(archive_name)
  }
}

/// Папка основного архива.
///
/// Вне CI это локальная папка `build`; в CI - `{move_root}/{job}/{yyyy-mm-dd} #{build}`.
pub(crate) fn main_destination(ctx: &BuildContext, opts: &PackagerOptions) -> Result<DestinationPath, PackagerError> {
  if !ctx.is_ci {
    return Ok(DestinationPath(opts.local_folder.clone()))
  }

  let job = PathSegment::new(ctx.job_name.as_str())?;
  let build_number = PathSegment::new(ctx.build_number.as_str())?;
  let build_folder = PathSegment::new(format!("{} #{}", ctx.date_str(), build_number))?;

  Ok(DestinationPath::under(&opts.move_root, &[&job, &build_folder]))
}

/// Папка копии архива: `{copy_root}/{job}` (вне CI задача называется `local`).
pub(crate) fn copy_destination(ctx: &BuildContext, opts: &PackagerOptions) -> Result<DestinationPath, PackagerError> {
  let job = PathSegment::new(ctx.job_name.as_str())?;
  Ok(DestinationPath::under(&opts.copy_root, &[&job]))
}

/// Обе цели упаковки.
#[derive(Debug, Clone)]
pub(crate) struct Destinations {
  pub(crate) main: PathBuf,
  pub(crate) copy: PathBuf,
}

impl Destinations {
  pub(crate) fn compute(ctx: &BuildContext, opts: &PackagerOptions) -> Result<Self, PackagerError> {
    let archive_name = PathSegment::new(opts.archive_name())?;
    Ok(Self {
      main: main_destination(ctx, opts)?.archive_path(&archive_name),
      copy: copy_destination(ctx, opts)?.archive_path(&archive_name),
    })
  }
}
