use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::PackagerError;

pub(crate) static VERBOSE: OnceLock<bool> = OnceLock::new();

/// Читает JSON-файл, если он существует; иначе возвращает значение по умолчанию.
///
/// Повреждённый файл - это ошибка, а не повод молча взять умолчания.
pub(crate) fn read_or_default<T: DeserializeOwned + Default>(filepath: impl AsRef<Path>) -> Result<T, PackagerError> {
  if !filepath.as_ref().exists() { return Ok(T::default()) }
  read_checked(filepath)
}

pub(crate) fn read_checked<T: DeserializeOwned>(filepath: impl AsRef<Path>) -> Result<T, PackagerError> {
  let path = filepath.as_ref();
  let config_err = |reason: String| PackagerError::Config { path: path.to_path_buf(), reason };
  
  let file = File::open(path).map_err(|e| config_err(e.to_string()))?;
  let reader = BufReader::new(file);
  
  match path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase()).as_deref() {
    Some("json") => serde_json::from_reader(reader).map_err(|e| config_err(e.to_string())),
    _ => Err(config_err("unsupported file extension, expected `.json`".into())),
  }
}

pub(crate) fn log(s: impl AsRef<str>) {
  if VERBOSE.get().copied().unwrap_or(false) {
    println!("{}", s.as_ref());
  }
}
