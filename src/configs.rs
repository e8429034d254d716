use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub(crate) static PACKAGE_CONF_FILE: &str = "package-config.json";

static NETWORK_BUILDS_ROOT: &str = r"\\telerik.com\Resources\BlackDragon\Builds\appbuilder-sublime-package";

/// Что делать, если архив не удалось записать.
#[derive(Deserialize, Serialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub(crate) enum FailurePolicy {
  /// Прервать упаковку.
  #[default]
  Fatal,
  /// Вывести предупреждение и продолжить.
  Warn,
}

/// Настройки упаковки.
///
/// Все поля необязательны: отсутствующие берутся из значений по умолчанию.
#[derive(Deserialize, Serialize, PartialEq, Clone, Debug)]
#[serde(default)]
pub(crate) struct PackagerOptions {
  /// Имя продукта; архив называется `{product_name}.zip`.
  pub(crate) product_name: String,
  /// Корень для копии архива (всегда с подпапкой задачи).
  pub(crate) copy_root: PathBuf,
  /// Корень для основного архива в CI.
  pub(crate) move_root: PathBuf,
  /// Папка для основного архива вне CI.
  pub(crate) local_folder: PathBuf,
  /// Шаблоны файлов, попадающих в архив.
  pub(crate) include: Vec<String>,
  /// Шаблоны файлов, удаляемых перед упаковкой.
  pub(crate) clean: Vec<String>,
  /// Разрешить пустой архив.
  pub(crate) allow_empty: bool,
  /// Поведение при ошибке записи копии.
  pub(crate) copy_failure: FailurePolicy,
}

impl Default for PackagerOptions {
  fn default() -> Self {
    Self {
      product_name: "Telerik AppBuilder".into(),
      copy_root: NETWORK_BUILDS_ROOT.into(),
      move_root: NETWORK_BUILDS_ROOT.into(),
      local_folder: "build".into(),
      include: vec![
        "**/*.{py,pyd,so}".into(),
        "*.{sublime-keymap,sublime-menu,sublime-settings}".into(),
        "LICENSE".into(),
      ],
      clean: vec!["**/*.pyc".into()],
      allow_empty: false,
      copy_failure: FailurePolicy::Fatal,
    }
  }
}

impl PackagerOptions {
  pub(crate) fn archive_name(&self) -> String {
    format!("{}.zip", self.product_name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_file_keeps_other_defaults() {
    let opts: PackagerOptions = serde_json::from_str(r#"{ "local_folder": "out", "copy_failure": "warn" }"#).unwrap();
    assert_eq!(opts.local_folder, PathBuf::from("out"));
    assert_eq!(opts.copy_failure, FailurePolicy::Warn);
    assert_eq!(opts.include, PackagerOptions::default().include);
    assert_eq!(opts.archive_name(), "Telerik AppBuilder.zip");
  }

  #[test]
  fn unknown_policy_is_rejected() {
    assert!(serde_json::from_str::<PackagerOptions>(r#"{ "copy_failure": "retry" }"#).is_err());
  }
}
