use chrono::{Local, NaiveDate};

pub(crate) static JOB_NAME_VAR: &str = "JOB_NAME";
pub(crate) static BUILD_NUMBER_VAR: &str = "BUILD_NUMBER";

static LOCAL_JOB_NAME: &str = "local";
static LOCAL_BUILD_NUMBER: &str = "non-ci";

/// Сведения о текущей сборке, полученные из окружения.
///
/// Вычисляются один раз при старте и дальше не меняются.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BuildContext {
  pub(crate) job_name: String,
  pub(crate) build_number: String,
  pub(crate) date: NaiveDate,
  /// Сборка запущена в CI: задано непустое `JOB_NAME`.
  pub(crate) is_ci: bool,
}

impl BuildContext {
  pub(crate) fn from_env() -> Self {
    Self::from_lookup(|key| std::env::var(key).ok(), Local::now().date_naive())
  }

  pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>, date: NaiveDate) -> Self {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

    let job_name = non_empty(JOB_NAME_VAR);
    let is_ci = job_name.is_some();

    Self {
      job_name: job_name.unwrap_or_else(|| LOCAL_JOB_NAME.to_owned()),
      build_number: non_empty(BUILD_NUMBER_VAR).unwrap_or_else(|| LOCAL_BUILD_NUMBER.to_owned()),
      date,
      is_ci,
    }
  }

  /// Дата в формате `yyyy-mm-dd`.
  pub(crate) fn date_str(&self) -> String {
    self.date.format("%Y-%m-%d").to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn ctx(vars: &[(&str, &str)]) -> BuildContext {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    BuildContext::from_lookup(|k| vars.get(k).cloned(), NaiveDate::from_ymd_opt(2024, 3, 7).unwrap())
  }

  #[test]
  fn local_run_uses_placeholders() {
    let c = ctx(&[]);
    assert!(!c.is_ci);
    assert_eq!(c.job_name, "local");
    assert_eq!(c.build_number, "non-ci");
  }

  #[test]
  fn job_name_marks_ci() {
    let c = ctx(&[("JOB_NAME", "sublime-package"), ("BUILD_NUMBER", "42")]);
    assert!(c.is_ci);
    assert_eq!(c.job_name, "sublime-package");
    assert_eq!(c.build_number, "42");
    assert_eq!(c.date_str(), "2024-03-07");
  }

  #[test]
  fn empty_job_name_is_not_ci() {
    let c = ctx(&[("JOB_NAME", ""), ("BUILD_NUMBER", "")]);
    assert!(!c.is_ci);
    assert_eq!(c.build_number, "non-ci");
  }

  #[test]
  fn build_number_without_job_name_is_kept() {
    let c = ctx(&[("BUILD_NUMBER", "7")]);
    assert!(!c.is_ci);
    assert_eq!(c.build_number, "7");
  }
}
