use crate::configs::FailurePolicy;
use crate::entities::environment::PackEnvironment;
use crate::error::PackagerError;

/// Шаг пайплайна упаковки.
pub(crate) trait Execute {
  fn title(&self) -> String;

  /// Выполняет шаг; возвращает строки отчёта.
  fn execute(&self, env: PackEnvironment) -> Result<Vec<String>, PackagerError>;

  fn on_failure(&self) -> FailurePolicy {
    FailurePolicy::Fatal
  }
}
