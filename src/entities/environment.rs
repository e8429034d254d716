use std::path::Path;

/// Окружение, в котором выполняются шаги упаковки.
#[derive(Clone, Copy)]
pub(crate) struct PackEnvironment<'a> {
  /// Рабочее дерево: его очищают и из него собирают архивы.
  pub(crate) root_dir: &'a Path,
}
