//! Каталог сообщений для пользователя.
//!
//! Язык выбирается фичей при сборке: по умолчанию английский, `i18n-ru` включает русский.

#[macro_export]
macro_rules! tr {
  ($k:ident, $v:expr) => {
    #[allow(dead_code)]
    pub(crate) const $k: &str = $v;
  };
}

#[cfg(not(feature = "i18n-ru"))]
mod en;
#[cfg(not(feature = "i18n-ru"))]
use en as messages;

#[cfg(feature = "i18n-ru")]
mod ru;
#[cfg(feature = "i18n-ru")]
use ru as messages;

pub(crate) use messages::*;
