//! Request culture resolution and the catalog of user-facing messages.

use crate::domain::types::{Locale, TypeConstraintError};
use crate::models::config::ServerConfig;

/// Cultures the API serves and the one used when a request names none of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalizationOptions {
    default_locale: Locale,
    supported: Vec<Locale>,
}

impl LocalizationOptions {
    pub fn new(
        default_locale: &str,
        supported: &[String],
    ) -> Result<Self, TypeConstraintError> {
        let default_locale = Locale::new(default_locale)?;
        let mut supported = supported
            .iter()
            .map(|s| Locale::new(s.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        if !supported.contains(&default_locale) {
            supported.push(default_locale.clone());
        }
        Ok(Self {
            default_locale,
            supported,
        })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, TypeConstraintError> {
        Self::new(&config.default_locale, &config.supported_locales)
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Maps a route culture onto a supported locale.
    ///
    /// An exact (case-insensitive) match wins, then the first supported locale
    /// sharing the language. Anything else falls back to the default.
    pub fn resolve(&self, culture: &str) -> Locale {
        let Ok(requested) = Locale::new(culture.trim()) else {
            return self.default_locale.clone();
        };

        if let Some(exact) = self.supported.iter().find(|l| **l == requested) {
            return exact.clone();
        }

        if requested.language() == self.default_locale.language() {
            return self.default_locale.clone();
        }

        self.supported
            .iter()
            .find(|l| l.language() == requested.language())
            .unwrap_or(&self.default_locale)
            .clone()
    }
}

/// User-facing texts with a translation per supported language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Message {
    NotFound,
    ValidationFailed,
    BadRequest,
    InternalError,
}

impl Message {
    pub fn text(self, locale: &Locale) -> &'static str {
        match (self, locale.language()) {
            (Message::NotFound, "vi") => "Không tìm thấy sản phẩm",
            (Message::NotFound, _) => "Product not found",
            (Message::ValidationFailed, "vi") => "Dữ liệu không hợp lệ",
            (Message::ValidationFailed, _) => "Validation failed",
            (Message::BadRequest, "vi") => "Yêu cầu không hợp lệ",
            (Message::BadRequest, _) => "Malformed request",
            (Message::InternalError, "vi") => "Lỗi hệ thống",
            (Message::InternalError, _) => "Internal server error",
        }
    }
}

#[cfg(feature = "server")]
mod extract {
    use std::future::{Ready, ready};

    use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorInternalServerError, web};

    use super::LocalizationOptions;
    use crate::domain::types::Locale;

    /// Locale resolved from the `{culture}` route segment.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct RequestLocale(pub Locale);

    impl FromRequest for RequestLocale {
        type Error = actix_web::Error;
        type Future = Ready<Result<Self, Self::Error>>;

        fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
            let Some(options) = req.app_data::<web::Data<LocalizationOptions>>() else {
                log::error!("Localization options are not registered");
                return ready(Err(ErrorInternalServerError("localization unavailable")));
            };

            let locale = match req.match_info().get("culture") {
                Some(culture) => options.resolve(culture),
                None => options.default_locale().clone(),
            };

            ready(Ok(RequestLocale(locale)))
        }
    }
}

#[cfg(feature = "server")]
pub use extract::RequestLocale;

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> LocalizationOptions {
        LocalizationOptions::new("vi-VN", &["en-US".to_string(), "vi-VN".to_string()]).unwrap()
    }

    #[test]
    fn exact_match_ignores_case() {
        assert_eq!(options().resolve("EN-us").as_str(), "en-US");
        assert_eq!(options().resolve("vi-VN").as_str(), "vi-VN");
    }

    #[test]
    fn language_prefix_selects_supported_locale() {
        assert_eq!(options().resolve("en").as_str(), "en-US");
        assert_eq!(options().resolve("en-GB").as_str(), "en-US");
    }

    #[test]
    fn unsupported_cultures_fall_back_to_default() {
        assert_eq!(options().resolve("fr-FR").as_str(), "vi-VN");
        assert_eq!(options().resolve("not a culture").as_str(), "vi-VN");
    }

    #[test]
    fn default_locale_is_always_supported() {
        let options = LocalizationOptions::new("en-US", &[]).unwrap();
        assert_eq!(options.resolve("en-US").as_str(), "en-US");
    }

    #[test]
    fn invalid_default_is_rejected() {
        assert!(LocalizationOptions::new("??", &[]).is_err());
    }

    #[test]
    fn messages_follow_the_language() {
        let vi = Locale::new("vi-VN").unwrap();
        let en = Locale::new("en-US").unwrap();
        assert_eq!(Message::NotFound.text(&en), "Product not found");
        assert_eq!(Message::NotFound.text(&vi), "Không tìm thấy sản phẩm");
    }
}
