//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_max_page_size() -> usize {
    100
}

#[derive(Clone, Debug, Deserialize)]
/// Immutable server configuration read once at startup and handed to
/// components explicitly.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Origin echoed in CORS headers, including on server error responses.
    pub allowed_origin: String,
    pub default_locale: String,
    pub supported_locales: Vec<String>,
    /// Largest accepted `pageSize` for paged listings.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

/// `APP_`-prefixed environment overrides. `APP_SUPPORTED_LOCALES` takes a
/// comma separated list such as `en-US,vi-VN`.
#[cfg(feature = "server")]
pub fn environment() -> config::Environment {
    config::Environment::with_prefix("APP")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("supported_locales")
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use config::{Config, File, FileFormat};

    use super::*;

    const DEFAULTS: &str = r#"
address: 127.0.0.1
port: 8080
database_url: app.db
allowed_origin: http://localhost:3000
default_locale: vi-VN
supported_locales: [en-US, vi-VN]
"#;

    fn load(vars: &[(&str, &str)]) -> ServerConfig {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::builder()
            .add_source(File::from_str(DEFAULTS, FileFormat::Yaml))
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn defaults_come_from_yaml() {
        let config = load(&[]);

        assert_eq!(config.supported_locales, ["en-US", "vi-VN"]);
        assert_eq!(config.max_page_size, 100);
    }

    #[test]
    fn environment_overrides_lists_and_scalars() {
        let config = load(&[
            ("APP_SUPPORTED_LOCALES", "en-US,vi-VN,fr-FR"),
            ("APP_DATABASE_URL", "/var/lib/shop/catalog.db"),
            ("APP_PORT", "9090"),
            ("APP_MAX_PAGE_SIZE", "50"),
        ]);

        assert_eq!(config.supported_locales, ["en-US", "vi-VN", "fr-FR"]);
        assert_eq!(config.database_url, "/var/lib/shop/catalog.db");
        assert_eq!(config.port, 9090);
        assert_eq!(config.max_page_size, 50);
    }
}
