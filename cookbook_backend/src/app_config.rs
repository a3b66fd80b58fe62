use config::{Config, ConfigError, File};

use serde::{Deserialize, Serialize};

use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
pub struct HTTPConfig {
    pub host: String,
    pub port: u16,
}

impl HTTPConfig {
    pub fn connection_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub cookie_secret: String,
    pub session_ttl_minutes: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SiteConfig {
    pub dist_dir: String,
    pub static_dir: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub http_config: HTTPConfig,
    pub auth_config: AuthConfig,
    pub site_config: SiteConfig,
}

impl AppConfig {
    pub fn load(path_str: &str) -> Result<Self, ConfigError> {
        let mut conf = Config::default();
        let conf_file = File::new(path_str, config::FileFormat::Toml);
        conf.merge(conf_file)?;
        Self::from_config(&conf)
    }

    pub fn from_config(conf: &Config) -> Result<Self, ConfigError> {
        let mut http_config = conf.get::<HTTPConfig>("http")?;
        if let Ok(host) = std::env::var("COOKBOOK_SERVER_HOST") {
            info!("getting server host from env: {host}");
            http_config.host = host;
        } else {
            info!("getting server host from file");
        }

        let mut auth_config = conf.get::<AuthConfig>("auth")?;
        if let Ok(client_id) = std::env::var("COOKBOOK_AUTH_CLIENT_ID") {
            info!("auth client id from env");
            auth_config.client_id = client_id;
        } else {
            info!("auth client id from config file");
        }
        if let Ok(client_secret) = std::env::var("COOKBOOK_AUTH_CLIENT_SECRET") {
            info!("auth client secret from env");
            auth_config.client_secret = client_secret;
        } else {
            info!("auth client secret from config file");
        }
        if let Ok(cookie_secret) = std::env::var("COOKBOOK_AUTH_COOKIE_SECRET") {
            info!("cookie secret from env");
            auth_config.cookie_secret = cookie_secret;
        } else {
            info!("cookie secret from config file");
        }

        let site_config = conf.get::<SiteConfig>("site")?;

        Ok(AppConfig {
            http_config,
            auth_config,
            site_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests that read or write COOKBOOK_* env vars must not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const CONF: &str = r#"
[http]
host = "127.0.0.1"
port = 8080

[auth]
client_id = "id-from-file"
client_secret = "secret-from-file"
redirect_url = "http://127.0.0.1:8080/api/v1/auth/callback"
cookie_secret = "cookie-secret"
session_ttl_minutes = 60

[site]
dist_dir = "frontend/dist"
static_dir = "static"
"#;

    fn conf_from_str() -> Config {
        let mut conf = Config::default();
        conf.merge(File::from_str(CONF, config::FileFormat::Toml))
            .expect("test config must parse");
        conf
    }

    #[test]
    fn parses_all_sections() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        let app_config = AppConfig::from_config(&conf_from_str()).expect("config must load");
        assert_eq!(app_config.http_config.connection_string(), "127.0.0.1:8080");
        assert_eq!(app_config.auth_config.client_id, "id-from-file");
        assert_eq!(app_config.auth_config.session_ttl_minutes, 60);
        assert_eq!(app_config.site_config.static_dir, "static");
    }

    #[test]
    fn env_var_overrides_the_file_value() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        std::env::set_var("COOKBOOK_AUTH_CLIENT_ID", "id-from-env");
        let result = AppConfig::from_config(&conf_from_str());
        std::env::remove_var("COOKBOOK_AUTH_CLIENT_ID");
        let app_config = result.expect("config must load");
        assert_eq!(app_config.auth_config.client_id, "id-from-env");
        // Fields without an override still come from the file.
        assert_eq!(app_config.auth_config.client_secret, "secret-from-file");
        assert_eq!(app_config.http_config.host, "127.0.0.1");
    }

    #[test]
    fn missing_section_is_an_error() {
        let mut conf = Config::default();
        conf.merge(File::from_str("[http]\nhost = \"h\"\nport = 1", config::FileFormat::Toml))
            .expect("test config must parse");
        assert!(AppConfig::from_config(&conf).is_err());
    }
}
