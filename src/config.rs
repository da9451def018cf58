use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub animations: AnimationsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the web service
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Directory holding the serialized classifier artifacts
    #[serde(default = "default_models_dir")]
    pub dir: PathBuf,
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("models")
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: default_models_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimationsConfig {
    /// Disable to skip all remote animation fetches
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Per-request timeout in seconds
    #[serde(default = "default_animation_timeout")]
    pub timeout_secs: u64,
    /// Sidebar medical animation
    #[serde(default = "default_sidebar_url")]
    pub sidebar_url: String,
    /// Header banner animation
    #[serde(default = "default_banner_url")]
    pub banner_url: String,
    /// Shown with a positive verdict
    #[serde(default = "default_positive_url")]
    pub positive_url: String,
    /// Shown with a negative verdict
    #[serde(default = "default_negative_url")]
    pub negative_url: String,
}

fn default_true() -> bool {
    true
}

fn default_animation_timeout() -> u64 {
    10
}

fn default_sidebar_url() -> String {
    "https://lottie.host/9b12e3a5-1f3b-4e0e-b9db-2b053cbd01f8/JzZXJrBXvQ.json".to_string()
}

fn default_banner_url() -> String {
    "https://lottie.host/5c6a1f3d-73c4-4b1a-a29b-8b2f16c7a0de/QwErTy12Zx.json".to_string()
}

fn default_positive_url() -> String {
    "https://lottie.host/8a6b409b-93c8-4a20-9e89-7b6d8e82fa1b/rsp92Fq0mA.json".to_string()
}

fn default_negative_url() -> String {
    "https://lottie.host/646a8c39-2d80-41fc-9c90-40f3cdde94b7/XMciZvgdD8.json".to_string()
}

impl Default for AnimationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: default_animation_timeout(),
            sidebar_url: default_sidebar_url(),
            banner_url: default_banner_url(),
            positive_url: default_positive_url(),
            negative_url: default_negative_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            models: ModelsConfig::default(),
            animations: AnimationsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080_i64)?
            .set_default("models.dir", "models")?
            .set_default("animations.enabled", true)?
            .set_default("animations.timeout_secs", 10_i64)?
            .set_default("animations.sidebar_url", default_sidebar_url())?
            .set_default("animations.banner_url", default_banner_url())?
            .set_default("animations.positive_url", default_positive_url())?
            .set_default("animations.negative_url", default_negative_url())?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("VITALIS_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (VITALIS_SERVER__PORT, etc.)
            .add_source(
                Environment::with_prefix("VITALIS")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.host.trim().is_empty() {
            errors.push("server.host must not be empty".to_string());
        }

        if self.server.port == 0 {
            errors.push("server.port must be non-zero".to_string());
        }

        if self.models.dir.as_os_str().is_empty() {
            errors.push("models.dir must not be empty".to_string());
        }

        if self.animations.timeout_secs == 0 {
            errors.push("animations.timeout_secs must be positive".to_string());
        }

        for (name, url) in [
            ("sidebar_url", &self.animations.sidebar_url),
            ("banner_url", &self.animations.banner_url),
            ("positive_url", &self.animations.positive_url),
            ("negative_url", &self.animations.negative_url),
        ] {
            if self.animations.enabled && !url.starts_with("http") {
                errors.push(format!("animations.{name} must be an http(s) URL"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.models.dir, PathBuf::from("models"));
        assert!(cfg.animations.enabled);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        cfg.animations.timeout_secs = 0;
        cfg.animations.positive_url = "not-a-url".to_string();

        let errors = cfg.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
