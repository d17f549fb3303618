use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub enable_request_logging: bool,
}

/// Delays for the deferred UI transitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub modal_close_delay_ms: u64,
    pub message_clear_delay_ms: u64,
    pub backup_message_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `session.json`; `None` means `$HOME/.config/alamal`
    pub config_dir: Option<PathBuf>,
    /// Where created backups are saved
    pub download_dir: PathBuf,
}

impl UiConfig {
    pub fn modal_close_delay(&self) -> Duration {
        Duration::from_millis(self.modal_close_delay_ms)
    }

    pub fn message_clear_delay(&self) -> Duration {
        Duration::from_millis(self.message_clear_delay_ms)
    }

    pub fn backup_message_delay(&self) -> Duration {
        Duration::from_millis(self.backup_message_delay_ms)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            modal_close_delay_ms: 1500,
            message_clear_delay_ms: 3000,
            backup_message_delay_ms: 5000,
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("ALAMAL_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("ALAMAL_API_URL") {
            self.api.base_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("ALAMAL_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        if let Ok(v) = env::var("ALAMAL_MODAL_CLOSE_DELAY_MS") {
            self.ui.modal_close_delay_ms = v.parse().unwrap_or(self.ui.modal_close_delay_ms);
        }
        if let Ok(v) = env::var("ALAMAL_MESSAGE_CLEAR_DELAY_MS") {
            self.ui.message_clear_delay_ms = v.parse().unwrap_or(self.ui.message_clear_delay_ms);
        }
        if let Ok(v) = env::var("ALAMAL_BACKUP_MESSAGE_DELAY_MS") {
            self.ui.backup_message_delay_ms = v.parse().unwrap_or(self.ui.backup_message_delay_ms);
        }

        if let Ok(v) = env::var("ALAMAL_CONFIG_DIR") {
            self.storage.config_dir = Some(PathBuf::from(v));
        }
        if let Ok(v) = env::var("ALAMAL_DOWNLOAD_DIR") {
            self.storage.download_dir = PathBuf::from(v);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:8080".to_string(),
                enable_request_logging: true,
            },
            ui: UiConfig::default(),
            storage: StorageConfig {
                config_dir: None,
                download_dir: PathBuf::from("."),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "http://105.157.46.152:8080".to_string(),
                enable_request_logging: true,
            },
            ui: UiConfig::default(),
            storage: StorageConfig {
                config_dir: None,
                download_dir: PathBuf::from("."),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "http://alamal-management.duckdns.org".to_string(),
                enable_request_logging: false,
            },
            ui: UiConfig::default(),
            storage: StorageConfig {
                config_dir: None,
                download_dir: PathBuf::from("."),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<ConsoleConfig> = Lazy::new(ConsoleConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static ConsoleConfig {
    &CONFIG
}
