use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::application::services::{DEFAULT_MAX_FILE_SIZE_BYTES, DEFAULT_WORKER_POOL_SIZE};
use crate::domain::{FileTypeRegistry, FileTypeRule};
use crate::infrastructure::llm::{DEFAULT_BASE_URL, DEFAULT_MODEL};

use super::configuration_error::ConfigurationError;
use super::environment::Environment;

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const PLACEHOLDER_API_KEY: &str = "your_gemini_api_key_here";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub upload: UploadSettings,
    pub batch: BatchSettings,
    pub worker_pool: WorkerPoolSettings,
    pub model: ModelSettings,
    pub logging: LoggingSettings,
    /// Per-extension overrides of the built-in file type table.
    #[serde(default)]
    pub file_types: HashMap<String, FileTypeRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Ceiling for a whole request body, which may carry several files.
    pub max_request_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadSettings {
    pub max_file_size_bytes: u64,
    pub allowed_extensions: Vec<String>,
    pub staging_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSettings {
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerPoolSettings {
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    pub api_key: String,
    pub name: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub verify_on_startup: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_request_bytes: 50 * 1024 * 1024,
        }
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            allowed_extensions: vec!["pdf".to_string(), "csv".to_string()],
            staging_dir: std::env::temp_dir().join("lumen-relay"),
        }
    }
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            allowed_extensions: vec!["pdf".to_string()],
        }
    }
}

impl Default for WorkerPoolSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_WORKER_POOL_SIZE,
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            name: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 120,
            verify_on_startup: false,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Loads settings from the working directory. See [`Settings::load_from`].
    pub fn load(environment: Environment) -> Result<Self, ConfigurationError> {
        Self::load_from(Path::new("."), environment)
    }

    /// Layers, lowest precedence first: built-in defaults,
    /// `appsettings.base.toml`, `appsettings.{environment}.toml`, `APP_*`
    /// variables (`__` separates sections) and finally `GOOGLE_API_KEY`.
    pub fn load_from(config_dir: &Path, environment: Environment) -> Result<Self, ConfigurationError> {
        let base = config_dir.join("appsettings.base");
        let per_environment = config_dir.join(format!("appsettings.{}", environment.as_str()));

        let configuration = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name(&base.to_string_lossy()).required(false))
            .add_source(File::with_name(&per_environment.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("upload.allowed_extensions")
                    .with_list_parse_key("batch.allowed_extensions")
                    .try_parsing(true),
            )
            .set_override_option(
                "model.api_key",
                std::env::var(API_KEY_VAR).ok().filter(|key| !key.trim().is_empty()),
            )?
            .build()?;

        Ok(configuration.try_deserialize()?)
    }

    pub fn registry(&self) -> FileTypeRegistry {
        FileTypeRegistry::builtin().with_overrides(self.file_types.clone())
    }

    /// Checks the credential and that every allowed extension is known to the
    /// registry.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let api_key = self.model.api_key.trim();
        if api_key.is_empty() {
            return Err(ConfigurationError::MissingCredential);
        }
        if api_key == PLACEHOLDER_API_KEY {
            return Err(ConfigurationError::PlaceholderCredential);
        }

        if self.worker_pool.size == 0 {
            return Err(ConfigurationError::InvalidValue {
                key: "worker_pool.size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.upload.max_file_size_bytes == 0 {
            return Err(ConfigurationError::InvalidValue {
                key: "upload.max_file_size_bytes",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.model.name.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue {
                key: "model.name",
                reason: "must not be empty".to_string(),
            });
        }

        let missing = self.registry().missing_rules(
            self.upload
                .allowed_extensions
                .iter()
                .chain(&self.batch.allowed_extensions),
        );
        if !missing.is_empty() {
            return Err(ConfigurationError::MissingFileTypeRules(missing));
        }

        Ok(())
    }
}
