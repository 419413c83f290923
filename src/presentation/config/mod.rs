mod configuration_error;
mod environment;
mod settings;

pub use configuration_error::ConfigurationError;
pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    API_KEY_VAR, BatchSettings, LoggingSettings, ModelSettings, PLACEHOLDER_API_KEY,
    ServerSettings, Settings, UploadSettings, WorkerPoolSettings,
};
