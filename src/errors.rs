use thiserror::Error;
use crate::manager_mail::errors::MailError;
use crate::manager_meteo::MeteoError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ConfigError::Io: {0}")]
    Io(#[from] std::io::Error),
    #[error("ConfigError::Toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("ConfigError: {0}")]
    Message(String),
}

impl From<&str> for ConfigError {
    fn from(e: &str) -> Self {
        ConfigError::Message(e.to_string())
    }
}

/// Errors that can end a monitoring run, raised by the steps the
/// orchestrator retries
#[derive(Error, Debug)]
pub enum RunError {
    #[error("weather fetch failed: {0}")]
    Meteo(#[from] MeteoError),
    #[error("mail delivery failed: {0}")]
    Mail(#[from] MailError),
}
