use std::collections::BTreeMap;
use std::{env, fs};
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

#[derive(Deserialize, Clone)]
pub struct City {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

#[derive(Deserialize)]
pub struct AlertParameters {
    pub city: String,
    pub default_city: String,
    pub threshold: f64,
    pub testing_mode: bool,
}

#[derive(Deserialize)]
pub struct MailParameters {
    pub smtp_user: String,
    #[serde(default)]
    pub smtp_password: String,
    pub smtp_endpoint: String,
    pub from: String,
    pub to: String,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Config {
    pub alert: AlertParameters,
    pub cities: BTreeMap<String, City>,
    pub mail: MailParameters,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// The SMTP password may be left out of the file and supplied through the
/// SMTP_PASSWORD environment variable instead, which takes precedence.
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {

    let toml = fs::read_to_string(config_path)?;
    let mut config: Config = toml::from_str(&toml)?;

    if let Ok(password) = env::var("SMTP_PASSWORD") {
        config.mail.smtp_password = password;
    }
    if config.mail.smtp_password.is_empty() {
        return Err(ConfigError::from("SMTP password not given, set SMTP_PASSWORD or mail.smtp_password"));
    }

    if !config.cities.contains_key(&config.alert.default_city) {
        return Err(ConfigError::from("default_city missing from the cities table"));
    }

    Ok(config)
}
