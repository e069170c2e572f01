use std::collections::BTreeMap;
use std::time::Duration;
use log::{info, warn};
use thiserror::Error;
use ureq::Agent;
use crate::config::{City, Config};
use crate::models::meteo_forecast::{ForecastResponse, ForecastSeries};

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

#[derive(Error, Debug)]
pub enum MeteoError {
    #[error("MeteoError::Transport: {0}")]
    Transport(#[from] ureq::Error),
    #[error("MeteoError::Document: {0}")]
    Document(String),
}

impl From<serde_json::Error> for MeteoError {
    fn from(e: serde_json::Error) -> Self {
        MeteoError::Document(e.to_string())
    }
}

/// Struct for fetching hourly precipitation forecasts from Open-Meteo
pub struct Meteo {
    agent: Agent,
    cities: BTreeMap<String, City>,
    default_city: String,
}

impl Meteo {
    /// Returns a Meteo struct ready for fetching forecasts for the
    /// configured cities
    ///
    /// # Arguments
    ///
    /// * 'config' - the loaded configuration
    pub fn new(config: &Config) -> Self {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();

        let agent = agent_config.into();

        Self {
            agent,
            cities: config.cities.clone(),
            default_city: config.alert.default_city.clone(),
        }
    }

    /// Retrieves a one day hourly precipitation forecast for the given city.
    ///
    /// An unknown city key falls back to the configured default city rather
    /// than failing. The response is validated to contain the hourly
    /// probability and precipitation arrays and is otherwise passed through
    /// untransformed.
    ///
    /// # Arguments
    ///
    /// * 'city' - key into the configured city table
    pub fn fetch_forecast(&self, city: &str) -> Result<ForecastSeries, MeteoError> {
        let city = self.resolve(city);

        info!("Fetching weather data for {}", city.name);

        let json = self.agent
            .get(FORECAST_URL)
            .query("latitude", city.latitude.to_string())
            .query("longitude", city.longitude.to_string())
            .query("hourly", "precipitation_probability,precipitation")
            .query("timezone", &city.timezone)
            .query("forecast_days", "1")
            .call()?
            .body_mut()
            .read_to_string()?;

        let response: ForecastResponse = serde_json::from_str(&json)?;
        let series = validate(response)?;

        info!("Successfully fetched weather data for {}", city.name);

        Ok(series)
    }

    /// Returns the display name for the given city key, or the key itself
    /// when it is not in the table
    ///
    /// # Arguments
    ///
    /// * 'city' - key into the configured city table
    pub fn display_name(&self, city: &str) -> String {
        self.cities
            .get(city)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| city.to_string())
    }

    fn resolve(&self, city: &str) -> &City {
        if let Some(city) = self.cities.get(city) {
            return city;
        }
        warn!("Unknown city '{}', using default '{}'", city, self.default_city);

        // presence of the default key is checked at config load
        &self.cities[&self.default_city]
    }
}

/// Checks that the response carries the hourly block and both expected
/// parameter arrays, absence of either is a data format error
///
/// # Arguments
///
/// * 'response' - the parsed forecast response
fn validate(response: ForecastResponse) -> Result<ForecastSeries, MeteoError> {
    let Some(hourly) = response.hourly else {
        warn!("API response missing 'hourly' data");
        return Err(MeteoError::Document("response missing 'hourly' data".to_string()));
    };
    let Some(probability) = hourly.precipitation_probability else {
        warn!("API response missing precipitation probability data");
        return Err(MeteoError::Document("response missing precipitation probability data".to_string()));
    };
    let Some(precipitation) = hourly.precipitation else {
        warn!("API response missing precipitation data");
        return Err(MeteoError::Document("response missing precipitation data".to_string()));
    };

    Ok(ForecastSeries { time: hourly.time, probability, precipitation })
}
