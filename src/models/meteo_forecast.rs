use serde::Deserialize;

/// Raw Open-Meteo forecast response. The hourly block and its per-parameter
/// arrays are optional so that a missing field surfaces as a validation
/// error rather than a bare parse failure.
#[derive(Deserialize)]
pub struct ForecastResponse {
    pub hourly: Option<HourlyResponse>,
}

#[derive(Deserialize)]
pub struct HourlyResponse {
    pub time: Vec<String>,
    pub precipitation_probability: Option<Vec<f64>>,
    pub precipitation: Option<Vec<f64>>,
}

/// Validated hourly forecast, three parallel arrays straight from the API
#[derive(Debug, Clone)]
pub struct ForecastSeries {
    pub time: Vec<String>,
    pub probability: Vec<f64>,
    pub precipitation: Vec<f64>,
}
