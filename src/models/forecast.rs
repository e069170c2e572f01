/// One forecast hour as included in a summary
#[derive(Debug, Clone, PartialEq)]
pub struct HourDetail {
    pub time: String,
    pub probability: f64,
    pub precipitation: f64,
}

/// Aggregation of the next few forecast hours for one city, produced once
/// per run and handed to the notifier
#[derive(Debug, Clone)]
pub struct ForecastSummary {
    pub city: String,
    pub check_time: String,
    pub hours: Vec<HourDetail>,
    pub max_probability: f64,
    pub total_precipitation: f64,
    pub alert_triggered: bool,
}
