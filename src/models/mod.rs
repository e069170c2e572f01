pub mod forecast;
pub mod meteo_forecast;
