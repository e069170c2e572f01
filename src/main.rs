use std::{env, process};
use chrono::Local;
use log::{error, info};
use crate::alert::send_rain_alert;
use crate::analysis::analyze_rain;
use crate::config::{Config, load_config};
use crate::errors::RunError;
use crate::logging::setup_logging;
use crate::manager_mail::Mail;
use crate::manager_meteo::Meteo;

mod alert;
mod analysis;
mod config;
mod errors;
mod logging;
mod manager_mail;
mod manager_meteo;
mod models;
mod retry;

fn main() {
    let config_path = env::var("RAIN_MONITOR_CONFIG")
        .unwrap_or_else(|_| "rain_monitor.toml".to_string());

    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration from {}: {}", config_path, e);
            process::exit(1);
        }
    };

    let log_file = match setup_logging(&config.general) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error setting up logging: {}", e);
            process::exit(1);
        }
    };

    info!("rain-monitor version: {}", env!("CARGO_PKG_VERSION"));
    info!("Rain monitoring script started. Log file: {}", log_file.display());

    if let Err(e) = run(&config) {
        error!("Rain monitoring check failed: {}", e);
        process::exit(1);
    }
}

/// Runs one monitoring pass, fetch then analyze then notify when needed.
/// A failed analysis halts the pass without notifying, fetch and send
/// errors have already exhausted their retries when they surface here.
fn run(config: &Config) -> Result<(), RunError> {
    info!("=== Rain Monitoring Check Started ===");

    let meteo = Meteo::new(config);
    let series = crate::retry!(|| meteo.fetch_forecast(&config.alert.city))?;

    let city_name = meteo.display_name(&config.alert.city);
    let Some(summary) = analyze_rain(&series, &city_name, Local::now(), &config.alert) else {
        error!("Failed to analyze weather data");
        return Ok(());
    };

    if summary.alert_triggered {
        if config.alert.testing_mode && summary.max_probability < config.alert.threshold {
            info!(
                "TEST EMAIL triggered! Maximum probability: {}% (below threshold but testing mode is ON)",
                summary.max_probability
            );
        } else {
            info!("Rain alert triggered! Maximum probability: {}%", summary.max_probability);
        }

        let mail = Mail::new(&config.mail)?;
        crate::retry!(|| send_rain_alert(&mail, &summary, &config.alert))?;
    } else {
        info!(
            "No alert needed. Maximum probability: {}% (threshold: {}%)",
            summary.max_probability, config.alert.threshold
        );
    }

    info!("=== Rain Monitoring Check Completed ===");

    Ok(())
}
