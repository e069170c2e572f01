use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use chrono::Local;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::General;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} - {l} - {m}{n}";

/// Initializes logging to a fresh timestamped log file, and to the console
/// when so configured. Returns the path of the created log file.
///
/// # Arguments
///
/// * 'general' - the general configuration section
pub fn setup_logging(general: &General) -> Result<PathBuf> {
    fs::create_dir_all(&general.log_path)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let log_file = Path::new(&general.log_path).join(format!("rain_monitor_{}.log", timestamp));

    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&log_file)?;

    let mut config = log4rs::Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();

        config = config.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    log4rs::init_config(config.build(root.build(general.log_level))?)?;

    Ok(log_file)
}
