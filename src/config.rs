use std::io::ErrorKind;
use std::path::PathBuf;
use std::{fs, io};

use serde::Deserialize;

/// Backend selection: `type` picks the variant, `data` holds its settings.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum MetricsConfig {
    Dummy,
    Statsd(StatsdConfig),
    Logging(LoggingConfig),
}

#[derive(Deserialize, Debug, Clone)]
pub struct StatsdConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub prefix: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Report interval in seconds. Values below 1 are treated as 1.
    pub timeout: u64,
    /// Reports go to `<log_file_path>/metrics.log`; unset or empty means stdout.
    pub log_file_path: Option<PathBuf>,
    pub max_files: usize,
    /// Size of each rotated file, in MB.
    pub max_file_size: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            timeout: 60,
            log_file_path: None,
            max_files: 3,
            max_file_size: 10,
        }
    }
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<MetricsConfig> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.to_str().unwrap(), e))),
    };

    match toml::from_str::<MetricsConfig>(cfg_content.as_str()) {
        Ok(cfg) => Ok(cfg),
        Err(e) => Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    }
}
