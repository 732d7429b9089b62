use std::{
    fs::File,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    LapchartError,
    client::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_S},
};

const CONFIG_DIR_NAME: &str = "lapchart";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub request_timeout_s: u64,
    pub show_trend_line: bool,
    pub last_year: String,
    pub last_race: String,
    pub last_driver: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_s: DEFAULT_REQUEST_TIMEOUT_S,
            show_trend_line: false,
            last_year: String::new(),
            last_race: String::new(),
            last_driver: String::new(),
        }
    }
}

impl AppConfig {
    pub fn local_file_path() -> Option<PathBuf> {
        Some(
            dirs::config_dir()?
                .join(CONFIG_DIR_NAME)
                .join(CONFIG_FILE_NAME),
        )
    }

    /// Reads the config from the user's config directory. Missing or
    /// unreadable files yield `None`.
    pub fn from_local_file() -> Option<Self> {
        let config_path = Self::local_file_path()?;
        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config file {:?}: {}", config_path, e);
                None
            }
        }
    }

    pub fn load_from(config_path: &Path) -> Result<Option<Self>, LapchartError> {
        let file = match File::open(config_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LapchartError::ConfigIOError { source: e }),
        };
        serde_json::from_reader(file)
            .map(Some)
            .map_err(|e| LapchartError::ConfigSerializeError { source: e })
    }

    pub fn save(&self) -> Result<(), LapchartError> {
        let config_path = Self::local_file_path().ok_or(LapchartError::NoConfigDir)?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), LapchartError> {
        if let Some(parent) = config_path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| LapchartError::ConfigIOError { source: e })?;
        }

        let file = File::create(config_path)
            .map_err(|e| LapchartError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| LapchartError::ConfigSerializeError { source: e })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_s)
    }
}
