// crates/config/src/lib.rs

use std::path::PathBuf;

use prigorod_nlu::NormalizerConfig;
use prigorod_schedule::ScheduleConfig;
use serde::{Deserialize, Serialize};

pub mod loader;
pub mod validator;

pub use loader::ConfigLoader;
pub use validator::ConfigValidator;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrigorodConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub limits: LimitSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_cors_enabled")]
    pub cors_enabled: bool,
    /// Whole-hour shift from UTC for all date arithmetic. Moscow, no DST.
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_cors_enabled() -> bool {
    true
}

const fn default_utc_offset_hours() -> i32 {
    3
}

fn default_log_level() -> String {
    "prigorod=debug,info".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: default_cors_enabled(),
            utc_offset_hours: default_utc_offset_hours(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_stations_file")]
    pub stations_file: PathBuf,
    #[serde(default = "default_morph_dict_file")]
    pub morph_dict_file: PathBuf,
}

fn default_stations_file() -> PathBuf {
    PathBuf::from("data/stations.json")
}

fn default_morph_dict_file() -> PathBuf {
    PathBuf::from("data/morph_ru.json")
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            stations_file: default_stations_file(),
            morph_dict_file: default_morph_dict_file(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitSettings {
    /// Requests allowed per user for the process lifetime; 0 = unlimited.
    #[serde(default)]
    pub max_requests: u64,
    #[serde(default)]
    pub admins: Vec<String>,
}
