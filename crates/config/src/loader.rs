// crates/config/src/loader.rs

use std::path::Path;

use prigorod_core::{PrigorodError, PrigorodResult};

use crate::PrigorodConfig;

pub struct ConfigLoader;

impl ConfigLoader {
    /// File config (or defaults when no path is given), then env overrides.
    pub fn load(path: Option<&Path>) -> PrigorodResult<PrigorodConfig> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => PrigorodConfig::default(),
        };
        Self::apply_env(config)
    }

    pub fn load_from_file(path: &Path) -> PrigorodResult<PrigorodConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PrigorodError::Config(format!("failed to read config: {e}")))?;

        let config: PrigorodConfig = toml::from_str(&content)
            .map_err(|e| PrigorodError::Config(format!("failed to parse config: {e}")))?;

        Ok(config)
    }

    pub fn save_to_file(path: &Path, config: &PrigorodConfig) -> PrigorodResult<()> {
        let content = toml::to_string_pretty(config)
            .map_err(|e| PrigorodError::Config(format!("failed to serialize config: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| PrigorodError::Config(format!("failed to write config: {e}")))?;

        Ok(())
    }

    fn apply_env(mut config: PrigorodConfig) -> PrigorodResult<PrigorodConfig> {
        if let Ok(host) = std::env::var("PRIGOROD_HOST") {
            config.app.host = host;
        }
        if let Ok(port) = std::env::var("PRIGOROD_PORT") {
            config.app.port = port
                .parse()
                .map_err(|_| PrigorodError::Config("invalid PRIGOROD_PORT".to_string()))?;
        }
        if let Ok(offset) = std::env::var("PRIGOROD_UTC_OFFSET") {
            config.app.utc_offset_hours = offset
                .parse()
                .map_err(|_| PrigorodError::Config("invalid PRIGOROD_UTC_OFFSET".to_string()))?;
        }
        if let Ok(stations) = std::env::var("PRIGOROD_STATIONS_FILE") {
            config.data.stations_file = stations.into();
        }
        if let Ok(dict) = std::env::var("PRIGOROD_MORPH_FILE") {
            config.data.morph_dict_file = dict.into();
        }
        if let Ok(max) = std::env::var("PRIGOROD_MAX_REQUESTS") {
            config.limits.max_requests = max
                .parse()
                .map_err(|_| PrigorodError::Config("invalid PRIGOROD_MAX_REQUESTS".to_string()))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigLoader;
    use crate::PrigorodConfig;

    #[test]
    fn defaults_apply_to_an_empty_document() {
        let config: PrigorodConfig = toml::from_str("").unwrap();
        assert_eq!(config.app.port, 3000);
        assert_eq!(config.app.utc_offset_hours, 3);
        assert_eq!(config.limits.max_requests, 0);
        assert_eq!(config.schedule.timeout_s, 4);
    }

    #[test]
    fn file_values_override_defaults() {
        let config: PrigorodConfig = toml::from_str(
            r#"
            [app]
            port = 8080
            utc_offset_hours = 5

            [schedule]
            base_url = "http://localhost:9999/v3.0"

            [limits]
            max_requests = 50
            admins = ["admin-1"]
            "#,
        )
        .unwrap();

        assert_eq!(config.app.port, 8080);
        assert_eq!(config.app.utc_offset_hours, 5);
        assert_eq!(config.schedule.base_url, "http://localhost:9999/v3.0");
        assert_eq!(config.limits.max_requests, 50);
        assert_eq!(config.limits.admins, vec!["admin-1".to_string()]);
    }

    #[test]
    fn saved_config_loads_back_unchanged() {
        let path = std::env::temp_dir().join(format!("prigorod-config-{}.toml", std::process::id()));

        let mut config = PrigorodConfig::default();
        config.app.port = 8080;
        config.limits.max_requests = 7;
        config.limits.admins = vec!["admin-1".to_string()];

        ConfigLoader::save_to_file(&path, &config).unwrap();
        let loaded = ConfigLoader::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.app.port, 8080);
        assert_eq!(loaded.limits.max_requests, 7);
        assert_eq!(loaded.limits.admins, vec!["admin-1".to_string()]);
    }
}
