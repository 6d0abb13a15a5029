// crates/config/src/validator.rs

use prigorod_core::{PrigorodError, PrigorodResult};
use tracing::warn;

use crate::PrigorodConfig;

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &PrigorodConfig) -> PrigorodResult<()> {
        if config.app.port == 0 {
            return Err(PrigorodError::Config("Invalid port".to_string()));
        }
        if config.app.utc_offset_hours < -14 || config.app.utc_offset_hours > 14 {
            return Err(PrigorodError::Config(
                "UTC offset must be within ±14 hours".to_string(),
            ));
        }

        if config.schedule.timeout_s == 0 {
            return Err(PrigorodError::Config(
                "Schedule timeout must be > 0".to_string(),
            ));
        }
        if config.schedule.base_url.is_empty() {
            return Err(PrigorodError::Config("Empty schedule base URL".to_string()));
        }

        if !config.data.stations_file.exists() {
            warn!("station directory does not exist: {:?}", config.data.stations_file);
        }
        if !config.data.morph_dict_file.exists() {
            warn!("morph dictionary does not exist: {:?}", config.data.morph_dict_file);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrigorodConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(ConfigValidator::validate(&PrigorodConfig::default()).is_ok());
    }

    #[test]
    fn rejects_zero_port() {
        let mut config = PrigorodConfig::default();
        config.app.port = 0;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn rejects_out_of_range_offset() {
        let mut config = PrigorodConfig::default();
        config.app.utc_offset_hours = 15;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = PrigorodConfig::default();
        config.schedule.timeout_s = 0;
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
