// src/app.rs
use std::sync::Arc;

use prigorod_api::{ApiConfig, ApiServer, RequestLimiter, SkillHandlers};
use prigorod_config::PrigorodConfig;
use prigorod_core::{zone, PrigorodResult};
use prigorod_nlu::morph::{DictionaryMorph, Morphology};
use prigorod_nlu::Normalizer;
use prigorod_schedule::{RaspClient, StationDirectory};
use tracing::{info, warn};

pub struct PrigorodApp {
    server: ApiServer,
}

impl PrigorodApp {
    pub fn new(config: PrigorodConfig) -> PrigorodResult<Self> {
        info!("Initializing Prigorod components...");

        let zone = zone(config.app.utc_offset_hours)?;

        let morph: Arc<dyn Morphology> = if config.data.morph_dict_file.exists() {
            Arc::new(DictionaryMorph::from_file(&config.data.morph_dict_file)?)
        } else {
            warn!("morph dictionary missing, word forms pass through unchanged");
            DictionaryMorph::empty()
        };

        let directory = Arc::new(StationDirectory::from_file(&config.data.stations_file)?);
        let schedule = Arc::new(RaspClient::new(config.schedule.clone())?);

        let normalizer = Normalizer::with_config(config.normalizer.clone(), morph.clone());
        let limiter = RequestLimiter::new(
            config.limits.max_requests,
            config.limits.admins.iter().cloned(),
        );

        let handlers = Arc::new(SkillHandlers::new(
            normalizer, directory, schedule, morph, limiter, zone,
        ));

        let api_config = ApiConfig {
            host: config.app.host.clone(),
            port: config.app.port,
            cors_enabled: config.app.cors_enabled,
        };

        Ok(Self {
            server: ApiServer::new(api_config, handlers),
        })
    }

    pub async fn run(&self) -> PrigorodResult<()> {
        self.server.serve().await
    }
}
