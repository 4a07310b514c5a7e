use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{select_active, PricingConfigStore};
use crate::{
    entities::{PricingConfig, VehicleType},
    error::Error,
};

/// Process-local rate card store, used when no database is configured.
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    configs: RwLock<Vec<PricingConfig>>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configs as-is, skipping the write-side invariant checks.
    #[cfg(test)]
    pub(crate) fn with_raw_configs(configs: Vec<PricingConfig>) -> Self {
        Self {
            configs: RwLock::new(configs),
        }
    }
}

#[async_trait]
impl PricingConfigStore for InMemoryConfigStore {
    #[tracing::instrument(skip(self))]
    async fn get_active_config(&self, vehicle_type: &VehicleType) -> Result<PricingConfig, Error> {
        let candidates = self
            .configs
            .read()
            .await
            .iter()
            .filter(|config| config.is_active && &config.vehicle_type == vehicle_type)
            .cloned()
            .collect();

        select_active(vehicle_type, candidates)
    }

    #[tracing::instrument(skip(self))]
    async fn list_active_configs(&self) -> Result<Vec<PricingConfig>, Error> {
        let mut active: Vec<PricingConfig> = self
            .configs
            .read()
            .await
            .iter()
            .filter(|config| config.is_active)
            .cloned()
            .collect();

        active.sort_by(|a, b| a.vehicle_type.cmp(&b.vehicle_type));

        Ok(active)
    }

    #[tracing::instrument(skip(self, config), fields(id = %config.id, vehicle_type = %config.vehicle_type))]
    async fn save_config(&self, config: PricingConfig) -> Result<PricingConfig, Error> {
        config.validate()?;

        let mut configs = self.configs.write().await;

        if config.is_active {
            for other in configs.iter_mut() {
                if other.id != config.id
                    && other.is_active
                    && other.vehicle_type == config.vehicle_type
                {
                    tracing::info!("deactivating pricing config {}", other.id);
                    other.deactivate();
                }
            }
        }

        match configs.iter_mut().find(|existing| existing.id == config.id) {
            Some(existing) => *existing = config.clone(),
            None => configs.push(config.clone()),
        }

        Ok(config)
    }
}
