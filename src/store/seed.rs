use std::path::Path;

use serde::{Deserialize, Serialize};

use super::PricingConfigStore;
use crate::{entities::PricingConfig, error::Error, pricing::SurgeSchedule};

/// Boot-time pricing data: rate cards plus the surge schedule.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSeed {
    #[serde(default)]
    pub configs: Vec<PricingConfig>,
    #[serde(default)]
    pub surge: SurgeSchedule,
}

impl PricingSeed {
    #[tracing::instrument]
    pub async fn load(path: &Path) -> Result<Self, Error> {
        let raw = tokio::fs::read_to_string(path).await?;

        Ok(serde_json::from_str(&raw)?)
    }

    /// Writes every config through the store, in file order, so a later
    /// active entry supersedes an earlier one for the same vehicle type.
    #[tracing::instrument(skip_all)]
    pub async fn apply(
        &self,
        store: &(dyn PricingConfigStore + Send + Sync),
    ) -> Result<usize, Error> {
        for config in self.configs.iter() {
            store.save_config(config.clone()).await?;
        }

        tracing::info!("seeded {} pricing config(s)", self.configs.len());

        Ok(self.configs.len())
    }
}
