mod memory;
mod postgres;
mod seed;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::{PricingConfig, VehicleType},
    error::{config_not_found_error, multiple_active_configs_error, Error},
};

pub use memory::InMemoryConfigStore;
pub use postgres::PgConfigStore;
pub use seed::PricingSeed;

/// Source of rate cards. Writers must keep at most one active config per
/// vehicle type; readers still refuse to guess when that does not hold.
#[async_trait]
pub trait PricingConfigStore {
    async fn get_active_config(&self, vehicle_type: &VehicleType) -> Result<PricingConfig, Error>;

    async fn list_active_configs(&self) -> Result<Vec<PricingConfig>, Error>;

    /// Validates and stores `config`. Storing an active config deactivates
    /// the previously active one for the same vehicle type.
    async fn save_config(&self, config: PricingConfig) -> Result<PricingConfig, Error>;
}

pub type DynConfigStore = Arc<dyn PricingConfigStore + Send + Sync>;

fn select_active(
    vehicle_type: &VehicleType,
    mut candidates: Vec<PricingConfig>,
) -> Result<PricingConfig, Error> {
    match candidates.len() {
        0 => Err(config_not_found_error(vehicle_type.as_str())),
        1 => Ok(candidates.remove(0)),
        n => {
            tracing::error!("{} active pricing configs for vehicle type {}", n, vehicle_type);
            Err(multiple_active_configs_error(vehicle_type.as_str()))
        }
    }
}
