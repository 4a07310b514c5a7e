use async_trait::async_trait;

use crate::entities::{FareEstimate, FareEstimateRequest, PricingConfig, VehicleType};
use crate::error::Error;

#[async_trait]
pub trait PricingAPI {
    async fn estimate_fare(&self, request: FareEstimateRequest) -> Result<FareEstimate, Error>;
    async fn list_configs(&self) -> Result<Vec<PricingConfig>, Error>;
    async fn find_config(&self, vehicle_type: VehicleType) -> Result<PricingConfig, Error>;
}

pub trait API: PricingAPI {}
