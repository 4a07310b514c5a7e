use axum::extract::{Extension, Json, Path};

use crate::api::PricingAPI;
use crate::entities::{FareEstimate, FareEstimateRequest, PricingConfig, VehicleType};
use crate::error::Error;
use crate::server::DynAPI;

pub async fn estimate(
    Extension(api): Extension<DynAPI>,
    Json(request): Json<FareEstimateRequest>,
) -> Result<Json<FareEstimate>, Error> {
    let estimate = api.estimate_fare(request).await?;

    Ok(estimate.into())
}

pub async fn list_configs(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<Vec<PricingConfig>>, Error> {
    let configs = api.list_configs().await?;

    Ok(configs.into())
}

pub async fn find_config(
    Extension(api): Extension<DynAPI>,
    Path(vehicle_type): Path<String>,
) -> Result<Json<PricingConfig>, Error> {
    let config = api.find_config(VehicleType::new(&vehicle_type)).await?;

    Ok(config.into())
}
