use super::Engine;

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    api::PricingAPI,
    entities::{FareEstimate, FareEstimateRequest, PricingConfig, VehicleType},
    error::Error,
    pricing::resolve_surge,
};

#[async_trait]
impl PricingAPI for Engine {
    #[tracing::instrument(skip(self), fields(vehicle_type = %request.vehicle_type))]
    async fn estimate_fare(&self, request: FareEstimateRequest) -> Result<FareEstimate, Error> {
        request.validate()?;

        let config = tokio::time::timeout(
            self.upstream_timeout,
            self.store.get_active_config(&request.vehicle_type),
        )
        .await??;

        let route = tokio::time::timeout(
            self.upstream_timeout,
            self.routing.route(request.pickup(), request.dropoff()),
        )
        .await??;

        let time_of_day = request.time_of_day.unwrap_or_else(Utc::now);

        let surge = resolve_surge(
            self.surge.as_ref(),
            request.pickup_lat,
            request.pickup_lng,
            time_of_day,
            self.surge_timeout,
        )
        .await;

        let estimate = self.calculator.estimate(
            &request,
            route.distance_km,
            route.duration_min,
            &config,
            surge,
        )?;

        tracing::info!(
            total = estimate.breakdown.total,
            surge = surge.value(),
            distance_km = route.distance_km,
            "fare estimated"
        );

        Ok(estimate)
    }

    #[tracing::instrument(skip(self))]
    async fn list_configs(&self) -> Result<Vec<PricingConfig>, Error> {
        let configs =
            tokio::time::timeout(self.upstream_timeout, self.store.list_active_configs()).await??;

        Ok(configs)
    }

    #[tracing::instrument(skip(self))]
    async fn find_config(&self, vehicle_type: VehicleType) -> Result<PricingConfig, Error> {
        let config = tokio::time::timeout(
            self.upstream_timeout,
            self.store.get_active_config(&vehicle_type),
        )
        .await??;

        Ok(config)
    }
}
