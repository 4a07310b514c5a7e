use crate::{
    entities::{FareBreakdown, FareEstimate, FareEstimateRequest, PricingConfig, SurgeMultiplier},
    error::{invalid_trip_geometry_error, Error},
    pricing::money::round2,
};

/// Turns trip geometry, a rate card and a surge multiplier into an itemized
/// fare. Holds nothing but the deployment currency.
#[derive(Clone, Debug)]
pub struct FareCalculator {
    currency: String,
}

impl FareCalculator {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    #[tracing::instrument(skip(self, request, config), fields(vehicle_type = %config.vehicle_type))]
    pub fn estimate(
        &self,
        request: &FareEstimateRequest,
        distance_km: f64,
        duration_min: f64,
        config: &PricingConfig,
        surge_multiplier: SurgeMultiplier,
    ) -> Result<FareEstimate, Error> {
        if !is_valid_measure(distance_km) || !is_valid_measure(duration_min) {
            return Err(invalid_trip_geometry_error(distance_km, duration_min));
        }

        config.validate()?;

        let surge = surge_multiplier.value();

        let distance_fare = distance_km * config.per_km_rate;
        let time_fare = duration_min * config.per_minute_rate;
        let subtotal = config.base_fare + distance_fare + time_fare;
        let floored_subtotal = subtotal.max(config.minimum_fare);
        let surge_fare = floored_subtotal * (surge - 1.0);

        let unrounded_total = floored_subtotal * surge + config.booking_fee;

        // finite inputs can still overflow once multiplied out
        if !unrounded_total.is_finite() || !surge_fare.is_finite() {
            tracing::warn!(distance_km, duration_min, "fare amount overflowed");
            return Err(invalid_trip_geometry_error(distance_km, duration_min));
        }

        // rounded once, from unrounded intermediates
        let total = round2(unrounded_total);

        if floored_subtotal > subtotal {
            tracing::debug!(subtotal, minimum_fare = config.minimum_fare, "minimum fare applied");
        }

        if surge_multiplier.is_surging() {
            tracing::debug!(surge, surge_fare, "surge applied");
        }

        let breakdown = FareBreakdown {
            base_fare: round2(config.base_fare),
            distance_fare: round2(distance_fare),
            time_fare: round2(time_fare),
            minimum_fare_adjustment: round2(floored_subtotal - subtotal),
            surge_fare: round2(surge_fare),
            booking_fee: round2(config.booking_fee),
            total,
        };

        tracing::debug!(
            pickup_lat = request.pickup_lat,
            pickup_lng = request.pickup_lng,
            total,
            "fare estimated"
        );

        Ok(FareEstimate {
            distance: distance_km,
            duration: duration_min,
            surge_multiplier,
            breakdown,
            vehicle_type: config.vehicle_type.clone(),
            currency: self.currency.clone(),
        })
    }
}

fn is_valid_measure(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
