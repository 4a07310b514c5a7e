use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, VehicleType};
use crate::error::{invalid_input_error, Error};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareEstimateRequest {
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    pub dropoff_lat: f64,
    pub dropoff_lng: f64,
    pub vehicle_type: VehicleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<DateTime<Utc>>,
}

impl FareEstimateRequest {
    pub fn pickup(&self) -> Coordinates {
        Coordinates::new(self.pickup_lat, self.pickup_lng)
    }

    pub fn dropoff(&self) -> Coordinates {
        Coordinates::new(self.dropoff_lat, self.dropoff_lng)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.pickup().validate()?;
        self.dropoff().validate()?;

        if self.vehicle_type.is_empty() {
            return Err(invalid_input_error());
        }

        Ok(())
    }
}

/// Demand factor applied to the floored subtotal. Always finite and >= 1.0.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SurgeMultiplier(f64);

impl SurgeMultiplier {
    pub const NONE: SurgeMultiplier = SurgeMultiplier(1.0);

    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && value >= 1.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_surging(&self) -> bool {
        self.0 > 1.0
    }
}

impl Default for SurgeMultiplier {
    fn default() -> Self {
        Self::NONE
    }
}

impl TryFrom<f64> for SurgeMultiplier {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(invalid_input_error)
    }
}

impl From<SurgeMultiplier> for f64 {
    fn from(multiplier: SurgeMultiplier) -> Self {
        multiplier.0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareBreakdown {
    pub base_fare: f64,
    pub distance_fare: f64,
    pub time_fare: f64,
    /// Amount added to lift the subtotal up to the minimum fare.
    pub minimum_fare_adjustment: f64,
    pub surge_fare: f64,
    pub booking_fee: f64,
    pub total: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareEstimate {
    pub distance: f64,
    pub duration: f64,
    pub surge_multiplier: SurgeMultiplier,
    pub breakdown: FareBreakdown,
    pub vehicle_type: VehicleType,
    pub currency: String,
}
