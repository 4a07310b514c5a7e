use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::VehicleType;
use crate::error::{invalid_config_error, Error};

/// Rate card for one vehicle type. All amounts are in the deployment currency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub vehicle_type: VehicleType,
    pub base_fare: f64,
    pub per_km_rate: f64,
    pub per_minute_rate: f64,
    pub minimum_fare: f64,
    pub booking_fee: f64,
    pub cancellation_fee: f64,
    pub is_active: bool,
}

impl PricingConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.vehicle_type.is_empty() {
            return Err(invalid_config_error("vehicle type is empty"));
        }

        let amounts = [
            ("baseFare", self.base_fare),
            ("perKmRate", self.per_km_rate),
            ("perMinuteRate", self.per_minute_rate),
            ("minimumFare", self.minimum_fare),
            ("bookingFee", self.booking_fee),
            ("cancellationFee", self.cancellation_fee),
        ];

        for (name, amount) in amounts {
            if !amount.is_finite() || amount < 0.0 {
                return Err(invalid_config_error(&format!(
                    "{} must be a non-negative amount, got {}",
                    name, amount
                )));
            }
        }

        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

#[cfg(test)]
pub(crate) fn sample_config(vehicle_type: &str) -> PricingConfig {
    PricingConfig {
        id: Uuid::new_v4(),
        vehicle_type: VehicleType::new(vehicle_type),
        base_fare: 2.50,
        per_km_rate: 1.20,
        per_minute_rate: 0.25,
        minimum_fare: 5.00,
        booking_fee: 1.00,
        cancellation_fee: 3.00,
        is_active: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_sample() {
        assert!(sample_config("economy").validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_and_non_finite_amounts() {
        let mut config = sample_config("economy");
        config.per_km_rate = -0.1;
        assert!(config.validate().unwrap_err().is_invalid_config_error());

        let mut config = sample_config("economy");
        config.booking_fee = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = sample_config("  ");
        config.base_fare = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn deserializes_camel_case_without_id() {
        let config: PricingConfig = serde_json::from_str(
            r#"{
                "vehicleType": "XL",
                "baseFare": 4.0,
                "perKmRate": 1.8,
                "perMinuteRate": 0.4,
                "minimumFare": 9.0,
                "bookingFee": 1.5,
                "cancellationFee": 5.0,
                "isActive": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.vehicle_type.as_str(), "xl");
        assert_eq!(config.minimum_fare, 9.0);
        assert!(!config.id.is_nil());
    }
}
