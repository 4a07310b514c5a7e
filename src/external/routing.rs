use std::sync::Arc;

use async_trait::async_trait;
use geo_types::Point;

use crate::{
    entities::{Coordinates, RouteMetrics},
    error::Error,
};

const EARTH_RADIUS_KM: f64 = 6371.0088;

#[async_trait]
pub trait RoutingProvider {
    async fn route(&self, pickup: Coordinates, dropoff: Coordinates) -> Result<RouteMetrics, Error>;
}

pub type DynRoutingProvider = Arc<dyn RoutingProvider + Send + Sync>;

/// Offline routing: great-circle distance stretched by a detour factor, with
/// the duration derived from an average driving speed.
#[derive(Clone, Debug)]
pub struct GreatCircleRouting {
    pub detour_factor: f64,
    pub average_speed_kmh: f64,
}

impl Default for GreatCircleRouting {
    fn default() -> Self {
        Self {
            detour_factor: 1.3,
            average_speed_kmh: 25.0,
        }
    }
}

pub fn haversine_km(from: Point<f64>, to: Point<f64>) -> f64 {
    let (lat1, lat2) = (from.y().to_radians(), to.y().to_radians());
    let d_lat = lat2 - lat1;
    let d_lng = (to.x() - from.x()).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}

#[async_trait]
impl RoutingProvider for GreatCircleRouting {
    #[tracing::instrument(skip(self))]
    async fn route(&self, pickup: Coordinates, dropoff: Coordinates) -> Result<RouteMetrics, Error> {
        let distance_km = haversine_km(pickup.into(), dropoff.into()) * self.detour_factor;
        let duration_min = distance_km / self.average_speed_kmh * 60.0;

        Ok(RouteMetrics::new(distance_km, duration_min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_known_distance() {
        // one degree of longitude along the equator
        let km = haversine_km(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        assert!((km - 111.195).abs() < 0.01);

        let same = Coordinates::new(6.9271, 79.8612);
        assert_eq!(haversine_km(same.into(), same.into()), 0.0);
    }

    #[tokio::test]
    async fn great_circle_route_applies_detour_and_speed() {
        let routing = GreatCircleRouting {
            detour_factor: 1.5,
            average_speed_kmh: 30.0,
        };

        let metrics = routing
            .route(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0))
            .await
            .unwrap();

        let expected_km = haversine_km(Point::new(0.0, 0.0), Point::new(1.0, 0.0)) * 1.5;
        assert!((metrics.distance_km - expected_km).abs() < 1e-9);
        assert!((metrics.duration_min - expected_km * 2.0).abs() < 1e-9);
    }
}
