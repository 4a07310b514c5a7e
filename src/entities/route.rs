/// Trip geometry as reported by a routing provider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteMetrics {
    pub distance_km: f64,
    pub duration_min: f64,
}

impl RouteMetrics {
    pub fn new(distance_km: f64, duration_min: f64) -> Self {
        Self {
            distance_km,
            duration_min,
        }
    }
}
