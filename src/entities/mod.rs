mod fare;
mod location;
mod pricing_config;
mod route;
mod vehicle_type;

pub use fare::{FareBreakdown, FareEstimate, FareEstimateRequest, SurgeMultiplier};
pub use location::Coordinates;
pub use pricing_config::PricingConfig;
pub use route::RouteMetrics;
pub use vehicle_type::VehicleType;

#[cfg(test)]
pub(crate) use pricing_config::sample_config;
