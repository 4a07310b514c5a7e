pub mod osrm;
pub mod routing;

pub use osrm::OsrmRouting;
pub use routing::{DynRoutingProvider, GreatCircleRouting, RoutingProvider};
