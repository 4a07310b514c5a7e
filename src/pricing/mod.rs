pub mod calculator;
pub mod money;
pub mod surge;

pub use calculator::FareCalculator;
pub use surge::{
    resolve_surge, DynSurgeEstimator, NoSurge, ScheduledSurge, SurgeEstimator, SurgeSchedule,
    SurgeWindow,
};
