use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    entities::SurgeMultiplier,
    error::{invalid_config_error, Error},
};

/// Pluggable surge policy. Returning `1.0` means no surge.
#[async_trait]
pub trait SurgeEstimator {
    async fn estimate_surge(
        &self,
        pickup_lat: f64,
        pickup_lng: f64,
        time_of_day: DateTime<Utc>,
    ) -> Result<f64, Error>;
}

pub type DynSurgeEstimator = std::sync::Arc<dyn SurgeEstimator + Send + Sync>;

/// Asks the estimator for a multiplier and falls back to no surge on errors,
/// out-of-range values and missed deadlines. A quote never fails on surge.
#[tracing::instrument(skip(estimator))]
pub async fn resolve_surge(
    estimator: &(dyn SurgeEstimator + Send + Sync),
    pickup_lat: f64,
    pickup_lng: f64,
    time_of_day: DateTime<Utc>,
    deadline: Duration,
) -> SurgeMultiplier {
    let result = tokio::time::timeout(
        deadline,
        estimator.estimate_surge(pickup_lat, pickup_lng, time_of_day),
    )
    .await;

    match result {
        Ok(Ok(value)) => SurgeMultiplier::new(value).unwrap_or_else(|| {
            tracing::warn!("surge estimator returned out of range value {}, ignoring", value);
            SurgeMultiplier::NONE
        }),
        Ok(Err(err)) => {
            tracing::warn!("surge estimator failed: {}, quoting without surge", err);
            SurgeMultiplier::NONE
        }
        Err(_) => {
            tracing::warn!("surge estimator timed out, quoting without surge");
            SurgeMultiplier::NONE
        }
    }
}

pub struct NoSurge;

#[async_trait]
impl SurgeEstimator for NoSurge {
    async fn estimate_surge(&self, _: f64, _: f64, _: DateTime<Utc>) -> Result<f64, Error> {
        Ok(1.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgeWindow {
    /// Inclusive, 0..=23.
    pub start_hour: u32,
    /// Exclusive, 0..=24. A window with `end_hour < start_hour` wraps past
    /// midnight; `start_hour == end_hour` covers the whole day.
    pub end_hour: u32,
    pub multiplier: f64,
}

impl SurgeWindow {
    fn contains(&self, hour: u32) -> bool {
        if self.start_hour < self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else if self.start_hour > self.end_hour {
            hour >= self.start_hour || hour < self.end_hour
        } else {
            true
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgeSchedule {
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default)]
    pub windows: Vec<SurgeWindow>,
}

/// Operator-configured time-of-day surge. The largest matching window wins.
#[derive(Debug)]
pub struct ScheduledSurge {
    offset: FixedOffset,
    windows: Vec<SurgeWindow>,
}

impl ScheduledSurge {
    pub fn new(schedule: SurgeSchedule) -> Result<Self, Error> {
        let offset = FixedOffset::east_opt(schedule.utc_offset_minutes * 60)
            .ok_or_else(|| invalid_config_error("surge utc offset out of range"))?;

        for window in schedule.windows.iter() {
            if window.start_hour > 23 || window.end_hour > 24 {
                return Err(invalid_config_error("surge window hours out of range"));
            }

            if SurgeMultiplier::new(window.multiplier).is_none() {
                return Err(invalid_config_error("surge multiplier must be at least 1.0"));
            }
        }

        Ok(Self {
            offset,
            windows: schedule.windows,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[async_trait]
impl SurgeEstimator for ScheduledSurge {
    async fn estimate_surge(
        &self,
        _pickup_lat: f64,
        _pickup_lng: f64,
        time_of_day: DateTime<Utc>,
    ) -> Result<f64, Error> {
        let hour = time_of_day.with_timezone(&self.offset).hour();

        let multiplier = self
            .windows
            .iter()
            .filter(|window| window.contains(hour))
            .map(|window| window.multiplier)
            .fold(1.0, f64::max);

        Ok(multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::upstream_error;
    use chrono::TimeZone;

    struct FailingSurge;

    #[async_trait]
    impl SurgeEstimator for FailingSurge {
        async fn estimate_surge(&self, _: f64, _: f64, _: DateTime<Utc>) -> Result<f64, Error> {
            Err(upstream_error())
        }
    }

    struct FixedSurge(f64);

    #[async_trait]
    impl SurgeEstimator for FixedSurge {
        async fn estimate_surge(&self, _: f64, _: f64, _: DateTime<Utc>) -> Result<f64, Error> {
            Ok(self.0)
        }
    }

    struct SlowSurge;

    #[async_trait]
    impl SurgeEstimator for SlowSurge {
        async fn estimate_surge(&self, _: f64, _: f64, _: DateTime<Utc>) -> Result<f64, Error> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(3.0)
        }
    }

    fn at_hour(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 15, 0).unwrap()
    }

    async fn resolve(estimator: &(dyn SurgeEstimator + Send + Sync)) -> f64 {
        resolve_surge(estimator, 0.0, 0.0, at_hour(8), Duration::from_millis(50))
            .await
            .value()
    }

    fn schedule() -> ScheduledSurge {
        ScheduledSurge::new(SurgeSchedule {
            utc_offset_minutes: 0,
            windows: vec![
                SurgeWindow {
                    start_hour: 7,
                    end_hour: 10,
                    multiplier: 1.5,
                },
                SurgeWindow {
                    start_hour: 9,
                    end_hour: 11,
                    multiplier: 1.8,
                },
                SurgeWindow {
                    start_hour: 22,
                    end_hour: 2,
                    multiplier: 1.25,
                },
            ],
        })
        .unwrap()
    }

    #[tokio::test]
    async fn fails_closed() {
        assert_eq!(resolve(&FailingSurge).await, 1.0);
        assert_eq!(resolve(&FixedSurge(0.7)).await, 1.0);
        assert_eq!(resolve(&FixedSurge(f64::NAN)).await, 1.0);
        assert_eq!(resolve(&FixedSurge(1.4)).await, 1.4);
        assert_eq!(resolve(&NoSurge).await, 1.0);
    }

    #[tokio::test]
    async fn slow_estimator_degrades_to_no_surge() {
        assert_eq!(resolve(&SlowSurge).await, 1.0);
    }

    #[tokio::test]
    async fn scheduled_windows() {
        let surge = schedule();

        let at = |hour| surge.estimate_surge(0.0, 0.0, at_hour(hour));

        assert_eq!(at(6).await.unwrap(), 1.0);
        assert_eq!(at(7).await.unwrap(), 1.5);
        assert_eq!(at(9).await.unwrap(), 1.8);
        assert_eq!(at(10).await.unwrap(), 1.8);
        assert_eq!(at(11).await.unwrap(), 1.0);
        assert_eq!(at(23).await.unwrap(), 1.25);
        assert_eq!(at(1).await.unwrap(), 1.25);
        assert_eq!(at(2).await.unwrap(), 1.0);
    }

    #[tokio::test]
    async fn scheduled_windows_use_local_offset() {
        let surge = ScheduledSurge::new(SurgeSchedule {
            utc_offset_minutes: 330,
            windows: vec![SurgeWindow {
                start_hour: 8,
                end_hour: 9,
                multiplier: 2.0,
            }],
        })
        .unwrap();

        // 02:45 UTC is 08:15 at +05:30
        let time = Utc.with_ymd_and_hms(2024, 3, 1, 2, 45, 0).unwrap();
        assert_eq!(surge.estimate_surge(0.0, 0.0, time).await.unwrap(), 2.0);
    }

    #[test]
    fn rejects_bad_schedule() {
        let bad_multiplier = SurgeSchedule {
            utc_offset_minutes: 0,
            windows: vec![SurgeWindow {
                start_hour: 1,
                end_hour: 2,
                multiplier: 0.5,
            }],
        };
        assert!(ScheduledSurge::new(bad_multiplier).is_err());

        let bad_hour = SurgeSchedule {
            utc_offset_minutes: 0,
            windows: vec![SurgeWindow {
                start_hour: 24,
                end_hour: 2,
                multiplier: 1.5,
            }],
        };
        assert!(ScheduledSurge::new(bad_hour).is_err());

        assert!(ScheduledSurge::new(SurgeSchedule::default())
            .unwrap()
            .is_empty());
    }
}
