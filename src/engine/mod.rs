mod pricing_api;

use std::sync::Arc;
use std::time::Duration;

use crate::{
    api::API,
    config::Settings,
    error::Error,
    external::{DynRoutingProvider, GreatCircleRouting, OsrmRouting},
    pricing::{DynSurgeEstimator, FareCalculator, NoSurge, ScheduledSurge},
    store::{DynConfigStore, InMemoryConfigStore, PgConfigStore, PricingSeed},
};

const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(2);
const DEFAULT_SURGE_TIMEOUT: Duration = Duration::from_millis(250);

pub struct Engine {
    store: DynConfigStore,
    routing: DynRoutingProvider,
    surge: DynSurgeEstimator,
    calculator: FareCalculator,
    upstream_timeout: Duration,
    surge_timeout: Duration,
}

impl Engine {
    pub fn new(
        store: DynConfigStore,
        routing: DynRoutingProvider,
        surge: DynSurgeEstimator,
        calculator: FareCalculator,
    ) -> Self {
        Self {
            store,
            routing,
            surge,
            calculator,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            surge_timeout: DEFAULT_SURGE_TIMEOUT,
        }
    }

    pub fn with_timeouts(mut self, upstream_timeout: Duration, surge_timeout: Duration) -> Self {
        self.upstream_timeout = upstream_timeout;
        self.surge_timeout = surge_timeout;
        self
    }

    #[tracing::instrument(name = "Engine::from_settings", skip_all)]
    pub async fn from_settings(settings: &Settings) -> Result<Self, Error> {
        let store: DynConfigStore = match &settings.database_url {
            Some(db_uri) => {
                tracing::info!("using postgres pricing config store");
                Arc::new(PgConfigStore::connect(db_uri, settings.database_max_connections).await?)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory pricing config store");
                Arc::new(InMemoryConfigStore::new())
            }
        };

        let seed = match &settings.pricing_seed_path {
            Some(path) => PricingSeed::load(path).await?,
            None => PricingSeed::default(),
        };

        seed.apply(store.as_ref()).await?;

        let schedule = ScheduledSurge::new(seed.surge.clone())?;
        let surge: DynSurgeEstimator = if schedule.is_empty() {
            Arc::new(NoSurge)
        } else {
            tracing::info!("using scheduled surge");
            Arc::new(schedule)
        };

        let routing: DynRoutingProvider = match &settings.routing_api_base {
            Some(api_base) => Arc::new(OsrmRouting::new(api_base, settings.upstream_timeout)?),
            None => Arc::new(GreatCircleRouting::default()),
        };

        let calculator = FareCalculator::new(settings.currency.clone());

        Ok(Self::new(store, routing, surge, calculator)
            .with_timeouts(settings.upstream_timeout, settings.surge_timeout))
    }
}

impl API for Engine {}
