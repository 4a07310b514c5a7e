use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, types::Json, Acquire, Executor, Pool, Postgres, Row};

use super::{select_active, PricingConfigStore};
use crate::{
    entities::{PricingConfig, VehicleType},
    error::Error,
};

/// Rate cards in PostgreSQL. The JSONB `data` column holds the full config;
/// `vehicle_type` and `is_active` are mirrored into columns so a partial
/// unique index can keep one active row per vehicle type.
pub struct PgConfigStore {
    pool: Pool<Postgres>,
}

impl PgConfigStore {
    #[tracing::instrument(name = "PgConfigStore::connect", skip(db_uri))]
    pub async fn connect(db_uri: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_uri)
            .await?;

        Self::new(pool).await
    }

    #[tracing::instrument(name = "PgConfigStore::new", skip_all)]
    pub async fn new(pool: Pool<Postgres>) -> Result<Self, Error> {
        pool.execute("CREATE TABLE IF NOT EXISTS pricing_configs (id UUID PRIMARY KEY, vehicle_type VARCHAR NOT NULL, is_active BOOLEAN NOT NULL, data JSONB NOT NULL)")
            .await?;
        pool.execute("CREATE UNIQUE INDEX IF NOT EXISTS pricing_configs_one_active ON pricing_configs (vehicle_type) WHERE is_active")
            .await?;

        Ok(Self { pool })
    }
}

fn config_from_row(row: &sqlx::postgres::PgRow) -> Result<PricingConfig, Error> {
    let Json(config): Json<PricingConfig> = row.try_get("data")?;

    Ok(config)
}

#[async_trait]
impl PricingConfigStore for PgConfigStore {
    #[tracing::instrument(skip(self))]
    async fn get_active_config(&self, vehicle_type: &VehicleType) -> Result<PricingConfig, Error> {
        let mut conn = self.pool.acquire().await?;

        let rows = conn
            .fetch_all(
                sqlx::query(
                    "SELECT data FROM pricing_configs WHERE vehicle_type = $1 AND is_active",
                )
                .bind(vehicle_type.as_str()),
            )
            .await?;

        let candidates = rows
            .iter()
            .map(config_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        select_active(vehicle_type, candidates)
    }

    #[tracing::instrument(skip(self))]
    async fn list_active_configs(&self) -> Result<Vec<PricingConfig>, Error> {
        let mut conn = self.pool.acquire().await?;

        let rows = conn
            .fetch_all(sqlx::query(
                "SELECT data FROM pricing_configs WHERE is_active ORDER BY vehicle_type ASC",
            ))
            .await?;

        rows.iter().map(config_from_row).collect()
    }

    #[tracing::instrument(skip(self, config), fields(id = %config.id, vehicle_type = %config.vehicle_type))]
    async fn save_config(&self, config: PricingConfig) -> Result<PricingConfig, Error> {
        config.validate()?;

        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        if config.is_active {
            let result = tx
                .execute(
                    sqlx::query(
                        "UPDATE pricing_configs SET is_active = FALSE, data = jsonb_set(data, '{isActive}', 'false') WHERE vehicle_type = $1 AND id <> $2 AND is_active",
                    )
                    .bind(config.vehicle_type.as_str())
                    .bind(&config.id),
                )
                .await?;

            if result.rows_affected() > 0 {
                tracing::info!("deactivated {} pricing config(s)", result.rows_affected());
            }
        }

        tx.execute(
            sqlx::query(
                "INSERT INTO pricing_configs (id, vehicle_type, is_active, data) VALUES ($1, $2, $3, $4)
                 ON CONFLICT (id) DO UPDATE SET vehicle_type = EXCLUDED.vehicle_type, is_active = EXCLUDED.is_active, data = EXCLUDED.data",
            )
            .bind(&config.id)
            .bind(config.vehicle_type.as_str())
            .bind(config.is_active)
            .bind(Json(&config)),
        )
        .await?;

        tx.commit().await?;

        Ok(config)
    }
}
