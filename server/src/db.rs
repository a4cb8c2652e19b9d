//! PostgreSQL session store

use anyhow::Result;
use async_trait::async_trait;
use simulation::{SessionRecord, SessionSink, SinkError, StyleUsage};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;

#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and bring the schema up to date
    pub async fn connect(database_url: &str, config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(database_url)
            .await?;
        info!("Connected to database (max_connections={})", config.max_connections);

        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Migrations complete");

        Ok(Self::new(pool))
    }

    /// Times each style was danced, most danced first
    pub async fn style_usage(&self) -> Result<Vec<StyleUsage>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT style, COUNT(*) AS usage_count
             FROM dance_sessions
             GROUP BY style
             ORDER BY usage_count DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(style, usage_count)| StyleUsage { style, usage_count })
            .collect())
    }
}

#[async_trait]
impl SessionSink for PgSessionStore {
    async fn write(&self, record: &SessionRecord) -> Result<(), SinkError> {
        sqlx::query(
            "INSERT INTO dance_sessions (leader_id, follower_id, style, session_index)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(i64::from(record.leader_id.0))
        .bind(record.follower_id.0.as_str())
        .bind(record.style.as_str())
        .bind(i64::from(record.session_index))
        .execute(&self.pool)
        .await
        .map_err(|e| SinkError::Database(e.to_string()))?;

        Ok(())
    }
}
