//! Weather record cache
//!
//! The cache is a capability the weather service consults on every request.
//! Stores report their own failures as [`CacheError`]; deciding that a
//! failure is harmless is left to the caller.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::WeatherRecord;
use shared::types::Coordinates;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use thiserror::Error;

use crate::config::CacheConfig;

/// Cache store errors
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache store unavailable: {0}")]
    Unavailable(String),

    #[error("Cache database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// How a cached record is looked up
#[derive(Debug, Clone, PartialEq)]
pub enum CacheKey {
    /// Exact match on the coordinates the record was stored under
    Coordinates(Coordinates),
    /// Case-insensitive substring match on the location name
    City(String),
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Coordinates(c) => write!(f, "coordinates {}", c),
            CacheKey::City(name) => write!(f, "city '{}'", name),
        }
    }
}

/// Storage backend for weather records
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Most recent record matching `key` created at or after `fresh_since`
    async fn lookup(
        &self,
        key: &CacheKey,
        fresh_since: DateTime<Utc>,
    ) -> Result<Option<WeatherRecord>, CacheError>;

    /// Persist a record under the coordinates it was requested with
    async fn put(&self, key: &Coordinates, record: &WeatherRecord) -> Result<(), CacheError>;

    /// All records for `key` created at or after `since`, most recent first
    async fn history(
        &self,
        key: &Coordinates,
        since: DateTime<Utc>,
    ) -> Result<Vec<WeatherRecord>, CacheError>;
}

/// PostgreSQL-backed cache store
#[derive(Clone)]
pub struct PgCacheStore {
    db: PgPool,
}

impl PgCacheStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Build a lazily connecting pool
    ///
    /// No connection is attempted here, so an unreachable database only
    /// shows up as errors on individual cache operations.
    pub fn connect_lazy(config: &CacheConfig, url: &str) -> Result<Self, CacheError> {
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(3))
            .connect_lazy(url)?;
        Ok(Self::new(db))
    }

    /// Create the records table if it does not exist yet
    pub async fn migrate(&self) -> Result<(), CacheError> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .map_err(|e| CacheError::Unavailable(format!("migration failed: {}", e)))
    }
}

#[async_trait]
impl CacheStore for PgCacheStore {
    async fn lookup(
        &self,
        key: &CacheKey,
        fresh_since: DateTime<Utc>,
    ) -> Result<Option<WeatherRecord>, CacheError> {
        let row: Option<(Json<WeatherRecord>,)> = match key {
            CacheKey::Coordinates(coords) => {
                sqlx::query_as(
                    r#"
                    SELECT record
                    FROM weather_records
                    WHERE latitude = $1
                      AND longitude = $2
                      AND created_at >= $3
                    ORDER BY created_at DESC
                    LIMIT 1
                    "#,
                )
                .bind(coords.lat)
                .bind(coords.lon)
                .bind(fresh_since)
                .fetch_optional(&self.db)
                .await?
            }
            CacheKey::City(name) => {
                sqlx::query_as(
                    r#"
                    SELECT record
                    FROM weather_records
                    WHERE STRPOS(LOWER(location_name), LOWER($1)) > 0
                      AND created_at >= $2
                    ORDER BY created_at DESC
                    LIMIT 1
                    "#,
                )
                .bind(name)
                .bind(fresh_since)
                .fetch_optional(&self.db)
                .await?
            }
        };

        Ok(row.map(|(Json(record),)| record))
    }

    async fn put(&self, key: &Coordinates, record: &WeatherRecord) -> Result<(), CacheError> {
        sqlx::query(
            r#"
            INSERT INTO weather_records (
                id, latitude, longitude, location_name, record, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.id)
        .bind(key.lat)
        .bind(key.lon)
        .bind(&record.location.name)
        .bind(Json(record))
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn history(
        &self,
        key: &Coordinates,
        since: DateTime<Utc>,
    ) -> Result<Vec<WeatherRecord>, CacheError> {
        let rows: Vec<(Json<WeatherRecord>,)> = sqlx::query_as(
            r#"
            SELECT record
            FROM weather_records
            WHERE latitude = $1
              AND longitude = $2
              AND created_at >= $3
            ORDER BY created_at DESC
            "#,
        )
        .bind(key.lat)
        .bind(key.lon)
        .bind(since)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(|(Json(record),)| record).collect())
    }
}

/// Store used when no cache database is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCacheStore;

#[async_trait]
impl CacheStore for DisabledCacheStore {
    async fn lookup(
        &self,
        _key: &CacheKey,
        _fresh_since: DateTime<Utc>,
    ) -> Result<Option<WeatherRecord>, CacheError> {
        Err(CacheError::Unavailable("no cache store configured".to_string()))
    }

    async fn put(&self, _key: &Coordinates, _record: &WeatherRecord) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("no cache store configured".to_string()))
    }

    async fn history(
        &self,
        _key: &Coordinates,
        _since: DateTime<Utc>,
    ) -> Result<Vec<WeatherRecord>, CacheError> {
        Err(CacheError::Unavailable("no cache store configured".to_string()))
    }
}
