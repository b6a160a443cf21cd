//! Postgres-backed product store.
//!
//! Runtime queries with explicit binds; no compile-time schema
//! checking, so the crate builds without a database on hand. The
//! schema is created on connect if it does not exist yet.

use std::collections::BTreeSet;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use catalogd_catalog::{NewProduct, Product, ProductPatch, ProductStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id         BIGSERIAL PRIMARY KEY,
    name       TEXT NOT NULL,
    price      DOUBLE PRECISION NOT NULL,
    available  BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const AVAILABILITY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS products_available_idx ON products (available)";

/// Product store backed by a Postgres connection pool.
///
/// Thread-safe via the sqlx pool; each trait call is a single
/// statement, so per-statement atomicity is all this adapter promises.
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    /// Connect a pool and make sure the products table exists.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect(database_url)
            .await
            .context("failed to connect to Postgres")?;

        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .context("failed to create products table")?;
        sqlx::query(AVAILABILITY_INDEX)
            .execute(&pool)
            .await
            .context("failed to create availability index")?;

        tracing::info!("database connected");
        Ok(Self { pool })
    }

    /// Wrap an existing pool. The schema is assumed present.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.into())
}

fn row_to_product(row: &PgRow) -> Result<Product, StoreError> {
    let decode = || -> Result<Product, sqlx::Error> {
        Ok(Product {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            available: row.try_get("available")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
        })
    };
    decode().map_err(backend)
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn insert(&self, fields: NewProduct) -> Result<Product, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO products (name, price)
            VALUES ($1, $2)
            RETURNING id, name, price, available, created_at, updated_at
            "#,
        )
        .bind(&fields.name)
        .bind(fields.price)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        row_to_product(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, price, available, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.as_ref().map(row_to_product).transpose()
    }

    async fn find_many_by_id(&self, ids: &BTreeSet<i64>) -> Result<Vec<Product>, StoreError> {
        let ids: Vec<i64> = ids.iter().copied().collect();
        let rows = sqlx::query(
            r#"
            SELECT id, name, price, available, created_at, updated_at
            FROM products
            WHERE id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.iter().map(row_to_product).collect()
    }

    async fn count_available(&self) -> Result<u64, StoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE available = TRUE")
                .fetch_one(&self.pool)
                .await
                .map_err(backend)?;

        Ok(count as u64)
    }

    async fn scan_available(&self, offset: u64, limit: u32) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, price, available, created_at, updated_at
            FROM products
            WHERE available = TRUE
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(limit))
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.iter().map(row_to_product).collect()
    }

    async fn update_by_id(&self, id: i64, patch: ProductPatch) -> Result<Product, StoreError> {
        let row = sqlx::query(
            r#"
            UPDATE products
            SET name       = COALESCE($2, name),
                price      = COALESCE($3, price),
                available  = COALESCE($4, available),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, price, available, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.price)
        .bind(patch.available)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        match row {
            Some(row) => row_to_product(&row),
            None => Err(StoreError::Missing(id)),
        }
    }
}
