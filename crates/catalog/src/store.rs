//! Storage capability for product rows.
//!
//! The service is written against [`ProductStore`]; the Postgres
//! adapter lives in the infra crate. The in-memory implementation here
//! backs tests and the no-database dev bootstrap.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;

use crate::product::{NewProduct, Product, ProductPatch};

/// Storage adapter failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row with this id exists at all, available or not.
    #[error("no product row with id #{0}")]
    Missing(i64),

    /// Backend failure (connectivity, constraint violation, ...).
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Row-level access to the products table.
///
/// Point lookups return rows regardless of availability; visibility
/// rules belong to the service. Scans and counts cover only available
/// rows because no caller ever pages over soft-deleted ones.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a new row. Storage assigns the id and defaults
    /// `available` to true.
    async fn insert(&self, fields: NewProduct) -> Result<Product, StoreError>;

    /// Point lookup by id, ignoring availability.
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StoreError>;

    /// Batched lookup by id, ignoring availability. Rows come back in
    /// unspecified order; ids without a row are silently absent.
    async fn find_many_by_id(&self, ids: &BTreeSet<i64>) -> Result<Vec<Product>, StoreError>;

    /// Number of available rows.
    async fn count_available(&self) -> Result<u64, StoreError>;

    /// Available rows in insertion (id) order, skipping `offset` and
    /// returning at most `limit`.
    async fn scan_available(&self, offset: u64, limit: u32) -> Result<Vec<Product>, StoreError>;

    /// Apply the `Some` fields of `patch` to the row and refresh
    /// `updated_at`. Fails with [`StoreError::Missing`] if no row with
    /// this id exists.
    async fn update_by_id(&self, id: i64, patch: ProductPatch) -> Result<Product, StoreError>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn insert(&self, fields: NewProduct) -> Result<Product, StoreError> {
        (**self).insert(fields).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn find_many_by_id(&self, ids: &BTreeSet<i64>) -> Result<Vec<Product>, StoreError> {
        (**self).find_many_by_id(ids).await
    }

    async fn count_available(&self) -> Result<u64, StoreError> {
        (**self).count_available().await
    }

    async fn scan_available(&self, offset: u64, limit: u32) -> Result<Vec<Product>, StoreError> {
        (**self).scan_available(offset, limit).await
    }

    async fn update_by_id(&self, id: i64, patch: ProductPatch) -> Result<Product, StoreError> {
        (**self).update_by_id(id, patch).await
    }
}

/// In-memory product store for tests/dev.
///
/// A `BTreeMap` keyed by id keeps insertion order, matching the
/// ascending-id scan order of the Postgres adapter.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Rows>,
}

#[derive(Debug, Default)]
struct Rows {
    by_id: BTreeMap<i64, Product>,
    last_id: i64,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, fields: NewProduct) -> Result<Product, StoreError> {
        let mut rows = self
            .inner
            .write()
            .map_err(|_| anyhow!("product store lock poisoned"))?;
        rows.last_id += 1;
        let now = Utc::now();
        let product = Product {
            id: rows.last_id,
            name: fields.name,
            price: fields.price,
            available: true,
            created_at: now,
            updated_at: now,
        };
        rows.by_id.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let rows = self
            .inner
            .read()
            .map_err(|_| anyhow!("product store lock poisoned"))?;
        Ok(rows.by_id.get(&id).cloned())
    }

    async fn find_many_by_id(&self, ids: &BTreeSet<i64>) -> Result<Vec<Product>, StoreError> {
        let rows = self
            .inner
            .read()
            .map_err(|_| anyhow!("product store lock poisoned"))?;
        Ok(ids
            .iter()
            .filter_map(|id| rows.by_id.get(id).cloned())
            .collect())
    }

    async fn count_available(&self) -> Result<u64, StoreError> {
        let rows = self
            .inner
            .read()
            .map_err(|_| anyhow!("product store lock poisoned"))?;
        Ok(rows.by_id.values().filter(|p| p.available).count() as u64)
    }

    async fn scan_available(&self, offset: u64, limit: u32) -> Result<Vec<Product>, StoreError> {
        let rows = self
            .inner
            .read()
            .map_err(|_| anyhow!("product store lock poisoned"))?;
        Ok(rows
            .by_id
            .values()
            .filter(|p| p.available)
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update_by_id(&self, id: i64, patch: ProductPatch) -> Result<Product, StoreError> {
        let mut rows = self
            .inner
            .write()
            .map_err(|_| anyhow!("product store lock poisoned"))?;
        let row = rows.by_id.get_mut(&id).ok_or(StoreError::Missing(id))?;
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(price) = patch.price {
            row.price = price;
        }
        if let Some(available) = patch.available {
            row.available = available;
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(name: &str, price: f64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids_starting_at_one() {
        let store = InMemoryProductStore::new();
        let a = store.insert(widget("a", 1.0)).await.unwrap();
        let b = store.insert(widget("b", 2.0)).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(a.available);
    }

    #[tokio::test]
    async fn update_applies_only_provided_fields() {
        let store = InMemoryProductStore::new();
        let created = store.insert(widget("a", 1.0)).await.unwrap();

        let patch = ProductPatch {
            price: Some(9.5),
            ..ProductPatch::default()
        };
        let updated = store.update_by_id(created.id, patch).await.unwrap();

        assert_eq!(updated.name, "a");
        assert_eq!(updated.price, 9.5);
        assert!(updated.available);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn update_of_absent_row_reports_missing() {
        let store = InMemoryProductStore::new();
        let err = store
            .update_by_id(42, ProductPatch::unavailable())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Missing(42)));
    }

    #[tokio::test]
    async fn scan_skips_unavailable_rows_and_keeps_id_order() {
        let store = InMemoryProductStore::new();
        for i in 0..5 {
            store.insert(widget(&format!("p{i}"), 1.0)).await.unwrap();
        }
        store
            .update_by_id(2, ProductPatch::unavailable())
            .await
            .unwrap();

        let page = store.scan_available(0, 10).await.unwrap();
        let ids: Vec<i64> = page.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 4, 5]);
        assert_eq!(store.count_available().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn find_many_ignores_availability_and_unknown_ids() {
        let store = InMemoryProductStore::new();
        store.insert(widget("a", 1.0)).await.unwrap();
        store.insert(widget("b", 2.0)).await.unwrap();
        store
            .update_by_id(1, ProductPatch::unavailable())
            .await
            .unwrap();

        let ids: BTreeSet<i64> = [1, 2, 99].into_iter().collect();
        let found = store.find_many_by_id(&ids).await.unwrap();
        let mut found_ids: Vec<i64> = found.iter().map(|p| p.id).collect();
        found_ids.sort_unstable();
        assert_eq!(found_ids, vec![1, 2]);
    }
}
