//! The product catalog service.

use std::collections::BTreeSet;

use crate::error::{CatalogError, CatalogResult};
use crate::pagination::{Page, PageMeta, PageRequest};
use crate::product::{NewProduct, Product, ProductPatch};
use crate::store::ProductStore;

/// Stateless catalog service over an injected [`ProductStore`].
///
/// Every operation is one or two storage calls with no cross-call
/// atomicity: a concurrent writer racing between an existence check
/// and the following mutation wins last-write-wins at the storage
/// layer. Counts and page scans are likewise two independent reads.
#[derive(Debug, Clone)]
pub struct ProductCatalog<S> {
    store: S,
}

impl<S: ProductStore> ProductCatalog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Insert a new product. Storage assigns the id and defaults
    /// `available` to true; the stored row is returned as-is.
    pub async fn create(&self, input: NewProduct) -> CatalogResult<Product> {
        let product = self.store.insert(input).await?;
        tracing::debug!(id = product.id, "product created");
        Ok(product)
    }

    /// One page of available products plus listing metadata.
    pub async fn list(&self, page: PageRequest) -> CatalogResult<Page<Product>> {
        let total = self.store.count_available().await?;
        let data = self.store.scan_available(page.offset(), page.limit).await?;
        tracing::debug!(
            page = page.page,
            limit = page.limit,
            total,
            returned = data.len(),
            "products listed"
        );
        Ok(Page {
            data,
            meta: PageMeta::new(page, total),
        })
    }

    /// Look up a single available product.
    ///
    /// This is the one existence predicate shared with `update` and
    /// `remove`: soft-deleted products fail it, so they can neither be
    /// mutated nor revived through the normal paths.
    pub async fn get_one(&self, id: i64) -> CatalogResult<Product> {
        match self.store.find_by_id(id).await? {
            Some(product) if product.available => Ok(product),
            _ => Err(CatalogError::NotFound(id)),
        }
    }

    /// Partially update a visible product. Omitted fields keep their
    /// prior values; the id cannot change.
    pub async fn update(&self, id: i64, patch: ProductPatch) -> CatalogResult<Product> {
        self.get_one(id).await?;
        let product = self.store.update_by_id(id, patch).await?;
        tracing::debug!(id, "product updated");
        Ok(product)
    }

    /// Soft-delete a visible product by flipping `available` to false.
    ///
    /// Removing an absent or already-removed product is an error, not a
    /// no-op. The row itself stays in storage so foreign references
    /// held by other services remain valid.
    pub async fn remove(&self, id: i64) -> CatalogResult<Product> {
        self.get_one(id).await?;
        let product = self.store.update_by_id(id, ProductPatch::unavailable()).await?;
        tracing::debug!(id, "product removed");
        Ok(product)
    }

    /// Confirm that every distinct id resolves to a row, available or
    /// not. Callers validating foreign references need existence, not
    /// current availability.
    ///
    /// Duplicates collapse before matching, so an order with two lines
    /// for the same product validates as long as that product exists.
    pub async fn validate_existing(&self, ids: &[i64]) -> CatalogResult<Vec<Product>> {
        let unique: BTreeSet<i64> = ids.iter().copied().collect();
        let found = self.store.find_many_by_id(&unique).await?;
        if found.len() != unique.len() {
            tracing::debug!(
                requested = unique.len(),
                matched = found.len(),
                "bulk validation failed"
            );
            return Err(CatalogError::SomeNotFound);
        }
        Ok(found)
    }
}
