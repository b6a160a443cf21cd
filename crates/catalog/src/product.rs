use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product row.
///
/// `available` is the soft-delete flag: flipping it to `false` hides the
/// row from every read path except bulk existence validation. Rows are
/// never physically deleted, so ids referenced by other services
/// (orders, invoices) stay resolvable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Assigned by storage on insert; never reassigned.
    pub id: i64,
    pub name: String,
    /// Currency unit is a caller concern; the catalog treats this opaquely.
    pub price: f64,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field set for inserting a product.
///
/// Storage assigns the id and defaults `available` to true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

/// Partial update for a product row.
///
/// Only `Some` fields are applied. There is no `id` field: an update
/// can never reassign one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub available: Option<bool>,
}

impl ProductPatch {
    /// Patch that soft-deletes a row and touches nothing else.
    pub fn unavailable() -> Self {
        Self {
            available: Some(false),
            ..Self::default()
        }
    }
}
