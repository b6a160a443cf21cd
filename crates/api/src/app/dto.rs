//! Request DTOs and the validation boundary.
//!
//! The catalog core assumes field shapes were checked before it runs;
//! these helpers are that boundary. Violations answer 400 without
//! touching storage.

use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;

use catalogd_catalog::{NewProduct, PageRequest, ProductPatch};

use crate::app::errors;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
}

/// Partial update body. There is deliberately no `available` field:
/// availability only changes through DELETE. An `id` key in the body is
/// ignored on deserialization, so ids cannot be reassigned.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateProductsRequest {
    pub ids: Vec<i64>,
}

fn check_name(name: &str) -> Result<(), Response> {
    if name.trim().is_empty() {
        return Err(errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "name must not be empty",
        ));
    }
    Ok(())
}

fn check_price(price: f64) -> Result<(), Response> {
    if !price.is_finite() || price < 0.0 {
        return Err(errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "price must be a non-negative number",
        ));
    }
    Ok(())
}

pub fn validate_create(req: CreateProductRequest) -> Result<NewProduct, Response> {
    check_name(&req.name)?;
    check_price(req.price)?;
    Ok(NewProduct {
        name: req.name,
        price: req.price,
    })
}

pub fn validate_update(req: UpdateProductRequest) -> Result<ProductPatch, Response> {
    if let Some(name) = &req.name {
        check_name(name)?;
    }
    if let Some(price) = req.price {
        check_price(price)?;
    }
    Ok(ProductPatch {
        name: req.name,
        price: req.price,
        available: None,
    })
}

pub fn validate_list(query: ListQuery) -> Result<PageRequest, Response> {
    if query.page == Some(0) {
        return Err(errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "page must be at least 1",
        ));
    }
    if query.limit == Some(0) {
        return Err(errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "limit must be at least 1",
        ));
    }
    Ok(PageRequest::new(query.page, query.limit))
}

pub fn validate_ids(req: ValidateProductsRequest) -> Result<Vec<i64>, Response> {
    if req.ids.is_empty() {
        return Err(errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "ids must not be empty",
        ));
    }
    Ok(req.ids)
}
