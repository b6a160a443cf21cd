use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::{dto, errors, AppState};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route(
            "/:id",
            get(get_product).patch(update_product).delete(remove_product),
        )
        .route("/validate", post(validate_products))
}

fn parse_id(raw: &str) -> Result<i64, axum::response::Response> {
    raw.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
    })
}

pub async fn create_product(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let input = match dto::validate_create(body) {
        Ok(input) => input,
        Err(response) => return response,
    };

    match state.catalog.create(input).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<dto::ListQuery>,
) -> axum::response::Response {
    let page = match dto::validate_list(query) {
        Ok(page) => page,
        Err(response) => return response,
    };

    match state.catalog.list(page).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.catalog.get_one(id).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateProductRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let patch = match dto::validate_update(body) {
        Ok(patch) => patch,
        Err(response) => return response,
    };

    match state.catalog.update(id, patch).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn remove_product(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.catalog.remove(id).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn validate_products(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<dto::ValidateProductsRequest>,
) -> axum::response::Response {
    let ids = match dto::validate_ids(body) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    match state.catalog.validate_existing(&ids).await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}
