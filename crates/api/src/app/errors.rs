use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use catalogd_catalog::CatalogError;

/// Map a catalog failure onto the wire.
///
/// Not-found outcomes are classified as bad requests, matching the RPC
/// contract callers of this service already consume.
pub fn catalog_error_to_response(err: CatalogError) -> axum::response::Response {
    match err {
        CatalogError::NotFound(_) => {
            json_error(StatusCode::BAD_REQUEST, "not_found", err.to_string())
        }
        CatalogError::SomeNotFound => {
            json_error(StatusCode::BAD_REQUEST, "some_not_found", err.to_string())
        }
        CatalogError::Storage(e) => {
            tracing::error!(error = %e, "storage failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_error",
                "storage failure",
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
