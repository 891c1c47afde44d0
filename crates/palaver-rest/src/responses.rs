//! Response envelope and error mapping for the HTTP surface.
//!
//! Every JSON body, success or failure, goes through [`ApiResponse`] so
//! clients can branch on `success` without inspecting the status line.
//! [`AppError`] is the single exit point for `PalaverError`: the status
//! code and the leak-safe [`ErrorResponse`] are both derived there.

use palaver_core::{ErrorResponse, PalaverError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Envelope wrapping every JSON response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload in a successful envelope.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Builds a failure envelope with no payload.
    pub fn failure(error: ErrorResponse) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Handler-level error carrying a `PalaverError` out to the wire.
#[derive(Debug)]
pub struct AppError(pub PalaverError);

impl From<PalaverError> for AppError {
    fn from(err: PalaverError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(ApiResponse::failure(ErrorResponse::from_error(&self.0)));

        (status, body).into_response()
    }
}

/// Result type for JSON handlers.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Wraps a payload in a 200 envelope.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// 201 response for a freshly persisted resource.
#[derive(Debug)]
pub struct Created<T>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(ApiResponse::success(self.0))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_omits_error_field() {
        let envelope = ApiResponse::success(vec!["a", "b"]);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"][1], "b");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_envelope_omits_data_field() {
        let err = PalaverError::validation("Text or image is required");
        let envelope = ApiResponse::failure(ErrorResponse::from_error(&err));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_app_error_maps_status_codes() {
        let not_found = AppError(PalaverError::not_found("User", "x")).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let validation = AppError(PalaverError::validation("bad")).into_response();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let database = AppError(PalaverError::Database("dsn leak".to_string())).into_response();
        assert_eq!(database.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_created_is_201() {
        let response = Created("payload").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
