//! Error conversions - rendering [`AppError`] at the HTTP boundary

use super::app_error::AppError;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use crate::envelope::Envelope;
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Envelope<()> = Envelope::failed(self.message());

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_bad_request_renders_as_400() {
        let response = AppError::bad_request("missing field `password`").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
