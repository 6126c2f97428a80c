use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde_json::json;
use utoipa::ToSchema;

use crate::dataset::DatasetError;

// Anyhow error handling with axum
// https://github.com/tokio-rs/axum/blob/d3112a40d55f123bc5e65f995e2068e245f12055/examples/anyhow-error-response/src/main.rs
#[derive(Debug, ToSchema)]
pub enum AppError {
    #[schema(example = "Internal Server Error", value_type = String)]
    InternalServerError(anyhow::Error),
    #[schema(example = "At least one of 'lat' or 'lon' must be provided", value_type = String)]
    BadRequest(anyhow::Error),
    #[schema(example = "Data entry not found", value_type = String)]
    NotFound(anyhow::Error),
    #[schema(example = "missing field `Longitude`", value_type = String)]
    UnprocessableEntity(anyhow::Error),
    #[schema(example = "length limit exceeded", value_type = String)]
    PayloadTooLarge(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InternalServerError(error) => {
                tracing::error!("Internal Server Error: {:#}", error);
                sentry::integrations::anyhow::capture_anyhow(&error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(error) => (StatusCode::BAD_REQUEST, error.to_string()),
            AppError::NotFound(error) => (StatusCode::NOT_FOUND, error.to_string()),
            AppError::UnprocessableEntity(error) => {
                (StatusCode::UNPROCESSABLE_ENTITY, error.to_string())
            }
            AppError::PayloadTooLarge(error) => (StatusCode::PAYLOAD_TOO_LARGE, error.to_string()),
        };
        let body = Json(json!({ "detail": message }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::InternalServerError(err.into())
    }
}

impl AppError {
    pub fn bad_request(err: impl Into<anyhow::Error>) -> Self {
        Self::BadRequest(err.into())
    }

    pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Self {
        Self::InternalServerError(err.into())
    }

    pub fn not_found(err: impl Into<anyhow::Error>) -> Self {
        Self::NotFound(err.into())
    }

    pub fn unprocessable_entity(err: impl Into<anyhow::Error>) -> Self {
        Self::UnprocessableEntity(err.into())
    }

    pub fn payload_too_large(err: impl Into<anyhow::Error>) -> Self {
        Self::PayloadTooLarge(err.into())
    }

    /// Client-side dataset errors map to 400, everything else is internal.
    pub fn from_dataset(err: DatasetError) -> Self {
        match err {
            DatasetError::DegenerateRange => Self::bad_request(err),
            other => Self::internal_server_error(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let response =
            AppError::not_found(anyhow::anyhow!("Data entry not found")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["detail"], "Data entry not found");
    }

    #[tokio::test]
    async fn test_internal_error_is_masked() {
        let response =
            AppError::internal_server_error(anyhow::anyhow!("secret path /etc")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["detail"], "Internal Server Error");
    }

    #[tokio::test]
    async fn test_degenerate_range_is_bad_request() {
        let response = AppError::from_dataset(DatasetError::DegenerateRange).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["detail"],
            "Cannot normalize PM2.5 levels: min and max values are equal"
        );
    }

    #[tokio::test]
    async fn test_payload_too_large_response() {
        let response =
            AppError::payload_too_large(anyhow::anyhow!("length limit exceeded")).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["detail"], "length limit exceeded");
    }
}
