use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ModelError;
use service::ServiceError;
use tracing::error;

/// Error response of the item API: `{"error": .., "message": ..}`.
/// 404s carry no body.
#[derive(Debug)]
pub struct JsonApiError {
    status: StatusCode,
    error: &'static str,
    message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, error, message }
    }

    pub fn status(&self) -> StatusCode { self.status }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status == StatusCode::NOT_FOUND {
            return self.status.into_response();
        }
        let body = serde_json::json!({"error": self.error, "message": self.message});
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) | ServiceError::Model(ModelError::Validation(msg)) => {
                Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg))
            }
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ServiceError::Conflict(msg) => Self::new(StatusCode::CONFLICT, "Conflict", Some(msg)),
            other => {
                error!(err = %other, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Storage Error", Some(other.to_string()))
            }
        }
    }
}

/// Malformed body, wrong content type or missing fields are 400; a body
/// over the size limit keeps its 413.
impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self {
        if r.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::new(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large", Some(r.body_text()));
        }
        Self::new(StatusCode::BAD_REQUEST, "Invalid Body", Some(r.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_service_error_has_one_status() {
        let cases = [
            (ServiceError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Model(models_validation()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServiceError::Conflict("x".into()), StatusCode::CONFLICT),
            (ServiceError::Db("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status(), status);
        }
    }

    fn models_validation() -> ModelError {
        ModelError::Validation("name required".into())
    }

    #[test]
    fn validation_message_is_not_prefixed() {
        let err = JsonApiError::from(ServiceError::Model(models_validation()));
        assert_eq!(err.message.as_deref(), Some("name required"));
        let err = JsonApiError::from(ServiceError::Validation("price must be >= 0".into()));
        assert_eq!(err.message.as_deref(), Some("price must be >= 0"));
    }

    #[test]
    fn not_found_has_empty_body() {
        let resp = JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", None).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers().get(axum::http::header::CONTENT_TYPE), None);
    }
}
