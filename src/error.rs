use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Request-level error taxonomy. Every handler failure is one of these;
/// the wire status and body shape come from `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotAcceptable(String),
    #[error("{message}")]
    Validation {
        message: String,
        data: Option<serde_json::Value>,
    },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            data: None,
        }
    }

    /// Fold any failure into a validation error echoing the request payload.
    /// The timelog detail and tagging endpoints answer this way no matter
    /// which kind actually occurred.
    pub fn collapse(self, data: serde_json::Value) -> Self {
        ApiError::Validation {
            message: self.to_string(),
            data: Some(data),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            // duplicate business keys have always gone out as 400
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation {
                message,
                data: Some(data),
            } => json!({ "error": message, "data": data }),
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                json!({ "detail": "internal server error" })
            }
            other => json!({ "detail": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: ApiError) -> serde_json::Value {
        let response = err.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(
            ApiError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Conflict("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::NotAcceptable("x".into()).status(),
            StatusCode::NOT_ACCEPTABLE
        );
        assert_eq!(
            ApiError::validation("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn tagged_errors_answer_with_detail() {
        let body = body_json(ApiError::NotFound("Project not found with ID: P9".into())).await;
        assert_eq!(body["detail"], "Project not found with ID: P9");
    }

    #[tokio::test]
    async fn collapsed_errors_echo_the_payload() {
        let payload = json!({ "user": "someone", "work_hours": "2.50" });
        let err = ApiError::NotAcceptable("you can only edit your own timelogs".into())
            .collapse(payload.clone());

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let body = body_json(err).await;
        assert_eq!(body["error"], "you can only edit your own timelogs");
        assert_eq!(body["data"], payload);
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let body = body_json(ApiError::Internal(anyhow::anyhow!("connection refused"))).await;
        assert_eq!(body["detail"], "internal server error");
    }
}
