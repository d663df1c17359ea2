use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;
use tracing::field::display;
use validator::ValidationErrors;

/// Every failure a handler can surface. Each variant maps to one status code
/// and one flash key in the JSON body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    /// Misuse of a state machine, e.g. starting maintenance that was never requested.
    #[error("{0}")]
    InvalidTransition(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Database(#[from] DbErr),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) | AppError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::InvalidTransition(_) | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::Span::current().record("error", display(&self));

        let body = match &self {
            AppError::Validation(errors) => json!({
                "error": "Please correct the highlighted fields.",
                "fields": errors,
            }),
            AppError::InvalidTransition(message) => json!({ "warning": message }),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                json!({ "error": "An unexpected database error occurred." })
            }
            AppError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                json!({ "error": message })
            }
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 2))]
        name: String,
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn transition_errors_are_warnings() {
        let response =
            AppError::InvalidTransition("No active maintenance request found for this equipment.".into())
                .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert_eq!(
            body["warning"],
            "No active maintenance request found for this equipment."
        );
    }

    #[tokio::test]
    async fn validation_errors_list_fields() {
        let errors = Named { name: "a".into() }.validate().unwrap_err();
        let response = AppError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(body["fields"].get("name").is_some());
    }

    #[tokio::test]
    async fn database_errors_hide_details() {
        let response = AppError::from(DbErr::Custom("relation missing".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "An unexpected database error occurred.");
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = AppError::NotFound("Garden");
        assert_eq!(err.to_string(), "Garden not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
