use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Domain outcomes surfaced to the HTTP layer. Status translation happens
/// only in the `IntoResponse` impl below.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("user not found")]
    NotFound,

    #[error("user with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("{0}")]
    Validation(String),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type UserResult<T> = Result<T, UserError>;

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            UserError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            UserError::DuplicateEmail(_) | UserError::Constraint(_) | UserError::Validation(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            UserError::PasswordHash(msg) => {
                tracing::error!(error = %msg, "password hashing failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
            UserError::Database(e) => {
                tracing::error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = UserError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn client_faults_map_to_400() {
        for err in [
            UserError::DuplicateEmail("a@example.com".into()),
            UserError::Constraint("users_email_key".into()),
            UserError::Validation("invalid email".into()),
        ] {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn backend_faults_map_to_500() {
        let response = UserError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = UserError::PasswordHash("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
