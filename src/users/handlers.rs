use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{instrument, warn};

use crate::auth::extractors::AuthUser;
use crate::error::UserError;
use crate::state::AppState;
use crate::users::dto::{CreateUserRequest, SearchQuery, UpdateUserRequest};
use crate::users::repo_types::User;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/search", get(search_users))
        .route("/users/count", get(count_users))
        .route("/users/email/:email", get(get_user_by_email))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// GET /api/users
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<Vec<User>>, UserError> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

/// GET /api/users/{id}
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<User>, UserError> {
    let user = state.users.get(id).await?.ok_or(UserError::NotFound)?;
    Ok(Json(user))
}

/// POST /api/users — public registration, no credentials required.
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), UserError> {
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(UserError::Validation("invalid email".into()));
    }
    if payload.password.is_empty() {
        warn!("empty password on create");
        return Err(UserError::Validation("password must not be empty".into()));
    }

    let user = state.users.create(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/users/{id}
#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<User>, UserError> {
    let user = state.users.update(id, payload).await?;
    Ok(Json(user))
}

/// DELETE /api/users/{id}
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, UserError> {
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/search?firstName=&lastName=
#[instrument(skip(state))]
pub async fn search_users(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<User>>, UserError> {
    let users = state.users.search(query.first_name, query.last_name).await?;
    Ok(Json(users))
}

/// GET /api/users/email/{email}
#[instrument(skip(state))]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(email): Path<String>,
) -> Result<Json<User>, UserError> {
    let user = state
        .users
        .get_by_email(&email)
        .await?
        .ok_or(UserError::NotFound)?;
    Ok(Json(user))
}

/// GET /api/users/count
#[instrument(skip(state))]
pub async fn count_users(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<i64>, UserError> {
    let count = state.users.count().await?;
    Ok(Json(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
    }
}
