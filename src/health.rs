use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::instrument;

use crate::auth::extractors::AuthUser;
use crate::state::AppState;
use crate::users::repo_types::User;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health/status", get(service_status))
        .route("/health/info", get(service_info))
}

/// GET /api/health/status — liveness plus a couple of business metrics.
#[instrument(skip(state))]
pub async fn service_status(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Json<Value> {
    let mut status = json!({
        "service": "User Microservice",
        "status": "UP",
        "timestamp": OffsetDateTime::now_utc().format(&Rfc3339).ok(),
        "version": env!("CARGO_PKG_VERSION"),
    });

    match User::count(&state.db).await {
        Ok(total) => {
            status["totalUsers"] = json!(total);
            status["databaseStatus"] = json!("CONNECTED");
        }
        Err(e) => {
            status["databaseStatus"] = json!(format!("ERROR: {}", e));
        }
    }

    Json(status)
}

/// GET /api/health/info — static service description.
#[instrument]
pub async fn service_info(AuthUser(caller): AuthUser) -> Json<Value> {
    Json(json!({
        "application": {
            "name": "User Microservice",
            "description": "A simple microservice for managing users",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "features": {
            "authentication": "Basic Auth",
            "database": "PostgreSQL",
            "passwordHashing": "Argon2",
        },
        "endpoints": {
            "users": "/api/users",
            "health": "/health",
        },
    }))
}
