use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use base64ct::{Base64, Encoding};
use tracing::warn;

use crate::auth::password::verify_password;
use crate::state::AppState;
use crate::users::repo_types::User;

/// Extracts and checks HTTP Basic credentials, returning the caller's user ID.
pub struct AuthUser(pub i64);

/// Split an `Authorization` header value into (email, password).
fn decode_basic(header_value: &str) -> Option<(String, String)> {
    let encoded = header_value
        .strip_prefix("Basic ")
        .or_else(|| header_value.strip_prefix("basic "))?;
    let decoded = Base64::decode_vec(encoded.trim()).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;
    let (email, password) = credentials.split_once(':')?;
    Some((email.to_string(), password.to_string()))
}

fn challenge(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"users\"")],
        message.to_string(),
    )
        .into_response()
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| challenge("missing Authorization header"))?;

        let (email, password) =
            decode_basic(header_value).ok_or_else(|| challenge("invalid Basic credentials"))?;

        let user = User::find_by_email(&state.db, &email)
            .await
            .map_err(|e| e.into_response())?
            .ok_or_else(|| {
                warn!("basic auth unknown email");
                challenge("invalid credentials")
            })?;

        if !verify_password(&password, &user.password_hash) {
            warn!(user_id = user.id, "basic auth invalid password");
            return Err(challenge("invalid credentials"));
        }

        Ok(AuthUser(user.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_valid_credentials() {
        let header = format!("Basic {}", Base64::encode_string(b"user@example.com:secret"));
        let (email, password) = decode_basic(&header).expect("should decode");
        assert_eq!(email, "user@example.com");
        assert_eq!(password, "secret");
    }

    #[test]
    fn password_may_contain_colons() {
        let header = format!("Basic {}", Base64::encode_string(b"user@example.com:a:b:c"));
        let (_, password) = decode_basic(&header).expect("should decode");
        assert_eq!(password, "a:b:c");
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(decode_basic("Bearer abc.def.ghi").is_none());
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(decode_basic("Basic !!!not-base64!!!").is_none());
    }

    #[test]
    fn rejects_credentials_without_colon() {
        let header = format!("Basic {}", Base64::encode_string(b"no-separator"));
        assert!(decode_basic(&header).is_none());
    }
}
