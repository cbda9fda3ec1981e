use serde::Deserialize;

/// Request body for creating a user (public registration).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Request body for a full update. Every field replaces the stored value;
/// only the password is optional, and an empty one means "keep the old hash".
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    /// The new plaintext to hash, if one was actually supplied.
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

/// Query parameters for GET /api/users/search.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_camel_case() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"email":"a@example.com","firstName":"A","lastName":"B","password":"pw"}"#,
        )
        .unwrap();
        assert_eq!(req.first_name, "A");
        assert_eq!(req.last_name, "B");
    }

    #[test]
    fn missing_or_empty_password_means_keep() {
        let req: UpdateUserRequest =
            serde_json::from_str(r#"{"email":"a@example.com","firstName":"A","lastName":"B"}"#)
                .unwrap();
        assert!(req.new_password().is_none());

        let req: UpdateUserRequest = serde_json::from_str(
            r#"{"email":"a@example.com","firstName":"A","lastName":"B","password":""}"#,
        )
        .unwrap();
        assert!(req.new_password().is_none());
    }

    #[test]
    fn non_empty_password_is_supplied() {
        let req: UpdateUserRequest = serde_json::from_str(
            r#"{"email":"a@example.com","firstName":"A","lastName":"B","password":"n3w"}"#,
        )
        .unwrap();
        assert_eq!(req.new_password(), Some("n3w"));
    }
}
