use sqlx::PgPool;
use tracing::info;

use crate::auth::password::hash_password;
use crate::error::{UserError, UserResult};
use crate::users::dto::{CreateUserRequest, UpdateUserRequest};
use crate::users::repo_types::User;

/// Business rules between the HTTP boundary and the store. Holds its own
/// pool handle; constructed once at startup and cloned with the app state.
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

/// Which store query a search request resolves to. Both names present wins
/// over either alone; there is no combining beyond that.
#[derive(Debug, PartialEq, Eq)]
enum NameQuery {
    FullName(String, String),
    FirstName(String),
    LastNameContains(String),
    All,
}

impl NameQuery {
    fn from_params(first_name: Option<String>, last_name: Option<String>) -> Self {
        match (first_name, last_name) {
            (Some(first), Some(last)) => NameQuery::FullName(first, last),
            (Some(first), None) => NameQuery::FirstName(first),
            (None, Some(last)) => NameQuery::LastNameContains(last),
            (None, None) => NameQuery::All,
        }
    }
}

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a user: reject a known-duplicate email, hash the password,
    /// insert. A create racing this pre-check loses at the unique index and
    /// comes back as a constraint violation instead.
    pub async fn create(&self, req: CreateUserRequest) -> UserResult<User> {
        if User::exists_by_email(&self.db, &req.email).await? {
            return Err(UserError::DuplicateEmail(req.email));
        }

        let password_hash = hash_password(&req.password)?;
        let user = User::insert(
            &self.db,
            &req.email,
            &req.first_name,
            &req.last_name,
            &password_hash,
        )
        .await?;

        info!(user_id = user.id, email = %user.email, "user created");
        Ok(user)
    }

    /// Absent is an empty result, not an error.
    pub async fn get(&self, id: i64) -> UserResult<Option<User>> {
        User::find_by_id(&self.db, id).await
    }

    pub async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        User::find_by_email(&self.db, email).await
    }

    pub async fn list(&self) -> UserResult<Vec<User>> {
        User::find_all(&self.db).await
    }

    /// Replace name and email wholesale, empty strings included; rehash only
    /// when a non-empty password came with the patch. Email uniqueness on
    /// this path is left to the unique index, which reports a collision as a
    /// constraint violation.
    pub async fn update(&self, id: i64, req: UpdateUserRequest) -> UserResult<User> {
        let mut user = User::find_by_id(&self.db, id)
            .await?
            .ok_or(UserError::NotFound)?;

        if let Some(plain) = req.new_password() {
            user.password_hash = hash_password(plain)?;
        }
        user.email = req.email;
        user.first_name = req.first_name;
        user.last_name = req.last_name;

        let updated = User::update(&self.db, &user).await?;
        info!(user_id = updated.id, "user updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> UserResult<()> {
        User::delete_by_id(&self.db, id).await?;
        info!(user_id = id, "user deleted");
        Ok(())
    }

    pub async fn search(
        &self,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> UserResult<Vec<User>> {
        match NameQuery::from_params(first_name, last_name) {
            NameQuery::FullName(first, last) => {
                User::find_by_full_name(&self.db, &first, &last).await
            }
            NameQuery::FirstName(first) => User::find_by_first_name(&self.db, &first).await,
            NameQuery::LastNameContains(last) => {
                User::find_by_last_name_containing(&self.db, &last).await
            }
            NameQuery::All => User::find_all(&self.db).await,
        }
    }

    pub async fn count(&self) -> UserResult<i64> {
        User::count(&self.db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_names_dispatch_to_full_name_match() {
        let query = NameQuery::from_params(Some("Alice".into()), Some("Smith".into()));
        assert_eq!(query, NameQuery::FullName("Alice".into(), "Smith".into()));
    }

    #[test]
    fn first_name_alone_dispatches_to_first_name_match() {
        let query = NameQuery::from_params(Some("alice".into()), None);
        assert_eq!(query, NameQuery::FirstName("alice".into()));
    }

    #[test]
    fn last_name_alone_dispatches_to_substring_match() {
        let query = NameQuery::from_params(None, Some("Smith".into()));
        assert_eq!(query, NameQuery::LastNameContains("Smith".into()));
    }

    #[test]
    fn no_names_dispatch_to_full_scan() {
        assert_eq!(NameQuery::from_params(None, None), NameQuery::All);
    }

    #[test]
    fn present_but_empty_params_still_count_as_present() {
        let query = NameQuery::from_params(Some(String::new()), Some(String::new()));
        assert_eq!(query, NameQuery::FullName(String::new(), String::new()));
    }
}
