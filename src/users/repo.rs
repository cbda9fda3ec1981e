use sqlx::PgPool;

use crate::error::{UserError, UserResult};
use crate::users::repo_types::User;

/// Unique-index failures become `Constraint`; anything else stays a
/// database error.
fn constraint_or_db(e: sqlx::Error) -> UserError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            UserError::Constraint(db_err.message().to_string())
        }
        _ => UserError::Database(e),
    }
}

impl User {
    /// Point lookup by primary key.
    pub async fn find_by_id(db: &PgPool, id: i64) -> UserResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find a user by email (exact, case-sensitive).
    pub async fn find_by_email(db: &PgPool, email: &str) -> UserResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn exists_by_email(db: &PgPool, email: &str) -> UserResult<bool> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(db)
            .await?;
        Ok(row.0)
    }

    /// Full scan; row order carries no meaning.
    pub async fn find_all(db: &PgPool) -> UserResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, password_hash, created_at
            FROM users
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    /// First-name equality, case-insensitive.
    pub async fn find_by_first_name(db: &PgPool, first_name: &str) -> UserResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, password_hash, created_at
            FROM users
            WHERE lower(first_name) = lower($1)
            "#,
        )
        .bind(first_name)
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    /// Last-name substring match, case-sensitive.
    pub async fn find_by_last_name_containing(db: &PgPool, fragment: &str) -> UserResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, password_hash, created_at
            FROM users
            WHERE last_name LIKE '%' || $1 || '%'
            "#,
        )
        .bind(fragment)
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    /// Exact full-name match, case-sensitive on both parts.
    pub async fn find_by_full_name(
        db: &PgPool,
        first_name: &str,
        last_name: &str,
    ) -> UserResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, password_hash, created_at
            FROM users
            WHERE first_name = $1 AND last_name = $2
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    /// Insert a new user; id and created_at come back from the store. An
    /// email already present surfaces as `Constraint` from the unique index.
    pub async fn insert(
        db: &PgPool,
        email: &str,
        first_name: &str,
        last_name: &str,
        password_hash: &str,
    ) -> UserResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, first_name, last_name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, first_name, last_name, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(first_name)
        .bind(last_name)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .map_err(constraint_or_db)?;
        Ok(user)
    }

    /// Persist an updated row. created_at is immutable and left untouched.
    pub async fn update(db: &PgPool, user: &User) -> UserResult<User> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $2, first_name = $3, last_name = $4, password_hash = $5
            WHERE id = $1
            RETURNING id, email, first_name, last_name, password_hash, created_at
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .fetch_optional(db)
        .await
        .map_err(constraint_or_db)?;
        updated.ok_or(UserError::NotFound)
    }

    /// Hard delete.
    pub async fn delete_by_id(db: &PgPool, id: i64) -> UserResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(UserError::NotFound);
        }
        Ok(())
    }

    pub async fn count(db: &PgPool) -> UserResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await?;
        Ok(row.0)
    }
}
