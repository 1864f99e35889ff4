pub use crate::auth::repo_types::User;
use crate::error::{AppError, AppResult};
use sqlx::SqlitePool;

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password.
    ///
    /// The unique index on `email` decides concurrent registrations; the loser gets
    /// `AppError::Conflict`.
    pub async fn create(db: &SqlitePool, email: &str, password_hash: &str) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password)
            VALUES (?, ?)
            RETURNING id, email, password
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("User already exists".into())
            }
            other => AppError::Database(other),
        })?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[tokio::test]
    async fn create_then_find_by_email() {
        let state = AppState::for_tests().await;
        let created = User::create(&state.db, "a@x.com", "hash").await.unwrap();
        let found = User::find_by_email(&state.db, "a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "hash");
        assert!(User::find_by_email(&state.db, "b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let state = AppState::for_tests().await;
        User::create(&state.db, "a@x.com", "h1").await.unwrap();
        let err = User::create(&state.db, "a@x.com", "h2").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&state.db)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn hash_lands_in_password_column() {
        let state = AppState::for_tests().await;
        User::create(&state.db, "a@x.com", "$argon2id$stub").await.unwrap();
        let (stored,): (String,) = sqlx::query_as("SELECT password FROM users WHERE email = ?")
            .bind("a@x.com")
            .fetch_one(&state.db)
            .await
            .unwrap();
        assert_eq!(stored, "$argon2id$stub");
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            id: 1,
            email: "a@x.com".into(),
            password_hash: "secret".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password_hash"));
    }
}
