pub use crate::contacts::repo_types::Contact;
use crate::error::AppResult;
use sqlx::SqlitePool;

// Every query here is scoped by user_id.
impl Contact {
    pub async fn create(
        db: &SqlitePool,
        user_id: i64,
        name: &str,
        phone: &str,
    ) -> AppResult<Contact> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (name, phone, user_id)
            VALUES (?, ?, ?)
            RETURNING id, user_id, name, phone
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(user_id)
        .fetch_one(db)
        .await?;
        Ok(contact)
    }

    pub async fn list_by_user(db: &SqlitePool, user_id: i64) -> AppResult<Vec<Contact>> {
        let rows = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, user_id, name, phone
            FROM contacts
            WHERE user_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Returns `false` when no contact with this id belongs to `user_id`.
    pub async fn delete_owned(db: &SqlitePool, user_id: i64, contact_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ? AND user_id = ?")
            .bind(contact_id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
