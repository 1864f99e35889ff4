use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Contact record in the database. Always owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub phone: String,
}
