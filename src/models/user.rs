use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A user row as stored in the database.
///
/// Deliberately does not derive `Serialize`: the record carries the bcrypt
/// hash and must never reach a response body. Clients only ever see the
/// fields picked out by the auth response or a task's `createdBy` view.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}
