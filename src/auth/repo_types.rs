use sqlx::FromRow;
use uuid::Uuid;

/// User record in the database. `created_at`/`updated_at` live in the table
/// but are not loaded.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,        // Argon2id PHC string, never sent to clients
}
