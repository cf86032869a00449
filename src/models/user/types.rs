use chrono::{DateTime, Utc};

/// Administrator account, including the password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Name shown in the header: display name, falling back to the username.
    pub fn shown_name(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }
}

/// New administrator data; `password_hash` is already hashed.
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
}
