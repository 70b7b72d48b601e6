use std::fmt;

use sqlx::FromRow;

/// Registered user.
#[derive(Clone, PartialEq, Eq, FromRow)]
pub struct Identity {
    pub id: i64,       // assigned on insert, never changes
    pub email: String, // unique, stored as given
    pub password_hash: String, // Argon2 PHC string
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
