use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ids::UserId;

/// A salted one-way password hash in PHC string format
///
/// Never printed: `Debug` is redacted. The only consumer of the raw string is
/// the storage backend (to persist it) and the verification primitive.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a PHC string loaded from storage
    pub fn from_phc(phc: String) -> Self {
        Self(phc)
    }

    pub fn as_phc(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(***)")
    }
}

/// A registered journal user
///
/// Created once at registration and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: UserId,

    /// Unique, lowercased email address
    pub email: String,

    #[serde(skip)]
    pub password_hash: PasswordHash,

    pub created_at: DateTime<Utc>,
}
