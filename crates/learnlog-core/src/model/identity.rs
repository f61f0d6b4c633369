//! Caller identity supplied by the session layer
//!
//! Stores trust this value verbatim for scoping; they never re-authenticate.

use serde::{Deserialize, Serialize};

use super::ids::UserId;
use super::user::User;
use crate::errors::{JournalError, Result};

/// An authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
}

impl Identity {
    pub fn owns(&self, owner: UserId) -> bool {
        self.user_id == owner
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
        }
    }
}

/// Who is making a request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Caller {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

impl Caller {
    /// The caller's identity, or `AuthenticationRequired` for anonymous callers
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationRequired` if the caller is anonymous.
    pub fn identity(&self) -> Result<&Identity> {
        match self {
            Caller::Authenticated(identity) => Ok(identity),
            Caller::Anonymous => Err(JournalError::AuthenticationRequired),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Caller::Authenticated(_))
    }
}

impl From<Identity> for Caller {
    fn from(identity: Identity) -> Self {
        Caller::Authenticated(identity)
    }
}
