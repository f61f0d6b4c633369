use serde::{Deserialize, Serialize};

use super::ids::TagId;

/// A unique, normalised label that entries of any owner can carry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}
