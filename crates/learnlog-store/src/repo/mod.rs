//! SQLite implementations of the journal repositories
//!
//! Every write runs in an IMMEDIATE transaction, so the check-then-insert
//! sequences (unique email, free slug, get-or-create tag) are serialised
//! against other sessions on the same file. The UNIQUE constraints in the
//! schema back those checks up.

pub mod hydration;

mod entry_repo;
mod tag_repo;
mod user_repo;

use rusqlite::{Transaction, TransactionBehavior};

use crate::db::Session;
use crate::errors::{from_rusqlite, Result};

impl Session {
    pub(crate) fn write_tx(&mut self) -> Result<Transaction<'_>> {
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)
    }
}
