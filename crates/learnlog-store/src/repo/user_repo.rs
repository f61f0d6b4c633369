use chrono::Utc;
use learnlog_core::errors::JournalError;
use learnlog_core::model::{PasswordHash, User};
use learnlog_core::repo::UserRepository;
use rusqlite::{params, OptionalExtension};

use super::hydration::{to_millis, user_from_row, USER_COLUMNS};
use crate::db::Session;
use crate::errors::{from_rusqlite, is_unique_violation, Result};

impl UserRepository for Session {
    fn insert_user(&mut self, email: &str, password_hash: &PasswordHash) -> Result<User> {
        let duplicate = || JournalError::DuplicateUser {
            email: email.to_string(),
        };

        let tx = self.write_tx()?;
        let exists = tx
            .query_row("SELECT 1 FROM users WHERE email = ?", [email], |_| Ok(()))
            .optional()
            .map_err(from_rusqlite)?
            .is_some();
        if exists {
            return Err(duplicate());
        }

        tx.execute(
            "INSERT INTO users (email, password_hash, created_at) VALUES (?1, ?2, ?3)",
            params![email, password_hash.as_phc(), to_millis(Utc::now())],
        )
        .map_err(|e| {
            if is_unique_violation(&e, "users.email") {
                duplicate()
            } else {
                from_rusqlite(e)
            }
        })?;
        let id = tx.last_insert_rowid();

        let user = tx
            .query_row(
                &format!("SELECT {} FROM users u WHERE u.id = ?", USER_COLUMNS),
                [id],
                user_from_row,
            )
            .map_err(from_rusqlite)?;
        tx.commit().map_err(from_rusqlite)?;
        Ok(user)
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM users u WHERE u.email = ?", USER_COLUMNS),
                [email],
                user_from_row,
            )
            .optional()
            .map_err(from_rusqlite)
    }
}
