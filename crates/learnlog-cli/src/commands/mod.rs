//! Command handlers
//!
//! Each handler opens one store session, calls the core operations and
//! prints a plain-text result. Failures are converted to the canonical
//! `ExError` so they print as `[CODE] ...`.

pub mod entry;
pub mod tag;
pub mod user;

use clap::Args;
use learnlog_core::model::{Caller, Identity, JournalEntry};
use learnlog_core::ops::credential_ops;
use learnlog_core::{ExError, JournalError};
use learnlog_core_types::{RequestContext, Sensitive};
use learnlog_store::{Database, Session};

use crate::settings::Settings;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Everything a handler needs for one invocation
pub struct CommandContext {
    pub db: Database,
    pub settings: Settings,
    pub request: RequestContext,
}

impl CommandContext {
    pub fn open(settings: Settings) -> Result<Self, ExError> {
        let request = RequestContext::new();
        let db = Database::open(&settings.database_path)
            .map_err(|e| ExError::from(e).with_request_id(request.request_id.clone()))?;
        Ok(Self {
            db,
            settings,
            request,
        })
    }

    /// Map a journal failure of `op` to the canonical error for this request
    pub fn fail(&self, op: &'static str) -> impl Fn(JournalError) -> ExError + '_ {
        move |err| {
            ExError::from(err)
                .with_op(op)
                .with_request_id(self.request.request_id.clone())
        }
    }
}

/// Optional `--email/--password` pair identifying the caller
#[derive(Debug, Args)]
pub struct Credentials {
    /// Account email
    #[arg(long)]
    pub email: Option<String>,

    /// Account password
    #[arg(long)]
    pub password: Option<String>,
}

impl Credentials {
    /// Authenticate if any credential was given, otherwise anonymous
    pub fn caller(&self, session: &Session) -> learnlog_core::Result<Caller> {
        if self.email.is_none() && self.password.is_none() {
            return Ok(Caller::Anonymous);
        }
        credential_ops::authenticate(
            session,
            self.email.as_deref().unwrap_or_default(),
            Sensitive::new(self.password.as_deref().unwrap_or_default()),
        )
        .map(|user| Caller::from(Identity::from(&user)))
    }
}

pub fn entry_line(entry: &JournalEntry) -> String {
    format!(
        "{}\t{}\t{}min\t{} [{}]",
        entry.id, entry.date, entry.time_spent, entry.title, entry.slug
    )
}
