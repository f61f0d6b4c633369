use learnlog_core_types::RequestId;
use thiserror::Error;

/// Result type alias using JournalError
pub type Result<T> = std::result::Result<T, JournalError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by the journal maps to exactly one of these kinds.
/// The presentation layer decides how to render each kind (re-render a form,
/// a not-found page, a CLI exit code); the stores never make that choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    DuplicateUser,
    DuplicateTag,
    InvalidCredentials,
    NotFound,
    /// Ownership violation, or an anonymous caller reaching an owner-scoped operation
    Forbidden,
    /// Missing or malformed required field
    ValidationError,
    /// The storage backend failed underneath us; never retried by the core
    StorageUnavailable,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::DuplicateUser => "ERR_DUPLICATE_USER",
            ExErrorKind::DuplicateTag => "ERR_DUPLICATE_TAG",
            ExErrorKind::InvalidCredentials => "ERR_INVALID_CREDENTIALS",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
            ExErrorKind::ValidationError => "ERR_VALIDATION",
            ExErrorKind::StorageUnavailable => "ERR_STORAGE_UNAVAILABLE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the stable kind plus optional context for the request boundary.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
        }
    }

    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for journal operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JournalError {
    // ===== Uniqueness =====
    #[error("User with that email already exists: {email}")]
    DuplicateUser { email: String },

    #[error("Tag already exists: {name}")]
    DuplicateTag { name: String },

    // ===== Authentication / access =====
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Owner-scoped operation attempted without an authenticated identity
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Caller does not own the entry
    #[error("Entry {entry_id} belongs to another user")]
    Forbidden { entry_id: i64 },

    // ===== Lookup =====
    #[error("No user registered with email: {email}")]
    UserNotFound { email: String },

    #[error("Journal entry not found: {entry_id}")]
    EntryNotFound { entry_id: i64 },

    #[error("Journal entry not found: {slug}")]
    EntrySlugNotFound { slug: String },

    #[error("Tag not found: {name}")]
    TagNotFound { name: String },

    // ===== Validation =====
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    // ===== Backend =====
    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl JournalError {
    /// Shorthand for a field validation failure
    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        JournalError::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Canonical kind of this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            JournalError::DuplicateUser { .. } => ExErrorKind::DuplicateUser,
            JournalError::DuplicateTag { .. } => ExErrorKind::DuplicateTag,
            JournalError::InvalidCredentials => ExErrorKind::InvalidCredentials,
            JournalError::AuthenticationRequired | JournalError::Forbidden { .. } => {
                ExErrorKind::Forbidden
            }
            JournalError::UserNotFound { .. }
            | JournalError::EntryNotFound { .. }
            | JournalError::EntrySlugNotFound { .. }
            | JournalError::TagNotFound { .. } => ExErrorKind::NotFound,
            JournalError::Validation { .. } => ExErrorKind::ValidationError,
            JournalError::StorageUnavailable { .. } => ExErrorKind::StorageUnavailable,
            JournalError::Internal { .. } => ExErrorKind::Internal,
        }
    }
}

/// Conversion from JournalError to the canonical ExError
impl From<JournalError> for ExError {
    fn from(err: JournalError) -> Self {
        let kind = err.kind();
        let base = ExError::new(kind).with_message(err.to_string());
        match err {
            JournalError::DuplicateUser { email } | JournalError::UserNotFound { email } => {
                base.with_entity_id(email)
            }
            JournalError::DuplicateTag { name } | JournalError::TagNotFound { name } => {
                base.with_entity_id(name)
            }
            JournalError::Forbidden { entry_id } | JournalError::EntryNotFound { entry_id } => {
                base.with_entity_id(entry_id.to_string())
            }
            JournalError::EntrySlugNotFound { slug } => base.with_entity_id(slug),
            JournalError::Validation { field, .. } => base.with_entity_id(field),
            JournalError::InvalidCredentials
            | JournalError::AuthenticationRequired
            | JournalError::StorageUnavailable { .. }
            | JournalError::Internal { .. } => base,
        }
    }
}
