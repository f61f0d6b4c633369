//! Redacting wrapper for secrets
//!
//! Plaintext passwords travel through the credential operations wrapped in
//! [`Sensitive`], so an accidental `{:?}` in a log line or error message
//! prints `***REDACTED***` instead of the secret.

use std::fmt;

/// Wrapper that hides its contents from `Debug` and `Display`
///
/// ```
/// use learnlog_core_types::Sensitive;
///
/// let password = Sensitive::new("pw123456");
/// assert_eq!(format!("{:?}", password), "***REDACTED***");
/// assert_eq!(password.expose(), &"pw123456");
/// ```
#[derive(Clone, Copy)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Access the secret. Only the hashing and verification primitives
    /// should need this.
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***REDACTED***")
    }
}
