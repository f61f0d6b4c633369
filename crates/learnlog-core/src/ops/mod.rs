//! Journal operations
//!
//! Free functions generic over the repository traits. This layer owns:
//! - input validation (re-checked even if a form already did it)
//! - ownership checks against the caller's [`Identity`](crate::model::Identity)
//! - lifecycle logging (`log_op_start!` / `log_op_end!` / `log_op_error!`)
//!
//! Backends only emit `tracing::debug!` for their internals.

pub mod credential_ops;
pub mod entry_ops;
pub mod tag_ops;

use std::time::Instant;

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
