//! Shared types for the cevicheria POS core
//!
//! Serializable domain types used by the order engine and its callers:
//! order snapshots, events and commands, catalog models, and the unified
//! error system.

pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
