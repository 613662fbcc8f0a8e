//! Session context and permission gate

pub mod permissions;

pub use permissions::{PermissionDenied, PermissionGate, Session};
