//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Inventory errors
//! - 7xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as its u16 value so callers in any language can match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Concurrent modification detected (stale version)
    Conflict = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 2xxx: Permission ====================
    /// Caller lacks the required capability
    PermissionDenied = 2001,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Item not found in order
    ItemNotFound = 4002,
    /// Item state transition not allowed
    InvalidTransition = 4003,
    /// Order has items mid-preparation
    OrderInProgress = 4004,
    /// Entity is not in a state that allows the operation
    InvalidState = 4005,

    // ==================== 5xxx: Payment ====================
    /// Payment not found
    PaymentNotFound = 5001,
    /// Cash tendered is below the order total
    InsufficientCash = 5002,
    /// Payment is past its void window
    VoidWindowExpired = 5003,

    // ==================== 6xxx: Inventory ====================
    /// Ingredient stock cannot cover the sale
    InsufficientStock = 6001,
    /// Ingredient not found
    IngredientNotFound = 6002,

    // ==================== 7xxx: Table ====================
    /// Table is not available or inactive
    TableNotAvailable = 7001,
    /// Table not found
    TableNotFound = 7002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Storage error
    StorageError = 9002,
    /// Transport failure between caller and core
    TransportError = 9003,

    // ==================== 94xx: Storage ====================
    /// Storage full (disk space insufficient)
    StorageFull = 9401,
    /// Storage corrupted (data file damaged)
    StorageCorrupted = 9403,
    /// System busy (IO error, retry later)
    SystemBusy = 9404,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Transient failures that a caller may retry.
    ///
    /// Read-only calls may be retried blindly; mutating calls must reuse
    /// their command id so the retry is deduplicated.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, ErrorCode::TransportError | ErrorCode::SystemBusy)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::Conflict => "Resource was modified concurrently",
            ErrorCode::InvalidRequest => "Invalid request",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::ItemNotFound => "Item not found",
            ErrorCode::InvalidTransition => "Invalid item state transition",
            ErrorCode::OrderInProgress => "Order has items in preparation",
            ErrorCode::InvalidState => "Invalid state for this operation",

            // Payment
            ErrorCode::PaymentNotFound => "Payment not found",
            ErrorCode::InsufficientCash => "Cash amount is below the order total",
            ErrorCode::VoidWindowExpired => "Payment can no longer be voided",

            // Inventory
            ErrorCode::InsufficientStock => "Insufficient ingredient stock",
            ErrorCode::IngredientNotFound => "Ingredient not found",

            // Table
            ErrorCode::TableNotAvailable => "Table is not available",
            ErrorCode::TableNotFound => "Table not found",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::StorageError => "Storage error",
            ErrorCode::TransportError => "Transport error",
            ErrorCode::StorageFull => "Storage full",
            ErrorCode::StorageCorrupted => "Storage corrupted",
            ErrorCode::SystemBusy => "System busy, please retry later",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::Conflict),
            5 => Ok(ErrorCode::InvalidRequest),

            2001 => Ok(ErrorCode::PermissionDenied),

            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::ItemNotFound),
            4003 => Ok(ErrorCode::InvalidTransition),
            4004 => Ok(ErrorCode::OrderInProgress),
            4005 => Ok(ErrorCode::InvalidState),

            5001 => Ok(ErrorCode::PaymentNotFound),
            5002 => Ok(ErrorCode::InsufficientCash),
            5003 => Ok(ErrorCode::VoidWindowExpired),

            6001 => Ok(ErrorCode::InsufficientStock),
            6002 => Ok(ErrorCode::IngredientNotFound),

            7001 => Ok(ErrorCode::TableNotAvailable),
            7002 => Ok(ErrorCode::TableNotFound),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9003 => Ok(ErrorCode::TransportError),
            9401 => Ok(ErrorCode::StorageFull),
            9403 => Ok(ErrorCode::StorageCorrupted),
            9404 => Ok(ErrorCode::SystemBusy),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
