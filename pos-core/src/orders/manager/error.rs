use super::super::storage::StorageError;
use super::super::traits::OrderError;
use crate::auth::PermissionDenied;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Permission(#[from] PermissionDenied),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Map a storage failure to a system error code.
///
/// redb does not expose typed causes for every failure, so the message is
/// inspected for the disk-full and corruption cases.
fn classify_storage_error(e: &StorageError) -> ErrorCode {
    match e {
        StorageError::Serialization(_) => return ErrorCode::InternalError,
        StorageError::OrderNotFound(_) => return ErrorCode::OrderNotFound,
        _ => {}
    }

    let err_str = e.to_string().to_lowercase();

    if err_str.contains("no space") || err_str.contains("disk full") || err_str.contains("enospc")
    {
        return ErrorCode::StorageFull;
    }

    if err_str.contains("corrupt") || err_str.contains("invalid database") {
        return ErrorCode::StorageCorrupted;
    }

    // Database/Transaction/Table/Storage/Commit errors are treated as transient
    ErrorCode::SystemBusy
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Storage(e) => {
                let code = classify_storage_error(&e);
                tracing::error!(error = %e, error_code = %code, "Storage error occurred");
                AppError::with_message(code, e.to_string())
            }
            ManagerError::Permission(e) => e.into(),
            ManagerError::Order(OrderError::Storage(msg)) => {
                tracing::error!(error = %msg, "Storage error during command");
                AppError::with_message(ErrorCode::SystemBusy, msg)
            }
            ManagerError::Order(e) => e.into(),
            ManagerError::Internal(msg) => AppError::with_message(ErrorCode::InternalError, msg),
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;
