//! Permission Definitions
//!
//! Fixed role → capability table. Every command is checked against the
//! caller's session before any storage access; unknown or missing grants
//! deny.

use shared::error::{AppError, ErrorCode};
use shared::models::{Capability, PermissionFlags, Role};
use shared::order::OrderCommandPayload;
use thiserror::Error;

/// Admin holds every capability
pub const ADMIN_CAPABILITIES: &[Capability] = &Capability::ALL;

/// Waiters open and edit orders and move items along (serve)
pub const WAITER_CAPABILITIES: &[Capability] = &[
    Capability::Create,
    Capability::Update,
    Capability::AdvanceItems,
];

/// Kitchen reads everything and advances or cancels items; no payments
pub const KITCHEN_CAPABILITIES: &[Capability] = &[Capability::ViewAll, Capability::AdvanceItems];

/// Cashier settles and voids payments
pub const CASHIER_CAPABILITIES: &[Capability] = &[
    Capability::ProcessPayments,
    Capability::ViewPayments,
    Capability::ViewAll,
    Capability::VoidPayments,
];

/// Capabilities that allow a stock check
pub const STOCK_CHECK_CAPABILITIES: &[Capability] =
    &[Capability::Create, Capability::Update, Capability::ViewAll];

/// Explicit caller context handed to every operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub user_name: String,
    pub role: Role,
}

impl Session {
    pub fn new(user_id: i64, user_name: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("role {role} lacks capability {}", describe(.required))]
pub struct PermissionDenied {
    pub role: Role,
    /// Any one of these would have been sufficient
    pub required: Vec<Capability>,
}

impl From<PermissionDenied> for AppError {
    fn from(err: PermissionDenied) -> Self {
        let required: Vec<&str> = err.required.iter().map(|c| c.as_str()).collect();
        AppError::with_message(ErrorCode::PermissionDenied, err.to_string())
            .with_detail("role", err.role.as_str())
            .with_detail("required", required)
    }
}

fn describe(caps: &[Capability]) -> String {
    caps.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(" | ")
}

/// Stateless gate over the fixed role table
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionGate;

impl PermissionGate {
    pub fn capabilities(role: Role) -> &'static [Capability] {
        match role {
            Role::Admin => ADMIN_CAPABILITIES,
            Role::Waiter => WAITER_CAPABILITIES,
            Role::Kitchen => KITCHEN_CAPABILITIES,
            Role::Cashier => CASHIER_CAPABILITIES,
        }
    }

    pub fn allows(role: Role, capability: Capability) -> bool {
        Self::capabilities(role).contains(&capability)
    }

    pub fn flags(role: Role) -> PermissionFlags {
        PermissionFlags::from_capabilities(Self::capabilities(role))
    }

    /// Fail unless the session holds `capability`
    pub fn require(session: &Session, capability: Capability) -> Result<(), PermissionDenied> {
        Self::require_any(session, &[capability])
    }

    /// Fail unless the session holds at least one of `capabilities`
    pub fn require_any(
        session: &Session,
        capabilities: &[Capability],
    ) -> Result<(), PermissionDenied> {
        if capabilities.iter().any(|c| Self::allows(session.role, *c)) {
            return Ok(());
        }
        crate::security_log!(
            "WARN",
            "permission_denied",
            user_id = session.user_id,
            user_name = session.user_name.as_str(),
            role = session.role.as_str(),
            required = describe(capabilities).as_str()
        );
        Err(PermissionDenied {
            role: session.role,
            required: capabilities.to_vec(),
        })
    }

    /// Capability a command needs
    pub fn capability_for(payload: &OrderCommandPayload) -> Capability {
        match payload {
            OrderCommandPayload::OpenOrder { .. } => Capability::Create,
            OrderCommandPayload::AddItem { .. }
            | OrderCommandPayload::UpdateItem { .. }
            | OrderCommandPayload::RemoveItem { .. }
            | OrderCommandPayload::UpdateOrderInfo { .. } => Capability::Update,
            OrderCommandPayload::AdvanceItem { .. } | OrderCommandPayload::CancelItem { .. } => {
                Capability::AdvanceItems
            }
            OrderCommandPayload::ProcessPayment { .. } => Capability::ProcessPayments,
            OrderCommandPayload::VoidPayment { .. } => Capability::VoidPayments,
            OrderCommandPayload::DeleteOrder { .. } => Capability::Delete,
        }
    }
}
