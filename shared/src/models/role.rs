//! Role and capability model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Staff role (rol)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    /// Waiter; legacy records use `mesero`
    #[serde(rename = "mozo", alias = "mesero")]
    Waiter,
    #[serde(rename = "cocina")]
    Kitchen,
    #[serde(rename = "caja")]
    Cashier,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Waiter, Role::Kitchen, Role::Cashier];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Waiter => "mozo",
            Role::Kitchen => "cocina",
            Role::Cashier => "caja",
        }
    }

    /// Parse a stored role name, accepting the `mesero` alias
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "mozo" | "mesero" => Some(Role::Waiter),
            "cocina" => Some(Role::Kitchen),
            "caja" => Some(Role::Cashier),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation capability checked by the permission gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Create,
    Update,
    Delete,
    ProcessPayments,
    ViewPayments,
    ViewAll,
    /// Move items through kitchen states or cancel them
    AdvanceItems,
    /// Void (anular) a settled payment
    VoidPayments,
}

impl Capability {
    pub const ALL: [Capability; 8] = [
        Capability::Create,
        Capability::Update,
        Capability::Delete,
        Capability::ProcessPayments,
        Capability::ViewPayments,
        Capability::ViewAll,
        Capability::AdvanceItems,
        Capability::VoidPayments,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Create => "create",
            Capability::Update => "update",
            Capability::Delete => "delete",
            Capability::ProcessPayments => "process_payments",
            Capability::ViewPayments => "view_payments",
            Capability::ViewAll => "view_all",
            Capability::AdvanceItems => "advance_items",
            Capability::VoidPayments => "void_payments",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flattened capability set for UI gating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionFlags {
    pub can_create: bool,
    pub can_update: bool,
    pub can_delete: bool,
    pub can_process_payments: bool,
    pub can_view_payments: bool,
    pub can_view_all: bool,
    pub can_advance_items: bool,
    pub can_void_payments: bool,
}

impl PermissionFlags {
    pub fn from_capabilities(caps: &[Capability]) -> Self {
        let has = |c: Capability| caps.contains(&c);
        Self {
            can_create: has(Capability::Create),
            can_update: has(Capability::Update),
            can_delete: has(Capability::Delete),
            can_process_payments: has(Capability::ProcessPayments),
            can_view_payments: has(Capability::ViewPayments),
            can_view_all: has(Capability::ViewAll),
            can_advance_items: has(Capability::AdvanceItems),
            can_void_payments: has(Capability::VoidPayments),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesero_alias() {
        let role: Role = serde_json::from_str("\"mesero\"").unwrap();
        assert_eq!(role, Role::Waiter);
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"mozo\"");
        assert_eq!(Role::parse(" Mesero "), Some(Role::Waiter));
        assert_eq!(Role::parse("chef"), None);
    }

    #[test]
    fn test_flags_from_capabilities() {
        let flags =
            PermissionFlags::from_capabilities(&[Capability::ViewAll, Capability::AdvanceItems]);
        assert!(flags.can_view_all);
        assert!(flags.can_advance_items);
        assert!(!flags.can_process_payments);
        assert!(!flags.can_delete);
    }
}
