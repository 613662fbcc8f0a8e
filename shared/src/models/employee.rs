//! Employee Model

use super::role::Role;
use serde::{Deserialize, Serialize};

/// Employee entity (usuario)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: Role,
    pub is_active: bool,
}

impl Employee {
    /// Active staff with the waiter role can be assigned to an order
    pub fn can_serve_tables(&self) -> bool {
        self.is_active && self.role == Role::Waiter
    }
}
