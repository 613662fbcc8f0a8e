//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity (mesa)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: i64,
    pub number: String,
    pub capacity: i32,
    pub status: TableStatus,
    pub is_active: bool,
}

impl DiningTable {
    /// A table can take a new order only while free and active
    pub fn is_available(&self) -> bool {
        self.is_active && self.status == TableStatus::Available
    }
}

/// Table occupancy status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TableStatus {
    #[default]
    #[serde(rename = "disponible")]
    Available,
    #[serde(rename = "ocupada")]
    Occupied,
    #[serde(rename = "limpieza")]
    Cleaning,
    #[serde(rename = "reservada")]
    Reserved,
    #[serde(rename = "fuera_servicio")]
    OutOfService,
}

impl TableStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TableStatus::Available => "disponible",
            TableStatus::Occupied => "ocupada",
            TableStatus::Cleaning => "limpieza",
            TableStatus::Reserved => "reservada",
            TableStatus::OutOfService => "fuera_servicio",
        }
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
