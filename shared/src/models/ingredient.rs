//! Ingredient and recipe models

use serde::{Deserialize, Serialize};

/// Ingredient entity (ingrediente)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub stock: f64,
    pub min_stock: f64,
    /// Unit of measure (kg, l, unidad, ...)
    pub unit: String,
}

impl Ingredient {
    pub fn is_low(&self) -> bool {
        self.stock <= self.min_stock
    }
}

/// Consumption ratio of one ingredient per unit of product sold
/// (producto_ingrediente)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    pub product_id: i64,
    pub ingredient_id: i64,
    pub required_quantity: f64,
}
