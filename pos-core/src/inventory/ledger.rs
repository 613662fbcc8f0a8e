//! Product stock ledger
//!
//! Holds ingredient stock and per-product consumption ratios. `check` is a
//! pure read; `consume` is only called by storage inside the write
//! transaction that adds the item.

use rust_decimal::prelude::*;
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Ingredient, RecipeLine};
use std::collections::HashMap;
use thiserror::Error;

/// One ingredient that cannot cover a sale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockShortage {
    pub ingredient_id: i64,
    pub name: String,
    pub unit: String,
    pub available: f64,
    pub required: f64,
    pub missing: f64,
}

/// Amount of one ingredient a sale draws
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockUsage {
    pub ingredient_id: i64,
    pub quantity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InventoryError {
    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(i32),

    #[error("ingredient {ingredient_id} referenced by product {product_id} does not exist")]
    IngredientNotFound { product_id: i64, ingredient_id: i64 },

    #[error("insufficient stock for product {product_id} x{quantity}: {} ingredient(s) short", shortages.len())]
    InsufficientStock {
        product_id: i64,
        quantity: i32,
        shortages: Vec<StockShortage>,
    },
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        let message = err.to_string();
        match err {
            InventoryError::InvalidQuantity(q) => {
                AppError::with_message(ErrorCode::ValidationFailed, message)
                    .with_detail("quantity", q)
            }
            InventoryError::IngredientNotFound {
                product_id,
                ingredient_id,
            } => AppError::with_message(ErrorCode::IngredientNotFound, message)
                .with_detail("product_id", product_id)
                .with_detail("ingredient_id", ingredient_id),
            InventoryError::InsufficientStock {
                product_id,
                quantity,
                shortages,
            } => AppError::with_message(ErrorCode::InsufficientStock, message)
                .with_detail("product_id", product_id)
                .with_detail("quantity", quantity)
                .with_detail(
                    "shortages",
                    serde_json::to_value(&shortages).unwrap_or_default(),
                ),
        }
    }
}

#[inline]
fn dec(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

#[inline]
fn float(value: Decimal) -> f64 {
    value.normalize().to_f64().unwrap_or_default()
}

#[derive(Debug, Clone, Default)]
pub struct StockLedger {
    ingredients: HashMap<i64, Ingredient>,
    recipes: HashMap<i64, Vec<RecipeLine>>,
}

impl StockLedger {
    pub fn new(
        ingredients: impl IntoIterator<Item = Ingredient>,
        recipe_lines: impl IntoIterator<Item = RecipeLine>,
    ) -> Self {
        let mut ledger = Self::default();
        for ingredient in ingredients {
            ledger.ingredients.insert(ingredient.id, ingredient);
        }
        for line in recipe_lines {
            ledger.recipes.entry(line.product_id).or_default().push(line);
        }
        ledger
    }

    pub fn ingredient(&self, id: i64) -> Option<&Ingredient> {
        self.ingredients.get(&id)
    }

    pub fn ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.values()
    }

    /// Recipe lines for a product; empty when the product has no recipe
    pub fn recipe(&self, product_id: i64) -> &[RecipeLine] {
        self.recipes
            .get(&product_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ingredient draw for selling `quantity` units, without checking stock
    pub fn usage(&self, product_id: i64, quantity: i32) -> Result<Vec<StockUsage>, InventoryError> {
        if quantity < 1 {
            return Err(InventoryError::InvalidQuantity(quantity));
        }
        let units = Decimal::from(quantity);
        self.recipe(product_id)
            .iter()
            .map(|line| {
                if !self.ingredients.contains_key(&line.ingredient_id) {
                    return Err(InventoryError::IngredientNotFound {
                        product_id,
                        ingredient_id: line.ingredient_id,
                    });
                }
                Ok(StockUsage {
                    ingredient_id: line.ingredient_id,
                    quantity: units * dec(line.required_quantity),
                })
            })
            .collect()
    }

    /// Verify stock covers `quantity` units of `product_id`.
    ///
    /// Every short ingredient is reported, not just the first.
    pub fn check(&self, product_id: i64, quantity: i32) -> Result<(), InventoryError> {
        let shortages: Vec<StockShortage> = self
            .usage(product_id, quantity)?
            .into_iter()
            .filter_map(|usage| {
                let ingredient = self.ingredients.get(&usage.ingredient_id)?;
                let available = dec(ingredient.stock);
                (available < usage.quantity).then(|| StockShortage {
                    ingredient_id: ingredient.id,
                    name: ingredient.name.clone(),
                    unit: ingredient.unit.clone(),
                    available: float(available),
                    required: float(usage.quantity),
                    missing: float(usage.quantity - available),
                })
            })
            .collect();

        if shortages.is_empty() {
            Ok(())
        } else {
            Err(InventoryError::InsufficientStock {
                product_id,
                quantity,
                shortages,
            })
        }
    }

    /// Check then decrement stock. Returns the ingredients that changed.
    pub fn consume(
        &mut self,
        product_id: i64,
        quantity: i32,
    ) -> Result<Vec<Ingredient>, InventoryError> {
        self.check(product_id, quantity)?;
        let mut changed = Vec::new();
        for usage in self.usage(product_id, quantity)? {
            if let Some(ingredient) = self.ingredients.get_mut(&usage.ingredient_id) {
                ingredient.stock = float(dec(ingredient.stock) - usage.quantity);
                changed.push(ingredient.clone());
            }
        }
        Ok(changed)
    }

    /// Ingredients at or below their minimum, sorted by name
    pub fn low_stock(&self) -> Vec<&Ingredient> {
        let mut low: Vec<&Ingredient> = self.ingredients.values().filter(|i| i.is_low()).collect();
        low.sort_by(|a, b| a.name.cmp(&b.name));
        low
    }
}
