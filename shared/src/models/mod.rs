//! Catalog models
//!
//! Reference data the order engine reads: tables, staff, ingredients and
//! recipe lines. All IDs are `i64`.

pub mod dining_table;
pub mod employee;
pub mod ingredient;
pub mod role;

// Re-exports
pub use dining_table::*;
pub use employee::*;
pub use ingredient::*;
pub use role::*;
