//! Core configuration

pub mod config;

pub use config::{Config, OrderPolicy, PriorityThresholds};
