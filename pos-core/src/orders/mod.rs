//! Order Event Sourcing Module
//!
//! This module implements the order state machine using event sourcing:
//!
//! - **manager**: OrdersManager for command processing and event generation
//! - **storage**: redb persistence for events, snapshots, indices and catalog
//! - **actions**: one command handler per command (validate, emit events)
//! - **appliers**: one pure event applier per event
//! - **lifecycle**: derived order status
//! - **money**: decimal totals, validation and settlement
//! - **queries**: read models (open accounts, payment, order and station stats)
//!
//! # Architecture
//!
//! ```text
//! Command → OrdersManager → Event → Storage (redb)
//!                 ↓                      ↓
//!              Broadcast          Snapshot Update
//!                 ↓
//!      BoardWatcher / subscribers
//! ```
//!
//! # Data Flow
//!
//! 1. Caller submits an OrderCommand with its session role
//! 2. OrdersManager checks the permission gate, then validates the command
//! 3. OrderEvent is generated with global sequence
//! 4. Event is persisted to redb (transactional)
//! 5. Snapshot is updated
//! 6. Event is broadcast to all subscribers
//! 7. CommandResponse is returned to the caller

pub mod traits;

pub mod actions;
pub mod appliers;
pub mod lifecycle;
pub mod manager;
pub mod money;
pub mod queries;
pub mod storage;

// Re-exports
pub use manager::{
    CommandOptions, ItemUpdate, ManagerError, ManagerResult, NewOrder, OrderInfoUpdate,
    OrdersManager, PaymentReceipt,
};
pub use queries::{OpenAccount, OrderStats, PaymentStats, StationStats};
pub use storage::{OrderStorage, StorageError};
pub use traits::OrderError;

// Re-export shared types for convenience
pub use shared::order::{
    CommandResponse, EventPayload, OrderCommand, OrderCommandPayload, OrderEvent, OrderEventType,
    OrderSnapshot, OrderStatus,
};
