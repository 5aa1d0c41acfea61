//! Common types module for the courier marketplace.
//!
//! This module defines the core data types and structures shared by the
//! lifecycle engine and its collaborators. It provides a centralized
//! location for shared types to ensure consistency across all crates.

/// Actor roles and authorization identity.
pub mod actor;
/// Event types for post-transition notification.
pub mod events;
/// Order, status, and patch types for the lifecycle engine.
pub mod order;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Storage types for managing persistent data.
pub mod storage;

// Re-export all types for convenient access
pub use actor::*;
pub use events::*;
pub use order::*;
pub use registry::*;
pub use storage::*;
