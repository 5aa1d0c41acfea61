//! Event types for post-transition notification.
//!
//! Events flow through a broadcast bus after a transition has been
//! persisted, letting notification and audit consumers react without
//! being on the write path. Publishing is best-effort; the persisted
//! order remains the source of truth.

use crate::{ActorRole, Order, OrderStatus};
use serde::{Deserialize, Serialize};

/// Lifecycle events published after a successful persisted change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LifecycleEvent {
	/// A new order was created in `Pending` status.
	Created {
		/// The order as persisted.
		order: Order,
	},
	/// An order moved to a new status.
	Transitioned {
		/// Identifier of the order.
		order_id: String,
		/// Status before the transition.
		from: OrderStatus,
		/// Status after the transition.
		to: OrderStatus,
		/// Role of the actor that triggered the transition.
		role: ActorRole,
		/// Timestamp stamped on the transition, Unix seconds.
		at: u64,
	},
}
