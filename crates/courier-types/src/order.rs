//! Order types for the courier marketplace.
//!
//! This module defines the order entity, its lifecycle status enum, and the
//! patch type a transition produces. The engine never mutates an order
//! directly; it proposes an [`OrderPatch`] that the persistence layer
//! applies atomically.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an order in the marketplace.
///
/// The happy path runs `Pending -> Accepted -> Shopping -> Delivering ->
/// Completed`. `Cancelled` is a terminal absorbing state reachable from any
/// non-terminal status, subject to role gating enforced by the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
	/// Order has been placed and is waiting for a runner to claim it.
	Pending,
	/// A runner has claimed the order.
	Accepted,
	/// The runner is shopping for the order's items.
	Shopping,
	/// The runner is en route to the student.
	Delivering,
	/// The order has been delivered.
	Completed,
	/// The order was cancelled before completion.
	Cancelled,
}

impl OrderStatus {
	/// Every status, in happy-path order with `Cancelled` last.
	pub const ALL: [OrderStatus; 6] = [
		OrderStatus::Pending,
		OrderStatus::Accepted,
		OrderStatus::Shopping,
		OrderStatus::Delivering,
		OrderStatus::Completed,
		OrderStatus::Cancelled,
	];

	/// Number of statuses on the happy path.
	pub const HAPPY_PATH_LEN: u8 = 5;

	/// Position of this status on the happy path, or `None` for `Cancelled`.
	pub fn ordinal(&self) -> Option<u8> {
		match self {
			OrderStatus::Pending => Some(0),
			OrderStatus::Accepted => Some(1),
			OrderStatus::Shopping => Some(2),
			OrderStatus::Delivering => Some(3),
			OrderStatus::Completed => Some(4),
			OrderStatus::Cancelled => None,
		}
	}

	/// Whether this status admits no further transitions.
	pub fn is_terminal(&self) -> bool {
		matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
	}

	/// The next status on the happy path, if any.
	pub fn happy_path_successor(&self) -> Option<OrderStatus> {
		match self {
			OrderStatus::Pending => Some(OrderStatus::Accepted),
			OrderStatus::Accepted => Some(OrderStatus::Shopping),
			OrderStatus::Shopping => Some(OrderStatus::Delivering),
			OrderStatus::Delivering => Some(OrderStatus::Completed),
			OrderStatus::Completed | OrderStatus::Cancelled => None,
		}
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderStatus::Pending => write!(f, "Pending"),
			OrderStatus::Accepted => write!(f, "Accepted"),
			OrderStatus::Shopping => write!(f, "Shopping"),
			OrderStatus::Delivering => write!(f, "Delivering"),
			OrderStatus::Completed => write!(f, "Completed"),
			OrderStatus::Cancelled => write!(f, "Cancelled"),
		}
	}
}

/// Per-phase timestamps for an order, in Unix seconds.
///
/// `created_at` is stamped at creation and immutable. Each optional field is
/// stamped exactly once, by the transition that enters the corresponding
/// status, and is monotonically non-decreasing along the happy path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
	/// Timestamp when the order was created.
	pub created_at: u64,
	/// Timestamp when a runner accepted the order.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub accepted_at: Option<u64>,
	/// Timestamp when the runner started shopping.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub shopping_started_at: Option<u64>,
	/// Timestamp when the runner started delivering.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub delivering_started_at: Option<u64>,
	/// Timestamp when the order was delivered.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub completed_at: Option<u64>,
	/// Timestamp when the order was cancelled.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub cancelled_at: Option<u64>,
}

impl Timestamps {
	/// Creates a timestamp record for a newly placed order.
	pub fn new(created_at: u64) -> Self {
		Self {
			created_at,
			accepted_at: None,
			shopping_started_at: None,
			delivering_started_at: None,
			completed_at: None,
			cancelled_at: None,
		}
	}
}

/// An order in the campus delivery marketplace.
///
/// Only the fields the lifecycle engine reads or stamps are modeled here;
/// item lines, prices, and addresses live with the backend that owns them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	/// Unique identifier for this order.
	pub id: String,
	/// Current status of the order.
	pub status: OrderStatus,
	/// Identifier of the student who placed the order. Immutable.
	pub student_id: String,
	/// Identifier of the assigned runner. Unset while `Pending`; set once on
	/// acceptance and never reassigned.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub runner_id: Option<String>,
	/// Per-phase timestamps.
	pub timestamps: Timestamps,
	/// Reason given when the order was cancelled.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub cancellation_reason: Option<String>,
}

impl Order {
	/// Creates a new order in `Pending` status.
	pub fn new(
		id: impl Into<String>,
		student_id: impl Into<String>,
		created_at: u64,
	) -> Self {
		Self {
			id: id.into(),
			status: OrderStatus::Pending,
			student_id: student_id.into(),
			runner_id: None,
			timestamps: Timestamps::new(created_at),
			cancellation_reason: None,
		}
	}
}

/// Minimal description of the fields a single transition changes.
///
/// Produced by the engine's `apply_transition`; applied atomically by the
/// persistence layer. Exactly one timestamp field is set, matching the
/// entered status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
	/// The status the order moves to.
	pub status: OrderStatus,
	/// Set only on the `Pending -> Accepted` transition: the claiming runner.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub runner_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub accepted_at: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub shopping_started_at: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub delivering_started_at: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub completed_at: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub cancelled_at: Option<u64>,
	/// Set only on transitions into `Cancelled`.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub cancellation_reason: Option<String>,
}

impl OrderPatch {
	/// A patch that changes only the status.
	pub fn status_only(status: OrderStatus) -> Self {
		Self {
			status,
			runner_id: None,
			accepted_at: None,
			shopping_started_at: None,
			delivering_started_at: None,
			completed_at: None,
			cancelled_at: None,
			cancellation_reason: None,
		}
	}

	/// Applies this patch to an order, setting only the fields the patch
	/// carries.
	pub fn apply_to(&self, order: &mut Order) {
		order.status = self.status;
		if let Some(runner_id) = &self.runner_id {
			order.runner_id = Some(runner_id.clone());
		}
		if let Some(at) = self.accepted_at {
			order.timestamps.accepted_at = Some(at);
		}
		if let Some(at) = self.shopping_started_at {
			order.timestamps.shopping_started_at = Some(at);
		}
		if let Some(at) = self.delivering_started_at {
			order.timestamps.delivering_started_at = Some(at);
		}
		if let Some(at) = self.completed_at {
			order.timestamps.completed_at = Some(at);
		}
		if let Some(at) = self.cancelled_at {
			order.timestamps.cancelled_at = Some(at);
		}
		if let Some(reason) = &self.cancellation_reason {
			order.cancellation_reason = Some(reason.clone());
		}
	}
}

/// Static display metadata for a status.
///
/// This is the label/icon/color mapping that UI surfaces previously
/// re-declared per screen; the engine's registry is the single source.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusMeta {
	/// Human-readable label.
	pub label: &'static str,
	/// Icon name in the client's icon set.
	pub icon: &'static str,
	/// Theme color token.
	pub color_token: &'static str,
	/// Happy-path position, `None` for `Cancelled`.
	pub ordinal: Option<u8>,
}
