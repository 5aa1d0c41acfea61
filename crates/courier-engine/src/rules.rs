//! Transition rules for the order lifecycle.
//!
//! Orders move forward along the happy path `Pending -> Accepted ->
//! Shopping -> Delivering -> Completed` or sideways into `Cancelled`;
//! they never regress. Legality depends on the actor: runners advance the
//! orders they claimed, students cancel their own orders while the order
//! is still cancellable, admins can force-cancel any non-terminal order
//! but never move an order forward on someone's behalf.

use courier_types::{ActorRole, Order, OrderPatch, OrderStatus};
use thiserror::Error;

/// Errors a proposed transition can fail with.
///
/// All variants are recoverable: callers prompt, retry, or ignore as
/// appropriate. The no-op case is distinct from the illegal case so
/// callers can tell "already there" apart from "not allowed".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
	/// The transition is not permitted for this actor/state combination.
	#[error("cannot move order from {from} to {to} as {role}")]
	Illegal {
		from: OrderStatus,
		to: OrderStatus,
		role: ActorRole,
	},
	/// The requested target equals the current status.
	#[error("order is already {status}")]
	NoOp { status: OrderStatus },
	/// Cancellation was requested without a non-empty reason.
	#[error("cancellation requires a reason")]
	MissingReason,
}

/// Decides whether `actor` may move `order` to `target`.
///
/// Self-transitions are always `false`; [`apply_transition`] reports them
/// as [`TransitionError::NoOp`] rather than `Illegal`.
pub fn can_transition(
	order: &Order,
	role: ActorRole,
	actor_id: &str,
	target: OrderStatus,
) -> bool {
	if order.status == target {
		return false;
	}
	match (order.status, target) {
		// Any runner may claim an unassigned pending order.
		(OrderStatus::Pending, OrderStatus::Accepted) => {
			role == ActorRole::Runner && order.runner_id.is_none()
		}
		// Only the assigned runner advances the order.
		(OrderStatus::Accepted, OrderStatus::Shopping)
		| (OrderStatus::Shopping, OrderStatus::Delivering)
		| (OrderStatus::Delivering, OrderStatus::Completed) => {
			role == ActorRole::Runner && order.runner_id.as_deref() == Some(actor_id)
		}
		// Student cancellation closes once the runner is en route.
		(
			OrderStatus::Pending | OrderStatus::Accepted | OrderStatus::Shopping,
			OrderStatus::Cancelled,
		) => match role {
			ActorRole::Student => order.student_id == actor_id,
			ActorRole::Admin => true,
			ActorRole::Runner => false,
		},
		// Admin override reaches every non-terminal status.
		(OrderStatus::Delivering, OrderStatus::Cancelled) => role == ActorRole::Admin,
		_ => false,
	}
}

/// Validates a transition and builds the patch it would apply.
///
/// The patch carries the new status, the one timestamp field for the
/// entered status stamped with `now`, the claiming runner's id on
/// `Pending -> Accepted`, and the cancellation reason on transitions into
/// `Cancelled`. The input order is not mutated; the caller persists the
/// patch atomically.
pub fn apply_transition(
	order: &Order,
	role: ActorRole,
	actor_id: &str,
	target: OrderStatus,
	now: u64,
	reason: Option<&str>,
) -> Result<OrderPatch, TransitionError> {
	if order.status == target {
		return Err(TransitionError::NoOp { status: target });
	}
	if !can_transition(order, role, actor_id, target) {
		return Err(TransitionError::Illegal {
			from: order.status,
			to: target,
			role,
		});
	}

	let mut patch = OrderPatch::status_only(target);
	match target {
		OrderStatus::Accepted => {
			patch.runner_id = Some(actor_id.to_string());
			patch.accepted_at = Some(now);
		}
		OrderStatus::Shopping => patch.shopping_started_at = Some(now),
		OrderStatus::Delivering => patch.delivering_started_at = Some(now),
		OrderStatus::Completed => patch.completed_at = Some(now),
		OrderStatus::Cancelled => {
			let reason = reason
				.map(str::trim)
				.filter(|r| !r.is_empty())
				.ok_or(TransitionError::MissingReason)?;
			patch.cancelled_at = Some(now);
			patch.cancellation_reason = Some(reason.to_string());
		}
		// Orders are created pending; no transition enters it.
		OrderStatus::Pending => {}
	}
	Ok(patch)
}
