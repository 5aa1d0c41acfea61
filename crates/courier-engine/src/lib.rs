//! Order lifecycle engine for the courier marketplace.
//!
//! This crate is the single authority on what status an order may be in,
//! which actor may trigger which transition, what fields a transition
//! stamps, and what a caller may derive from the current state (progress,
//! ETA, available actions). Every surface that previously re-derived
//! `can_accept` / `can_cancel` / status-to-color maps locally calls this
//! facade instead.
//!
//! The engine is pure and stateless: it holds no orders between calls,
//! performs no I/O, and is safe to call from any number of concurrent
//! callers. A successful [`apply_transition`] returns an
//! [`OrderPatch`](courier_types::OrderPatch) describing intent; the
//! persistence layer is responsible for applying it atomically and is the
//! source of truth.

/// Derived read-only views: progress, ETA, available actions.
pub mod derive;
/// Static per-status display metadata.
pub mod registry;
/// Transition legality and patch construction.
pub mod rules;

pub use derive::{
	available_actions, derive_view, estimated_minutes_remaining, progress_fraction, OrderView,
};
pub use registry::describe;
pub use rules::{apply_transition, can_transition, TransitionError};

#[cfg(test)]
mod tests {
	use super::*;
	use courier_types::{ActorRole, Order, OrderStatus};

	fn order_in(status: OrderStatus) -> Order {
		let mut order = Order::new("o-1", "stu-1", 1_000);
		order.status = status;
		if status != OrderStatus::Pending {
			order.runner_id = Some("run-1".into());
		}
		order
	}

	#[test]
	fn can_transition_is_reflexive_false() {
		for status in OrderStatus::ALL {
			let order = order_in(status);
			for role in ActorRole::ALL {
				for actor in ["stu-1", "run-1", "adm-1"] {
					assert!(!can_transition(&order, role, actor, status));
				}
			}
		}
	}

	#[test]
	fn happy_path_successor_is_runner_only() {
		for status in [
			OrderStatus::Pending,
			OrderStatus::Accepted,
			OrderStatus::Shopping,
			OrderStatus::Delivering,
		] {
			let order = order_in(status);
			let next = status.happy_path_successor().unwrap();
			assert!(can_transition(&order, ActorRole::Runner, "run-1", next));
			assert!(!can_transition(&order, ActorRole::Student, "stu-1", next));
			assert!(!can_transition(&order, ActorRole::Admin, "adm-1", next));
		}
	}

	#[test]
	fn progress_never_decreases_along_applied_transitions() {
		let mut order = order_in(OrderStatus::Pending);
		order.runner_id = None;
		let mut now = 2_000;
		let mut previous = progress_fraction(&order);

		for target in [
			OrderStatus::Accepted,
			OrderStatus::Shopping,
			OrderStatus::Delivering,
			OrderStatus::Completed,
		] {
			let patch =
				apply_transition(&order, ActorRole::Runner, "run-1", target, now, None).unwrap();
			patch.apply_to(&mut order);
			let current = progress_fraction(&order);
			assert!(current >= previous, "progress regressed entering {target}");
			previous = current;
			now += 60;
		}
	}

	#[test]
	fn cancelling_resets_progress_to_zero() {
		let order = order_in(OrderStatus::Shopping);
		assert!(progress_fraction(&order) > 0.0);

		let patch = apply_transition(
			&order,
			ActorRole::Admin,
			"adm-1",
			OrderStatus::Cancelled,
			2_000,
			Some("stockout"),
		)
		.unwrap();
		let mut cancelled = order.clone();
		patch.apply_to(&mut cancelled);
		assert_eq!(progress_fraction(&cancelled), 0.0);
	}

	// Scenario: two runners race for the same pending order. The first
	// patch wins; re-checking against the patched order rejects the loser.
	#[test]
	fn losing_runner_is_rejected_after_the_claim_lands() {
		let mut order = order_in(OrderStatus::Pending);
		order.runner_id = None;

		let patch = apply_transition(
			&order,
			ActorRole::Runner,
			"run-1",
			OrderStatus::Accepted,
			2_000,
			None,
		)
		.unwrap();
		assert_eq!(patch.runner_id.as_deref(), Some("run-1"));
		assert_eq!(patch.accepted_at, Some(2_000));
		patch.apply_to(&mut order);

		assert!(!can_transition(
			&order,
			ActorRole::Runner,
			"run-2",
			OrderStatus::Accepted
		));
	}

	#[test]
	fn student_cancellation_needs_a_reason_then_succeeds() {
		let order = order_in(OrderStatus::Shopping);
		let err = apply_transition(
			&order,
			ActorRole::Student,
			"stu-1",
			OrderStatus::Cancelled,
			2_000,
			Some(""),
		)
		.unwrap_err();
		assert_eq!(err, TransitionError::MissingReason);

		let patch = apply_transition(
			&order,
			ActorRole::Student,
			"stu-1",
			OrderStatus::Cancelled,
			2_000,
			Some("changed mind"),
		)
		.unwrap();
		assert_eq!(patch.cancelled_at, Some(2_000));
	}

	#[test]
	fn delivering_is_past_the_student_cancellation_window() {
		let order = order_in(OrderStatus::Delivering);
		assert!(!can_transition(
			&order,
			ActorRole::Student,
			"stu-1",
			OrderStatus::Cancelled
		));
		assert!(can_transition(
			&order,
			ActorRole::Admin,
			"adm-1",
			OrderStatus::Cancelled
		));
	}

	#[test]
	fn shopping_progress_and_delivering_eta_match_the_tables() {
		assert_eq!(progress_fraction(&order_in(OrderStatus::Shopping)), 0.6);
		assert_eq!(progress_fraction(&order_in(OrderStatus::Cancelled)), 0.0);
		assert_eq!(
			estimated_minutes_remaining(&order_in(OrderStatus::Delivering), 123_456),
			15
		);
	}
}
