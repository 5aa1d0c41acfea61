//! Derived read-only views of an order.
//!
//! Pure functions computing what display surfaces need from the current
//! state: progress along the happy path, a coarse ETA, and the set of
//! transitions the calling actor may trigger.

use crate::registry::describe;
use crate::rules::can_transition;
use courier_types::{ActorRole, Order, OrderStatus, StatusMeta};
use serde::Serialize;
use std::collections::HashSet;

/// Fraction of the happy path completed, in `[0, 1]`.
///
/// `Pending` reports `0.0`. Cancelled orders also report `0.0`; callers
/// branch on the status and hide progress entirely rather than render it.
pub fn progress_fraction(order: &Order) -> f64 {
	if order.status == OrderStatus::Pending {
		return 0.0;
	}
	match order.status.ordinal() {
		Some(ordinal) => f64::from(ordinal + 1) / f64::from(OrderStatus::HAPPY_PATH_LEN),
		None => 0.0,
	}
}

/// Coarse minutes-remaining estimate.
///
/// A static per-status table; elapsed time does not feed into it, so the
/// `now` argument is unused by the current heuristic.
pub fn estimated_minutes_remaining(order: &Order, _now: u64) -> u32 {
	match order.status {
		OrderStatus::Pending => 45,
		OrderStatus::Accepted => 35,
		OrderStatus::Shopping => 25,
		OrderStatus::Delivering => 15,
		OrderStatus::Completed | OrderStatus::Cancelled => 0,
	}
}

/// The set of statuses this actor may move the order to right now.
///
/// This single function replaces the per-screen `can_accept` /
/// `can_start_shopping` / `can_cancel` predicates; surfaces render one
/// action button per returned status.
pub fn available_actions(
	order: &Order,
	role: ActorRole,
	actor_id: &str,
) -> HashSet<OrderStatus> {
	OrderStatus::ALL
		.into_iter()
		.filter(|&target| can_transition(order, role, actor_id, target))
		.collect()
}

/// Everything a display surface derives from one order for one actor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
	/// Current status.
	pub status: OrderStatus,
	/// Display metadata for the current status.
	pub meta: StatusMeta,
	/// Happy-path progress in `[0, 1]`; meaningless when cancelled.
	pub progress: f64,
	/// Coarse ETA in minutes.
	pub eta_minutes: u32,
	/// Transitions the actor may trigger.
	pub actions: HashSet<OrderStatus>,
}

/// Computes the full derived view for one actor.
pub fn derive_view(order: &Order, role: ActorRole, actor_id: &str, now: u64) -> OrderView {
	OrderView {
		status: order.status,
		meta: describe(order.status),
		progress: progress_fraction(order),
		eta_minutes: estimated_minutes_remaining(order, now),
		actions: available_actions(order, role, actor_id),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn order_in(status: OrderStatus) -> Order {
		let mut order = Order::new("o-1", "stu-1", 1_000);
		order.status = status;
		if status != OrderStatus::Pending {
			order.runner_id = Some("run-1".into());
		}
		order
	}

	#[test]
	fn progress_is_zero_while_pending() {
		assert_eq!(progress_fraction(&order_in(OrderStatus::Pending)), 0.0);
	}

	#[test]
	fn progress_steps_along_the_happy_path() {
		assert_eq!(progress_fraction(&order_in(OrderStatus::Accepted)), 0.4);
		assert_eq!(progress_fraction(&order_in(OrderStatus::Shopping)), 0.6);
		assert_eq!(progress_fraction(&order_in(OrderStatus::Delivering)), 0.8);
		assert_eq!(progress_fraction(&order_in(OrderStatus::Completed)), 1.0);
	}

	#[test]
	fn cancelled_progress_resets_to_zero() {
		assert_eq!(progress_fraction(&order_in(OrderStatus::Cancelled)), 0.0);
	}

	#[test]
	fn eta_table_matches_the_status() {
		let cases = [
			(OrderStatus::Pending, 45),
			(OrderStatus::Accepted, 35),
			(OrderStatus::Shopping, 25),
			(OrderStatus::Delivering, 15),
			(OrderStatus::Completed, 0),
			(OrderStatus::Cancelled, 0),
		];
		for (status, minutes) in cases {
			assert_eq!(
				estimated_minutes_remaining(&order_in(status), 999_999),
				minutes
			);
		}
	}

	#[test]
	fn eta_ignores_elapsed_time() {
		let order = order_in(OrderStatus::Delivering);
		assert_eq!(
			estimated_minutes_remaining(&order, 0),
			estimated_minutes_remaining(&order, u64::MAX)
		);
	}

	#[test]
	fn actions_for_the_assigned_runner() {
		let order = order_in(OrderStatus::Shopping);
		let actions = available_actions(&order, ActorRole::Runner, "run-1");
		assert_eq!(actions, HashSet::from([OrderStatus::Delivering]));
	}

	#[test]
	fn actions_empty_for_terminal_orders() {
		for status in [OrderStatus::Completed, OrderStatus::Cancelled] {
			let order = order_in(status);
			for role in ActorRole::ALL {
				assert!(available_actions(&order, role, "stu-1").is_empty());
			}
		}
	}

	#[test]
	fn derivations_are_idempotent() {
		let order = order_in(OrderStatus::Accepted);
		let first = derive_view(&order, ActorRole::Student, "stu-1", 5_000);
		let second = derive_view(&order, ActorRole::Student, "stu-1", 5_000);
		assert_eq!(first.status, second.status);
		assert_eq!(first.meta, second.meta);
		assert_eq!(first.progress, second.progress);
		assert_eq!(first.eta_minutes, second.eta_minutes);
		assert_eq!(first.actions, second.actions);
	}
}
