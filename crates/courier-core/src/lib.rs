//! Lifecycle orchestration for the courier marketplace.
//!
//! This crate wires the pure lifecycle engine to its collaborators. Every
//! status change runs propose-then-confirm: the engine proposes a patch
//! against a snapshot of the order, the order store confirms it with a
//! compare-and-set on the status, and a lifecycle event is broadcast only
//! after the change has been persisted. Callers rendering optimistically
//! roll back when confirmation fails.

use courier_engine::{derive_view, OrderView, TransitionError};
use courier_storage::{OrderStore, StoreError};
use courier_types::{ActorRole, LifecycleEvent, Order, OrderStatus};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

pub mod event_bus;
pub use event_bus::EventBus;

/// Bound on propose-confirm rounds when transitions race on one order.
const MAX_TRANSITION_ATTEMPTS: usize = 3;

/// Utility function to truncate an order id for display purposes.
///
/// Shows only the first 8 characters followed by ".." for longer strings.
fn truncate_id(id: &str) -> String {
	if id.len() <= 8 {
		id.to_string()
	} else {
		format!("{}..", &id[..8])
	}
}

/// Errors that can occur during lifecycle orchestration.
#[derive(Debug, Error)]
pub enum ServiceError {
	/// The requested transition was rejected by the engine.
	#[error(transparent)]
	Transition(#[from] TransitionError),
	/// No order exists under the given id.
	#[error("Order not found: {0}")]
	NotFound(String),
	/// The order kept changing under concurrent writers.
	#[error("Order is being updated concurrently: {0}")]
	Busy(String),
	/// Error from the persistence layer.
	#[error("Storage error: {0}")]
	Storage(String),
}

impl From<StoreError> for ServiceError {
	fn from(err: StoreError) -> Self {
		match err {
			StoreError::NotFound(id) => ServiceError::NotFound(id),
			other => ServiceError::Storage(other.to_string()),
		}
	}
}

/// Single entry point for order lifecycle operations.
///
/// UI-facing layers call this service instead of re-deriving transition
/// permissions or status metadata locally.
pub struct LifecycleService {
	store: Arc<OrderStore>,
	event_bus: EventBus,
}

impl LifecycleService {
	/// Creates a lifecycle service over the given order store.
	pub fn new(store: Arc<OrderStore>, event_bus: EventBus) -> Self {
		Self { store, event_bus }
	}

	/// The bus transition events are published on.
	pub fn event_bus(&self) -> &EventBus {
		&self.event_bus
	}

	/// Creates a new pending order for a student.
	pub async fn create_order(
		&self,
		student_id: &str,
		now: u64,
	) -> Result<Order, ServiceError> {
		let order = Order::new(Uuid::new_v4().to_string(), student_id, now);
		self.store.insert(&order).await?;
		tracing::info!(
			order_id = %truncate_id(&order.id),
			student_id,
			"created order"
		);
		self.event_bus.publish(LifecycleEvent::Created {
			order: order.clone(),
		});
		Ok(order)
	}

	/// Gets an order by id.
	pub async fn get_order(&self, order_id: &str) -> Result<Order, ServiceError> {
		Ok(self.store.get(order_id).await?)
	}

	/// Moves an order to `target` on behalf of an actor.
	///
	/// Propose-then-confirm: the engine validates against a snapshot and
	/// builds a patch; the store applies it only if the status is still
	/// the snapshot's. When another transition lands in between, the
	/// proposal is recomputed against the updated order, so the loser of
	/// a race observes the transition as illegal rather than clobbering
	/// the winner.
	pub async fn transition(
		&self,
		order_id: &str,
		role: ActorRole,
		actor_id: &str,
		target: OrderStatus,
		now: u64,
		reason: Option<&str>,
	) -> Result<Order, ServiceError> {
		for _ in 0..MAX_TRANSITION_ATTEMPTS {
			let order = self.store.get(order_id).await?;
			let from = order.status;
			let patch =
				courier_engine::apply_transition(&order, role, actor_id, target, now, reason)?;

			match self.store.apply_patch(order_id, from, &patch).await {
				Ok(updated) => {
					tracing::info!(
						order_id = %truncate_id(order_id),
						%from,
						to = %target,
						%role,
						"applied transition"
					);
					self.event_bus.publish(LifecycleEvent::Transitioned {
						order_id: order_id.to_string(),
						from,
						to: target,
						role,
						at: now,
					});
					return Ok(updated);
				}
				// Lost a race; re-propose against the updated order.
				Err(StoreError::StatusConflict { .. }) => continue,
				Err(other) => return Err(other.into()),
			}
		}
		Err(ServiceError::Busy(order_id.to_string()))
	}

	/// Returns an order together with everything a surface derives from it.
	pub async fn view(
		&self,
		order_id: &str,
		role: ActorRole,
		actor_id: &str,
		now: u64,
	) -> Result<(Order, OrderView), ServiceError> {
		let order = self.store.get(order_id).await?;
		let view = derive_view(&order, role, actor_id, now);
		Ok((order, view))
	}
}
