//! Typed order store enforcing the lifecycle persistence contract.
//!
//! The lifecycle engine proposes patches against a snapshot of an order;
//! this store confirms them. `apply_patch` re-reads the order and checks
//! that its status still equals the status the proposal was computed
//! against before persisting, all under a store-level mutex, so of two
//! racing transitions on one order exactly one succeeds and the other
//! observes a status conflict.

use crate::{StorageError, StorageService};
use courier_types::{Order, OrderPatch, OrderStatus, StorageKey};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors that can occur in the order store.
#[derive(Debug, Error)]
pub enum StoreError {
	/// No order exists under the given id.
	#[error("Order not found: {0}")]
	NotFound(String),
	/// An order already exists under the given id.
	#[error("Order already exists: {0}")]
	AlreadyExists(String),
	/// The order's status moved since the caller read it.
	#[error("Order status is {actual}, expected {expected}")]
	StatusConflict {
		expected: OrderStatus,
		actual: OrderStatus,
	},
	/// Error from the underlying storage backend.
	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),
}

/// Order persistence with compare-and-set patch application.
pub struct OrderStore {
	storage: Arc<StorageService>,
	// Serializes the read-check-write in apply_patch and insert.
	write_lock: Mutex<()>,
}

impl OrderStore {
	/// Creates an order store over the given storage service.
	pub fn new(storage: Arc<StorageService>) -> Self {
		Self {
			storage,
			write_lock: Mutex::new(()),
		}
	}

	/// Gets an order by id.
	pub async fn get(&self, order_id: &str) -> Result<Order, StoreError> {
		self.storage
			.retrieve(StorageKey::Orders.as_str(), order_id)
			.await
			.map_err(|e| match e {
				StorageError::NotFound => StoreError::NotFound(order_id.to_string()),
				other => StoreError::Storage(other),
			})
	}

	/// Stores a new order; fails if the id is already taken.
	pub async fn insert(&self, order: &Order) -> Result<(), StoreError> {
		let _guard = self.write_lock.lock().await;
		if self
			.storage
			.exists(StorageKey::Orders.as_str(), &order.id)
			.await?
		{
			return Err(StoreError::AlreadyExists(order.id.clone()));
		}
		self.storage
			.store(StorageKey::Orders.as_str(), &order.id, order)
			.await?;
		tracing::debug!(order_id = %order.id, "stored new order");
		Ok(())
	}

	/// Applies a transition patch if the order's status is still `expected`.
	///
	/// Returns the persisted order on success. A [`StoreError::StatusConflict`]
	/// means another transition landed first; callers re-read and re-validate
	/// against the current state.
	pub async fn apply_patch(
		&self,
		order_id: &str,
		expected: OrderStatus,
		patch: &OrderPatch,
	) -> Result<Order, StoreError> {
		let _guard = self.write_lock.lock().await;

		let mut order = self.get(order_id).await?;
		if order.status != expected {
			tracing::warn!(
				order_id,
				expected = %expected,
				actual = %order.status,
				"rejected stale transition patch"
			);
			return Err(StoreError::StatusConflict {
				expected,
				actual: order.status,
			});
		}

		patch.apply_to(&mut order);
		self.storage
			.update(StorageKey::Orders.as_str(), order_id, &order)
			.await?;
		tracing::debug!(order_id, status = %order.status, "persisted order patch");
		Ok(order)
	}

	/// Removes an order.
	pub async fn remove(&self, order_id: &str) -> Result<(), StoreError> {
		self.storage
			.remove(StorageKey::Orders.as_str(), order_id)
			.await?;
		Ok(())
	}
}
