//! Broadcast bus for lifecycle events.
//!
//! Services publish an event after a change has been persisted;
//! notification and audit consumers subscribe without sitting on the
//! write path. Publishing is lossy when nobody is subscribed.

use courier_types::LifecycleEvent;
use tokio::sync::broadcast;

/// Default capacity of the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// Event bus for broadcasting lifecycle events to subscribers.
#[derive(Clone)]
pub struct EventBus {
	sender: broadcast::Sender<LifecycleEvent>,
}

impl EventBus {
	/// Creates an event bus with the given channel capacity.
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self { sender }
	}

	/// Subscribes to all future events.
	pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
		self.sender.subscribe()
	}

	/// Publishes an event to all current subscribers.
	pub fn publish(&self, event: LifecycleEvent) {
		// A send error only means there are no subscribers right now.
		let _ = self.sender.send(event);
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new(DEFAULT_CAPACITY)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use courier_types::{ActorRole, OrderStatus};

	#[tokio::test]
	async fn subscribers_receive_published_events() {
		let bus = EventBus::default();
		let mut receiver = bus.subscribe();

		bus.publish(LifecycleEvent::Transitioned {
			order_id: "o-1".into(),
			from: OrderStatus::Pending,
			to: OrderStatus::Accepted,
			role: ActorRole::Runner,
			at: 2_000,
		});

		match receiver.recv().await.unwrap() {
			LifecycleEvent::Transitioned { order_id, to, .. } => {
				assert_eq!(order_id, "o-1");
				assert_eq!(to, OrderStatus::Accepted);
			}
			other => panic!("unexpected event: {other:?}"),
		}
	}

	#[tokio::test]
	async fn publish_without_subscribers_is_a_no_op() {
		let bus = EventBus::default();
		bus.publish(LifecycleEvent::Transitioned {
			order_id: "o-1".into(),
			from: OrderStatus::Pending,
			to: OrderStatus::Cancelled,
			role: ActorRole::Admin,
			at: 2_000,
		});
	}
}
