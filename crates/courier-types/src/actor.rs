//! Actor roles for transition authorization.
//!
//! Role and actor id are passed explicitly into every engine call; the
//! engine never reads ambient session state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of the actor attempting an operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ActorRole {
	/// The order-placing customer.
	Student,
	/// The delivery-fulfillment actor; shops for and delivers items.
	Runner,
	/// Platform moderator with cancellation override authority.
	Admin,
}

impl ActorRole {
	/// Every role.
	pub const ALL: [ActorRole; 3] = [ActorRole::Student, ActorRole::Runner, ActorRole::Admin];
}

impl fmt::Display for ActorRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ActorRole::Student => write!(f, "student"),
			ActorRole::Runner => write!(f, "runner"),
			ActorRole::Admin => write!(f, "admin"),
		}
	}
}
