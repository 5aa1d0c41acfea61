//! Static display metadata per order status.
//!
//! One table replaces the per-screen label/icon/color maps. Icon names
//! follow the client's icon set; color tokens name theme entries rather
//! than raw values.

use courier_types::{OrderStatus, StatusMeta};

/// Returns the display metadata for a status.
pub fn describe(status: OrderStatus) -> StatusMeta {
	match status {
		OrderStatus::Pending => StatusMeta {
			label: "Waiting for a runner",
			icon: "time-outline",
			color_token: "warning",
			ordinal: Some(0),
		},
		OrderStatus::Accepted => StatusMeta {
			label: "Runner assigned",
			icon: "person-circle-outline",
			color_token: "info",
			ordinal: Some(1),
		},
		OrderStatus::Shopping => StatusMeta {
			label: "Shopping",
			icon: "cart-outline",
			color_token: "primary",
			ordinal: Some(2),
		},
		OrderStatus::Delivering => StatusMeta {
			label: "On the way",
			icon: "bicycle-outline",
			color_token: "primary",
			ordinal: Some(3),
		},
		OrderStatus::Completed => StatusMeta {
			label: "Delivered",
			icon: "checkmark-done-outline",
			color_token: "success",
			ordinal: Some(4),
		},
		OrderStatus::Cancelled => StatusMeta {
			label: "Cancelled",
			icon: "close-circle-outline",
			color_token: "danger",
			ordinal: None,
		},
	}
}
