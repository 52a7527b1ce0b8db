//! Defines the [`StatusSinkTrait`], the UI-side receiver of busy-status
//! updates.

use crate::types::BusyStatus;
use std::fmt::Debug;

/// Receives the aggregated busy status whenever it changes.
pub trait StatusSinkTrait: Debug + Send + Sync {
	fn publish(&self, status: BusyStatus);
}
