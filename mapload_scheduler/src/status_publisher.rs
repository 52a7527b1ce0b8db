//! Publishes the aggregated busy status to the UI-side sink.
//!
//! One mutual-exclusion scope guards both the last-published value and the
//! publish call itself, so updates are atomic with respect to publication even
//! when another subsystem shares the indicator.

use mapload_core::{BusyStatus, StatusSinkTrait};
use std::sync::{Arc, Mutex};

struct Inner {
	sink: Arc<dyn StatusSinkTrait>,
	last: Option<BusyStatus>,
}

/// A deduplicating busy-status publisher handle, cloneable and thread-safe.
#[derive(Clone)]
pub struct StatusPublisher {
	inner: Arc<Mutex<Inner>>,
}

impl StatusPublisher {
	#[must_use]
	pub fn new(sink: Arc<dyn StatusSinkTrait>) -> StatusPublisher {
		StatusPublisher {
			inner: Arc::new(Mutex::new(Inner { sink, last: None })),
		}
	}

	/// Publishes `status` unless it equals the last published value.
	///
	/// Returns `true` if the sink was invoked.
	pub fn publish_if_changed(&self, status: BusyStatus) -> bool {
		let mut inner = self.inner.lock().unwrap();
		if inner.last == Some(status) {
			return false;
		}
		inner.last = Some(status);
		inner.sink.publish(status);
		true
	}

	/// The last value handed to the sink, if any.
	#[must_use]
	pub fn last(&self) -> Option<BusyStatus> {
		self.inner.lock().unwrap().last
	}
}
