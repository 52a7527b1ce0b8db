//! The intake buffer between UI-side producers and the dispatcher.
//!
//! Arbitrarily many producers push concurrently; exactly one dispatcher drains
//! once per cycle with an atomic swap to empty. Ordering carries no
//! correctness weight; the dispatcher walks the drained buffer newest-first so
//! the most recent viewport is serviced first.

use mapload_core::LoadRequest;
use std::sync::Mutex;

/// An unbounded, concurrency-safe request stack.
///
/// No size bound is enforced; producers outpacing the dispatcher for long
/// enough will grow the buffer. A hardened deployment wants an external bound
/// with a drop policy.
#[derive(Debug, Default)]
pub struct DispatchQueue {
	requests: Mutex<Vec<LoadRequest>>,
}

impl DispatchQueue {
	#[must_use]
	pub fn new() -> DispatchQueue {
		DispatchQueue {
			requests: Mutex::new(Vec::new()),
		}
	}

	/// Appends a request. Non-blocking, always succeeds.
	pub fn push(&self, request: LoadRequest) {
		self.requests.lock().unwrap().push(request);
	}

	/// Atomically removes and returns the current buffer contents.
	///
	/// Returns the requests in push order; the caller iterates in reverse for
	/// last-in-first-out processing.
	pub fn drain_all(&self) -> Vec<LoadRequest> {
		std::mem::take(&mut *self.requests.lock().unwrap())
	}

	pub fn is_empty(&self) -> bool {
		self.requests.lock().unwrap().is_empty()
	}

	pub fn len(&self) -> usize {
		self.requests.lock().unwrap().len()
	}
}
