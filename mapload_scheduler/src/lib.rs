//! Request-coalescing background scheduler for a map data client.
//!
//! An interactive UI issues "load this data for this viewport" requests far
//! faster than the backing stores can service them. This crate turns those
//! bursts into a bounded set of in-flight background jobs: at most one job per
//! coalescible category is active at a time, a newer request for a category
//! either replaces or is absorbed by the in-flight one, and a composite busy
//! status is derivable at all times.
//!
//! Data flow: UI → [`DispatchQueue`] → dispatcher loop → category worker,
//! renderer or [`DownloadBridge`] → completion fan-out → UI refresh.

mod category_worker;
mod dispatch_queue;
mod dispatcher;
mod download_bridge;
mod pending_job;
mod scheduler;
mod status_publisher;

#[cfg(test)]
mod testutil;

pub use dispatch_queue::DispatchQueue;
pub use download_bridge::DownloadBridge;
pub use scheduler::LoadScheduler;
pub use status_publisher::StatusPublisher;
