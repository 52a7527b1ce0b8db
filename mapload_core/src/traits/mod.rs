//! Contains the collaborator traits at the boundary of the scheduler: tile
//! store, spatial indexes, downloader, route planner and status sink.

mod downloader;
pub use downloader::*;

mod route_planner;
pub use route_planner::*;

mod spatial_index;
pub use spatial_index::*;

mod status_sink;
pub use status_sink::*;

mod tile_store;
pub use tile_store::*;
