//! Defines the [`RoutePlannerTrait`], the single predicate the scheduler needs
//! from the navigation subsystem.

use std::fmt::Debug;

/// Reports whether a route calculation is in progress, for busy-status
/// aggregation.
pub trait RoutePlannerTrait: Debug + Send + Sync {
	fn is_route_being_calculated(&self) -> bool;
}
