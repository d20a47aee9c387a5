// Operations module - fleet behavior built on the remote capability
pub mod behavior;
pub mod contracts;
pub mod fleet_coordinator;
pub mod navigation;
pub mod requisition;
pub mod ship_bot;
pub mod shutdown;

pub use behavior::{decide, ShipAction, WaypointContext};
pub use contracts::{determine_priorities, ContractOperations};
pub use fleet_coordinator::FleetCoordinator;
pub use navigation::{nearest_waypoint, select_destination, WaypointCriterion};
pub use requisition::{Requisition, RequisitionReport};
pub use ship_bot::{FleetContext, ShipBot};
pub use shutdown::{DrainReport, ShutdownHandle, ShutdownSignal};
