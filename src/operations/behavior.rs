// Ship behavior: what a ship does next, given its role and what it sees
use crate::models::*;
use crate::operations::navigation::WaypointCriterion;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShipAction {
    /// Sell every cargo line at the current marketplace
    Sell,
    Dock,
    NavigateToNearest(WaypointCriterion),
    /// Extract until the hold is full
    Extract,
    /// Ship reported while its route is still running
    AwaitArrival,
    /// Waypoint could not be observed; report back later
    Standby,
    /// Role without behavior
    Idle,
}

impl fmt::Display for ShipAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipAction::Sell => f.write_str("SELL"),
            ShipAction::Dock => f.write_str("DOCK"),
            ShipAction::NavigateToNearest(criterion) => write!(f, "NAVIGATE_TO_NEAREST({})", criterion),
            ShipAction::Extract => f.write_str("EXTRACT"),
            ShipAction::AwaitArrival => f.write_str("AWAIT_ARRIVAL"),
            ShipAction::Standby => f.write_str("STANDBY"),
            ShipAction::Idle => f.write_str("IDLE"),
        }
    }
}

/// What the ship's current waypoint offers, observed fresh for each decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaypointContext {
    pub at_marketplace: bool,
    pub at_asteroid_field: bool,
}

impl WaypointContext {
    pub fn observe(waypoint: &Waypoint) -> Self {
        Self {
            at_marketplace: waypoint.has_trait(MARKETPLACE),
            at_asteroid_field: waypoint.is_type(ASTEROID_FIELD),
        }
    }
}

/// Roles that have a behavior at all. Everything else is parked.
pub fn has_behavior(role: ShipRole) -> bool {
    matches!(role, ShipRole::Excavator)
}

pub fn decide(role: ShipRole, ship: &Ship, context: &WaypointContext) -> ShipAction {
    match role {
        ShipRole::Excavator => excavator(ship.cargo.is_full(), ship.nav.status == NavStatus::Docked, context),
        _ => ShipAction::Idle,
    }
}

/// Ordered predicates, first match wins.
fn excavator(cargo_full: bool, docked: bool, context: &WaypointContext) -> ShipAction {
    if cargo_full && context.at_marketplace && docked {
        ShipAction::Sell
    } else if cargo_full && context.at_marketplace {
        ShipAction::Dock
    } else if cargo_full {
        ShipAction::NavigateToNearest(WaypointCriterion::marketplace())
    } else if context.at_asteroid_field {
        ShipAction::Extract
    } else {
        ShipAction::NavigateToNearest(WaypointCriterion::asteroid_field())
    }
}
