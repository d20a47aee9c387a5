// Waypoint selection for navigate-to-nearest
use crate::error::FleetError;
use crate::models::*;
use std::fmt;

/// What makes a waypoint a valid destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaypointCriterion {
    /// Primary classification, e.g. `ASTEROID_FIELD`
    Type(String),
    /// Tag the waypoint carries, e.g. `MARKETPLACE`
    Trait(String),
}

impl WaypointCriterion {
    pub fn marketplace() -> Self {
        WaypointCriterion::Trait(MARKETPLACE.to_string())
    }

    pub fn asteroid_field() -> Self {
        WaypointCriterion::Type(ASTEROID_FIELD.to_string())
    }

    pub fn shipyard() -> Self {
        WaypointCriterion::Trait(SHIPYARD.to_string())
    }

    pub fn matches(&self, waypoint: &Waypoint) -> bool {
        match self {
            WaypointCriterion::Type(waypoint_type) => waypoint.is_type(waypoint_type),
            WaypointCriterion::Trait(symbol) => waypoint.has_trait(symbol),
        }
    }
}

impl fmt::Display for WaypointCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaypointCriterion::Type(waypoint_type) => write!(f, "type {}", waypoint_type),
            WaypointCriterion::Trait(symbol) => write!(f, "trait {}", symbol),
        }
    }
}

/// Euclidean distance between two waypoints
pub fn distance(from: &Waypoint, to: &Waypoint) -> f64 {
    let dx = f64::from(to.x) - f64::from(from.x);
    let dy = f64::from(to.y) - f64::from(from.y);
    (dx * dx + dy * dy).sqrt()
}

/// Candidate closest to `origin`. Ties keep the earliest candidate in input order.
pub fn nearest_waypoint<'a, I>(origin: &Waypoint, candidates: I) -> Option<&'a Waypoint>
where
    I: IntoIterator<Item = &'a Waypoint>,
{
    let mut best: Option<(&Waypoint, f64)> = None;
    for candidate in candidates {
        let d = distance(origin, candidate);
        match best {
            Some((_, best_distance)) if d >= best_distance => {}
            _ => best = Some((candidate, d)),
        }
    }
    best.map(|(waypoint, _)| waypoint)
}

/// Picks the destination for a ship standing at `current` given the full
/// listing of its system.
pub fn select_destination<'a>(
    listing: &'a [Waypoint],
    current: &str,
    criterion: &WaypointCriterion,
) -> Result<&'a Waypoint, FleetError> {
    let origin = listing
        .iter()
        .find(|w| w.symbol == current)
        .ok_or_else(|| FleetError::UnknownWaypoint(current.to_string()))?;

    nearest_waypoint(origin, listing.iter().filter(|w| criterion.matches(w))).ok_or_else(|| {
        FleetError::NoCandidates {
            system: origin.system_symbol.clone(),
            criterion: criterion.to_string(),
        }
    })
}
