use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    pub symbol: String,
    pub registration: ShipRegistration,
    pub nav: ShipNav,
    #[serde(default)]
    pub crew: Option<ShipCrew>,
    #[serde(default)]
    pub frame: Option<ShipFrame>,
    #[serde(default)]
    pub reactor: Option<ShipComponent>,
    #[serde(default)]
    pub engine: Option<ShipComponent>,
    #[serde(default)]
    pub modules: Vec<ShipComponent>,
    #[serde(default)]
    pub mounts: Vec<ShipMount>,
    pub cargo: ShipCargo,
    pub fuel: ShipFuel,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ShipRegistration {
    pub name: String,
    pub faction_symbol: String,
    pub role: ShipRole,
}

/// Behavioral category the remote assigns to a hull.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipRole {
    Fabricator,
    Harvester,
    Hauler,
    Interceptor,
    Excavator,
    Transport,
    Repair,
    Surveyor,
    Command,
    Carrier,
    Patrol,
    Satellite,
    Explorer,
    Refinery,
    #[serde(other)]
    Unknown,
}

impl ShipRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipRole::Fabricator => "FABRICATOR",
            ShipRole::Harvester => "HARVESTER",
            ShipRole::Hauler => "HAULER",
            ShipRole::Interceptor => "INTERCEPTOR",
            ShipRole::Excavator => "EXCAVATOR",
            ShipRole::Transport => "TRANSPORT",
            ShipRole::Repair => "REPAIR",
            ShipRole::Surveyor => "SURVEYOR",
            ShipRole::Command => "COMMAND",
            ShipRole::Carrier => "CARRIER",
            ShipRole::Patrol => "PATROL",
            ShipRole::Satellite => "SATELLITE",
            ShipRole::Explorer => "EXPLORER",
            ShipRole::Refinery => "REFINERY",
            ShipRole::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ShipRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ShipNav {
    pub system_symbol: String,
    pub waypoint_symbol: String,
    pub route: ShipRoute,
    pub status: NavStatus,
    pub flight_mode: String,
}

impl ShipNav {
    /// A ship is in transit for as long as its route arrival lies in the future.
    pub fn in_transit_at(&self, now: DateTime<Utc>) -> bool {
        now < self.route.arrival
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NavStatus {
    InTransit,
    InOrbit,
    Docked,
}

impl fmt::Display for NavStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NavStatus::InTransit => "IN_TRANSIT",
            NavStatus::InOrbit => "IN_ORBIT",
            NavStatus::Docked => "DOCKED",
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ShipRoute {
    pub destination: ShipRouteWaypoint,
    #[serde(alias = "departure")]
    pub origin: ShipRouteWaypoint,
    pub departure_time: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ShipRouteWaypoint {
    pub symbol: String,
    #[serde(rename = "type")]
    pub waypoint_type: String,
    pub system_symbol: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ShipCrew {
    pub current: i32,
    pub required: i32,
    pub capacity: i32,
    pub rotation: String,
    pub morale: i32,
    pub wages: i32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ShipFrame {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub condition: Option<f64>,
    pub module_slots: i32,
    pub mounting_points: i32,
    pub fuel_capacity: i32,
}

/// Reactor, engine and internal modules share this shape.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ShipComponent {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub range: Option<i32>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ShipMount {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub strength: Option<i32>,
    #[serde(default)]
    pub deposits: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ShipCargo {
    pub capacity: i32,
    pub units: i32,
    pub inventory: Vec<CargoItem>,
}

impl ShipCargo {
    pub fn is_full(&self) -> bool {
        self.units >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.units <= 0
    }
}

impl fmt::Display for ShipCargo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.units, self.capacity)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CargoItem {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub units: i32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ShipFuel {
    pub current: i32,
    pub capacity: i32,
    #[serde(default)]
    pub consumed: Option<ShipFuelConsumed>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ShipFuelConsumed {
    pub amount: i32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Cooldown {
    pub ship_symbol: String,
    pub total_seconds: i64,
    pub remaining_seconds: i64,
    #[serde(default)]
    pub expiration: Option<DateTime<Utc>>,
}

impl Cooldown {
    /// Extraction is gated while `now` is before the expiration.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration.is_some_and(|expiration| now < expiration)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NavigationData {
    pub fuel: ShipFuel,
    pub nav: ShipNav,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    #[serde(default)]
    pub account_id: Option<String>,
    pub symbol: String,
    pub headquarters: String,
    pub credits: i64,
    #[serde(default)]
    pub starting_faction: Option<String>,
    #[serde(default)]
    pub ship_count: Option<i32>,
}
