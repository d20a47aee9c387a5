use serde::{Deserialize, Serialize};

pub const MARKETPLACE: &str = "MARKETPLACE";
pub const SHIPYARD: &str = "SHIPYARD";
pub const ASTEROID_FIELD: &str = "ASTEROID_FIELD";

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub symbol: String,
    #[serde(rename = "type")]
    pub waypoint_type: String,
    pub system_symbol: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub orbitals: Vec<Orbital>,
    #[serde(default)]
    pub traits: Vec<Trait>,
    #[serde(default)]
    pub chart: Option<Chart>,
    #[serde(default)]
    pub faction: Option<WaypointFaction>,
}

impl Waypoint {
    pub fn has_trait(&self, symbol: &str) -> bool {
        self.traits.iter().any(|t| t.symbol == symbol)
    }

    pub fn is_type(&self, waypoint_type: &str) -> bool {
        self.waypoint_type == waypoint_type
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Orbital {
    pub symbol: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Trait {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub waypoint_symbol: Option<String>,
    pub submitted_by: Option<String>,
    pub submitted_on: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WaypointFaction {
    pub symbol: String,
}
