use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct System {
    pub symbol: String,
    pub sector_symbol: String,
    #[serde(rename = "type")]
    pub system_type: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub waypoints: Vec<SystemWaypoint>,
    #[serde(default)]
    pub factions: Vec<SystemFaction>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SystemWaypoint {
    pub symbol: String,
    #[serde(rename = "type")]
    pub waypoint_type: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SystemFaction {
    pub symbol: String,
}

/// Jump gate and the symbols of the systems it links to.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JumpGate {
    pub symbol: String,
    #[serde(default)]
    pub connections: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JumpData {
    pub cooldown: crate::models::Cooldown,
    pub nav: crate::models::ShipNav,
}
