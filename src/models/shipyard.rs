use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Shipyard {
    pub symbol: String,
    pub ship_types: Vec<ShipyardShipType>,
    #[serde(default)]
    pub transactions: Option<Vec<ShipyardTransaction>>,
    #[serde(default)]
    pub ships: Option<Vec<ShipyardShip>>,
    #[serde(default)]
    pub modifications_fee: Option<i32>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ShipyardShipType {
    #[serde(rename = "type")]
    pub ship_type: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ShipyardTransaction {
    pub waypoint_symbol: String,
    #[serde(alias = "shipType")]
    pub ship_symbol: String,
    pub price: i32,
    pub agent_symbol: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ShipyardShip {
    #[serde(rename = "type")]
    pub ship_type: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub purchase_price: i32,
}
