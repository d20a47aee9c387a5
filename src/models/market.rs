use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub symbol: String,
    #[serde(default)]
    pub exports: Vec<TradeGood>,
    #[serde(default)]
    pub imports: Vec<TradeGood>,
    #[serde(default)]
    pub exchange: Vec<TradeGood>,
    #[serde(default)]
    pub transactions: Option<Vec<MarketTransaction>>,
    #[serde(default)]
    pub trade_goods: Option<Vec<MarketTradeGood>>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TradeGood {
    pub symbol: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MarketTradeGood {
    pub symbol: String,
    pub trade_volume: i32,
    pub supply: String,
    #[serde(default)]
    pub activity: Option<String>,
    pub purchase_price: i32,
    pub sell_price: i32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MarketTransaction {
    pub waypoint_symbol: String,
    pub ship_symbol: String,
    pub trade_symbol: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub units: i32,
    pub price_per_unit: i32,
    pub total_price: i32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SellCargoData {
    pub agent: crate::models::Agent,
    pub cargo: crate::models::ShipCargo,
    pub transaction: MarketTransaction,
}
