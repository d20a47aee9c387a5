use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Mining and survey structures
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Survey {
    pub signature: String,
    pub symbol: String,
    pub deposits: Vec<SurveyDeposit>,
    pub expiration: DateTime<Utc>,
    pub size: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SurveyDeposit {
    pub symbol: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SurveyData {
    pub cooldown: crate::models::Cooldown,
    pub surveys: Vec<Survey>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExtractionData {
    pub cooldown: crate::models::Cooldown,
    pub extraction: ExtractionResult,
    pub cargo: crate::models::ShipCargo,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub ship_symbol: String,
    #[serde(rename = "yield")]
    pub extraction_yield: ExtractionYield,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExtractionYield {
    pub symbol: String,
    pub units: i32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct JettisonData {
    pub cargo: crate::models::ShipCargo,
}
