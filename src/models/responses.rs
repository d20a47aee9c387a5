use serde::Deserialize;

// API response envelopes
#[derive(Debug, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct PagedResponse<T> {
    pub data: Vec<T>,
    pub meta: Meta,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct Meta {
    pub total: u32,
    pub page: u32,
    pub limit: u32,
}

impl Meta {
    pub fn has_next_page(&self) -> bool {
        self.page.saturating_mul(self.limit) < self.total
    }
}

/// Body the remote sends with every rejected request.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: i64,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

// Orbit and dock both answer with `{ "nav": ... }`
#[derive(Debug, Deserialize)]
pub struct NavData {
    pub nav: crate::models::ShipNav,
}
