use crate::client::{ApiResult, SpaceTradersApi, Throttle};
use crate::config::ApiConfig;
use crate::error::{ApiError, FleetError};
use crate::models::*;
use crate::o_trace;
use crate::output_broker::Logger;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Largest page the remote hands out for list endpoints.
const PAGE_LIMIT: u32 = 20;

/// HTTP implementation of [`SpaceTradersApi`]. Clones share the connection
/// pool and the throttle.
#[derive(Clone)]
pub struct SpaceTradersClient {
    client: reqwest::Client,
    base_url: String,
    throttle: Arc<Throttle>,
    log: Logger,
}

impl SpaceTradersClient {
    pub fn new(
        token: &str,
        base_url: &str,
        timeout: Duration,
        throttle: Arc<Throttle>,
        log: Logger,
    ) -> Result<Self, FleetError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| FleetError::Config("token contains characters not allowed in a header".to_string()))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            throttle,
            log,
        })
    }

    pub fn from_config(config: &ApiConfig, token: &str, log: Logger) -> Result<Self, FleetError> {
        let throttle = Arc::new(Throttle::per_second(config.max_requests_per_second));
        Self::new(
            token,
            &config.base_url,
            Duration::from_secs(config.request_timeout_seconds),
            throttle,
            log,
        )
    }

    /// One throttled round trip. Non-2xx answers become [`ApiError::Domain`].
    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<(StatusCode, String)> {
        self.throttle.wait().await;
        o_trace!(self.log, "🌐 {} {}", method, path);

        let mut request = self.client.request(method, format!("{}{}", self.base_url, path));
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(parse_error(status, &text));
        }
        Ok((status, text))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let (_, text) = self.execute(Method::GET, path, None).await?;
        decode_data(&text)
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: Value) -> ApiResult<T> {
        let (_, text) = self.execute(Method::POST, path, Some(body)).await?;
        decode_data(&text)
    }

    /// Walks every page of a list endpoint; each page is its own throttled call.
    async fn get_all<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let paged = format!("{}?page={}&limit={}", path, page, PAGE_LIMIT);
            let (_, text) = self.execute(Method::GET, &paged, None).await?;
            let response: PagedResponse<T> = serde_json::from_str(&text)?;

            let more = response.meta.has_next_page() && !response.data.is_empty();
            items.extend(response.data);
            if !more {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

pub(crate) fn parse_error(status: StatusCode, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(response) => ApiError::domain(response.error.message, response.error.code),
        Err(_) => {
            let message = match body.trim() {
                "" => status.to_string(),
                raw => raw.to_string(),
            };
            ApiError::domain(message, i64::from(status.as_u16()))
        }
    }
}

pub(crate) fn decode_data<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let response: DataResponse<T> = serde_json::from_str(body)?;
    Ok(response.data)
}

#[async_trait]
impl SpaceTradersApi for SpaceTradersClient {
    // Agent and fleet
    async fn get_agent(&self) -> ApiResult<Agent> {
        self.get("/my/agent").await
    }

    async fn list_ships(&self) -> ApiResult<Vec<Ship>> {
        self.get_all("/my/ships").await
    }

    async fn get_ship_cooldown(&self, ship_symbol: &str) -> ApiResult<Option<Cooldown>> {
        let path = format!("/my/ships/{}/cooldown", ship_symbol);
        let (status, text) = self.execute(Method::GET, &path, None).await?;
        if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            return Ok(None);
        }
        decode_data(&text).map(Some)
    }

    // Contracts
    async fn list_contracts(&self) -> ApiResult<Vec<Contract>> {
        self.get_all("/my/contracts").await
    }

    async fn accept_contract(&self, contract_id: &str) -> ApiResult<ContractAcceptData> {
        self.post(&format!("/my/contracts/{}/accept", contract_id), json!({})).await
    }

    // Ship actions
    async fn navigate_ship(&self, ship_symbol: &str, waypoint_symbol: &str) -> ApiResult<NavigationData> {
        self.post(
            &format!("/my/ships/{}/navigate", ship_symbol),
            json!({ "waypointSymbol": waypoint_symbol }),
        )
        .await
    }

    async fn orbit_ship(&self, ship_symbol: &str) -> ApiResult<ShipNav> {
        let data: NavData = self.post(&format!("/my/ships/{}/orbit", ship_symbol), json!({})).await?;
        Ok(data.nav)
    }

    async fn dock_ship(&self, ship_symbol: &str) -> ApiResult<ShipNav> {
        let data: NavData = self.post(&format!("/my/ships/{}/dock", ship_symbol), json!({})).await?;
        Ok(data.nav)
    }

    async fn create_survey(&self, ship_symbol: &str) -> ApiResult<SurveyData> {
        self.post(&format!("/my/ships/{}/survey", ship_symbol), json!({})).await
    }

    async fn extract_resources(&self, ship_symbol: &str, survey: Option<&Survey>) -> ApiResult<ExtractionData> {
        let body = match survey {
            Some(survey) => json!({ "survey": survey }),
            None => json!({}),
        };
        self.post(&format!("/my/ships/{}/extract", ship_symbol), body).await
    }

    async fn jettison_cargo(&self, ship_symbol: &str, trade_symbol: &str, units: i32) -> ApiResult<ShipCargo> {
        let data: JettisonData = self
            .post(
                &format!("/my/ships/{}/jettison", ship_symbol),
                json!({ "symbol": trade_symbol, "units": units }),
            )
            .await?;
        Ok(data.cargo)
    }

    async fn jump_ship(&self, ship_symbol: &str, system_symbol: &str) -> ApiResult<JumpData> {
        self.post(
            &format!("/my/ships/{}/jump", ship_symbol),
            json!({ "systemSymbol": system_symbol }),
        )
        .await
    }

    async fn sell_cargo(&self, ship_symbol: &str, trade_symbol: &str, units: i32) -> ApiResult<SellCargoData> {
        self.post(
            &format!("/my/ships/{}/sell", ship_symbol),
            json!({ "symbol": trade_symbol, "units": units }),
        )
        .await
    }

    // Systems and waypoints
    async fn list_systems(&self) -> ApiResult<Vec<System>> {
        self.get_all("/systems").await
    }

    async fn get_system(&self, system_symbol: &str) -> ApiResult<System> {
        self.get(&format!("/systems/{}", system_symbol)).await
    }

    async fn list_waypoints(&self, system_symbol: &str) -> ApiResult<Vec<Waypoint>> {
        self.get_all(&format!("/systems/{}/waypoints", system_symbol)).await
    }

    async fn get_waypoint(&self, system_symbol: &str, waypoint_symbol: &str) -> ApiResult<Waypoint> {
        self.get(&format!("/systems/{}/waypoints/{}", system_symbol, waypoint_symbol)).await
    }

    async fn get_market(&self, system_symbol: &str, waypoint_symbol: &str) -> ApiResult<Market> {
        self.get(&format!("/systems/{}/waypoints/{}/market", system_symbol, waypoint_symbol)).await
    }

    async fn get_shipyard(&self, system_symbol: &str, waypoint_symbol: &str) -> ApiResult<Shipyard> {
        self.get(&format!("/systems/{}/waypoints/{}/shipyard", system_symbol, waypoint_symbol)).await
    }

    async fn get_jump_gate(&self, system_symbol: &str, waypoint_symbol: &str) -> ApiResult<JumpGate> {
        self.get(&format!("/systems/{}/waypoints/{}/jump-gate", system_symbol, waypoint_symbol)).await
    }
}
