// Client module - the remote economy as a rate-limited capability
pub mod api;
pub mod throttle;

pub use api::SpaceTradersClient;
pub use throttle::Throttle;

use crate::error::ApiError;
use crate::models::*;
use async_trait::async_trait;

pub type ApiResult<T> = Result<T, ApiError>;

/// Every operation the fleet consumes. Each call is one throttled request
/// that either decodes its result or fails with an [`ApiError`].
#[async_trait]
pub trait SpaceTradersApi: Send + Sync {
    async fn get_agent(&self) -> ApiResult<Agent>;
    async fn list_ships(&self) -> ApiResult<Vec<Ship>>;
    /// `None` when the ship has no active cooldown.
    async fn get_ship_cooldown(&self, ship_symbol: &str) -> ApiResult<Option<Cooldown>>;

    async fn list_contracts(&self) -> ApiResult<Vec<Contract>>;
    async fn accept_contract(&self, contract_id: &str) -> ApiResult<ContractAcceptData>;

    async fn navigate_ship(&self, ship_symbol: &str, waypoint_symbol: &str) -> ApiResult<NavigationData>;
    async fn orbit_ship(&self, ship_symbol: &str) -> ApiResult<ShipNav>;
    async fn dock_ship(&self, ship_symbol: &str) -> ApiResult<ShipNav>;
    async fn create_survey(&self, ship_symbol: &str) -> ApiResult<SurveyData>;
    async fn extract_resources(&self, ship_symbol: &str, survey: Option<&Survey>) -> ApiResult<ExtractionData>;
    async fn jettison_cargo(&self, ship_symbol: &str, trade_symbol: &str, units: i32) -> ApiResult<ShipCargo>;
    async fn jump_ship(&self, ship_symbol: &str, system_symbol: &str) -> ApiResult<JumpData>;
    async fn sell_cargo(&self, ship_symbol: &str, trade_symbol: &str, units: i32) -> ApiResult<SellCargoData>;

    async fn list_systems(&self) -> ApiResult<Vec<System>>;
    async fn get_system(&self, system_symbol: &str) -> ApiResult<System>;
    async fn list_waypoints(&self, system_symbol: &str) -> ApiResult<Vec<Waypoint>>;
    async fn get_waypoint(&self, system_symbol: &str, waypoint_symbol: &str) -> ApiResult<Waypoint>;
    async fn get_market(&self, system_symbol: &str, waypoint_symbol: &str) -> ApiResult<Market>;
    async fn get_shipyard(&self, system_symbol: &str, waypoint_symbol: &str) -> ApiResult<Shipyard>;
    async fn get_jump_gate(&self, system_symbol: &str, waypoint_symbol: &str) -> ApiResult<JumpGate>;
}
