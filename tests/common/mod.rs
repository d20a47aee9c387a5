// In-memory SpaceTraders used by the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use fleet_command::client::{ApiResult, SpaceTradersApi};
use fleet_command::models::*;
use fleet_command::operations::FleetContext;
use fleet_command::{ApiError, Clock, ManualClock, OutputBroker};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

pub const SYSTEM: &str = "X1-TEST";
pub const ORE: &str = "IRON_ORE";
pub const EXTRACT_COOLDOWN_SECONDS: i64 = 70;
pub const START_CREDITS: i64 = 100_000;

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
}

pub fn waypoint(symbol: &str, waypoint_type: &str, x: i32, y: i32, traits: &[&str]) -> Waypoint {
    Waypoint {
        symbol: symbol.to_string(),
        waypoint_type: waypoint_type.to_string(),
        system_symbol: SYSTEM.to_string(),
        x,
        y,
        orbitals: Vec::new(),
        traits: traits
            .iter()
            .map(|t| Trait {
                symbol: t.to_string(),
                name: t.to_string(),
                description: String::new(),
            })
            .collect(),
        chart: None,
        faction: None,
    }
}

fn route_stop(at: &Waypoint) -> serde_json::Value {
    json!({
        "symbol": at.symbol,
        "type": at.waypoint_type,
        "systemSymbol": at.system_symbol,
        "x": at.x,
        "y": at.y
    })
}

pub fn ship(symbol: &str, role: &str, at: &Waypoint, status: &str, capacity: i32, inventory: &[(&str, i32)]) -> Ship {
    let units: i32 = inventory.iter().map(|(_, u)| u).sum();
    let lines: Vec<_> = inventory
        .iter()
        .map(|(good, u)| json!({ "symbol": good, "name": good, "units": u }))
        .collect();

    serde_json::from_value(json!({
        "symbol": symbol,
        "registration": { "name": symbol, "factionSymbol": "COSMIC", "role": role },
        "nav": {
            "systemSymbol": SYSTEM,
            "waypointSymbol": at.symbol,
            "route": {
                "destination": route_stop(at),
                "origin": route_stop(at),
                "departureTime": "2029-12-31T23:00:00Z",
                "arrival": "2029-12-31T23:30:00Z"
            },
            "status": status,
            "flightMode": "CRUISE"
        },
        "cargo": { "capacity": capacity, "units": units, "inventory": lines },
        "fuel": { "current": 400, "capacity": 400 }
    }))
    .unwrap()
}

/// Puts `ship` mid-flight from `from` to `to`, arriving at `arrival`.
pub fn in_transit(mut ship: Ship, from: &Waypoint, to: &Waypoint, arrival: DateTime<Utc>) -> Ship {
    ship.nav.route.origin = serde_json::from_value(route_stop(from)).unwrap();
    ship.nav.route.destination = serde_json::from_value(route_stop(to)).unwrap();
    ship.nav.route.departure_time = arrival - Duration::seconds(60);
    ship.nav.route.arrival = arrival;
    ship.nav.waypoint_symbol = to.symbol.clone();
    ship.nav.status = NavStatus::InTransit;
    ship
}

pub fn contract(id: &str, accepted: bool, goods: &[&str]) -> Contract {
    let deliver: Vec<_> = goods
        .iter()
        .map(|g| json!({ "tradeSymbol": g, "destinationSymbol": "X1-TEST-H1", "unitsRequired": 50, "unitsFulfilled": 0 }))
        .collect();
    serde_json::from_value(json!({
        "id": id,
        "factionSymbol": "COSMIC",
        "type": "PROCUREMENT",
        "terms": {
            "deadline": "2030-02-01T00:00:00Z",
            "payment": { "onAccepted": 2_000, "onFulfilled": 20_000 },
            "deliver": deliver
        },
        "accepted": accepted,
        "fulfilled": false
    }))
    .unwrap()
}

pub fn quiet_broker() -> OutputBroker {
    OutputBroker::new(0, std::time::Duration::from_secs(3600))
}

pub fn context(api: Arc<FakeApi>, clock: Arc<ManualClock>, priorities: &[&str]) -> FleetContext {
    FleetContext {
        api,
        clock,
        priorities: priorities.iter().map(|p| p.to_string()).collect::<Vec<_>>().into(),
        broker: quiet_broker(),
        standby: Duration::seconds(10),
    }
}

struct FakeState {
    credits: i64,
    ships: Vec<Ship>,
    waypoints: Vec<Waypoint>,
    cooldowns: HashMap<String, Cooldown>,
    contracts: Vec<Contract>,
    extract_units: i32,
    sell_price: i32,
    agent_available: bool,
    calls: Vec<String>,
    counts: HashMap<String, usize>,
    failures: Vec<(String, usize)>,
}

/// Server-side truth for one system. Ship actions follow the remote's rules:
/// no navigating or extracting while docked, no selling while in orbit,
/// extraction gated by cooldown, arrivals settle once the clock passes them.
pub struct FakeApi {
    clock: Arc<ManualClock>,
    state: Mutex<FakeState>,
}

fn rejected(message: &str, code: i64) -> ApiError {
    ApiError::domain(message, code)
}

impl FakeApi {
    pub fn new(clock: Arc<ManualClock>, waypoints: Vec<Waypoint>) -> Self {
        Self {
            clock,
            state: Mutex::new(FakeState {
                credits: START_CREDITS,
                ships: Vec::new(),
                waypoints,
                cooldowns: HashMap::new(),
                contracts: Vec::new(),
                extract_units: 10,
                sell_price: 25,
                agent_available: true,
                calls: Vec::new(),
                counts: HashMap::new(),
                failures: Vec::new(),
            }),
        }
    }

    pub fn add_ship(&self, ship: Ship) {
        self.state().ships.push(ship);
    }

    pub fn add_contract(&self, contract: Contract) {
        self.state().contracts.push(contract);
    }

    pub fn set_extract_units(&self, units: i32) {
        self.state().extract_units = units;
    }

    pub fn set_cooldown(&self, ship_symbol: &str, expiration: DateTime<Utc>) {
        let cooldown = Cooldown {
            ship_symbol: ship_symbol.to_string(),
            total_seconds: EXTRACT_COOLDOWN_SECONDS,
            remaining_seconds: (expiration - self.clock.now()).num_seconds().max(0),
            expiration: Some(expiration),
        };
        self.state().cooldowns.insert(ship_symbol.to_string(), cooldown);
    }

    pub fn make_agent_unavailable(&self) {
        self.state().agent_available = false;
    }

    /// The `nth` call (1-based) of `op` is rejected.
    pub fn fail_call(&self, op: &str, nth: usize) {
        self.state().failures.push((op.to_string(), nth));
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn count(&self, op: &str) -> usize {
        self.state().counts.get(op).copied().unwrap_or(0)
    }

    pub fn credits(&self) -> i64 {
        self.state().credits
    }

    pub fn ship(&self, symbol: &str) -> Ship {
        self.state().ships.iter().find(|s| s.symbol == symbol).cloned().unwrap()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records the call and applies any injected failure.
    fn enter(&self, op: &str, detail: &str) -> ApiResult<MutexGuard<'_, FakeState>> {
        let mut state = self.state();
        state.calls.push(format!("{} {}", op, detail).trim_end().to_string());
        let count = {
            let entry = state.counts.entry(op.to_string()).or_insert(0);
            *entry += 1;
            *entry
        };
        if state.failures.iter().any(|(failing, nth)| failing == op && *nth == count) {
            return Err(rejected("injected failure", 500));
        }
        Ok(state)
    }

    fn agent(state: &FakeState) -> Agent {
        Agent {
            account_id: Some("fake-account".to_string()),
            symbol: "FAKE".to_string(),
            headquarters: format!("{}-H1", SYSTEM),
            credits: state.credits,
            starting_faction: Some("COSMIC".to_string()),
            ship_count: Some(state.ships.len() as i32),
        }
    }
}

fn ship_mut<'a>(state: &'a mut FakeState, symbol: &str, now: DateTime<Utc>) -> ApiResult<&'a mut Ship> {
    let ship = state
        .ships
        .iter_mut()
        .find(|s| s.symbol == symbol)
        .ok_or_else(|| rejected("ship not found", 404))?;
    if ship.nav.status == NavStatus::InTransit && now >= ship.nav.route.arrival {
        ship.nav.status = NavStatus::InOrbit;
    }
    Ok(ship)
}

fn stop(waypoint: &Waypoint) -> ShipRouteWaypoint {
    ShipRouteWaypoint {
        symbol: waypoint.symbol.clone(),
        waypoint_type: waypoint.waypoint_type.clone(),
        system_symbol: waypoint.system_symbol.clone(),
        x: waypoint.x,
        y: waypoint.y,
    }
}

fn unsupported(op: &str) -> ApiError {
    rejected(&format!("{} is not simulated", op), 501)
}

#[async_trait]
impl SpaceTradersApi for FakeApi {
    async fn get_agent(&self) -> ApiResult<Agent> {
        let state = self.enter("get_agent", "")?;
        if !state.agent_available {
            return Err(rejected("Token is invalid", 401));
        }
        Ok(Self::agent(&state))
    }

    async fn list_ships(&self) -> ApiResult<Vec<Ship>> {
        let state = self.enter("list_ships", "")?;
        Ok(state.ships.clone())
    }

    async fn get_ship_cooldown(&self, ship_symbol: &str) -> ApiResult<Option<Cooldown>> {
        let state = self.enter("cooldown", ship_symbol)?;
        let now = self.clock.now();
        Ok(state
            .cooldowns
            .get(ship_symbol)
            .filter(|c| c.is_active_at(now))
            .cloned())
    }

    async fn list_contracts(&self) -> ApiResult<Vec<Contract>> {
        let state = self.enter("list_contracts", "")?;
        Ok(state.contracts.clone())
    }

    async fn accept_contract(&self, contract_id: &str) -> ApiResult<ContractAcceptData> {
        let mut state = self.enter("accept_contract", contract_id)?;
        let contract = state
            .contracts
            .iter_mut()
            .find(|c| c.id == contract_id)
            .ok_or_else(|| rejected("contract not found", 404))?;
        if contract.accepted {
            return Err(rejected("contract already accepted", 4501));
        }
        contract.accepted = true;
        let contract = contract.clone();
        state.credits += contract.terms.payment.on_accepted;
        Ok(ContractAcceptData {
            contract,
            agent: Self::agent(&state),
        })
    }

    async fn navigate_ship(&self, ship_symbol: &str, waypoint_symbol: &str) -> ApiResult<NavigationData> {
        let mut state = self.enter("navigate", &format!("{} {}", ship_symbol, waypoint_symbol))?;
        let now = self.clock.now();
        let destination = state
            .waypoints
            .iter()
            .find(|w| w.symbol == waypoint_symbol)
            .cloned()
            .ok_or_else(|| rejected("waypoint not found", 404))?;
        let origin_symbol = ship_mut(&mut state, ship_symbol, now)?.nav.waypoint_symbol.clone();
        let origin = state
            .waypoints
            .iter()
            .find(|w| w.symbol == origin_symbol)
            .cloned()
            .ok_or_else(|| rejected("origin not found", 404))?;

        let ship = ship_mut(&mut state, ship_symbol, now)?;
        match ship.nav.status {
            NavStatus::Docked => return Err(rejected("Ship must be in orbit to navigate", 4236)),
            NavStatus::InTransit => return Err(rejected("Ship is in transit", 4214)),
            NavStatus::InOrbit => {}
        }
        if origin.symbol == destination.symbol {
            return Err(rejected("Ship is already at the destination", 4204));
        }

        let dx = f64::from(destination.x - origin.x);
        let dy = f64::from(destination.y - origin.y);
        let distance = (dx * dx + dy * dy).sqrt().round() as i64;

        ship.nav.route.origin = stop(&origin);
        ship.nav.route.destination = stop(&destination);
        ship.nav.route.departure_time = now;
        ship.nav.route.arrival = now + Duration::seconds(distance.max(1));
        ship.nav.waypoint_symbol = destination.symbol.clone();
        ship.nav.status = NavStatus::InTransit;
        ship.fuel.current = (ship.fuel.current - distance as i32).max(0);

        Ok(NavigationData {
            fuel: ship.fuel.clone(),
            nav: ship.nav.clone(),
        })
    }

    async fn orbit_ship(&self, ship_symbol: &str) -> ApiResult<ShipNav> {
        let mut state = self.enter("orbit", ship_symbol)?;
        let ship = ship_mut(&mut state, ship_symbol, self.clock.now())?;
        if ship.nav.status == NavStatus::InTransit {
            return Err(rejected("Ship is in transit", 4214));
        }
        ship.nav.status = NavStatus::InOrbit;
        Ok(ship.nav.clone())
    }

    async fn dock_ship(&self, ship_symbol: &str) -> ApiResult<ShipNav> {
        let mut state = self.enter("dock", ship_symbol)?;
        let ship = ship_mut(&mut state, ship_symbol, self.clock.now())?;
        if ship.nav.status == NavStatus::InTransit {
            return Err(rejected("Ship is in transit", 4214));
        }
        ship.nav.status = NavStatus::Docked;
        Ok(ship.nav.clone())
    }

    async fn create_survey(&self, ship_symbol: &str) -> ApiResult<SurveyData> {
        let _state = self.enter("survey", ship_symbol)?;
        Err(unsupported("survey"))
    }

    async fn extract_resources(&self, ship_symbol: &str, _survey: Option<&Survey>) -> ApiResult<ExtractionData> {
        let mut state = self.enter("extract", ship_symbol)?;
        let now = self.clock.now();
        let yield_units = state.extract_units;

        if state.cooldowns.get(ship_symbol).is_some_and(|c| c.is_active_at(now)) {
            return Err(rejected("Ship action is still on cooldown", 4000));
        }

        let ship = ship_mut(&mut state, ship_symbol, now)?;
        match ship.nav.status {
            NavStatus::Docked => return Err(rejected("Ship must be in orbit to extract", 4236)),
            NavStatus::InTransit => return Err(rejected("Ship is in transit", 4214)),
            NavStatus::InOrbit => {}
        }
        let room = ship.cargo.capacity - ship.cargo.units;
        if room <= 0 {
            return Err(rejected("Ship cargo is full", 4228));
        }

        let units = yield_units.min(room);
        match ship.cargo.inventory.iter_mut().find(|item| item.symbol == ORE) {
            Some(item) => item.units += units,
            None => ship.cargo.inventory.push(CargoItem {
                symbol: ORE.to_string(),
                name: ORE.to_string(),
                description: String::new(),
                units,
            }),
        }
        ship.cargo.units += units;
        let cargo = ship.cargo.clone();

        let cooldown = Cooldown {
            ship_symbol: ship_symbol.to_string(),
            total_seconds: EXTRACT_COOLDOWN_SECONDS,
            remaining_seconds: EXTRACT_COOLDOWN_SECONDS,
            expiration: Some(now + Duration::seconds(EXTRACT_COOLDOWN_SECONDS)),
        };
        state.cooldowns.insert(ship_symbol.to_string(), cooldown.clone());

        Ok(ExtractionData {
            cooldown,
            extraction: ExtractionResult {
                ship_symbol: ship_symbol.to_string(),
                extraction_yield: ExtractionYield {
                    symbol: ORE.to_string(),
                    units,
                },
            },
            cargo,
        })
    }

    async fn jettison_cargo(&self, ship_symbol: &str, _trade_symbol: &str, _units: i32) -> ApiResult<ShipCargo> {
        let _state = self.enter("jettison", ship_symbol)?;
        Err(unsupported("jettison"))
    }

    async fn jump_ship(&self, ship_symbol: &str, _system_symbol: &str) -> ApiResult<JumpData> {
        let _state = self.enter("jump", ship_symbol)?;
        Err(unsupported("jump"))
    }

    async fn sell_cargo(&self, ship_symbol: &str, trade_symbol: &str, units: i32) -> ApiResult<SellCargoData> {
        let mut state = self.enter("sell", &format!("{} {} {}", ship_symbol, trade_symbol, units))?;
        let now = self.clock.now();
        let price = state.sell_price;

        let waypoint_symbol = ship_mut(&mut state, ship_symbol, now)?.nav.waypoint_symbol.clone();
        let at_market = state
            .waypoints
            .iter()
            .any(|w| w.symbol == waypoint_symbol && w.has_trait(MARKETPLACE));
        if !at_market {
            return Err(rejected("No marketplace at this waypoint", 4603));
        }

        let ship = ship_mut(&mut state, ship_symbol, now)?;
        if ship.nav.status != NavStatus::Docked {
            return Err(rejected("Ship must be docked to sell", 4244));
        }
        let line = ship
            .cargo
            .inventory
            .iter_mut()
            .find(|item| item.symbol == trade_symbol && item.units >= units)
            .ok_or_else(|| rejected("Insufficient cargo", 4218))?;
        line.units -= units;
        ship.cargo.inventory.retain(|item| item.units > 0);
        ship.cargo.units -= units;
        let cargo = ship.cargo.clone();

        let total = i64::from(units) * i64::from(price);
        state.credits += total;

        Ok(SellCargoData {
            agent: Self::agent(&state),
            cargo,
            transaction: MarketTransaction {
                waypoint_symbol,
                ship_symbol: ship_symbol.to_string(),
                trade_symbol: trade_symbol.to_string(),
                transaction_type: "SELL".to_string(),
                units,
                price_per_unit: price,
                total_price: total as i32,
                timestamp: now,
            },
        })
    }

    async fn list_systems(&self) -> ApiResult<Vec<System>> {
        let _state = self.enter("list_systems", "")?;
        Err(unsupported("list_systems"))
    }

    async fn get_system(&self, system_symbol: &str) -> ApiResult<System> {
        let _state = self.enter("get_system", system_symbol)?;
        Err(unsupported("get_system"))
    }

    async fn list_waypoints(&self, system_symbol: &str) -> ApiResult<Vec<Waypoint>> {
        let state = self.enter("list_waypoints", system_symbol)?;
        Ok(state
            .waypoints
            .iter()
            .filter(|w| w.system_symbol == system_symbol)
            .cloned()
            .collect())
    }

    async fn get_waypoint(&self, system_symbol: &str, waypoint_symbol: &str) -> ApiResult<Waypoint> {
        let state = self.enter("get_waypoint", waypoint_symbol)?;
        state
            .waypoints
            .iter()
            .find(|w| w.system_symbol == system_symbol && w.symbol == waypoint_symbol)
            .cloned()
            .ok_or_else(|| rejected("waypoint not found", 404))
    }

    async fn get_market(&self, _system_symbol: &str, waypoint_symbol: &str) -> ApiResult<Market> {
        let _state = self.enter("get_market", waypoint_symbol)?;
        Err(unsupported("get_market"))
    }

    async fn get_shipyard(&self, _system_symbol: &str, waypoint_symbol: &str) -> ApiResult<Shipyard> {
        let state = self.enter("get_shipyard", waypoint_symbol)?;
        let has_yard = state
            .waypoints
            .iter()
            .any(|w| w.symbol == waypoint_symbol && w.has_trait(SHIPYARD));
        if !has_yard {
            return Err(rejected("No shipyard at this waypoint", 4600));
        }
        Ok(Shipyard {
            symbol: waypoint_symbol.to_string(),
            ship_types: vec![
                ShipyardShipType {
                    ship_type: "SHIP_MINING_DRONE".to_string(),
                },
                ShipyardShipType {
                    ship_type: "SHIP_LIGHT_HAULER".to_string(),
                },
            ],
            transactions: None,
            ships: None,
            modifications_fee: None,
        })
    }

    async fn get_jump_gate(&self, _system_symbol: &str, waypoint_symbol: &str) -> ApiResult<JumpGate> {
        let _state = self.enter("get_jump_gate", waypoint_symbol)?;
        Err(unsupported("get_jump_gate"))
    }
}
