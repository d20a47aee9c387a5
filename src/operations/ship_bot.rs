// Ship bot - one ship plus everything it needs to execute an action
use crate::client::SpaceTradersApi;
use crate::clock::Clock;
use crate::error::{ApiError, FleetError};
use crate::models::*;
use crate::operations::behavior::{ShipAction, WaypointContext};
use crate::operations::navigation::{select_destination, WaypointCriterion};
use crate::output_broker::{Logger, OutputBroker};
use crate::{o_debug, o_error, o_info};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Remote rejection code for an action attempted during cooldown.
const COOLDOWN_ACTIVE: i64 = 4000;

/// Shared, read-only collaborators handed to every ship.
#[derive(Clone)]
pub struct FleetContext {
    pub api: Arc<dyn SpaceTradersApi>,
    pub clock: Arc<dyn Clock>,
    /// Trade symbols the accepted contracts ask for, fixed at startup
    pub priorities: Arc<[String]>,
    pub broker: OutputBroker,
    pub standby: chrono::Duration,
}

/// A ship together with its local view of cooldown and credits. Exactly one
/// task owns a `ShipBot` at a time; it moves between the dispatcher and the
/// action task through the report queue.
pub struct ShipBot {
    pub ship: Ship,
    pub cooldown: Option<Cooldown>,
    /// Agent credits from the latest sale, picked up by the dispatcher
    pub credits: Option<i64>,
    api: Arc<dyn SpaceTradersApi>,
    clock: Arc<dyn Clock>,
    priorities: Arc<[String]>,
    standby: chrono::Duration,
    log: Logger,
}

impl ShipBot {
    pub fn new(ship: Ship, context: &FleetContext) -> Self {
        let log = context.broker.logger(format!("🚀 {}", ship.symbol));
        Self {
            ship,
            cooldown: None,
            credits: None,
            api: context.api.clone(),
            clock: context.clock.clone(),
            priorities: context.priorities.clone(),
            standby: context.standby,
            log,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.ship.symbol
    }

    pub fn role(&self) -> ShipRole {
        self.ship.registration.role
    }

    pub fn logger(&self) -> &Logger {
        &self.log
    }

    pub fn take_credits(&mut self) -> Option<i64> {
        self.credits.take()
    }

    pub fn in_transit(&self) -> bool {
        self.ship.nav.in_transit_at(self.clock.now())
    }

    /// Refresh the cooldown from the remote. A failed probe leaves no cooldown.
    pub async fn probe_cooldown(&mut self) {
        match self.api.get_ship_cooldown(&self.ship.symbol).await {
            Ok(cooldown) => self.cooldown = cooldown,
            Err(e) => {
                o_error!(self.log, "❌ Cooldown probe failed: {}", e);
                self.cooldown = None;
            }
        }
    }

    /// One fresh look at the current waypoint.
    pub async fn observe_waypoint(&self) -> Result<WaypointContext, FleetError> {
        let waypoint = self
            .api
            .get_waypoint(&self.ship.nav.system_symbol, &self.ship.nav.waypoint_symbol)
            .await?;
        Ok(WaypointContext::observe(&waypoint))
    }

    pub async fn ensure_orbit(&mut self) -> Result<(), FleetError> {
        if self.ship.nav.status == NavStatus::Docked {
            let nav = self.api.orbit_ship(&self.ship.symbol).await?;
            o_debug!(self.log, "🛰️ Undocked at {}", nav.waypoint_symbol);
            self.ship.nav = nav;
        }
        Ok(())
    }

    pub async fn dock(&mut self) -> Result<(), FleetError> {
        let nav = self.api.dock_ship(&self.ship.symbol).await?;
        o_info!(self.log, "⚓ Docked at {}", nav.waypoint_symbol);
        self.ship.nav = nav;
        Ok(())
    }

    /// Blocks until the current route's arrival. Past arrivals return at once.
    pub async fn wait_until_arrival(&mut self) {
        let arrival = self.ship.nav.route.arrival;
        if self.clock.now() < arrival {
            o_debug!(self.log, "⏳ In transit to {} until {}", self.ship.nav.route.destination.symbol, arrival.format("%H:%M:%S"));
        }
        self.clock.sleep_until(arrival).await;
        if self.ship.nav.status == NavStatus::InTransit {
            self.ship.nav.status = NavStatus::InOrbit;
        }
    }

    pub async fn wait_until_cooldown(&mut self) {
        if let Some(expiration) = self.cooldown.as_ref().and_then(|c| c.expiration) {
            if self.clock.now() < expiration {
                o_debug!(self.log, "🧊 Cooling down until {}", expiration.format("%H:%M:%S"));
            }
            self.clock.sleep_until(expiration).await;
        }
    }

    /// Orbit if needed, fly to `waypoint_symbol`, and wait out the trip.
    pub async fn navigate_to(&mut self, waypoint_symbol: &str) -> Result<(), FleetError> {
        self.ensure_orbit().await?;
        let data = self.api.navigate_ship(&self.ship.symbol, waypoint_symbol).await?;
        o_info!(
            self.log,
            "🧭 Navigating to {} (fuel {}/{})",
            waypoint_symbol,
            data.fuel.current,
            data.fuel.capacity
        );
        self.ship.fuel = data.fuel;
        self.ship.nav = data.nav;
        self.wait_until_arrival().await;
        Ok(())
    }

    /// Fly to the closest waypoint in the current system matching `criterion`.
    pub async fn navigate_to_nearest(&mut self, criterion: &WaypointCriterion) -> Result<String, FleetError> {
        let listing = self.api.list_waypoints(&self.ship.nav.system_symbol).await?;
        let destination = select_destination(&listing, &self.ship.nav.waypoint_symbol, criterion)?
            .symbol
            .clone();
        self.navigate_to(&destination).await?;
        Ok(destination)
    }

    /// Travel that tolerates a ship already there or already on its way.
    pub async fn travel_to(&mut self, waypoint_symbol: &str) -> Result<(), FleetError> {
        if self.in_transit() {
            if self.ship.nav.route.destination.symbol == waypoint_symbol {
                self.wait_until_arrival().await;
                return Ok(());
            }
            self.wait_until_arrival().await;
        }

        if self.ship.nav.waypoint_symbol == waypoint_symbol {
            o_debug!(self.log, "📍 Already at {}", waypoint_symbol);
            return Ok(());
        }

        self.navigate_to(waypoint_symbol).await
    }

    /// Extracts until the hold is full. The first failed call ends the loop;
    /// a cooldown rejection refreshes the local cooldown before returning.
    pub async fn extract_until_full(&mut self) -> Result<(), FleetError> {
        self.ensure_orbit().await?;

        while !self.ship.cargo.is_full() {
            self.wait_until_cooldown().await;
            let data = match self.api.extract_resources(&self.ship.symbol, None).await {
                Ok(data) => data,
                Err(e) => {
                    if matches!(e, ApiError::Domain { code: COOLDOWN_ACTIVE, .. }) {
                        self.probe_cooldown().await;
                    }
                    return Err(e.into());
                }
            };

            let extracted = &data.extraction.extraction_yield;
            o_info!(self.log, "⛏️ Extracted {} {} ({})", extracted.units, extracted.symbol, data.cargo);
            self.ship.cargo = data.cargo;
            self.cooldown = Some(data.cooldown);
        }

        Ok(())
    }

    /// Sells every line in the hold, one call per line. The first failed
    /// call abandons the remaining lines.
    pub async fn sell_all(&mut self) -> Result<(), FleetError> {
        while !self.ship.cargo.is_empty() {
            let units_before = self.ship.cargo.units;
            let lines = self.ship.cargo.inventory.clone();

            for line in lines.iter().filter(|line| line.units > 0) {
                let priority = self.priorities.iter().any(|p| *p == line.symbol);
                let data = self.api.sell_cargo(&self.ship.symbol, &line.symbol, line.units).await?;

                o_info!(
                    self.log,
                    "💰 Sold {} {}{} for {} credits",
                    data.transaction.units,
                    line.symbol,
                    if priority { " (contract good)" } else { "" },
                    data.transaction.total_price
                );
                self.ship.cargo = data.cargo;
                self.credits = Some(data.agent.credits);
            }

            if self.ship.cargo.units >= units_before {
                o_error!(self.log, "⚠️ Hold reports {} units but nothing could be sold", self.ship.cargo.units);
                break;
            }
        }

        Ok(())
    }

    pub async fn perform(&mut self, action: &ShipAction) -> Result<(), FleetError> {
        match action {
            ShipAction::Sell => self.sell_all().await,
            ShipAction::Dock => self.dock().await,
            ShipAction::NavigateToNearest(criterion) => self.navigate_to_nearest(criterion).await.map(|_| ()),
            ShipAction::Extract => self.extract_until_full().await,
            ShipAction::AwaitArrival => {
                self.wait_until_arrival().await;
                Ok(())
            }
            ShipAction::Standby => {
                let until = self.clock.now() + self.standby;
                self.clock.sleep_until(until).await;
                Ok(())
            }
            ShipAction::Idle => Ok(()),
        }
    }

    /// Execute one action, then hand the ship back to the dispatcher.
    pub async fn run(mut self, action: ShipAction, reports: mpsc::Sender<ShipBot>) {
        if let Err(e) = self.perform(&action).await {
            o_error!(self.log, "❌ {} failed: {}", action, e);
        }

        if let Err(returned) = reports.send(self).await {
            o_debug!(returned.0.log, "📪 Dispatcher gone, ship not reported");
        }
    }
}
