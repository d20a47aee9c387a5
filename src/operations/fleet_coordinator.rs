// Fleet Coordinator - the command loop that turns ship reports into actions
use crate::models::*;
use crate::operations::behavior::{decide, has_behavior, ShipAction};
use crate::operations::ship_bot::{FleetContext, ShipBot};
use crate::operations::shutdown::{DrainReport, ShutdownSignal};
use crate::output_broker::Logger;
use crate::{o_error, o_info, o_summary};
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, JoinSet};

pub struct FleetCoordinator {
    agent: Agent,
    queue_capacity: usize,
    log: Logger,
}

/// Everything the dispatcher owns while the loop runs.
struct Dispatch {
    reports_tx: mpsc::Sender<ShipBot>,
    in_flight: JoinSet<()>,
    parked: Vec<ShipBot>,
    held: Vec<ShipBot>,
    failed: usize,
}

impl FleetCoordinator {
    pub fn new(context: &FleetContext, agent: Agent, queue_capacity: usize) -> Self {
        Self {
            agent,
            queue_capacity: queue_capacity.max(1),
            log: context.broker.logger("🖥️ TERMINAL"),
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Runs the command loop until `shutdown` fires, then drains in-flight
    /// actions and acknowledges. Without a shutdown request this never returns.
    pub async fn run(&mut self, fleet: Vec<ShipBot>, mut shutdown: ShutdownSignal) -> DrainReport {
        let (reports_tx, mut reports) = mpsc::channel::<ShipBot>(self.queue_capacity);
        let fleet_size = fleet.len();

        // Counting barrier over the initial fan-out
        let mut muster = JoinSet::new();
        for mut bot in fleet {
            let tx = reports_tx.clone();
            muster.spawn(async move {
                bot.probe_cooldown().await;
                let _ = tx.send(bot).await;
            });
        }

        let mut dispatch = Dispatch {
            reports_tx,
            in_flight: JoinSet::new(),
            parked: Vec::new(),
            held: Vec::new(),
            failed: 0,
        };
        let mut ack: Option<oneshot::Sender<DrainReport>> = None;

        o_info!(self.log, "🎖️ Command loop started with {} ships", fleet_size);

        loop {
            if ack.is_some() && muster.is_empty() && dispatch.in_flight.is_empty() {
                while let Ok(bot) = reports.try_recv() {
                    self.hold(bot, &mut dispatch);
                }
                break;
            }

            tokio::select! {
                Some(bot) = reports.recv() => {
                    if ack.is_some() {
                        self.hold(bot, &mut dispatch);
                    } else {
                        self.dispatch(bot, &mut dispatch).await;
                    }
                }
                Some(joined) = muster.join_next(), if !muster.is_empty() => {
                    if let Err(e) = joined {
                        self.lost_task(&mut dispatch, e);
                    }
                    if muster.is_empty() {
                        o_info!(self.log, "🚀 Fleet underway: {} ships mustered", fleet_size - dispatch.failed);
                    }
                }
                Some(joined) = dispatch.in_flight.join_next(), if !dispatch.in_flight.is_empty() => {
                    if let Err(e) = joined {
                        self.lost_task(&mut dispatch, e);
                    }
                }
                request = shutdown.requested(), if ack.is_none() => {
                    o_info!(self.log, "🛑 Shutdown requested, draining {} in-flight actions", dispatch.in_flight.len());
                    ack = Some(request);
                }
            }
        }

        let report = DrainReport {
            reported: dispatch.held.len(),
            parked: dispatch.parked.len(),
            failed: dispatch.failed,
        };
        o_summary!(
            self.log,
            "🏁 Drained: {} reported, {} parked, {} lost | credits {}",
            report.reported,
            report.parked,
            report.failed,
            self.agent.credits
        );

        if let Some(ack) = ack {
            let _ = ack.send(report);
        }
        report
    }

    fn absorb_credits(&mut self, bot: &mut ShipBot) {
        if let Some(credits) = bot.take_credits() {
            self.agent.credits = credits;
        }
    }

    /// Draining: keep the ship, dispatch nothing.
    fn hold(&mut self, mut bot: ShipBot, dispatch: &mut Dispatch) {
        self.absorb_credits(&mut bot);
        dispatch.held.push(bot);
    }

    async fn dispatch(&mut self, mut bot: ShipBot, dispatch: &mut Dispatch) {
        self.absorb_credits(&mut bot);

        let action = self.next_action(&bot).await;
        o_summary!(
            self.log,
            "{} [{}] → {} | cargo {} | credits {}",
            bot.symbol(),
            bot.role(),
            action,
            bot.ship.cargo,
            self.agent.credits
        );

        if action == ShipAction::Idle {
            o_info!(bot.logger(), "💤 No behavior for role {}, parked", bot.role());
            dispatch.parked.push(bot);
            return;
        }

        dispatch.in_flight.spawn(bot.run(action, dispatch.reports_tx.clone()));
    }

    async fn next_action(&self, bot: &ShipBot) -> ShipAction {
        if bot.in_transit() {
            return ShipAction::AwaitArrival;
        }
        if !has_behavior(bot.role()) {
            return ShipAction::Idle;
        }

        match bot.observe_waypoint().await {
            Ok(context) => decide(bot.role(), &bot.ship, &context),
            Err(e) => {
                o_error!(bot.logger(), "❌ Could not observe {}: {}", bot.ship.nav.waypoint_symbol, e);
                ShipAction::Standby
            }
        }
    }

    fn lost_task(&self, dispatch: &mut Dispatch, error: JoinError) {
        dispatch.failed += 1;
        o_error!(self.log, "💥 Ship task ended abnormally, ship dropped from the loop: {}", error);
    }
}
