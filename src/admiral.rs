// Admiral module - startup sequence and hand-off to the command loop
use crate::client::SpaceTradersApi;
use crate::clock::Clock;
use crate::config::FleetCommandConfig;
use crate::error::FleetError;
use crate::operations::*;
use crate::output_broker::{Logger, OutputBroker};
use crate::{o_info, o_summary};
use std::sync::Arc;

pub struct Admiral {
    config: FleetCommandConfig,
    api: Arc<dyn SpaceTradersApi>,
    clock: Arc<dyn Clock>,
    broker: OutputBroker,
    log: Logger,
}

impl Admiral {
    pub fn new(
        config: FleetCommandConfig,
        api: Arc<dyn SpaceTradersApi>,
        clock: Arc<dyn Clock>,
        broker: OutputBroker,
    ) -> Self {
        let log = broker.logger("👽 AGENT");
        Self {
            config,
            api,
            clock,
            broker,
            log,
        }
    }

    /// Runs startup, then the command loop until `shutdown` fires.
    /// Any startup failure aborts the whole run.
    pub async fn run(self, shutdown: ShutdownSignal) -> Result<DrainReport, FleetError> {
        let agent = self.api.get_agent().await?;
        o_summary!(self.log, "✅ Agent verified. Welcome {} | HQ {} | credits {}", agent.symbol, agent.headquarters, agent.credits);

        let contract_ops = ContractOperations::new(self.api.as_ref(), &self.log);
        let mut contracts = contract_ops.get_contracts().await?;
        if self.config.fleet.accept_contracts {
            let accepted = contract_ops.accept_open_contracts(&mut contracts).await?;
            o_info!(self.log, "📝 {} new contracts accepted", accepted);
        }

        let priorities = determine_priorities(&contracts);
        o_info!(self.log, "🎯 Priorities: {}", if priorities.is_empty() { "none".to_string() } else { priorities.join(", ") });

        let ships = self.api.list_ships().await?;
        o_info!(self.log, "🚢 Fleet retrieved: {} ships", ships.len());

        let context = FleetContext {
            api: self.api.clone(),
            clock: self.clock.clone(),
            priorities: priorities.into(),
            broker: self.broker.clone(),
            standby: self.config.fleet.standby(),
        };
        let mut fleet: Vec<ShipBot> = ships.into_iter().map(|ship| ShipBot::new(ship, &context)).collect();

        if self.config.fleet.run_requisition {
            match fleet.first_mut() {
                Some(flagship) => {
                    o_info!(self.log, "🏭 {} starts the requisition tour", flagship.symbol());
                    Requisition::new(&context).run(flagship).await?;
                }
                None => o_info!(self.log, "⚠️ No ships, requisition skipped"),
            }
        }

        let mut coordinator = FleetCoordinator::new(&context, agent, self.config.fleet.report_queue_capacity);
        let report = coordinator.run(fleet, shutdown).await;
        o_summary!(self.log, "💰 Standing down with {} credits", coordinator.agent().credits);
        Ok(report)
    }
}
