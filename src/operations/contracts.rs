// Contract operations module
use crate::client::SpaceTradersApi;
use crate::error::FleetError;
use crate::models::*;
use crate::output_broker::Logger;
use crate::{o_debug, o_info};

pub struct ContractOperations<'a> {
    api: &'a dyn SpaceTradersApi,
    log: &'a Logger,
}

impl<'a> ContractOperations<'a> {
    pub fn new(api: &'a dyn SpaceTradersApi, log: &'a Logger) -> Self {
        Self { api, log }
    }

    pub async fn get_contracts(&self) -> Result<Vec<Contract>, FleetError> {
        let contracts = self.api.list_contracts().await?;
        o_info!(self.log, "📋 Contracts retrieved: {}", contracts.len());
        Ok(contracts)
    }

    /// Accepts every contract not yet accepted, replacing it with the
    /// accepted version. Stops at the first rejection.
    pub async fn accept_open_contracts(&self, contracts: &mut [Contract]) -> Result<usize, FleetError> {
        let mut accepted = 0;

        for contract in contracts.iter_mut().filter(|c| !c.accepted) {
            o_info!(self.log, "🤝 Accepting contract {} ({})", contract.id, contract.faction_symbol);
            let data = self.api.accept_contract(&contract.id).await?;

            for delivery in &data.contract.terms.deliver {
                o_debug!(
                    self.log,
                    "   📦 {} x{} to {}",
                    delivery.trade_symbol,
                    delivery.units_required,
                    delivery.destination_symbol
                );
            }
            o_info!(self.log, "💰 Contract accepted, credits now {}", data.agent.credits);

            *contract = data.contract;
            accepted += 1;
        }

        Ok(accepted)
    }
}

/// Trade symbols the contracts ask for, first occurrence first, no repeats.
pub fn determine_priorities(contracts: &[Contract]) -> Vec<String> {
    let mut priorities: Vec<String> = Vec::new();
    for delivery in contracts.iter().flat_map(|c| c.terms.deliver.iter()) {
        if !priorities.contains(&delivery.trade_symbol) {
            priorities.push(delivery.trade_symbol.clone());
        }
    }
    priorities
}
