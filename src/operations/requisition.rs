// Requisition: one-shot shipyard tour run by a designated ship before the fleet is released
use crate::client::SpaceTradersApi;
use crate::error::FleetError;
use crate::operations::navigation::WaypointCriterion;
use crate::operations::ship_bot::{FleetContext, ShipBot};
use crate::output_broker::Logger;
use crate::{o_error, o_info};
use std::sync::Arc;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RequisitionReport {
    /// Shipyards reached, in visiting order
    pub visited: Vec<String>,
    /// Shipyards whose navigation failed
    pub unreachable: Vec<String>,
}

pub struct Requisition {
    api: Arc<dyn SpaceTradersApi>,
    log: Logger,
}

impl Requisition {
    pub fn new(context: &FleetContext) -> Self {
        Self {
            api: context.api.clone(),
            log: context.broker.logger("🏭 REQUISITION"),
        }
    }

    /// Visits every shipyard in the ship's system in listing order.
    /// A system without shipyards is an error the caller must not recover from.
    pub async fn run(&self, bot: &mut ShipBot) -> Result<RequisitionReport, FleetError> {
        let system = bot.ship.nav.system_symbol.clone();
        let criterion = WaypointCriterion::shipyard();

        let shipyards: Vec<String> = self
            .api
            .list_waypoints(&system)
            .await?
            .into_iter()
            .filter(|w| criterion.matches(w))
            .map(|w| w.symbol)
            .collect();

        if shipyards.is_empty() {
            return Err(FleetError::NoShipyards { system });
        }
        o_info!(self.log, "🔍 {} shipyards in {}: {}", shipyards.len(), system, shipyards.join(", "));

        let mut report = RequisitionReport::default();
        for shipyard in shipyards {
            if let Err(e) = bot.travel_to(&shipyard).await {
                o_error!(self.log, "❌ {} could not reach {}: {}", bot.symbol(), shipyard, e);
                report.unreachable.push(shipyard);
                continue;
            }

            match self.api.get_shipyard(&system, &shipyard).await {
                Ok(listing) => {
                    let offered: Vec<&str> = listing.ship_types.iter().map(|t| t.ship_type.as_str()).collect();
                    o_info!(self.log, "🏭 {} offers {}", shipyard, offered.join(", "));
                }
                Err(e) => o_error!(self.log, "❌ Could not read shipyard {}: {}", shipyard, e),
            }
            report.visited.push(shipyard);
        }

        o_info!(
            self.log,
            "✅ Requisition complete: {} visited, {} unreachable",
            report.visited.len(),
            report.unreachable.len()
        );
        Ok(report)
    }
}
