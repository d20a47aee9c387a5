// Fleet command library
// Rate-limited remote capability, ship behavior and the concurrent command loop

pub mod models;
pub mod client;
pub mod operations;
pub mod admiral;
pub mod config;
pub mod error;
pub mod clock;
pub mod output_broker;

// Re-export commonly used types
pub use models::{
    ship::{Agent, Ship, ShipNav, ShipCargo, CargoItem, Cooldown, NavStatus, ShipRole},
    contract::{Contract, DeliveryItem},
    waypoint::Waypoint,
};

pub use client::{SpaceTradersApi, SpaceTradersClient, Throttle};
pub use admiral::Admiral;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::FleetCommandConfig;
pub use error::{ApiError, FleetError};
pub use output_broker::{Logger, OutputBroker};
