// Models module - wire shapes of the remote economy

pub mod ship;
pub mod contract;
pub mod waypoint;
pub mod market;
pub mod system;
pub mod shipyard;
pub mod transaction;
pub mod responses;

pub use ship::*;
pub use contract::*;
pub use waypoint::*;
pub use market::*;
pub use system::*;
pub use shipyard::*;
pub use transaction::*;
pub use responses::*;
