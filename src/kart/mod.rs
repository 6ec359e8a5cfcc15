//! kart - engine-agnostic arcade drive model (pure types + per-tick solve)

pub mod types;
pub mod stats;
pub mod input;
pub mod longitudinal;
pub mod steering;
pub mod friction;
pub mod tick;

pub use stats::Stats;
pub use types::*;
pub use tick::{drive_tick, local_speed_fraction, BodyState, DriveOutput};
