//! Seven-lane racer: the player hops between fixed lanes while traffic scrolls
//! toward them. A timed booster raises speed and turns collisions into rams.

pub mod booster;
pub mod lanes;
pub mod state;
pub mod tick;

pub use booster::{Booster, BoosterStatus};
pub use lanes::Lanes;
pub use state::{PlayerCar, RacerState, Vehicle};
pub use tick::tick;
