//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time advances only through the `dt_ms` passed to each tick
//! - Seeded RNG only
//! - Stable iteration order (collections keep insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod racer;
pub mod shooter;

use serde::{Deserialize, Serialize};

pub use collision::{Rect, first_overlap, overlaps};
pub use input::{Action, InputSampler, TickInput};
pub use racer::RacerState;
pub use shooter::ShooterState;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Run ended (player destroyed or out of lives)
    GameOver,
}

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Opponent,
}
