//! Canvas Arcade - a vertical shooter and a lane racer on one frame loop
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity stores, update engines, collisions)
//! - `renderer`: Render stage contract and scene painters
//! - `game`: The seam between the loop driver and the two simulations
//! - `driver`: Frame-driven run/stop state machine
//! - `hud`: Per-frame UI text snapshot
//! - `settings`: Data-driven tuning

pub mod driver;
pub mod game;
pub mod hud;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{FrameToken, LoopDriver, RunState, StopReason};
pub use game::{Game, GameKind};
pub use hud::Hud;
pub use settings::{ConfigError, Settings};

/// Game configuration constants
pub mod consts {
    /// Nominal frame interval in milliseconds (~60 Hz)
    pub const FRAME_MS: f32 = 16.0;
    /// Largest wall-clock delta fed to a single update (tab switches, stalls)
    pub const MAX_FRAME_MS: f32 = 100.0;
    /// How long the driver waits for sprites before starting without them
    pub const ASSET_TIMEOUT_MS: f64 = 5000.0;

    /// Default playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
}

/// Clamp a raw wall-clock delta into a usable frame interval.
///
/// A missing previous timestamp (first frame) yields the nominal interval.
#[inline]
pub fn frame_delta(last_ms: Option<f64>, now_ms: f64) -> f32 {
    match last_ms {
        Some(last) => ((now_ms - last) as f32).clamp(0.0, consts::MAX_FRAME_MS),
        None => consts::FRAME_MS,
    }
}
