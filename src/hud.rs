//! Per-frame HUD snapshot
//!
//! Built from game state after each update and written to the page's text
//! sinks. Nothing here is read back by the simulation.

use serde::Serialize;

use crate::sim::racer::BoosterStatus;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    /// Run stopwatch (ms)
    pub elapsed_ms: f64,
    /// Racer speed readout
    pub speed_kmh: Option<u32>,
    /// Racer booster state
    pub booster: Option<BoosterStatus>,
    pub game_over: bool,
}

impl Hud {
    /// Stopwatch as `MM:SS`
    pub fn time_string(&self) -> String {
        let total = (self.elapsed_ms.max(0.0) / 1000.0).floor() as u64;
        format!("{:02}:{:02}", total / 60, total % 60)
    }

    /// Booster line, seconds rounded up
    pub fn booster_text(&self) -> Option<String> {
        let seconds = |ms: f32| (ms / 1000.0).ceil() as u32;
        self.booster.map(|status| match status {
            BoosterStatus::Ready => "Ready".to_string(),
            BoosterStatus::Active { remaining_ms } => format!("Active: {}s", seconds(remaining_ms)),
            BoosterStatus::Cooldown { remaining_ms } => {
                format!("Cooldown: {}s", seconds(remaining_ms))
            }
        })
    }

    /// CSS class for the booster indicator
    pub fn booster_class(&self) -> Option<&'static str> {
        self.booster.map(|status| match status {
            BoosterStatus::Ready => "ready",
            BoosterStatus::Active { .. } => "active",
            BoosterStatus::Cooldown { .. } => "cooldown",
        })
    }
}
