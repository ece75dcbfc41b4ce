//! Racer booster: a timed speed boost followed by a cooldown
//!
//! The active window and the cooldown window never overlap. Activation is only
//! accepted when both countdowns are at zero.

use serde::{Deserialize, Serialize};

use crate::settings::RacerTuning;

/// Booster readiness, for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BoosterStatus {
    Ready,
    Active { remaining_ms: f32 },
    Cooldown { remaining_ms: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booster {
    pub active: bool,
    /// Time left in the active window (ms)
    pub remaining_ms: f32,
    /// Time left before the next activation is allowed (ms)
    pub cooldown_ms: f32,
    /// Player speed before activation, restored on expiry
    pub saved_speed: f32,

    boost_speed: f32,
    duration_ms: f32,
    cooldown_total_ms: f32,
}

impl Booster {
    pub fn new(tuning: &RacerTuning) -> Self {
        Self {
            active: false,
            remaining_ms: 0.0,
            cooldown_ms: 0.0,
            saved_speed: 0.0,
            boost_speed: tuning.boost_speed,
            duration_ms: tuning.boost_duration_ms,
            cooldown_total_ms: tuning.boost_cooldown_ms,
        }
    }

    pub fn can_activate(&self) -> bool {
        !self.active && self.remaining_ms <= 0.0 && self.cooldown_ms <= 0.0
    }

    /// Start the boost, saving and replacing `speed`. Returns false if refused.
    pub fn try_activate(&mut self, speed: &mut f32) -> bool {
        if !self.can_activate() {
            return false;
        }
        self.active = true;
        self.remaining_ms = self.duration_ms;
        self.saved_speed = *speed;
        *speed = self.boost_speed;
        log::debug!("Booster on: {} -> {}", self.saved_speed, self.boost_speed);
        true
    }

    /// Count down the active window, or the cooldown when inactive.
    ///
    /// The frame on which the boost expires restores `speed` and starts the
    /// cooldown at its full length.
    pub fn advance(&mut self, dt_ms: f32, speed: &mut f32) {
        debug_assert!(
            !(self.active && self.cooldown_ms > 0.0),
            "booster active during cooldown"
        );

        if self.active {
            self.remaining_ms -= dt_ms;
            if self.remaining_ms <= 0.0 {
                self.remaining_ms = 0.0;
                self.active = false;
                *speed = self.saved_speed;
                self.cooldown_ms = self.cooldown_total_ms;
                log::debug!("Booster off: speed restored to {}", self.saved_speed);
            }
        } else if self.cooldown_ms > 0.0 {
            self.cooldown_ms = (self.cooldown_ms - dt_ms).max(0.0);
        }
    }

    pub fn status(&self) -> BoosterStatus {
        if self.active {
            BoosterStatus::Active {
                remaining_ms: self.remaining_ms,
            }
        } else if self.cooldown_ms > 0.0 {
            BoosterStatus::Cooldown {
                remaining_ms: self.cooldown_ms,
            }
        } else {
            BoosterStatus::Ready
        }
    }
}
