//! Racer game state
//!
//! Cars are centre-anchored: `center` is the middle of the sprite, and the
//! collision box is built around it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::booster::Booster;
use super::lanes::Lanes;
use crate::settings::RacerTuning;
use crate::sim::GamePhase;
use crate::sim::collision::Rect;

/// The player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerCar {
    pub center: Vec2,
    pub size: Vec2,
    /// Scroll speed in pixels per frame
    pub speed: f32,
    pub lives: u32,
}

impl PlayerCar {
    pub fn rect(&self) -> Rect {
        Rect::centered(self.center, self.size)
    }
}

/// An AI vehicle occupying one lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub center: Vec2,
    pub size: Vec2,
    pub lane: usize,
    /// Added to the player's speed to get this vehicle's downward speed
    pub speed_offset: f32,
    /// Sprite variant
    pub variant: u32,
}

impl Vehicle {
    pub fn rect(&self) -> Rect {
        Rect::centered(self.center, self.size)
    }
}

/// Complete racer state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RacerState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: RacerTuning,
    pub lanes: Lanes,
    pub phase: GamePhase,
    /// Simulation clock (ms since the run started)
    pub elapsed_ms: f64,
    /// Distance points accrued from speed over time
    pub distance: f64,
    /// Points from boosted rams
    pub bonus: u64,
    /// Lane marking scroll offset
    pub road_offset: f32,
    pub player: PlayerCar,
    pub booster: Booster,
    pub vehicles: Vec<Vehicle>,
}

impl RacerState {
    pub fn new(tuning: RacerTuning, seed: u64) -> Self {
        debug_assert!(tuning.validate().is_ok(), "invalid racer tuning");
        let lanes = Lanes::from_tuning(&tuning);
        let player = PlayerCar {
            center: Vec2::new(
                lanes.snap(tuning.width / 2.0),
                tuning.height - tuning.player_bottom_offset,
            ),
            size: Vec2::new(tuning.car_width, tuning.car_height),
            speed: tuning.base_speed,
            lives: tuning.lives,
        };

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            booster: Booster::new(&tuning),
            lanes,
            player,
            tuning,
            phase: GamePhase::Playing,
            elapsed_ms: 0.0,
            distance: 0.0,
            bonus: 0,
            road_offset: 0.0,
            vehicles: Vec::new(),
        };
        state.spawn_traffic();
        state
    }

    /// Return to first-init values with a new seed
    pub fn reset(&mut self, seed: u64) {
        let tuning = self.tuning.clone();
        *self = Self::new(tuning, seed);
    }

    /// Total score: whole distance points plus ram bonuses
    pub fn score(&self) -> u64 {
        self.distance.floor() as u64 + self.bonus
    }

    /// One vehicle per lane, staggered upward above the visible area
    pub fn spawn_traffic(&mut self) {
        let count = self.lanes.count();
        let mut vehicles = Vec::with_capacity(count);
        for lane in 0..count {
            let y = self.tuning.respawn_y - lane as f32 * self.tuning.traffic_spacing;
            let vehicle = Vehicle {
                center: Vec2::new(self.lanes.x(lane), y),
                size: Vec2::new(self.tuning.car_width, self.tuning.car_height),
                lane,
                speed_offset: self.random_speed_offset(),
                variant: self.random_variant(),
            };
            vehicles.push(vehicle);
        }
        self.vehicles = vehicles;
    }

    fn random_speed_offset(&mut self) -> f32 {
        let base = self.tuning.traffic_base_speed;
        let variation = self.tuning.traffic_speed_variation;
        if variation > 0.0 {
            base + self.rng.random_range(-variation..variation)
        } else {
            base
        }
    }

    fn random_variant(&mut self) -> u32 {
        self.rng.random_range(0..self.tuning.npc_variants)
    }

    fn random_lane(&mut self) -> usize {
        self.rng.random_range(0..self.lanes.count())
    }

    /// Find a spawn height above the visible area, clear of every other vehicle.
    ///
    /// Probes upward from `respawn_y` in `respawn_step` increments and takes the
    /// first candidate at least `min_separation` away (vertically) from every
    /// vehicle except `skip`. If every probe is blocked the last one is used.
    pub fn find_spawn_y(&self, skip: Option<usize>) -> f32 {
        let t = &self.tuning;
        let mut candidate = t.respawn_y;

        for attempt in 0..t.respawn_attempts {
            candidate = t.respawn_y - attempt as f32 * t.respawn_step;
            let blocked = self
                .vehicles
                .iter()
                .enumerate()
                .filter(|(i, _)| Some(*i) != skip)
                .any(|(_, other)| (candidate - other.center.y).abs() < t.min_separation);
            if !blocked {
                return candidate;
            }
        }

        log::debug!("No clear spawn gap after {} probes, using y={candidate}", t.respawn_attempts);
        candidate
    }

    /// Move vehicle `index` back above the screen with a fresh lane, sprite, and speed
    pub fn relocate(&mut self, index: usize) {
        let y = self.find_spawn_y(Some(index));
        let lane = self.random_lane();
        let speed_offset = self.random_speed_offset();
        let variant = self.random_variant();

        let x = self.lanes.x(lane);
        let vehicle = &mut self.vehicles[index];
        vehicle.center = Vec2::new(x, y);
        vehicle.lane = lane;
        vehicle.speed_offset = speed_offset;
        vehicle.variant = variant;
    }

    /// Remove vehicle `index` and spawn a replacement using the relocation policy
    pub fn replace(&mut self, index: usize) {
        self.vehicles.remove(index);
        let y = self.find_spawn_y(None);
        let lane = self.random_lane();
        let vehicle = Vehicle {
            center: Vec2::new(self.lanes.x(lane), y),
            size: Vec2::new(self.tuning.car_width, self.tuning.car_height),
            lane,
            speed_offset: self.random_speed_offset(),
            variant: self.random_variant(),
        };
        self.vehicles.push(vehicle);
    }

    /// End the run
    pub fn game_over(&mut self) {
        if self.phase != GamePhase::GameOver {
            log::info!(
                "Racer over: score {} after {:.1}s",
                self.score(),
                self.elapsed_ms / 1000.0
            );
        }
        self.phase = GamePhase::GameOver;
    }
}
