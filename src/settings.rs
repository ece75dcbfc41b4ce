//! Game tuning and settings
//!
//! Every gameplay constant lives here so both games can be rebalanced from a
//! JSON document without touching the simulation. Missing fields fall back to
//! the defaults below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{ASSET_TIMEOUT_MS, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::game::GameKind;

/// Configuration failures (the only fallible boundary in the crate)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Vertical shooter balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterTuning {
    pub width: f32,
    pub height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Distance from the bottom edge to the player's top
    pub player_bottom_offset: f32,
    /// Horizontal pixels per frame
    pub player_speed: f32,
    pub lives: u32,

    // === Projectiles ===
    pub shot_width: f32,
    pub shot_height: f32,
    pub player_shot_speed: f32,
    pub enemy_shot_speed: f32,

    // === Formation ===
    pub rows: u32,
    pub cols: u32,
    pub origin_x: f32,
    pub origin_y: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub spacing: f32,
    pub enemy_health: u32,
    /// Number of distinct enemy sprites, assigned by `row % kinds`
    pub enemy_kinds: u32,
    /// Chance an enemy is created able to fire
    pub shooter_chance: f64,
    /// Fire cooldown range in milliseconds, `[min, max)`
    pub cooldown_min_ms: f64,
    pub cooldown_max_ms: f64,

    // === Difficulty ===
    pub formation_speed: f32,
    pub speed_ramp: f32,
    pub kill_points: u64,
}

impl Default for ShooterTuning {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,

            player_width: 40.0,
            player_height: 40.0,
            player_bottom_offset: 80.0,
            player_speed: 5.0,
            lives: 3,

            shot_width: 4.0,
            shot_height: 10.0,
            player_shot_speed: 7.0,
            enemy_shot_speed: 3.0,

            rows: 4,
            cols: 8,
            origin_x: 100.0,
            origin_y: 50.0,
            enemy_width: 40.0,
            enemy_height: 40.0,
            spacing: 20.0,
            enemy_health: 2,
            enemy_kinds: 3,
            shooter_chance: 0.3,
            cooldown_min_ms: 1000.0,
            cooldown_max_ms: 3000.0,

            formation_speed: 0.5,
            speed_ramp: 0.2,
            kill_points: 100,
        }
    }
}

impl ShooterTuning {
    /// Vertical step taken by the formation when it bounces off a wall
    pub fn row_step(&self) -> f32 {
        self.enemy_height + self.spacing
    }

    /// Horizontal distance between formation columns
    pub fn col_step(&self) -> f32 {
        self.enemy_width + self.spacing
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(invalid("shooter.width/height", "playfield must be positive"));
        }
        if self.player_width >= self.width {
            return Err(invalid("shooter.player_width", "player wider than playfield"));
        }
        if self.lives == 0 {
            return Err(invalid("shooter.lives", "must start with at least one life"));
        }
        if self.rows == 0 || self.cols == 0 {
            return Err(invalid("shooter.rows/cols", "formation cannot be empty"));
        }
        if self.enemy_health == 0 {
            return Err(invalid("shooter.enemy_health", "must be at least 1"));
        }
        if self.enemy_kinds == 0 {
            return Err(invalid("shooter.enemy_kinds", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.shooter_chance) {
            return Err(invalid("shooter.shooter_chance", "must be within [0, 1]"));
        }
        if self.cooldown_min_ms >= self.cooldown_max_ms {
            return Err(invalid(
                "shooter.cooldown_min_ms",
                format!("{} >= {}", self.cooldown_min_ms, self.cooldown_max_ms),
            ));
        }
        Ok(())
    }
}

/// Lane racer balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RacerTuning {
    pub width: f32,
    pub height: f32,

    // === Road ===
    pub road_width: f32,
    pub lane_count: usize,
    /// Inset from each road edge the player centre may not cross
    pub road_margin: f32,
    /// Road marking offset wraps past this value
    pub scroll_wrap: f32,

    // === Player ===
    pub car_width: f32,
    pub car_height: f32,
    /// Distance from the bottom edge to the player's centre
    pub player_bottom_offset: f32,
    pub base_speed: f32,
    pub lives: u32,

    // === Booster ===
    pub boost_speed: f32,
    pub boost_duration_ms: f32,
    pub boost_cooldown_ms: f32,

    // === Traffic ===
    pub traffic_base_speed: f32,
    pub traffic_speed_variation: f32,
    pub traffic_spacing: f32,
    /// Vehicles further than this below the bottom edge are relocated
    pub despawn_margin: f32,
    pub respawn_y: f32,
    pub respawn_step: f32,
    pub respawn_attempts: u32,
    pub min_separation: f32,
    pub npc_variants: u32,
    pub ram_points: u64,
}

impl Default for RacerTuning {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,

            road_width: 300.0,
            lane_count: 7,
            road_margin: 25.0,
            scroll_wrap: 100.0,

            car_width: 35.0,
            car_height: 55.0,
            player_bottom_offset: 100.0,
            base_speed: 8.0,
            lives: 1,

            boost_speed: 15.0,
            boost_duration_ms: 5000.0,
            boost_cooldown_ms: 8000.0,

            traffic_base_speed: 3.0,
            traffic_speed_variation: 2.0,
            traffic_spacing: 200.0,
            despawn_margin: 100.0,
            respawn_y: -100.0,
            respawn_step: 50.0,
            respawn_attempts: 10,
            min_separation: 150.0,
            npc_variants: 2,
            ram_points: 10,
        }
    }
}

impl RacerTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(invalid("racer.width/height", "playfield must be positive"));
        }
        if self.lane_count == 0 {
            return Err(invalid("racer.lane_count", "need at least one lane"));
        }
        if self.road_width <= 0.0 || self.road_width > self.width {
            return Err(invalid("racer.road_width", "must fit inside the playfield"));
        }
        if self.lives == 0 {
            return Err(invalid("racer.lives", "must start with at least one life"));
        }
        if self.boost_duration_ms <= 0.0 || self.boost_cooldown_ms < 0.0 {
            return Err(invalid("racer.boost_duration_ms", "durations must be positive"));
        }
        if self.respawn_attempts == 0 {
            return Err(invalid("racer.respawn_attempts", "must probe at least once"));
        }
        if self.traffic_speed_variation < 0.0 {
            return Err(invalid("racer.traffic_speed_variation", "must not be negative"));
        }
        if self.npc_variants == 0 {
            return Err(invalid("racer.npc_variants", "must be at least 1"));
        }
        Ok(())
    }
}

/// Top-level settings document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which game to boot
    pub game: GameKind,
    /// Fixed seed (None = derive from the clock)
    pub seed: Option<u64>,
    /// Wait this long for sprites before starting without them
    pub asset_timeout_ms: f64,
    pub shooter: ShooterTuning,
    pub racer: RacerTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameKind::Shooter,
            seed: None,
            asset_timeout_ms: ASSET_TIMEOUT_MS,
            shooter: ShooterTuning::default(),
            racer: RacerTuning::default(),
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, logging and falling back to defaults on any failure
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings ({:?})", settings.game);
                settings
            }
            Some(Err(e)) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.asset_timeout_ms < 0.0 {
            return Err(invalid("asset_timeout_ms", "must not be negative"));
        }
        self.shooter.validate()?;
        self.racer.validate()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
