//! Shooter game state
//!
//! Everything the shooter needs to advance a frame lives here, including the
//! seeded RNG, so two states built from the same seed replay identically.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::ShooterTuning;
use crate::sim::collision::Rect;
use crate::sim::{GamePhase, Owner};

/// A projectile moving straight up or down
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
    /// Vertical velocity in pixels per frame (negative = upward)
    pub vy: f32,
    pub owner: Owner,
}

impl Projectile {
    /// Spawn a projectile centred horizontally on `center_x` with its top at `top`
    pub fn new(center_x: f32, top: f32, size: Vec2, vy: f32, owner: Owner) -> Self {
        Self {
            rect: Rect::new(center_x - size.x / 2.0, top, size.x, size.y),
            vy,
            owner,
        }
    }

    pub fn advance(&mut self) {
        self.rect.pos.y += self.vy;
    }
}

/// The player's fighter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fighter {
    pub rect: Rect,
    /// Horizontal pixels per frame
    pub speed: f32,
    pub lives: u32,
}

impl Fighter {
    pub fn new(tuning: &ShooterTuning) -> Self {
        Self {
            rect: Rect::new(
                tuning.width / 2.0,
                tuning.height - tuning.player_bottom_offset,
                tuning.player_width,
                tuning.player_height,
            ),
            speed: tuning.player_speed,
            lives: tuning.lives,
        }
    }

    /// Shift horizontally, clamped to `[0, width - player width]`
    pub fn shift(&mut self, dx: f32, playfield_width: f32) {
        let max_x = (playfield_width - self.rect.size.x).max(0.0);
        self.rect.pos.x = (self.rect.pos.x + dx).clamp(0.0, max_x);
    }
}

/// A formation enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    /// Sprite variant (assigned by row)
    pub kind: u32,
    /// Remaining hits; always >= 1 while the enemy is in the formation
    pub health: u32,
    pub max_health: u32,
    /// Fixed at creation: whether this enemy ever fires
    pub can_shoot: bool,
    /// Elapsed-time stamp of the last shot (ms)
    pub last_shot_ms: f64,
    /// Minimum interval between shots (ms)
    pub cooldown_ms: f64,
}

impl Enemy {
    /// True when the enemy is eligible and its cooldown has passed
    pub fn ready_to_fire(&self, now_ms: f64) -> bool {
        self.can_shoot && now_ms - self.last_shot_ms > self.cooldown_ms
    }

    pub fn is_damaged(&self) -> bool {
        self.health < self.max_health
    }
}

/// Shared lockstep motion of the whole formation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formation {
    /// Horizontal pixels per frame
    pub speed: f32,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    /// Number of formations cleared so far
    pub wave: u32,
}

/// Complete shooter state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShooterState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: ShooterTuning,
    pub phase: GamePhase,
    pub score: u64,
    /// Simulation clock (ms since the run started)
    pub elapsed_ms: f64,
    pub player: Fighter,
    pub player_shots: Vec<Projectile>,
    pub enemy_shots: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub formation: Formation,
}

impl ShooterState {
    /// Create a new run with a fresh formation
    pub fn new(tuning: ShooterTuning, seed: u64) -> Self {
        debug_assert!(tuning.validate().is_ok(), "invalid shooter tuning");
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Fighter::new(&tuning),
            formation: Formation {
                speed: tuning.formation_speed,
                direction: 1.0,
                wave: 0,
            },
            tuning,
            phase: GamePhase::Playing,
            score: 0,
            elapsed_ms: 0.0,
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            enemies: Vec::new(),
        };
        state.spawn_formation();
        state
    }

    /// Return to first-init values with a new seed
    pub fn reset(&mut self, seed: u64) {
        let tuning = self.tuning.clone();
        *self = Self::new(tuning, seed);
    }

    /// Replace the enemy collection with a full grid moving right
    pub fn spawn_formation(&mut self) {
        self.formation.direction = 1.0;
        let t = &self.tuning;
        let mut enemies = Vec::with_capacity((t.rows * t.cols) as usize);

        for row in 0..t.rows {
            for col in 0..t.cols {
                let can_shoot = self.rng.random_bool(t.shooter_chance);
                let cooldown_ms = self.rng.random_range(t.cooldown_min_ms..t.cooldown_max_ms);
                enemies.push(Enemy {
                    rect: Rect::new(
                        t.origin_x + col as f32 * t.col_step(),
                        t.origin_y + row as f32 * t.row_step(),
                        t.enemy_width,
                        t.enemy_height,
                    ),
                    kind: row % t.enemy_kinds,
                    health: t.enemy_health,
                    max_health: t.enemy_health,
                    can_shoot,
                    last_shot_ms: self.elapsed_ms,
                    cooldown_ms,
                });
            }
        }

        self.enemies = enemies;
    }

    /// Spawn a player shot from the fighter's horizontal centre
    pub fn fire_player_shot(&mut self) {
        let t = &self.tuning;
        self.player_shots.push(Projectile::new(
            self.player.rect.center_x(),
            self.player.rect.top(),
            Vec2::new(t.shot_width, t.shot_height),
            -t.player_shot_speed,
            Owner::Player,
        ));
    }

    /// Spawn a shot below enemy `index`
    pub fn fire_enemy_shot(&mut self, index: usize) {
        let t = &self.tuning;
        let enemy = &self.enemies[index];
        self.enemy_shots.push(Projectile::new(
            enemy.rect.center_x(),
            enemy.rect.bottom(),
            Vec2::new(t.shot_width, t.shot_height),
            t.enemy_shot_speed,
            Owner::Opponent,
        ));
    }

    /// Register one hit on enemy `index`, removing it and scoring when destroyed.
    /// Returns true if the enemy was destroyed.
    pub fn hit_enemy(&mut self, index: usize) -> bool {
        let enemy = &mut self.enemies[index];
        debug_assert!(enemy.health >= 1, "enemy with zero health left in formation");
        enemy.health -= 1;
        if enemy.health == 0 {
            self.enemies.remove(index);
            self.score += self.tuning.kill_points;
            true
        } else {
            false
        }
    }

    /// End the run
    pub fn game_over(&mut self) {
        if self.phase != GamePhase::GameOver {
            log::info!(
                "Shooter over: score {} after {} waves",
                self.score,
                self.formation.wave
            );
        }
        self.player.lives = 0;
        self.phase = GamePhase::GameOver;
    }
}
