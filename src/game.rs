//! The seam between the loop driver and the two simulations

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::hud::Hud;
use crate::renderer::{self, Sprite, Surface};
use crate::settings::Settings;
use crate::sim::{self, GamePhase, RacerState, ShooterState, TickInput};

/// Which game to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    #[default]
    Shooter,
    Racer,
}

impl GameKind {
    /// Parse a URL/CLI name (`shooter`, `racer`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "shooter" | "galaga" => Some(Self::Shooter),
            "racer" | "racing" => Some(Self::Racer),
            _ => None,
        }
    }
}

/// A frame-driven game the loop driver can run
pub trait Game {
    /// Restore first-init state with a new seed
    fn reset(&mut self, seed: u64);
    /// One Update Engine pass
    fn update(&mut self, input: &TickInput, dt_ms: f32) -> GamePhase;
    /// One Render Stage pass (read-only)
    fn render(&self, surface: &mut dyn Surface);
    fn hud(&self) -> Hud;
    fn phase(&self) -> GamePhase;
}

impl Game for ShooterState {
    fn reset(&mut self, seed: u64) {
        ShooterState::reset(self, seed);
    }

    fn update(&mut self, input: &TickInput, dt_ms: f32) -> GamePhase {
        sim::shooter::tick(self, input, dt_ms)
    }

    fn render(&self, surface: &mut dyn Surface) {
        renderer::draw_shooter(self, surface);
    }

    fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            lives: self.player.lives,
            elapsed_ms: self.elapsed_ms,
            speed_kmh: None,
            booster: None,
            game_over: self.phase == GamePhase::GameOver,
        }
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }
}

impl Game for RacerState {
    fn reset(&mut self, seed: u64) {
        RacerState::reset(self, seed);
    }

    fn update(&mut self, input: &TickInput, dt_ms: f32) -> GamePhase {
        sim::racer::tick(self, input, dt_ms)
    }

    fn render(&self, surface: &mut dyn Surface) {
        renderer::draw_racer(self, surface);
    }

    fn hud(&self) -> Hud {
        Hud {
            score: self.score(),
            lives: self.player.lives,
            elapsed_ms: self.elapsed_ms,
            speed_kmh: Some((self.player.speed * 10.0).round() as u32),
            booster: Some(self.booster.status()),
            game_over: self.phase == GamePhase::GameOver,
        }
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }
}

/// Either game, chosen at startup
#[derive(Debug, Clone)]
pub enum Arcade {
    Shooter(ShooterState),
    Racer(RacerState),
}

impl Arcade {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        match settings.game {
            GameKind::Shooter => Self::Shooter(ShooterState::new(settings.shooter.clone(), seed)),
            GameKind::Racer => Self::Racer(RacerState::new(settings.racer.clone(), seed)),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Self::Shooter(_) => GameKind::Shooter,
            Self::Racer(_) => GameKind::Racer,
        }
    }

    /// Playfield size in pixels
    pub fn playfield(&self) -> Vec2 {
        match self {
            Self::Shooter(state) => Vec2::new(state.tuning.width, state.tuning.height),
            Self::Racer(state) => Vec2::new(state.tuning.width, state.tuning.height),
        }
    }

    /// Every sprite this game can blit
    pub fn sprites(&self) -> Vec<Sprite> {
        match self {
            Self::Shooter(state) => std::iter::once(Sprite::Fighter)
                .chain((0..state.tuning.enemy_kinds).map(Sprite::Enemy))
                .collect(),
            Self::Racer(state) => std::iter::once(Sprite::PlayerCar)
                .chain((0..state.tuning.npc_variants).map(Sprite::Npc))
                .collect(),
        }
    }

    fn inner(&self) -> &dyn Game {
        match self {
            Self::Shooter(state) => state,
            Self::Racer(state) => state,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Game {
        match self {
            Self::Shooter(state) => state,
            Self::Racer(state) => state,
        }
    }
}

impl Game for Arcade {
    fn reset(&mut self, seed: u64) {
        self.inner_mut().reset(seed);
    }

    fn update(&mut self, input: &TickInput, dt_ms: f32) -> GamePhase {
        self.inner_mut().update(input, dt_ms)
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.inner().render(surface);
    }

    fn hud(&self) -> Hud {
        self.inner().hud()
    }

    fn phase(&self) -> GamePhase {
        self.inner().phase()
    }
}
