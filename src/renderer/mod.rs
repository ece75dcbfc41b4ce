//! Canvas rendering module
//!
//! Painters only read simulation state. They talk to a [`Surface`], which is
//! either the browser's 2D canvas or a recorded [`DisplayList`].

pub mod palette;
pub mod scene;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Rect;

pub use palette::Color;
pub use scene::{draw_racer, draw_shooter};

/// Image assets a surface knows how to blit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Fighter,
    /// Formation enemy, by kind
    Enemy(u32),
    PlayerCar,
    /// Traffic vehicle, by variant
    Npc(u32),
}

impl Sprite {
    /// Asset file name, relative to the page's asset directory
    pub fn file_name(self) -> String {
        match self {
            Sprite::Fighter => "fighter.png".to_string(),
            Sprite::Enemy(kind) => format!("enemy{}.png", kind + 1),
            Sprite::PlayerCar => "car_player.png".to_string(),
            Sprite::Npc(variant) => format!("car_npc{}.png", variant + 1),
        }
    }
}

/// 2D drawing primitives
pub trait Surface {
    /// Drawable size in pixels
    fn size(&self) -> Vec2;
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Draw `sprite` scaled into `rect`
    fn blit(&mut self, sprite: Sprite, rect: Rect);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Fill { rect: Rect, color: Color },
    Blit { sprite: Sprite, rect: Rect },
}

/// A surface that records draw calls in order
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    size: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }
}

impl Surface for DisplayList {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Fill { rect, color });
    }

    fn blit(&mut self, sprite: Sprite, rect: Rect) {
        self.commands.push(DrawCommand::Blit { sprite, rect });
    }
}
