//! Colors for game elements (linear RGBA, 0..1)

use super::Sprite;

pub type Color = [f32; 4];

pub const SPACE: Color = [0.0, 0.0, 0.0, 1.0];
pub const PLAYER_SHOT: Color = [1.0, 1.0, 0.0, 1.0];
pub const ENEMY_SHOT: Color = [1.0, 0.0, 0.0, 1.0];
pub const DAMAGE_TINT: Color = [1.0, 0.0, 0.0, 0.5];

pub const GRASS: Color = rgb(0x2d, 0x5a, 0x27);
pub const ROAD: Color = rgb(0x4a, 0x4a, 0x4a);
pub const LANE_MARK: Color = [1.0, 1.0, 1.0, 1.0];

/// Opaque color from 8-bit channels
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Stand-in fill for a sprite whose image never loaded
pub fn fallback(sprite: Sprite) -> Color {
    match sprite {
        Sprite::Fighter => [0.2, 0.8, 0.4, 1.0],
        Sprite::Enemy(0) => [0.4, 0.7, 1.0, 1.0],
        Sprite::Enemy(1) => [1.0, 0.4, 0.2, 1.0],
        Sprite::Enemy(_) => [0.9, 0.85, 0.3, 1.0],
        Sprite::PlayerCar => [0.1, 0.4, 0.9, 1.0],
        Sprite::Npc(0) => [0.8, 0.2, 0.2, 1.0],
        Sprite::Npc(_) => [0.95, 0.75, 0.1, 1.0],
    }
}

/// CSS color string for canvas `fillStyle`
pub fn css(color: Color) -> String {
    let [r, g, b, a] = color;
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(r),
        channel(g),
        channel(b),
        a.clamp(0.0, 1.0)
    )
}
