//! Scene painters for both games

use super::palette::{self, Color};
use super::{Sprite, Surface};
use crate::sim::{RacerState, Rect, ShooterState};

/// Dashed lane marking geometry: 20px dash, 20px gap, 3px wide
const DASH_LENGTH: f32 = 20.0;
const DASH_PERIOD: f32 = 40.0;
const DASH_WIDTH: f32 = 3.0;

fn clear(surface: &mut dyn Surface, color: Color) {
    let size = surface.size();
    surface.fill_rect(Rect::new(0.0, 0.0, size.x, size.y), color);
}

/// Paint the shooter: background, player, shots, then the formation
pub fn draw_shooter(state: &ShooterState, surface: &mut dyn Surface) {
    clear(surface, palette::SPACE);

    surface.blit(Sprite::Fighter, state.player.rect);

    for shot in &state.player_shots {
        surface.fill_rect(shot.rect, palette::PLAYER_SHOT);
    }
    for shot in &state.enemy_shots {
        surface.fill_rect(shot.rect, palette::ENEMY_SHOT);
    }

    for enemy in &state.enemies {
        surface.blit(Sprite::Enemy(enemy.kind), enemy.rect);
        if enemy.is_damaged() {
            surface.fill_rect(enemy.rect, palette::DAMAGE_TINT);
        }
    }
}

/// Paint the racer: grass, road, scrolling lane marks, traffic, then the player car
pub fn draw_racer(state: &RacerState, surface: &mut dyn Surface) {
    clear(surface, palette::GRASS);

    let size = surface.size();
    let road_left = state.tuning.width / 2.0 - state.tuning.road_width / 2.0;
    surface.fill_rect(
        Rect::new(road_left, 0.0, state.tuning.road_width, size.y),
        palette::ROAD,
    );

    draw_lane_marks(state, surface, size.y);

    for vehicle in &state.vehicles {
        surface.blit(Sprite::Npc(vehicle.variant), vehicle.rect());
    }
    surface.blit(Sprite::PlayerCar, state.player.rect());
}

fn draw_lane_marks(state: &RacerState, surface: &mut dyn Surface, height: f32) {
    // First dash starts above the top edge so scrolling never opens a gap
    let first = state.road_offset.rem_euclid(DASH_PERIOD) - DASH_PERIOD;

    for &x in state.lanes.xs() {
        let mut y = first;
        while y < height {
            surface.fill_rect(
                Rect::new(x - DASH_WIDTH / 2.0, y, DASH_WIDTH, DASH_LENGTH),
                palette::LANE_MARK,
            );
            y += DASH_PERIOD;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DisplayList, DrawCommand};
    use crate::settings::{RacerTuning, ShooterTuning};
    use crate::sim::Owner;
    use crate::sim::shooter::Projectile;
    use glam::Vec2;

    fn list() -> DisplayList {
        DisplayList::new(800.0, 600.0)
    }

    fn fills_of(list: &DisplayList, color: Color) -> usize {
        list.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { color: fill, .. } if *fill == color))
            .count()
    }

    #[test]
    fn test_shooter_paint_order() {
        let mut state = ShooterState::new(ShooterTuning::default(), 1);
        let size = Vec2::new(4.0, 10.0);
        state
            .player_shots
            .push(Projectile::new(100.0, 300.0, size, -7.0, Owner::Player));
        state
            .enemy_shots
            .push(Projectile::new(200.0, 300.0, size, 3.0, Owner::Opponent));

        let mut out = list();
        draw_shooter(&state, &mut out);

        let cmds = &out.commands;
        assert_eq!(
            cmds[0],
            DrawCommand::Fill {
                rect: Rect::new(0.0, 0.0, 800.0, 600.0),
                color: palette::SPACE
            }
        );
        assert!(matches!(cmds[1], DrawCommand::Blit { sprite: Sprite::Fighter, .. }));
        assert!(matches!(cmds[2], DrawCommand::Fill { color, .. } if color == palette::PLAYER_SHOT));
        assert!(matches!(cmds[3], DrawCommand::Fill { color, .. } if color == palette::ENEMY_SHOT));
        assert!(cmds[4..]
            .iter()
            .all(|c| matches!(c, DrawCommand::Blit { sprite: Sprite::Enemy(_), .. })));
        assert_eq!(cmds.len(), 4 + 32);
    }

    #[test]
    fn test_damage_tint_follows_damaged_enemy() {
        let mut state = ShooterState::new(ShooterTuning::default(), 1);
        state.enemies[5].health = 1;

        let mut out = list();
        draw_shooter(&state, &mut out);

        assert_eq!(fills_of(&out, palette::DAMAGE_TINT), 1);
        let tint = out
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Fill { color, .. } if *color == palette::DAMAGE_TINT))
            .unwrap();
        assert_eq!(
            out.commands[tint - 1],
            DrawCommand::Blit {
                sprite: Sprite::Enemy(state.enemies[5].kind),
                rect: state.enemies[5].rect
            }
        );
    }

    #[test]
    fn test_enemy_sprites_follow_rows() {
        let state = ShooterState::new(ShooterTuning::default(), 1);
        let mut out = list();
        draw_shooter(&state, &mut out);
        let kinds: Vec<u32> = out
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Blit { sprite: Sprite::Enemy(kind), .. } => Some(*kind),
                _ => None,
            })
            .collect();
        // 8 per row, rows 0..4 -> kinds 0,1,2,0
        assert_eq!(kinds[0], 0);
        assert_eq!(kinds[8], 1);
        assert_eq!(kinds[16], 2);
        assert_eq!(kinds[24], 0);
    }

    #[test]
    fn test_racer_paint_order() {
        let state = RacerState::new(RacerTuning::default(), 2);
        let mut out = list();
        draw_racer(&state, &mut out);

        let cmds = &out.commands;
        assert!(matches!(cmds[0], DrawCommand::Fill { color, .. } if color == palette::GRASS));
        assert_eq!(
            cmds[1],
            DrawCommand::Fill {
                rect: Rect::new(250.0, 0.0, 300.0, 600.0),
                color: palette::ROAD
            }
        );
        assert!(fills_of(&out, palette::LANE_MARK) > 0);

        let player = cmds
            .iter()
            .position(|c| matches!(c, DrawCommand::Blit { sprite: Sprite::PlayerCar, .. }))
            .unwrap();
        assert_eq!(player, cmds.len() - 1);
        let npcs = cmds
            .iter()
            .filter(|c| matches!(c, DrawCommand::Blit { sprite: Sprite::Npc(_), .. }))
            .count();
        assert_eq!(npcs, 7);
    }

    #[test]
    fn test_lane_marks_cover_the_road_at_any_offset() {
        let mut state = RacerState::new(RacerTuning::default(), 2);
        for offset in [0.0, 8.0, 37.5, 64.0, 100.0] {
            state.road_offset = offset;
            let mut out = list();
            draw_racer(&state, &mut out);
            let lane_x = state.lanes.x(0) - DASH_WIDTH / 2.0;
            let mut tops: Vec<f32> = out
                .commands
                .iter()
                .filter_map(|c| match c {
                    DrawCommand::Fill { rect, color }
                        if *color == palette::LANE_MARK && rect.pos.x == lane_x =>
                    {
                        Some(rect.top())
                    }
                    _ => None,
                })
                .collect();
            tops.sort_by(f32::total_cmp);
            assert!(tops[0] <= 0.0, "gap at top for offset {offset}");
            assert!(*tops.last().unwrap() + DASH_PERIOD >= 600.0);
        }
    }

    #[test]
    fn test_rendering_does_not_mutate_state() {
        let shooter = ShooterState::new(ShooterTuning::default(), 9);
        let racer = RacerState::new(RacerTuning::default(), 9);
        let before = (
            serde_json::to_string(&shooter).unwrap(),
            serde_json::to_string(&racer).unwrap(),
        );

        let mut out = list();
        draw_shooter(&shooter, &mut out);
        draw_racer(&racer, &mut out);

        assert_eq!(
            before,
            (
                serde_json::to_string(&shooter).unwrap(),
                serde_json::to_string(&racer).unwrap()
            )
        );
    }
}
