//! Shooter frame update
//!
//! Order per frame: player, player shots, enemy shots, formation. A wave that
//! is cleared during the frame is replaced before the frame ends.

use super::state::ShooterState;
use crate::sim::collision::{first_overlap, overlaps};
use crate::sim::{GamePhase, TickInput};

/// Advance the shooter by one frame
pub fn tick(state: &mut ShooterState, input: &TickInput, dt_ms: f32) -> GamePhase {
    if state.phase == GamePhase::GameOver {
        return state.phase;
    }

    state.elapsed_ms += f64::from(dt_ms);

    update_player(state, input);
    update_player_shots(state);
    update_enemy_shots(state);
    if state.phase == GamePhase::GameOver {
        return state.phase;
    }
    update_formation(state);

    state.phase
}

fn update_player(state: &mut ShooterState, input: &TickInput) {
    let mut dx = 0.0;
    if input.left {
        dx -= state.player.speed;
    }
    if input.right {
        dx += state.player.speed;
    }
    state.player.shift(dx, state.tuning.width);

    if input.fire_pressed {
        state.fire_player_shot();
    }
}

/// Move player shots upward and resolve them against the formation
fn update_player_shots(state: &mut ShooterState) {
    let mut shots = std::mem::take(&mut state.player_shots);

    shots.retain_mut(|shot| {
        shot.advance();
        if shot.rect.top() < 0.0 {
            return false;
        }
        match first_overlap(&shot.rect, state.enemies.iter().map(|e| &e.rect)) {
            Some(index) => {
                state.hit_enemy(index);
                false
            }
            None => true,
        }
    });

    state.player_shots = shots;
}

/// Move enemy shots downward; the first one to reach the player ends the run
fn update_enemy_shots(state: &mut ShooterState) {
    let height = state.tuning.height;
    let player = state.player.rect;
    let mut player_hit = false;

    state.enemy_shots.retain_mut(|shot| {
        if player_hit {
            return true;
        }
        shot.advance();
        if shot.rect.top() > height {
            return false;
        }
        if overlaps(&shot.rect, &player) {
            player_hit = true;
            return false;
        }
        true
    });

    if player_hit {
        state.game_over();
    }
}

/// Lockstep formation motion, enemy fire, body collisions, and wave refill
fn update_formation(state: &mut ShooterState) {
    let width = state.tuning.width;
    let step = state.formation.speed * state.formation.direction;
    let now = state.elapsed_ms;
    let player = state.player.rect;

    let mut bounce = false;
    let mut shooters = Vec::new();
    let mut rammed = false;

    for (i, enemy) in state.enemies.iter_mut().enumerate() {
        let next_x = enemy.rect.pos.x + step;
        if next_x <= 0.0 || next_x + enemy.rect.size.x >= width {
            bounce = true;
            // Pin to the wall instead of crossing it
            enemy.rect.pos.x = if next_x <= 0.0 {
                0.0
            } else {
                width - enemy.rect.size.x
            };
        } else {
            enemy.rect.pos.x = next_x;
        }

        if enemy.ready_to_fire(now) {
            enemy.last_shot_ms = now;
            shooters.push(i);
        }

        if overlaps(&enemy.rect, &player) {
            rammed = true;
        }
    }

    for i in shooters {
        state.fire_enemy_shot(i);
    }

    if rammed {
        state.game_over();
        return;
    }

    if bounce {
        let drop = state.tuning.row_step();
        state.formation.direction = -state.formation.direction;
        for enemy in &mut state.enemies {
            enemy.rect.pos.y += drop;
        }
    }

    if state.enemies.is_empty() {
        state.formation.wave += 1;
        state.formation.speed += state.tuning.speed_ramp;
        state.spawn_formation();
        log::info!(
            "Wave {} incoming at formation speed {:.1}",
            state.formation.wave + 1,
            state.formation.speed
        );
    }
}
