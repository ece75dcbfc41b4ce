//! Racer frame update
//!
//! Order per frame: booster timers, booster request, lane change, road scroll
//! and distance, traffic motion and relocation, then collisions.

use super::state::RacerState;
use crate::sim::collision::overlaps;
use crate::sim::{GamePhase, TickInput};

/// Advance the racer by one frame
pub fn tick(state: &mut RacerState, input: &TickInput, dt_ms: f32) -> GamePhase {
    if state.phase == GamePhase::GameOver {
        return state.phase;
    }

    state.elapsed_ms += f64::from(dt_ms);

    update_player(state, input, dt_ms);
    update_road(state, dt_ms);
    update_traffic(state);
    resolve_collisions(state);

    state.phase
}

fn update_player(state: &mut RacerState, input: &TickInput, dt_ms: f32) {
    state.booster.advance(dt_ms, &mut state.player.speed);
    if input.fire {
        state.booster.try_activate(&mut state.player.speed);
    }

    // Edge-triggered: one lane per press, holding does nothing more
    let x = state.player.center.x;
    if input.left_pressed {
        state.player.center.x = state.lanes.step(x, -1);
    } else if input.right_pressed {
        state.player.center.x = state.lanes.step(x, 1);
    } else {
        state.player.center.x = state.lanes.snap(x);
    }
}

fn update_road(state: &mut RacerState, dt_ms: f32) {
    let speed = state.player.speed;
    if speed > 0.0 {
        state.road_offset += speed;
        if state.road_offset > state.tuning.scroll_wrap {
            state.road_offset = 0.0;
        }
    }
    state.distance += f64::from(speed) * f64::from(dt_ms) / 1000.0 / 2.0;
}

/// Scroll vehicles relative to the player and recycle the ones that fell off
fn update_traffic(state: &mut RacerState) {
    let limit = state.tuning.height + state.tuning.despawn_margin;
    let speed = state.player.speed;

    for i in 0..state.vehicles.len() {
        let vehicle = &mut state.vehicles[i];
        vehicle.center.y += speed + vehicle.speed_offset;
        if vehicle.center.y > limit {
            state.relocate(i);
        }
    }
}

fn resolve_collisions(state: &mut RacerState) {
    let mut i = 0;
    while i < state.vehicles.len() {
        if !overlaps(&state.player.rect(), &state.vehicles[i].rect()) {
            i += 1;
            continue;
        }

        if state.booster.active {
            // Rammed: the replacement is appended, so index i now holds the next vehicle
            state.bonus += state.tuning.ram_points;
            state.replace(i);
            log::debug!("Boosted ram, bonus now {}", state.bonus);
            continue;
        }

        debug_assert!(state.player.lives > 0, "collision with no lives left");
        state.player.lives = state.player.lives.saturating_sub(1);
        if state.player.lives == 0 {
            state.game_over();
            return;
        }
        // Survived: clear the wreck so it does not drain a life every frame
        state.relocate(i);
        i += 1;
    }
}
