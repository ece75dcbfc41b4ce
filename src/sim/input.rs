//! Input sampling
//!
//! Key events arrive asynchronously from the platform. The sampler keeps the
//! held state per action plus a press latch, and hands one `TickInput` to the
//! update engine per frame. Latches are consumed by `sample`, so a tap that
//! starts and ends between two frames still registers exactly once, and
//! auto-repeat keydowns while held never re-arm the latch.

use serde::{Deserialize, Serialize};

/// Named actions the games understand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    /// Shooter: fire. Racer: activate the booster.
    Fire,
}

impl Action {
    const ALL: [Action; 3] = [Action::MoveLeft, Action::MoveRight, Action::Fire];

    fn index(self) -> usize {
        match self {
            Action::MoveLeft => 0,
            Action::MoveRight => 1,
            Action::Fire => 2,
        }
    }

    /// Map a DOM `KeyboardEvent.key` value to an action
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "a" | "A" | "ArrowLeft" => Some(Action::MoveLeft),
            "d" | "D" | "ArrowRight" => Some(Action::MoveRight),
            " " | "Spacebar" => Some(Action::Fire),
            _ => None,
        }
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held state (level)
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Pressed since the previous frame (edge)
    pub left_pressed: bool,
    pub right_pressed: bool,
    pub fire_pressed: bool,
}

impl TickInput {
    /// Held left for one frame, including the press edge
    pub fn tap_left() -> Self {
        Self {
            left: true,
            left_pressed: true,
            ..Default::default()
        }
    }

    pub fn tap_right() -> Self {
        Self {
            right: true,
            right_pressed: true,
            ..Default::default()
        }
    }

    pub fn tap_fire() -> Self {
        Self {
            fire: true,
            fire_pressed: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ActionState {
    held: bool,
    pressed: bool,
}

/// Current pressed/released state, consumed once per frame
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    states: [ActionState; 3],
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down. Repeats while already held are ignored.
    pub fn press(&mut self, action: Action) {
        let state = &mut self.states[action.index()];
        if !state.held {
            state.pressed = true;
        }
        state.held = true;
    }

    /// Record a key going up
    pub fn release(&mut self, action: Action) {
        self.states[action.index()].held = false;
    }

    /// Produce this frame's input and clear the press latches
    pub fn sample(&mut self) -> TickInput {
        let input = TickInput {
            left: self.states[0].held,
            right: self.states[1].held,
            fire: self.states[2].held,
            left_pressed: self.states[0].pressed,
            right_pressed: self.states[1].pressed,
            fire_pressed: self.states[2].pressed,
        };
        for action in Action::ALL {
            self.states[action.index()].pressed = false;
        }
        input
    }

    /// Drop everything (restart, focus loss)
    pub fn clear(&mut self) {
        self.states = Default::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_edge_once() {
        let mut sampler = InputSampler::new();
        sampler.press(Action::MoveLeft);

        let first = sampler.sample();
        assert!(first.left);
        assert!(first.left_pressed);

        // Still held, but the edge has been consumed
        let second = sampler.sample();
        assert!(second.left);
        assert!(!second.left_pressed);
    }

    #[test]
    fn test_repeat_keydown_does_not_rearm() {
        let mut sampler = InputSampler::new();
        sampler.press(Action::MoveRight);
        sampler.sample();

        // Browser auto-repeat
        sampler.press(Action::MoveRight);
        sampler.press(Action::MoveRight);
        assert!(!sampler.sample().right_pressed);

        sampler.release(Action::MoveRight);
        sampler.press(Action::MoveRight);
        assert!(sampler.sample().right_pressed);
    }

    #[test]
    fn test_tap_between_frames_registers() {
        let mut sampler = InputSampler::new();
        sampler.press(Action::Fire);
        sampler.release(Action::Fire);

        let input = sampler.sample();
        assert!(!input.fire);
        assert!(input.fire_pressed);
        assert!(!sampler.sample().fire_pressed);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Action::from_key("a"), Some(Action::MoveLeft));
        assert_eq!(Action::from_key("D"), Some(Action::MoveRight));
        assert_eq!(Action::from_key(" "), Some(Action::Fire));
        assert_eq!(Action::from_key("q"), None);
    }

    #[test]
    fn test_clear() {
        let mut sampler = InputSampler::new();
        sampler.press(Action::Fire);
        sampler.clear();
        assert_eq!(sampler.sample(), TickInput::default());
    }
}
