//! Loop driver: the run/stop state machine around a [`Game`]
//!
//! The platform schedules frames (requestAnimationFrame in the browser, a plain
//! loop natively) and hands each one back with the [`FrameToken`] it was
//! scheduled with. Tokens from before a restart or a stop are stale and turn
//! the frame into a no-op, so at most one continuation is ever live.

use crate::frame_delta;
use crate::game::Game;
use crate::hud::Hud;
use crate::renderer::Surface;
use crate::sim::{GamePhase, InputSampler};

/// Why the loop is not running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Sprites have not signalled ready yet
    AwaitingAssets,
    /// The run ended; only a restart resumes
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped(StopReason),
    Running,
}

/// Handle for one scheduled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken {
    generation: u64,
}

pub struct LoopDriver<G: Game> {
    game: G,
    state: RunState,
    /// Bumped on restart; tokens carry the value they were issued under
    generation: u64,
    /// Timestamp of the previous frame in the current generation
    last_time: Option<f64>,
    frames: u64,
}

impl<G: Game> LoopDriver<G> {
    pub fn new(game: G) -> Self {
        Self {
            game,
            state: RunState::Stopped(StopReason::AwaitingAssets),
            generation: 0,
            last_time: None,
            frames: 0,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Frames executed since construction
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn hud(&self) -> Hud {
        self.game.hud()
    }

    /// Token for the live generation, if the loop is running
    pub fn current_token(&self) -> Option<FrameToken> {
        self.is_running().then_some(FrameToken {
            generation: self.generation,
        })
    }

    /// The "all sprites ready" signal. Starts the loop the first time only.
    pub fn assets_ready(&mut self) -> Option<FrameToken> {
        if self.state != RunState::Stopped(StopReason::AwaitingAssets) {
            return None;
        }
        log::info!("Assets ready, starting loop");
        self.start()
    }

    /// The asset wait expired: start anyway with whatever has loaded
    pub fn assets_timed_out(&mut self) -> Option<FrameToken> {
        if self.state != RunState::Stopped(StopReason::AwaitingAssets) {
            return None;
        }
        log::warn!("Assets not ready before timeout, starting without them");
        self.start()
    }

    fn start(&mut self) -> Option<FrameToken> {
        self.state = RunState::Running;
        self.last_time = None;
        self.current_token()
    }

    /// Reset the game and invalidate every outstanding token.
    ///
    /// Returns the token for the new generation's first frame, or `None` while
    /// still waiting for assets (the reset game starts once they arrive).
    pub fn restart(&mut self, seed: u64) -> Option<FrameToken> {
        self.game.reset(seed);
        self.generation += 1;
        self.last_time = None;

        match self.state {
            RunState::Stopped(StopReason::AwaitingAssets) => {
                log::info!("Game reset with seed {seed} (waiting for assets)");
                None
            }
            RunState::Stopped(StopReason::GameOver) | RunState::Running => {
                log::info!("Game restarted with seed {seed}");
                self.state = RunState::Running;
                self.current_token()
            }
        }
    }

    /// Run one Update-then-Render pass.
    ///
    /// Returns the token to schedule the next frame with, or `None` when the
    /// loop should not be rescheduled (stale token, stopped, or game over).
    pub fn frame(
        &mut self,
        token: FrameToken,
        now_ms: f64,
        input: &mut InputSampler,
        surface: &mut dyn Surface,
    ) -> Option<FrameToken> {
        if token.generation != self.generation {
            log::trace!(
                "Dropping stale frame (generation {} != {})",
                token.generation,
                self.generation
            );
            return None;
        }
        if self.state != RunState::Running {
            return None;
        }

        let dt_ms = frame_delta(self.last_time, now_ms);
        self.last_time = Some(now_ms);

        let tick_input = input.sample();
        let phase = self.game.update(&tick_input, dt_ms);
        self.game.render(surface);
        self.frames += 1;

        if phase == GamePhase::GameOver {
            log::info!("Loop stopped: game over (score {})", self.game.hud().score);
            self.state = RunState::Stopped(StopReason::GameOver);
            return None;
        }
        Some(token)
    }

    /// Drive the loop without a browser: `frame_ms` apart, up to `max_frames`.
    ///
    /// `script` may press or release actions before each frame. Starts the loop
    /// if it is still waiting for assets. Returns the number of frames run.
    pub fn run_headless<F>(
        &mut self,
        max_frames: u32,
        frame_ms: f64,
        surface: &mut dyn Surface,
        mut script: F,
    ) -> u32
    where
        F: FnMut(u32, &mut InputSampler),
    {
        let mut token = match self.state {
            RunState::Stopped(StopReason::AwaitingAssets) => self.assets_ready(),
            _ => self.current_token(),
        };
        let mut input = InputSampler::new();
        let mut now = 0.0;
        let mut ran = 0;

        while let Some(current) = token {
            if ran >= max_frames {
                break;
            }
            script(ran, &mut input);
            token = self.frame(current, now, &mut input, surface);
            now += frame_ms;
            ran += 1;
        }
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DisplayList;
    use crate::settings::ShooterTuning;
    use crate::sim::{Action, ShooterState, TickInput};

    /// Counts passes and ends after a fixed number of updates
    #[derive(Default)]
    struct Probe {
        updates: u32,
        renders: std::cell::Cell<u32>,
        last_dt: f32,
        lifetime: u32,
        seed: u64,
        fired: u32,
    }

    impl Probe {
        fn lasting(lifetime: u32) -> Self {
            Self {
                lifetime,
                ..Default::default()
            }
        }
    }

    impl Game for Probe {
        fn reset(&mut self, seed: u64) {
            self.updates = 0;
            self.seed = seed;
        }

        fn update(&mut self, input: &TickInput, dt_ms: f32) -> GamePhase {
            self.updates += 1;
            self.last_dt = dt_ms;
            if input.fire_pressed {
                self.fired += 1;
            }
            self.phase()
        }

        fn render(&self, _surface: &mut dyn Surface) {
            self.renders.set(self.renders.get() + 1);
        }

        fn hud(&self) -> Hud {
            Hud::default()
        }

        fn phase(&self) -> GamePhase {
            if self.updates >= self.lifetime {
                GamePhase::GameOver
            } else {
                GamePhase::Playing
            }
        }
    }

    fn surface() -> DisplayList {
        DisplayList::new(800.0, 600.0)
    }

    #[test]
    fn test_no_work_before_assets() {
        let mut driver = LoopDriver::new(Probe::lasting(100));
        assert_eq!(driver.state(), RunState::Stopped(StopReason::AwaitingAssets));
        assert_eq!(driver.current_token(), None);

        // A forged token from generation 0 still does nothing while stopped
        let forged = FrameToken { generation: 0 };
        let mut input = InputSampler::new();
        assert_eq!(driver.frame(forged, 0.0, &mut input, &mut surface()), None);
        assert_eq!(driver.game().updates, 0);
        assert_eq!(driver.game().renders.get(), 0);
    }

    #[test]
    fn test_assets_ready_starts_once() {
        let mut driver = LoopDriver::new(Probe::lasting(100));
        let token = driver.assets_ready();
        assert!(token.is_some());
        assert!(driver.is_running());
        assert_eq!(driver.assets_ready(), None);
        assert_eq!(driver.assets_timed_out(), None);
    }

    #[test]
    fn test_timeout_starts_loop() {
        let mut driver = LoopDriver::new(Probe::lasting(100));
        assert!(driver.assets_timed_out().is_some());
        assert!(driver.is_running());
        // A late ready signal is ignored
        assert_eq!(driver.assets_ready(), None);
    }

    #[test]
    fn test_one_update_and_render_per_frame() {
        let mut driver = LoopDriver::new(Probe::lasting(100));
        let mut input = InputSampler::new();
        let mut out = surface();
        let mut token = driver.assets_ready();

        for i in 0..5 {
            token = driver.frame(token.unwrap(), 1000.0 + i as f64 * 20.0, &mut input, &mut out);
        }
        assert_eq!(driver.game().updates, 5);
        assert_eq!(driver.game().renders.get(), 5);
        assert_eq!(driver.frames(), 5);
        // First frame uses the nominal interval, later ones the wall clock
        assert_eq!(driver.game().last_dt, 20.0);
    }

    #[test]
    fn test_delta_is_clamped_after_a_stall() {
        let mut driver = LoopDriver::new(Probe::lasting(100));
        let mut input = InputSampler::new();
        let mut out = surface();
        let token = driver.assets_ready().unwrap();

        let token = driver.frame(token, 0.0, &mut input, &mut out).unwrap();
        assert_eq!(driver.game().last_dt, crate::consts::FRAME_MS);
        driver.frame(token, 10_000.0, &mut input, &mut out);
        assert_eq!(driver.game().last_dt, crate::consts::MAX_FRAME_MS);
    }

    #[test]
    fn test_game_over_stops_loop() {
        let mut driver = LoopDriver::new(Probe::lasting(3));
        let mut input = InputSampler::new();
        let mut out = surface();
        let token = driver.assets_ready().unwrap();

        let token = driver.frame(token, 0.0, &mut input, &mut out).unwrap();
        let token = driver.frame(token, 16.0, &mut input, &mut out).unwrap();
        assert_eq!(driver.frame(token, 32.0, &mut input, &mut out), None);
        assert_eq!(driver.state(), RunState::Stopped(StopReason::GameOver));

        // The final frame was still rendered, and later frames do nothing
        assert_eq!(driver.game().renders.get(), 3);
        assert_eq!(driver.frame(token, 48.0, &mut input, &mut out), None);
        assert_eq!(driver.game().updates, 3);
    }

    #[test]
    fn test_restart_invalidates_old_tokens() {
        let mut driver = LoopDriver::new(Probe::lasting(100));
        let mut input = InputSampler::new();
        let mut out = surface();
        let old = driver.assets_ready().unwrap();
        driver.frame(old, 0.0, &mut input, &mut out);

        let fresh = driver.restart(42).unwrap();
        assert_ne!(old, fresh);
        assert_eq!(driver.game().seed, 42);

        // The continuation scheduled before the restart must not run
        assert_eq!(driver.frame(old, 16.0, &mut input, &mut out), None);
        assert_eq!(driver.game().updates, 0);

        assert_eq!(driver.frame(fresh, 16.0, &mut input, &mut out), Some(fresh));
        assert_eq!(driver.game().updates, 1);
    }

    #[test]
    fn test_restart_twice_is_restart_once() {
        let mut driver = LoopDriver::new(Probe::lasting(100));
        let mut input = InputSampler::new();
        let mut out = surface();
        let first = driver.assets_ready().unwrap();

        let a = driver.restart(7).unwrap();
        let b = driver.restart(7).unwrap();
        assert_eq!(driver.frame(first, 0.0, &mut input, &mut out), None);
        assert_eq!(driver.frame(a, 0.0, &mut input, &mut out), None);
        assert!(driver.frame(b, 0.0, &mut input, &mut out).is_some());
        assert_eq!(driver.game().updates, 1);
        assert_eq!(driver.game().seed, 7);
        assert!(driver.is_running());
    }

    #[test]
    fn test_restart_after_game_over_resumes() {
        let mut driver = LoopDriver::new(Probe::lasting(1));
        let mut input = InputSampler::new();
        let mut out = surface();
        let token = driver.assets_ready().unwrap();
        assert_eq!(driver.frame(token, 0.0, &mut input, &mut out), None);

        let token = driver.restart(1).unwrap();
        assert!(driver.is_running());
        assert_eq!(driver.frame(token, 0.0, &mut input, &mut out), None);
        assert_eq!(driver.game().updates, 1);
    }

    #[test]
    fn test_restart_before_assets_only_resets() {
        let mut driver = LoopDriver::new(Probe::lasting(100));
        assert_eq!(driver.restart(5), None);
        assert_eq!(driver.game().seed, 5);
        assert_eq!(driver.state(), RunState::Stopped(StopReason::AwaitingAssets));
        assert!(driver.assets_ready().is_some());
    }

    #[test]
    fn test_input_sampled_once_per_frame() {
        let mut driver = LoopDriver::new(Probe::lasting(100));
        let mut input = InputSampler::new();
        let mut out = surface();
        let token = driver.assets_ready().unwrap();

        input.press(Action::Fire);
        let token = driver.frame(token, 0.0, &mut input, &mut out).unwrap();
        // Still held, but the press edge was consumed
        driver.frame(token, 16.0, &mut input, &mut out);
        assert_eq!(driver.game().fired, 1);
    }

    #[test]
    fn test_headless_shooter_runs_until_stopped() {
        let game = ShooterState::new(ShooterTuning::default(), 99);
        let mut driver = LoopDriver::new(game);
        let mut out = surface();

        let ran = driver.run_headless(120, 16.0, &mut out, |frame, input| {
            if frame % 10 == 0 {
                input.press(Action::Fire);
            } else {
                input.release(Action::Fire);
            }
        });
        assert!(ran > 0 && ran <= 120);
        assert_eq!(driver.frames(), u64::from(ran));
        assert!(!driver.game().player_shots.is_empty() || driver.game().score > 0);
    }

    #[test]
    fn test_headless_respects_game_over() {
        let mut driver = LoopDriver::new(Probe::lasting(4));
        let ran = driver.run_headless(100, 16.0, &mut surface(), |_, _| {});
        assert_eq!(ran, 4);
        assert_eq!(driver.state(), RunState::Stopped(StopReason::GameOver));
        assert_eq!(driver.run_headless(100, 16.0, &mut surface(), |_, _| {}), 0);
    }
}
