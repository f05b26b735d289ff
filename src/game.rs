//! Run lifecycle
//!
//! `Game` owns the state and drives Idle → Running → Terminal → Running. It
//! talks to the outside world through two collaborators: a `View` for the
//! score text and prompt screens, and a `FrameClock` that schedules ticks.

use crate::renderer::{Canvas, scene};
use crate::settings::Tuning;
use crate::sim::{GameEvent, GameState, RunPhase, Surface, step};

/// Schedules the next frame tick
pub trait FrameClock {
    /// Ask for `Game::frame` to be called once more
    fn request_tick(&mut self);
}

/// Score text and prompt screens
pub trait View {
    fn show_score(&mut self, score: u32);
    fn show_final_score(&mut self, score: u32);
    fn set_start_visible(&mut self, visible: bool);
    fn set_game_over_visible(&mut self, visible: bool);
}

/// Game instance holding all state
pub struct Game<V: View, C: FrameClock> {
    state: GameState,
    view: V,
    clock: C,
    /// A tick has been requested and not yet delivered
    tick_pending: bool,
}

impl<V: View, C: FrameClock> Game<V, C> {
    /// Create an idle game with the start prompt showing
    pub fn new(surface: Surface, tuning: Tuning, seed: u64, mut view: V, clock: C) -> Self {
        view.set_game_over_visible(false);
        view.set_start_visible(true);
        Self {
            state: GameState::new(surface, tuning, seed),
            view,
            clock,
            tick_pending: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Begin a run from any phase
    pub fn start(&mut self, now_ms: f64) {
        let previous = self.state.phase;
        self.state.reset(now_ms);

        self.view.show_score(0);
        self.view.set_start_visible(false);
        self.view.set_game_over_visible(false);

        log::info!("Run started (from {:?}, seed {})", previous, self.state.seed);
        self.schedule();
    }

    /// Same as `start`; wired to the game-over screen
    pub fn restart(&mut self, now_ms: f64) {
        self.start(now_ms);
    }

    /// Apply the jump impulse. Ignored unless running.
    pub fn jump(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }
        let impulse = self.state.tuning.jump_impulse;
        self.state.player.jump(impulse);
        true
    }

    /// Frame callback: one step, one draw, then reschedule while running
    pub fn frame(&mut self, now_ms: f64, canvas: &mut impl Canvas) {
        self.tick_pending = false;
        if !self.state.is_running() {
            return;
        }

        let events = step(&mut self.state, now_ms);
        let mut ended = None;
        for event in events {
            match event {
                GameEvent::Scored { score } => self.view.show_score(score),
                GameEvent::RunEnded { reason, score } => ended = Some((reason, score)),
                GameEvent::Spawned { .. } | GameEvent::Despawned { .. } => {}
            }
        }

        scene::draw(&self.state, canvas);

        match ended {
            Some((reason, score)) => {
                log::info!("Game over: {:?}, final score {}", reason, score);
                self.view.show_final_score(score);
                self.view.set_game_over_visible(true);
            }
            None => self.schedule(),
        }
    }

    fn schedule(&mut self) {
        if !self.tick_pending {
            self.tick_pending = true;
            self.clock.request_tick();
        }
    }
}
