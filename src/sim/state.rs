//! Game state and core simulation types
//!
//! `GameState` is the single owner of everything a run mutates. The lifecycle
//! controller, the step function and the renderer all borrow it explicitly.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Nothing running yet, start prompt visible
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, waiting for restart
    Terminal,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Player left the surface through the top or bottom edge
    Boundary,
    /// Player touched a barrier
    Obstacle,
}

/// Things that happened during a single step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Spawned { id: u32 },
    Scored { score: u32 },
    Despawned { id: u32 },
    RunEnded { reason: EndReason, score: u32 },
}

/// Logical drawing surface, fixed for the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Surface {
    fn default() -> Self {
        use crate::consts::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};
        Self::new(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT)
    }
}

/// The player-controlled box
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner; x never changes during a run
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive is down)
    pub velocity: f32,
}

impl Player {
    /// Player at its canonical start position
    pub fn new(surface: Surface, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, surface.height / 2.0),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            velocity: 0.0,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Semi-implicit Euler: velocity first, then position
    pub fn integrate(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.pos.y += self.velocity;
    }

    /// Replace (not add to) the current velocity
    pub fn jump(&mut self, impulse: f32) {
        self.velocity = impulse;
    }
}

/// A pair of barriers with a vertical gap between them
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Bottom edge of the upper barrier
    pub top_height: f32,
    /// Top edge of the lower barrier
    pub bottom_y: f32,
    /// Score already awarded for this obstacle
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn right(&self, width: f32) -> f32 {
        self.x + width
    }
}

/// Pick the upper barrier height for a new obstacle.
///
/// Uniform over the range that leaves at least `min_margin` of barrier above
/// and below the gap. Tunings are checked with `Tuning::validate_for` before a
/// session, so the range is never negative; the clamp only guards against
/// float noise.
pub fn sample_gap_top(rng: &mut impl Rng, surface_height: f32, tuning: &Tuning) -> f32 {
    let span = (surface_height - tuning.gap_size - 2.0 * tuning.min_margin).max(0.0);
    rng.random::<f32>() * span + tuning.min_margin
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub surface: Surface,
    pub tuning: Tuning,
    pub phase: RunPhase,
    pub player: Player,
    /// Active obstacles in creation order
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// Timestamp of the last spawn (or of the run start)
    pub last_spawn_ms: f64,
    /// Set when the run enters `Terminal`
    pub end_reason: Option<EndReason>,
    /// Steps taken this run
    pub time_ticks: u64,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle game state
    pub fn new(surface: Surface, tuning: Tuning, seed: u64) -> Self {
        Self {
            seed,
            surface,
            tuning,
            phase: RunPhase::Idle,
            player: Player::new(surface, &tuning),
            obstacles: Vec::new(),
            score: 0,
            last_spawn_ms: 0.0,
            end_reason: None,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Start a fresh run. Safe from any phase.
    pub fn reset(&mut self, now_ms: f64) {
        self.player = Player::new(self.surface, &self.tuning);
        self.obstacles.clear();
        self.score = 0;
        self.phase = RunPhase::Running;
        self.end_reason = None;
        self.last_spawn_ms = now_ms;
        self.time_ticks = 0;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append an obstacle at the right edge with a random gap
    pub fn spawn_obstacle(&mut self) -> u32 {
        let top_height = sample_gap_top(&mut self.rng, self.surface.height, &self.tuning);
        self.push_obstacle(self.surface.width, top_height)
    }

    /// Append an obstacle with a given gap top; the gap size comes from tuning
    pub fn push_obstacle(&mut self, x: f32, top_height: f32) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            x,
            top_height,
            bottom_y: top_height + self.tuning.gap_size,
            passed: false,
        });
        id
    }

    /// End the run
    pub fn terminate(&mut self, reason: EndReason) {
        self.phase = RunPhase::Terminal;
        self.end_reason = Some(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state() -> GameState {
        GameState::new(Surface::new(400.0, 500.0), Tuning::default(), 42)
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = state();
        assert_eq!(state.phase, RunPhase::Idle);
        assert!(!state.is_running());
        assert_eq!(state.player.pos, Vec2::new(100.0, 250.0));
        assert_eq!(state.player.velocity, 0.0);
    }

    #[test]
    fn test_integrate_is_semi_implicit() {
        let mut player = Player::new(Surface::new(400.0, 500.0), &Tuning::default());
        player.integrate(0.5);
        assert_eq!(player.velocity, 0.5);
        assert_eq!(player.pos.y, 250.5);
        player.integrate(0.5);
        assert_eq!(player.velocity, 1.0);
        assert_eq!(player.pos.y, 251.5);
    }

    #[test]
    fn test_jump_overrides_velocity() {
        let mut player = Player::new(Surface::new(400.0, 500.0), &Tuning::default());
        player.velocity = 7.5;
        player.jump(-10.0);
        assert_eq!(player.velocity, -10.0);
    }

    #[test]
    fn test_push_obstacle_applies_gap() {
        let mut state = state();
        state.push_obstacle(300.0, 50.0);
        let obstacle = &state.obstacles[0];
        assert_eq!(obstacle.bottom_y, 200.0);
        assert!(!obstacle.passed);
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = state();
        let a = state.spawn_obstacle();
        let b = state.spawn_obstacle();
        assert!(b > a);
    }

    #[test]
    fn test_short_surface_clamps_gap() {
        let mut rng = Pcg32::seed_from_u64(1);
        let top = sample_gap_top(&mut rng, 100.0, &Tuning::default());
        assert_eq!(top, Tuning::default().min_margin);
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let mut a = state();
        let mut b = state();
        for _ in 0..8 {
            a.spawn_obstacle();
            b.spawn_obstacle();
        }
        assert_eq!(a.obstacles, b.obstacles);
    }

    proptest! {
        #[test]
        fn spawned_gaps_respect_margins(seed in any::<u64>(), height in 250.0f32..2000.0) {
            let tuning = Tuning::default();
            let mut state = GameState::new(Surface::new(400.0, height), tuning, seed);
            for _ in 0..16 {
                state.spawn_obstacle();
            }
            for o in &state.obstacles {
                prop_assert!((o.bottom_y - o.top_height - tuning.gap_size).abs() < 1e-3);
                prop_assert!(o.top_height >= tuning.min_margin);
                prop_assert!(o.bottom_y <= height - tuning.min_margin + 1e-3);
                prop_assert_eq!(o.x, 400.0);
            }
        }

        #[test]
        fn reset_is_total(
            seed in any::<u64>(),
            y in -500.0f32..1500.0,
            velocity in -50.0f32..50.0,
            score in any::<u32>(),
            obstacles in 0usize..10,
            terminal in any::<bool>(),
            now in 0.0f64..1e9,
        ) {
            let mut state = GameState::new(Surface::new(400.0, 500.0), Tuning::default(), seed);
            state.player.pos.y = y;
            state.player.velocity = velocity;
            state.score = score;
            for _ in 0..obstacles {
                state.spawn_obstacle();
            }
            if terminal {
                state.terminate(EndReason::Obstacle);
            }

            state.reset(now);

            prop_assert_eq!(state.score, 0);
            prop_assert!(state.is_running());
            prop_assert!(state.obstacles.is_empty());
            prop_assert_eq!(state.player.pos, Vec2::new(100.0, 250.0));
            prop_assert_eq!(state.player.velocity, 0.0);
            prop_assert_eq!(state.end_reason, None);
            prop_assert_eq!(state.last_spawn_ms, now);
        }
    }
}
