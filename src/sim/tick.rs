//! Simulation step
//!
//! Advances a running game by exactly one frame.

use super::collision::{has_cleared, hits_boundary, hits_obstacle, is_offscreen};
use super::state::{EndReason, GameEvent, GameState};

/// Advance the game state by one frame.
///
/// `now_ms` is an absolute clock reading used only for spawn timing. Returns
/// the events produced; a step on a game that is not running does nothing.
pub fn step(state: &mut GameState, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_running() {
        return events;
    }

    state.time_ticks += 1;

    state.player.integrate(state.tuning.gravity);

    if hits_boundary(&state.player, state.surface.height) {
        end_run(state, EndReason::Boundary, &mut events);
        return events;
    }

    if now_ms - state.last_spawn_ms > state.tuning.spawn_interval_ms {
        let id = state.spawn_obstacle();
        state.last_spawn_ms = now_ms;
        log::debug!("Spawned obstacle {} at t={:.0}ms", id, now_ms);
        events.push(GameEvent::Spawned { id });
    }

    let pipe_width = state.tuning.pipe_width;
    let pipe_speed = state.tuning.pipe_speed;
    let mut pending = std::mem::take(&mut state.obstacles).into_iter();
    let mut retained = Vec::with_capacity(pending.len());

    while let Some(mut obstacle) = pending.next() {
        obstacle.x -= pipe_speed;

        if hits_obstacle(&state.player, &obstacle, pipe_width) {
            // Frozen from here on: keep this obstacle and the unvisited rest
            retained.push(obstacle);
            retained.extend(pending);
            state.obstacles = retained;
            end_run(state, EndReason::Obstacle, &mut events);
            return events;
        }

        if !obstacle.passed && has_cleared(&state.player, &obstacle, pipe_width) {
            obstacle.passed = true;
            state.score = state.score.saturating_add(1);
            events.push(GameEvent::Scored { score: state.score });
        }

        if is_offscreen(&obstacle, pipe_width) {
            log::debug!("Despawned obstacle {}", obstacle.id);
            events.push(GameEvent::Despawned { id: obstacle.id });
        } else {
            retained.push(obstacle);
        }
    }

    state.obstacles = retained;
    events
}

fn end_run(state: &mut GameState, reason: EndReason, events: &mut Vec<GameEvent>) {
    state.terminate(reason);
    log::info!("Run ended ({:?}) with score {}", reason, state.score);
    events.push(GameEvent::RunEnded {
        reason,
        score: state.score,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::state::{RunPhase, Surface};
    use proptest::prelude::*;
    use std::collections::HashSet;

    const INTERVAL: f64 = crate::consts::SPAWN_INTERVAL_MS;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(Surface::new(400.0, 500.0), Tuning::default(), seed);
        state.reset(0.0);
        state
    }

    #[test]
    fn test_idle_step_is_noop() {
        let mut state = GameState::new(Surface::new(400.0, 500.0), Tuning::default(), 1);
        let before = state.player.clone();
        assert!(step(&mut state, 10_000.0).is_empty());
        assert_eq!(state.player, before);
        assert_eq!(state.phase, RunPhase::Idle);
    }

    #[test]
    fn test_floor_ends_run_and_freezes() {
        let mut state = running(1);
        state.push_obstacle(300.0, 100.0);
        state.player.pos.y = 470.0;

        let events = step(&mut state, 1.0);
        assert_eq!(state.phase, RunPhase::Terminal);
        assert_eq!(state.end_reason, Some(EndReason::Boundary));
        assert_eq!(
            events,
            vec![GameEvent::RunEnded {
                reason: EndReason::Boundary,
                score: 0
            }]
        );
        // Obstacles were not advanced on the terminating step
        assert_eq!(state.obstacles[0].x, 300.0);

        let frozen_player = state.player.clone();
        let frozen_obstacles = state.obstacles.clone();
        assert!(step(&mut state, 100_000.0).is_empty());
        assert_eq!(state.player, frozen_player);
        assert_eq!(state.obstacles, frozen_obstacles);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_ceiling_ends_run() {
        let mut state = running(1);
        state.player.pos.y = 5.0;
        state.player.velocity = -10.0;
        step(&mut state, 1.0);
        assert_eq!(state.end_reason, Some(EndReason::Boundary));
    }

    #[test]
    fn test_obstacle_collision_ends_run() {
        let mut state = running(1);
        state.player.pos.y = 40.0;
        state.player.velocity = -0.5;
        state.push_obstacle(92.0, 50.0);
        state.push_obstacle(350.0, 50.0);

        let events = step(&mut state, 1.0);
        assert_eq!(state.end_reason, Some(EndReason::Obstacle));
        assert!(matches!(events.last(), Some(GameEvent::RunEnded { .. })));
        // Unvisited obstacles are retained untouched
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.obstacles[1].x, 350.0);
    }

    #[test]
    fn test_gap_keeps_player_alive() {
        let mut state = running(1);
        state.player.pos.y = 100.0;
        state.player.velocity = -0.5;
        state.push_obstacle(92.0, 50.0);

        step(&mut state, 1.0);
        assert!(state.is_running());
        assert_eq!(state.obstacles[0].x, 90.0);
    }

    #[test]
    fn test_pass_scores_once() {
        let mut state = running(1);
        state.push_obstacle(41.0, 50.0);

        let events = step(&mut state, 1.0);
        assert_eq!(state.score, 1);
        assert!(state.obstacles[0].passed);
        assert!(events.contains(&GameEvent::Scored { score: 1 }));

        let events = step(&mut state, 2.0);
        assert_eq!(state.score, 1);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Scored { .. })));
    }

    #[test]
    fn test_offscreen_obstacle_removed() {
        let mut state = running(1);
        let gone = state.push_obstacle(-61.0, 50.0);
        let kept = state.push_obstacle(0.0, 50.0);

        let events = step(&mut state, 1.0);
        assert!(events.contains(&GameEvent::Despawned { id: gone }));
        let ids: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![kept]);
    }

    #[test]
    fn test_spawn_interval() {
        let mut state = running(1);
        let t0 = INTERVAL + 1.0;

        step(&mut state, INTERVAL);
        assert!(state.obstacles.is_empty(), "interval must be exceeded, not met");

        let events = step(&mut state, t0);
        assert_eq!(state.obstacles.len(), 1);
        assert!(matches!(events[0], GameEvent::Spawned { .. }));
        assert_eq!(state.last_spawn_ms, t0);
        assert_eq!(state.obstacles[0].x, 400.0 - 2.0);

        step(&mut state, t0 + INTERVAL - 1.0);
        assert_eq!(state.obstacles.len(), 1);

        step(&mut state, t0 + INTERVAL + 1.0);
        assert_eq!(state.obstacles.len(), 2);
    }

    #[test]
    fn test_time_ticks_count_running_steps() {
        let mut state = running(1);
        for i in 1..=3 {
            step(&mut state, i as f64);
        }
        assert_eq!(state.time_ticks, 3);

        state.player.pos.y = 480.0;
        step(&mut state, 4.0);
        assert_eq!(state.phase, RunPhase::Terminal);
        assert_eq!(state.time_ticks, 4);

        step(&mut state, 5.0);
        assert_eq!(state.time_ticks, 4);

        state.reset(6.0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_obstacles_keep_creation_order() {
        let mut state = running(1);
        state.push_obstacle(200.0, 50.0);
        state.push_obstacle(300.0, 50.0);
        state.push_obstacle(400.0, 50.0);
        step(&mut state, 1.0);
        let xs: Vec<f32> = state.obstacles.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![198.0, 298.0, 398.0]);
    }

    proptest! {
        #[test]
        fn score_and_passed_flags_are_monotonic(
            seed in any::<u64>(),
            jumps in prop::collection::vec(any::<bool>(), 1..600),
        ) {
            let mut state = running(seed);
            let mut passed_ids = HashSet::new();
            let mut last_score = 0;
            let mut now = 0.0;

            for jump in jumps {
                if jump && state.player.velocity > 0.0 {
                    state.player.jump(state.tuning.jump_impulse);
                }
                now += 1000.0 / 60.0;
                let obstacles_before = state.obstacles.len() as u32 + 1;
                let events = step(&mut state, now);

                prop_assert!(state.score >= last_score);
                prop_assert!(state.score - last_score <= obstacles_before);
                last_score = state.score;

                for o in &state.obstacles {
                    if passed_ids.contains(&o.id) {
                        prop_assert!(o.passed);
                    }
                    if o.passed {
                        passed_ids.insert(o.id);
                    }
                    prop_assert!((o.bottom_y - o.top_height - state.tuning.gap_size).abs() < 1e-3);
                }

                if events.iter().any(|e| matches!(e, GameEvent::RunEnded { .. })) {
                    prop_assert_eq!(state.phase, RunPhase::Terminal);
                    break;
                }
            }
        }
    }
}
