//! Demo controller
//!
//! Flies the player for the headless driver. Not part of gameplay.

use super::collision::has_cleared;
use super::state::{GameState, Obstacle};

/// Clearance kept above the lower edge of the target gap
const BOTTOM_CLEARANCE: f32 = 20.0;

/// First obstacle the player has not yet cleared
pub fn next_obstacle(state: &GameState) -> Option<&Obstacle> {
    let pipe_width = state.tuning.pipe_width;
    state
        .obstacles
        .iter()
        .find(|o| !has_cleared(&state.player, o, pipe_width))
}

/// Jump when falling and the player's bottom edge sinks near the target floor.
///
/// The target floor is the lower edge of the next gap, or three quarters of the
/// way down the surface when nothing is ahead.
pub fn should_jump(state: &GameState) -> bool {
    if !state.is_running() || state.player.velocity < 0.0 {
        return false;
    }
    let floor = match next_obstacle(state) {
        Some(obstacle) => obstacle.bottom_y,
        None => state.surface.height * 0.75,
    };
    state.player.bottom() > floor - BOTTOM_CLEARANCE
}
