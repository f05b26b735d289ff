//! Frame composition
//!
//! Turns a `GameState` into canvas fills. Reads state, never writes it.

use super::canvas::Canvas;
use super::shapes::Rect;
use super::vertex::colors;
use crate::sim::GameState;

/// Redraw the whole surface: background, player, then both barriers of every
/// obstacle.
pub fn draw(state: &GameState, canvas: &mut impl Canvas) {
    canvas.clear(colors::BACKGROUND);

    let player = &state.player;
    canvas.fill_rect(
        Rect {
            min: player.pos,
            size: player.size,
        },
        colors::PLAYER,
    );

    let width = state.tuning.pipe_width;
    let height = state.surface.height;
    for obstacle in &state.obstacles {
        // Upper barrier: surface top down to the gap
        canvas.fill_rect(
            Rect::new(obstacle.x, 0.0, width, obstacle.top_height),
            colors::OBSTACLE,
        );
        // Lower barrier: gap bottom down to the surface bottom
        canvas.fill_rect(
            Rect::new(obstacle.x, obstacle.bottom_y, width, height - obstacle.bottom_y),
            colors::OBSTACLE,
        );
    }
}
