//! Collision and pass tests
//!
//! Everything is axis-aligned: the player is a box, each obstacle is a
//! vertical band with an open gap.

use super::state::{Obstacle, Player};

/// Player's top edge above the surface or bottom edge below it
pub fn hits_boundary(player: &Player, surface_height: f32) -> bool {
    player.top() < 0.0 || player.bottom() > surface_height
}

/// Player and obstacle band overlap horizontally
#[inline]
pub fn overlaps_horizontally(player: &Player, obstacle: &Obstacle, pipe_width: f32) -> bool {
    player.right() > obstacle.x && player.left() < obstacle.right(pipe_width)
}

/// Player is not fully inside the gap `[top_height, bottom_y]`
#[inline]
pub fn outside_gap(player: &Player, obstacle: &Obstacle) -> bool {
    player.top() < obstacle.top_height || player.bottom() > obstacle.bottom_y
}

/// Player touches one of the obstacle's barriers
pub fn hits_obstacle(player: &Player, obstacle: &Obstacle, pipe_width: f32) -> bool {
    overlaps_horizontally(player, obstacle, pipe_width) && outside_gap(player, obstacle)
}

/// Player's left edge is past the obstacle's right edge
#[inline]
pub fn has_cleared(player: &Player, obstacle: &Obstacle, pipe_width: f32) -> bool {
    player.left() > obstacle.right(pipe_width)
}

/// Obstacle is entirely left of the surface
#[inline]
pub fn is_offscreen(obstacle: &Obstacle, pipe_width: f32) -> bool {
    obstacle.right(pipe_width) < 0.0
}
