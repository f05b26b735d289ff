//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One step per frame, no wall-clock reads
//! - Seeded RNG only
//! - Obstacles iterated in creation order

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{has_cleared, hits_boundary, hits_obstacle, is_offscreen};
pub use state::{EndReason, GameEvent, GameState, Obstacle, Player, RunPhase, Surface};
pub use tick::step;
