//! Gap Glider - A one-button arcade game
//!
//! Core modules:
//! - `sim`: Simulation (physics, spawning, collisions, game state)
//! - `game`: Run lifecycle (start, jump, frame, game over)
//! - `renderer`: Canvas abstraction and WebGPU rendering pipeline
//! - `platform`: Frame clocks for browser and headless drivers
//! - `settings`: Data-driven game tuning

pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use game::{FrameClock, Game, View};
pub use settings::{Settings, Tuning};

/// Game configuration constants
pub mod consts {
    /// Downward acceleration added to the player's velocity every tick
    pub const GRAVITY: f32 = 0.5;
    /// Velocity set by a jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -10.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;

    /// Obstacle defaults
    pub const PIPE_WIDTH: f32 = 60.0;
    pub const GAP_SIZE: f32 = 150.0;
    pub const PIPE_SPEED: f32 = 2.0;
    /// Minimum height of each barrier segment
    pub const MIN_MARGIN: f32 = 50.0;
    /// Milliseconds between obstacle spawns
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;

    /// Surface used when the host does not report one
    pub const DEFAULT_SURFACE_WIDTH: f32 = 400.0;
    pub const DEFAULT_SURFACE_HEIGHT: f32 = 600.0;

    /// Headless driver frame period (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
