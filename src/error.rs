//! Crate error type
//!
//! Gameplay never fails: collisions are phase transitions. These errors cover
//! configuration and GPU setup only.

use thiserror::Error;

/// Errors raised while loading settings or acquiring the render surface
#[derive(Debug, Error)]
pub enum Error {
    #[error("settings are not valid JSON: {0}")]
    SettingsJson(#[from] serde_json::Error),

    #[error("settings file could not be read: {0}")]
    SettingsIo(#[from] std::io::Error),

    #[error("invalid tuning: {0}")]
    Tuning(String),

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface has no supported texture format")]
    NoSurfaceFormat,

    #[error("host environment unavailable: {0}")]
    Host(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
