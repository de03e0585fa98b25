//! Skyraid - a fixed-screen wave shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bullet pools, spawn scheduler, physics,
//!   collisions, game state)
//! - `input`: Polled action snapshot with edge semantics
//! - `scene`: Presentation handoff (primitive shapes, HUD text, text metrics)
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod scene;
pub mod sim;
pub mod tuning;

pub use input::{Action, ActionLevel, InputState};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical world width (simulation units)
    pub const WORLD_WIDTH: f32 = 800.0;
    /// Logical world height (simulation units)
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Fixed capacity of the player's bullet pool
    pub const PLAYER_BULLET_CAPACITY: usize = 60;
    /// Fixed capacity of the shared enemy bullet pool
    pub const ENEMY_BULLET_CAPACITY: usize = 1000;

    /// Bullet extent (square, scaled by the bullet's `scale`)
    pub const BULLET_SIZE: f32 = 8.0;
    /// Bullet speed in units per millisecond, along the owner's travel axis
    pub const BULLET_SPEED: f32 = 0.5;

    /// Ship extent (square, both player and enemies)
    pub const SHIP_SIZE: f32 = 20.0;

    /// Lives at the start of a session; game over once lives drop below zero
    pub const START_LIVES: i32 = 3;
    /// Player spawn distance above the bottom edge
    pub const PLAYER_SPAWN_MARGIN: f32 = 30.0;
}
