//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (owned by the game state)
//! - Single-writer-per-tick: every pass takes the game state by `&mut` and
//!   runs to completion before the next pass
//! - No rendering or platform dependencies; presentation reads the final
//!   state after the tick
//!
//! Time is measured in elapsed milliseconds supplied by the external frame
//! driver, matching the velocity units (world units per millisecond).

pub mod collision;
pub mod pool;
pub mod state;
pub mod tick;

pub use collision::aabb_overlap;
pub use pool::{Bullet, BulletPool, Owner};
pub use state::{AttackMode, Enemy, GameEvent, GameState, Player, SpawnScheduler};
pub use tick::tick;
