//! Game state and core simulation types
//!
//! The whole session lives in one context struct ([`GameState`]) that every
//! per-tick pass takes by `&mut`. There is no global mutable state; the
//! single-writer-per-tick discipline is enforced by the borrow checker.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::tuning::Tuning;

use super::pool::{BulletPool, Owner};

/// Enemy behavior selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackMode {
    /// Scripted descending zig-zag between the side walls
    Patrol,
    /// Eased chase toward the player's current position
    FreeRoam,
}

/// One enemy ship. `active == false` marks it removal-pending; the enemy pass
/// compacts the list before running any logic.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub active: bool,
    pub mode: AttackMode,
    /// Wall hits so far; parity picks the patrol sweep direction
    pub sweep: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Countdown to the next shot, in milliseconds
    pub fire_timer: f32,
    pub scale: f32,
}

impl Enemy {
    /// Spawn at the top edge with a randomized horizontal start position.
    pub fn spawn(rng: &mut Pcg32, tuning: &Tuning) -> Self {
        let half = SHIP_SIZE / 2.0;
        let x = rng.random_range(half..=(WORLD_WIDTH - half));
        let mode = if rng.random_range(0.0..1.0) < tuning.free_roam_chance {
            AttackMode::FreeRoam
        } else {
            AttackMode::Patrol
        };
        Self {
            active: true,
            mode,
            sweep: 0,
            pos: Vec2::new(x, -half),
            vel: Vec2::new(0.0, tuning.enemy_max_vy),
            fire_timer: tuning.enemy_fire_rate,
            scale: 1.0,
        }
    }

    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        Vec2::splat(SHIP_SIZE / 2.0 * self.scale)
    }

    /// Patrol sweep direction from the parity of wall hits
    #[inline]
    pub fn sweep_dir(&self) -> f32 {
        if self.sweep % 2 == 0 { 1.0 } else { -1.0 }
    }
}

/// The player's ship. Never removed; the session is bounded by lives instead.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Countdown to the next allowed shot, in milliseconds
    pub fire_timer: f32,
    pub scale: f32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT - PLAYER_SPAWN_MARGIN),
            vel: Vec2::ZERO,
            fire_timer: 0.0,
            scale: 1.0,
        }
    }

    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        Vec2::splat(SHIP_SIZE / 2.0 * self.scale)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Time-driven enemy generator with a monotonically shrinking inter-arrival
/// interval.
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    pub accumulated: f32,
    pub interval: f32,
    step: f32,
}

impl SpawnScheduler {
    pub fn new(interval: f32, step: f32) -> Self {
        Self {
            accumulated: 0.0,
            interval,
            step,
        }
    }

    /// Accumulate elapsed time and report whether one enemy is due. The
    /// interval shrinks first and the *new* interval is what leaves the
    /// accumulator, which compounds the ramp; that order is kept as observed.
    /// Never fires more than once per tick, with no catch-up batching.
    pub fn tick(&mut self, elapsed: f32) -> bool {
        self.accumulated += elapsed;
        if self.accumulated > self.interval {
            self.interval -= self.step;
            self.accumulated -= self.interval;
            true
        } else {
            false
        }
    }
}

/// Noteworthy state changes of one tick, for the driver to log or sonify.
/// Cleared at the start of every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A player bullet destroyed an enemy (scores a point)
    EnemyKilled { pos: Vec2 },
    /// An enemy escaped past the bottom edge (costs a life)
    EnemyLeaked,
    /// An enemy bullet struck the player (costs a life)
    PlayerHit,
    /// An enemy collided with the player; both pay (enemy dies, a life goes)
    EnemyRammed,
    GameOver,
    Restarted,
}

/// Complete session state
#[derive(Debug)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,

    pub score: u32,
    pub lives: i32,
    pub paused: bool,

    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_bullets: BulletPool,
    pub enemy_bullets: BulletPool,
    pub scheduler: SpawnScheduler,

    /// Events emitted by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let scheduler = SpawnScheduler::new(tuning.spawn_interval_start, tuning.spawn_interval_step);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            score: 0,
            lives: START_LIVES,
            paused: false,
            player: Player::new(),
            enemies: Vec::new(),
            player_bullets: BulletPool::new(Owner::Player, PLAYER_BULLET_CAPACITY),
            enemy_bullets: BulletPool::new(Owner::Enemy, ENEMY_BULLET_CAPACITY),
            scheduler,
            events: Vec::new(),
        }
    }

    /// Game over is a normal terminal state, recoverable only via restart
    #[inline]
    pub fn game_over(&self) -> bool {
        self.lives < 0
    }

    /// Full session reset: score, lives, pause flag, enemy list, scheduler
    /// ramp, player kinematics, and both bullet pools. The RNG stream is
    /// deliberately not rewound, so back-to-back sessions differ.
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.paused = false;
        self.player = Player::new();
        self.enemies.clear();
        self.scheduler =
            SpawnScheduler::new(self.tuning.spawn_interval_start, self.tuning.spawn_interval_step);
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.events.push(GameEvent::Restarted);
    }
}
