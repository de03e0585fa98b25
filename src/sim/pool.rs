//! Fixed-capacity bullet pools
//!
//! Each faction owns one pool, allocated once at startup. Spawning scans for
//! the first inactive slot and reinitializes it in place; a full pool drops
//! the shot silently. That backpressure bounds the bullets in flight without
//! any allocation after startup.

use glam::Vec2;

use crate::consts::{BULLET_SIZE, BULLET_SPEED, WORLD_HEIGHT, WORLD_WIDTH};

/// Faction tag, fixed at pool construction. Determines travel direction and
/// which side the bullets can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player,
    Enemy,
}

impl Owner {
    /// Muzzle velocity for this faction. Player bullets travel up, enemy
    /// bullets down, at a fixed speed; the shooter's own velocity is not
    /// inherited.
    #[inline]
    pub fn muzzle_velocity(self) -> Vec2 {
        match self {
            Owner::Player => Vec2::new(0.0, -BULLET_SPEED),
            Owner::Enemy => Vec2::new(0.0, BULLET_SPEED),
        }
    }
}

/// One pooled projectile slot. Inert slots (`active == false`) carry stale
/// state and are skipped by physics, collision and rendering.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub active: bool,
    pub pos: Vec2,
    pub vel: Vec2,
    pub scale: f32,
}

impl Bullet {
    fn inert() -> Self {
        Self {
            active: false,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            scale: 0.0,
        }
    }

    /// Half extent of the collision box (scaled)
    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        Vec2::splat(BULLET_SIZE / 2.0 * self.scale)
    }
}

/// Fixed-capacity pool of bullets for one owner
#[derive(Debug)]
pub struct BulletPool {
    owner: Owner,
    slots: Vec<Bullet>,
}

impl BulletPool {
    /// Allocate every slot up front; no growth afterwards.
    pub fn new(owner: Owner, capacity: usize) -> Self {
        Self {
            owner,
            slots: vec![Bullet::inert(); capacity],
        }
    }

    #[inline]
    pub fn owner(&self) -> Owner {
        self.owner
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn slots(&self) -> &[Bullet] {
        &self.slots
    }

    #[inline]
    pub fn slots_mut(&mut self) -> &mut [Bullet] {
        &mut self.slots
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Bullet> {
        self.slots.iter().filter(|b| b.active)
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    /// Fire a bullet from the first free slot. Returns `false` when the pool
    /// is exhausted; the shot is dropped and the caller keeps its cooldown.
    pub fn spawn(&mut self, pos: Vec2, scale: f32) -> bool {
        let vel = self.owner.muzzle_velocity();
        for slot in &mut self.slots {
            if !slot.active {
                *slot = Bullet {
                    active: true,
                    pos,
                    vel,
                    scale,
                };
                return true;
            }
        }
        false
    }

    /// Integrate active bullets and cull any that leave the world rectangle
    /// expanded by one bullet extent.
    pub fn step(&mut self, elapsed: f32) {
        for bullet in &mut self.slots {
            if !bullet.active {
                continue;
            }
            bullet.pos += bullet.vel * elapsed;

            let margin = Vec2::splat(BULLET_SIZE);
            if bullet.pos.x < -margin.x
                || bullet.pos.x > WORLD_WIDTH + margin.x
                || bullet.pos.y < -margin.y
                || bullet.pos.y > WORLD_HEIGHT + margin.y
            {
                bullet.active = false;
            }
        }
    }

    /// Deactivate every slot (restart teardown)
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
    }
}
