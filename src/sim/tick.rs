//! Per-tick simulation orchestration
//!
//! One tick advances the whole world by `elapsed` milliseconds in a fixed
//! order: scheduler, player bullets, enemy bullets, enemies, player. Each
//! pass runs to completion before the next; presentation reads the final
//! state afterwards.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::input::{Action, InputState};
use crate::tuning::Tuning;

use super::collision::aabb_overlap;
use super::state::{AttackMode, Enemy, GameEvent, GameState};

/// Advance the game state by one tick.
///
/// Restart (confirm, edge-triggered) is honored in every phase, including
/// game over. Once `lives < 0` nothing else runs; the world stays frozen for
/// the end-state overlay until an explicit restart.
pub fn tick(state: &mut GameState, input: &InputState, elapsed: f32) {
    state.events.clear();

    if input.just_pressed(Action::Confirm) {
        state.restart();
        return;
    }
    if state.game_over() {
        return;
    }

    if input.just_pressed(Action::Interact) {
        state.paused = !state.paused;
    }
    if state.paused {
        return;
    }

    if state.scheduler.tick(elapsed) {
        let enemy = Enemy::spawn(&mut state.rng, &state.tuning);
        state.enemies.push(enemy);
    }

    step_player_bullets(state, elapsed);
    step_enemy_bullets(state, elapsed);
    step_enemies(state, elapsed);
    step_player(state, input, elapsed);

    if state.game_over() {
        state.events.push(GameEvent::GameOver);
    }
}

/// Integrate the player's bullets, then resolve them against the enemy list.
/// Each bullet stops at its first overlapping enemy in iteration order.
fn step_player_bullets(state: &mut GameState, elapsed: f32) {
    state.player_bullets.step(elapsed);

    let GameState {
        player_bullets,
        enemies,
        score,
        events,
        ..
    } = state;

    for bullet in player_bullets.slots_mut() {
        if !bullet.active {
            continue;
        }
        for enemy in enemies.iter_mut() {
            if !enemy.active {
                continue;
            }
            if aabb_overlap(enemy.pos, enemy.half_extent(), bullet.pos, bullet.half_extent()) {
                enemy.active = false;
                bullet.active = false;
                *score += 1;
                events.push(GameEvent::EnemyKilled { pos: enemy.pos });
                break;
            }
        }
    }
}

/// Integrate the enemies' bullets, then resolve them against the player.
fn step_enemy_bullets(state: &mut GameState, elapsed: f32) {
    state.enemy_bullets.step(elapsed);

    let GameState {
        enemy_bullets,
        player,
        lives,
        events,
        ..
    } = state;

    for bullet in enemy_bullets.slots_mut() {
        if !bullet.active {
            continue;
        }
        if aabb_overlap(player.pos, player.half_extent(), bullet.pos, bullet.half_extent()) {
            bullet.active = false;
            *lives -= 1;
            events.push(GameEvent::PlayerHit);
        }
    }
}

/// Enemy pass: compact the list, then fire-check and movement per enemy.
fn step_enemies(state: &mut GameState, elapsed: f32) {
    // Compaction happens exactly here, before any enemy logic runs. An enemy
    // marked inactive earlier in this tick or during the previous one never
    // receives another logic pass.
    state.enemies.retain(|e| e.active);

    let GameState {
        enemies,
        enemy_bullets,
        player,
        lives,
        events,
        rng,
        tuning,
        ..
    } = state;

    for enemy in enemies.iter_mut() {
        enemy.fire_timer -= elapsed;
        if enemy.fire_timer <= 0.0 {
            let muzzle = enemy.pos + Vec2::new(0.0, enemy.half_extent().y);
            // A full pool keeps the timer expired; the shot retries next tick
            if enemy_bullets.spawn(muzzle, enemy.scale) {
                let jitter = tuning.enemy_fire_rate_variance / 2.0;
                enemy.fire_timer =
                    tuning.enemy_fire_rate + rng.random_range(-jitter..=jitter);
            }
        }

        match enemy.mode {
            AttackMode::Patrol => {
                enemy.vel *= tuning.enemy_friction.powf(elapsed);
                enemy.vel.x = tuning.enemy_max_vx * enemy.sweep_dir();

                enemy.pos += enemy.vel * elapsed;

                let half = enemy.half_extent();
                if enemy.pos.x < half.x {
                    enemy.pos.x = half.x;
                    wall_bounce(enemy, rng, tuning);
                } else if enemy.pos.x > WORLD_WIDTH - half.x {
                    enemy.pos.x = WORLD_WIDTH - half.x;
                    wall_bounce(enemy, rng, tuning);
                }

                // Vertical bounds are generous by one full ship height: the
                // top reflects, the bottom is the leak-out line.
                if enemy.pos.y < -SHIP_SIZE {
                    enemy.pos.y = -SHIP_SIZE;
                    enemy.vel.y = -enemy.vel.y;
                } else if enemy.pos.y > WORLD_HEIGHT + SHIP_SIZE {
                    enemy.active = false;
                    *lives -= 1;
                    events.push(GameEvent::EnemyLeaked);
                }
            }
            AttackMode::FreeRoam => {
                // Ease toward the player's position on each axis
                let delta = player.pos - enemy.pos;
                let gain = tuning.enemy_acceleration * elapsed;
                if delta.x < 0.0 {
                    enemy.vel.x += (-tuning.enemy_max_vx - enemy.vel.x) * gain;
                } else if delta.x > 0.0 {
                    enemy.vel.x += (tuning.enemy_max_vx - enemy.vel.x) * gain;
                }
                if delta.y < 0.0 {
                    enemy.vel.y += (-tuning.enemy_max_vy - enemy.vel.y) * gain;
                } else if delta.y > 0.0 {
                    enemy.vel.y += (tuning.enemy_max_vy - enemy.vel.y) * gain;
                }

                enemy.pos += enemy.vel * elapsed;

                let half = enemy.half_extent();
                enemy.pos.x = enemy.pos.x.clamp(half.x, WORLD_WIDTH - half.x);
                enemy.pos.y = enemy.pos.y.clamp(half.y, WORLD_HEIGHT - half.y);
            }
        }
    }
}

/// Side-wall hit while patrolling: clamp already done by the caller; flip the
/// sweep and roll a fresh descent speed.
fn wall_bounce(enemy: &mut Enemy, rng: &mut rand_pcg::Pcg32, tuning: &Tuning) {
    enemy.vel.x = -enemy.vel.x;
    enemy.sweep += 1;
    let jump = tuning.enemy_vy_jump / 2.0;
    enemy.vel.y = rng.random_range((tuning.enemy_max_vy - jump)..=(tuning.enemy_max_vy + jump));
}

/// Player pass: fire, ram collisions, friction, steering, integration, and
/// the wall clamp with velocity inversion.
fn step_player(state: &mut GameState, input: &InputState, elapsed: f32) {
    let GameState {
        player,
        player_bullets,
        enemies,
        lives,
        events,
        tuning,
        ..
    } = state;

    player.fire_timer -= elapsed;
    if input.is_down(Action::Fire) && player.fire_timer <= 0.0 {
        let muzzle = player.pos - Vec2::new(0.0, player.half_extent().y);
        if player_bullets.spawn(muzzle, player.scale) {
            player.fire_timer = tuning.player_fire_rate;
        }
    }

    // Ram collisions. The scan aborts once the session is already lost.
    for enemy in enemies.iter_mut() {
        if *lives < 0 {
            break;
        }
        if !enemy.active {
            continue;
        }
        if aabb_overlap(player.pos, player.half_extent(), enemy.pos, enemy.half_extent()) {
            enemy.active = false;
            *lives -= 1;
            events.push(GameEvent::EnemyRammed);
        }
    }

    player.vel *= tuning.player_friction.powf(elapsed);

    // Opposite inputs cancel rather than fight
    let gain = tuning.player_acceleration * elapsed;
    let max = tuning.player_max_speed;
    if input.is_down(Action::Left) && !input.is_down(Action::Right) {
        player.vel.x += (-max - player.vel.x) * gain;
    }
    if input.is_down(Action::Right) && !input.is_down(Action::Left) {
        player.vel.x += (max - player.vel.x) * gain;
    }
    if input.is_down(Action::Forward) && !input.is_down(Action::Backward) {
        player.vel.y += (-max - player.vel.y) * gain;
    }
    if input.is_down(Action::Backward) && !input.is_down(Action::Forward) {
        player.vel.y += (max - player.vel.y) * gain;
    }

    player.pos += player.vel * elapsed;

    // Walls bounce rather than stop: clamp and invert the outward component
    let half = player.half_extent();
    if player.pos.x < half.x {
        player.pos.x = half.x;
        player.vel.x = -player.vel.x;
    } else if player.pos.x > WORLD_WIDTH - half.x {
        player.pos.x = WORLD_WIDTH - half.x;
        player.vel.x = -player.vel.x;
    }
    if player.pos.y < half.y {
        player.pos.y = half.y;
        player.vel.y = -player.vel.y;
    } else if player.pos.y > WORLD_HEIGHT - half.y {
        player.pos.y = WORLD_HEIGHT - half.y;
        player.vel.y = -player.vel.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const FRAME: f32 = 16.0;

    fn new_state(seed: u64) -> GameState {
        GameState::new(seed, Tuning::default())
    }

    fn fire_held() -> InputState {
        let mut input = InputState::new();
        input.press(Action::Fire);
        input.advance();
        input
    }

    #[test]
    fn test_player_fires_every_tick_while_held() {
        let mut state = new_state(1);
        let input = fire_held();

        for _ in 0..5 {
            tick(&mut state, &input, FRAME);
        }
        // Fire rate 0 means one bullet per tick while the input is down
        assert_eq!(state.player_bullets.active_count(), 5);

        tick(&mut state, &InputState::new(), FRAME);
        assert_eq!(state.player_bullets.active_count(), 5);
    }

    #[test]
    fn test_scheduler_spawns_after_interval() {
        let mut state = new_state(2);
        let input = InputState::new();

        tick(&mut state, &input, 999.0);
        assert!(state.enemies.is_empty());

        tick(&mut state, &input, 2.0);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_one_spawn_per_tick_even_for_huge_frames() {
        let mut state = new_state(3);
        tick(&mut state, &InputState::new(), 10_000.0);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_player_bullet_kills_first_match_only() {
        let mut state = new_state(4);
        let mut rng = Pcg32::seed_from_u64(99);
        let mut a = Enemy::spawn(&mut rng, &state.tuning);
        a.pos = Vec2::new(400.0, 300.0);
        a.fire_timer = 10_000.0;
        let mut b = a.clone();
        b.pos = Vec2::new(402.0, 300.0);
        state.enemies.push(a);
        state.enemies.push(b);
        state.player_bullets.spawn(Vec2::new(400.0, 308.0), 1.0);

        tick(&mut state, &InputState::new(), FRAME);

        assert_eq!(state.score, 1);
        assert!(!state.enemies[0].active);
        assert!(state.enemies[1].active);
        assert_eq!(state.player_bullets.active_count(), 0);
        assert!(matches!(state.events[0], GameEvent::EnemyKilled { .. }));
    }

    #[test]
    fn test_enemy_bullet_costs_a_life() {
        let mut state = new_state(5);
        state.enemy_bullets.spawn(state.player.pos, 1.0);

        tick(&mut state, &InputState::new(), FRAME);

        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.enemy_bullets.active_count(), 0);
        assert!(state.events.contains(&GameEvent::PlayerHit));
    }

    #[test]
    fn test_leaked_enemy_costs_a_life_and_is_compacted() {
        let mut state = new_state(6);
        let mut rng = Pcg32::seed_from_u64(7);
        let mut enemy = Enemy::spawn(&mut rng, &state.tuning);
        enemy.pos = Vec2::new(100.0, WORLD_HEIGHT + SHIP_SIZE + 5.0);
        enemy.fire_timer = 10_000.0;
        state.enemies.push(enemy);

        tick(&mut state, &InputState::new(), FRAME);
        assert_eq!(state.lives, START_LIVES - 1);
        assert!(!state.enemies[0].active);
        assert!(state.events.contains(&GameEvent::EnemyLeaked));

        // Removed at the start of the next enemy pass, before its own logic
        tick(&mut state, &InputState::new(), FRAME);
        assert!(state.enemies.is_empty());
        assert_eq!(state.lives, START_LIVES - 1);
    }

    #[test]
    fn test_ram_destroys_enemy_and_costs_a_life() {
        let mut state = new_state(8);
        let mut rng = Pcg32::seed_from_u64(8);
        let mut enemy = Enemy::spawn(&mut rng, &state.tuning);
        enemy.pos = state.player.pos;
        enemy.fire_timer = 10_000.0;
        state.enemies.push(enemy);

        tick(&mut state, &InputState::new(), FRAME);

        assert_eq!(state.lives, START_LIVES - 1);
        assert!(!state.enemies[0].active);
        assert!(state.events.contains(&GameEvent::EnemyRammed));
    }

    #[test]
    fn test_pause_toggle_freezes_simulation() {
        let mut state = new_state(9);
        let mut input = InputState::new();

        input.press(Action::Interact);
        tick(&mut state, &input, 5000.0);
        input.advance();
        assert!(state.paused);
        assert!(state.enemies.is_empty());

        // Held interact does not re-toggle
        tick(&mut state, &input, 5000.0);
        assert!(state.paused);
        assert!(state.enemies.is_empty());

        input.release(Action::Interact);
        input.press(Action::Interact);
        tick(&mut state, &input, FRAME);
        assert!(!state.paused);
    }

    #[test]
    fn test_game_over_freezes_until_restart() {
        let mut state = new_state(10);
        state.lives = -1;
        assert!(state.game_over());

        let input = fire_held();
        tick(&mut state, &input, FRAME);
        assert_eq!(state.player_bullets.active_count(), 0);
        assert!(state.enemies.is_empty());

        let mut restart = InputState::new();
        restart.press(Action::Confirm);
        tick(&mut state, &restart, FRAME);

        assert!(!state.game_over());
        assert_eq!(state.lives, START_LIVES);
        assert!(state.events.contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_restart_requires_a_fresh_edge() {
        let mut state = new_state(11);
        state.score = 12;

        let mut input = InputState::new();
        input.press(Action::Confirm);
        input.advance();

        // Held confirm is not an edge
        tick(&mut state, &input, FRAME);
        assert_eq!(state.score, 12);
    }

    #[test]
    fn test_player_stays_inside_world() {
        let mut state = new_state(12);
        let mut input = InputState::new();
        input.press(Action::Left);
        input.press(Action::Forward);
        input.advance();

        let mut min_x = f32::MAX;
        for _ in 0..2000 {
            tick(&mut state, &input, FRAME);
            let half = state.player.half_extent();
            assert!(state.player.pos.x >= half.x && state.player.pos.x <= WORLD_WIDTH - half.x);
            assert!(state.player.pos.y >= half.y && state.player.pos.y <= WORLD_HEIGHT - half.y);
            min_x = min_x.min(state.player.pos.x);
        }
        // The left wall was actually reached at some point
        assert_eq!(min_x, state.player.half_extent().x);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state(777);
        let mut state2 = new_state(777);
        let input = fire_held();

        for _ in 0..600 {
            tick(&mut state1, &input, FRAME);
            tick(&mut state2, &input, FRAME);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.player.pos, state2.player.pos);
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.sweep, b.sweep);
        }
    }

    #[test]
    fn test_game_over_event_fires_once() {
        let mut state = new_state(13);
        state.lives = 0;
        let mut rng = Pcg32::seed_from_u64(13);
        let mut enemy = Enemy::spawn(&mut rng, &state.tuning);
        enemy.pos = Vec2::new(100.0, WORLD_HEIGHT + SHIP_SIZE + 5.0);
        enemy.fire_timer = 10_000.0;
        state.enemies.push(enemy);

        tick(&mut state, &InputState::new(), FRAME);
        assert!(state.game_over());
        assert!(state.events.contains(&GameEvent::GameOver));

        tick(&mut state, &InputState::new(), FRAME);
        assert!(state.events.is_empty());
    }
}
