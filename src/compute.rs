/// Game-state controller.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG and logging.

use rand::Rng;

use crate::collision;
use crate::config::GameConfig;
use crate::entities::{
    Bullet, GameOverCause, GameState, GameStatus, InputState, Player, SpawnTimers,
};
use crate::motion;
use crate::spawner;
use crate::store::EntityStore;

// ── Constructors ─────────────────────────────────────────────────────────────

fn fresh_player(config: &GameConfig) -> Player {
    Player {
        x: config.width / 2.0,
        y: config.height / 2.0,
        size: config.player_size,
        speed: config.player_speed,
        angle: 0.0,
        health: config.max_health,
    }
}

/// Build the initial game state.  Stores start empty; the spawners fill them
/// on the first tick.
pub fn init_state(config: GameConfig, high_score: u32) -> GameState {
    GameState {
        player: fresh_player(&config),
        bullets: EntityStore::new(),
        enemies: EntityStore::new(),
        power_ups: EntityStore::new(),
        score: 0,
        high_score,
        status: GameStatus::Playing,
        over_cause: None,
        frame: 0,
        elapsed_ms: 0,
        rapid_fire_until: None,
        next_shot_ms: 0,
        timers: SpawnTimers::for_config(&config),
        config,
    }
}

/// Back to a fresh round with the same config.  Only the session best score
/// is carried over, so restarting twice equals restarting once.
pub fn restart(state: &GameState) -> GameState {
    log::info!("restart (previous score {})", state.score);
    init_state(state.config.clone(), state.high_score.max(state.score))
}

// ── Queries ──────────────────────────────────────────────────────────────────

pub fn rapid_fire_active(state: &GameState) -> bool {
    state
        .rapid_fire_until
        .is_some_and(|until| state.elapsed_ms < until)
}

/// Minimum gap between two shots at the current game time.
pub fn fire_interval_ms(state: &GameState) -> u64 {
    if rapid_fire_active(state) {
        state.config.rapid_fire_interval_ms
    } else {
        state.config.fire_interval_ms
    }
}

pub fn time_remaining_ms(state: &GameState) -> Option<u64> {
    state
        .config
        .time_limit_ms
        .map(|limit| limit.saturating_sub(state.elapsed_ms))
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Fire one bullet along the player's facing, if the fire cooldown allows.
pub fn player_shoot(state: &GameState) -> GameState {
    let mut next = state.clone();
    shoot_in_place(&mut next);
    next
}

fn shoot_in_place(state: &mut GameState) -> bool {
    if state.status != GameStatus::Playing || state.elapsed_ms < state.next_shot_ms {
        return false;
    }
    let rad = state.player.angle.to_radians();
    let speed = state.config.bullet_speed;
    state.bullets.add(Bullet {
        x: state.player.x,
        y: state.player.y,
        dx: rad.cos() * speed,
        dy: rad.sin() * speed,
    });
    // Next shot is due one interval after this one was due, not after this
    // tick. A due time older than one tick means fire was released.
    let base = state
        .next_shot_ms
        .max(state.elapsed_ms.saturating_sub(state.config.tick_ms));
    state.next_shot_ms = base.saturating_add(fire_interval_ms(state));
    true
}

fn end_game(state: &mut GameState, cause: GameOverCause) {
    state.status = GameStatus::GameOver;
    state.over_cause = Some(cause);
    state.high_score = state.high_score.max(state.score);
    log::info!(
        "game over ({:?}) at {} ms, score {}",
        cause,
        state.elapsed_ms,
        state.score
    );
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one tick.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// A finished game is returned unchanged: nothing moves, spawns or expires
/// until `restart`.
pub fn tick(state: &GameState, input: &InputState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    if next.status == GameStatus::GameOver {
        return next;
    }

    next.frame += 1;
    next.elapsed_ms += next.config.tick_ms;

    // ── 1. Expire timed effects ──────────────────────────────────────────────
    if next.rapid_fire_until.is_some() && !rapid_fire_active(&next) {
        log::debug!("rapid fire expired at {} ms", next.elapsed_ms);
        next.rapid_fire_until = None;
    }

    // ── 2. Player input ──────────────────────────────────────────────────────
    motion::move_player(&mut next, input);
    if input.fire {
        shoot_in_place(&mut next);
    }

    // ── 3. Motion ────────────────────────────────────────────────────────────
    motion::advance_bullets(&mut next);
    motion::advance_enemies(&mut next);
    motion::advance_power_ups(&mut next);
    motion::cull_out_of_bounds(&mut next);

    // ── 4. Collisions ────────────────────────────────────────────────────────
    let report = collision::resolve(&mut next);
    if report.enemies_shot > 0 {
        log::debug!(
            "{} enemies shot (+{}), score {}",
            report.enemies_shot,
            report.score_gained,
            next.score
        );
    }
    if report.damage_taken > 0 {
        log::debug!("player hit for {}, health {}", report.damage_taken, next.player.health);
    }
    for kind in &report.collected {
        log::debug!("collected {:?}", kind);
    }
    next.high_score = next.high_score.max(next.score);

    // ── 5. Terminal conditions ───────────────────────────────────────────────
    if report.lethal_contact || next.player.health == 0 {
        end_game(&mut next, GameOverCause::Killed);
        return next;
    }
    if let Some(limit) = next.config.time_limit_ms {
        if next.elapsed_ms >= limit {
            end_game(&mut next, GameOverCause::TimeUp);
            return next;
        }
    }

    // ── 6. Spawn ─────────────────────────────────────────────────────────────
    spawner::run(&mut next, rng);

    log::trace!(
        "tick {}: {} bullets, {} enemies, {} power-ups",
        next.frame,
        next.bullets.len(),
        next.enemies.len(),
        next.power_ups.len()
    );
    next
}
