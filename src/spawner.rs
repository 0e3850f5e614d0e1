/// Periodic generators for enemies and power-ups.
///
/// All timing runs off `GameState::elapsed_ms`; there are no per-entity timers
/// to leak.  Randomness comes only through the injected `rng`.

use rand::Rng;

use crate::config::{EnemySpawn, GameConfig};
use crate::entities::{
    Enemy, GameState, GameStatus, Interval, PowerUp, PowerUpKind, SpawnTimers,
};

/// Rejection-sampling budget before falling back to the far corner.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 64;

// ── Timers ───────────────────────────────────────────────────────────────────

impl Interval {
    /// First firing one full period after `now_ms`.
    pub fn starting_at(now_ms: u64, period_ms: u64) -> Self {
        Self {
            period_ms,
            next_due_ms: now_ms + period_ms,
        }
    }

    /// Number of periods that elapsed since the last poll.  Reschedules itself.
    pub fn poll(&mut self, now_ms: u64) -> u32 {
        let mut fired = 0;
        while self.period_ms > 0 && now_ms >= self.next_due_ms {
            self.next_due_ms += self.period_ms;
            fired += 1;
        }
        fired
    }
}

impl SpawnTimers {
    pub fn for_config(config: &GameConfig) -> Self {
        let enemy = match config.enemy_spawn {
            EnemySpawn::TopUp => None,
            EnemySpawn::Interval { period_ms } => Some(Interval::starting_at(0, period_ms)),
        };
        Self {
            enemy,
            power_up: config
                .power_up_interval_ms
                .map(|period| Interval::starting_at(0, period)),
        }
    }
}

// ── Placement ────────────────────────────────────────────────────────────────

/// A random point of the arena at least `min_distance` from (`px`, `py`).
///
/// Falls back to the corner farthest from the player; with a validated
/// config that corner is always far enough.
pub fn place_away_from(
    rng: &mut impl Rng,
    width: f32,
    height: f32,
    px: f32,
    py: f32,
    min_distance: f32,
) -> (f32, f32) {
    let min_sq = min_distance * min_distance;
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let x = rng.gen_range(0.0..width);
        let y = rng.gen_range(0.0..height);
        let (dx, dy) = (x - px, y - py);
        if dx * dx + dy * dy >= min_sq {
            return (x, y);
        }
    }
    let x = if px < width / 2.0 { width } else { 0.0 };
    let y = if py < height / 2.0 { height } else { 0.0 };
    log::debug!("placement fell back to far corner ({x}, {y})");
    (x, y)
}

fn roll_enemy_speed(rng: &mut impl Rng, config: &GameConfig) -> u32 {
    rng.gen_range(config.enemy_speed_min..=config.enemy_speed_max)
}

fn top_edge_x(rng: &mut impl Rng, width: f32, margin: f32) -> f32 {
    if width > 2.0 * margin {
        rng.gen_range(margin..width - margin)
    } else {
        width / 2.0
    }
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// Run both generators for the current tick.  Returns how many entities were
/// created.  Does nothing once the game is over.
pub fn run(state: &mut GameState, rng: &mut impl Rng) -> usize {
    if state.status != GameStatus::Playing {
        return 0;
    }
    spawn_enemies(state, rng) + spawn_power_ups(state, rng)
}

pub fn spawn_enemies(state: &mut GameState, rng: &mut impl Rng) -> usize {
    let cfg = state.config.clone();
    let room = cfg.enemy_cap.saturating_sub(state.enemies.len());

    let wanted = match cfg.enemy_spawn {
        EnemySpawn::TopUp => cfg.max_enemies.saturating_sub(state.enemies.len()),
        EnemySpawn::Interval { .. } => match state.timers.enemy.as_mut() {
            Some(timer) => timer.poll(state.elapsed_ms) as usize,
            None => 0,
        },
    };
    let count = wanted.min(room);

    for _ in 0..count {
        let (x, y) = match cfg.enemy_spawn {
            EnemySpawn::TopUp => place_away_from(
                rng,
                cfg.width,
                cfg.height,
                state.player.x,
                state.player.y,
                cfg.min_spawn_distance,
            ),
            EnemySpawn::Interval { .. } => (top_edge_x(rng, cfg.width, cfg.enemy_size), 0.0),
        };
        let speed = roll_enemy_speed(rng, &cfg);
        state.enemies.add(Enemy {
            x,
            y,
            size: cfg.enemy_size,
            speed,
        });
    }
    if count > 0 {
        log::trace!("spawned {count} enemies ({} alive)", state.enemies.len());
    }
    count
}

pub fn spawn_power_ups(state: &mut GameState, rng: &mut impl Rng) -> usize {
    let count = match state.timers.power_up.as_mut() {
        Some(timer) => timer.poll(state.elapsed_ms) as usize,
        None => return 0,
    };
    for _ in 0..count {
        let kind = if rng.gen_bool(0.5) {
            PowerUpKind::RapidFire
        } else {
            PowerUpKind::Bomb
        };
        let x = top_edge_x(rng, state.config.width, state.config.power_up_size);
        state.power_ups.add(PowerUp {
            x,
            y: 0.0,
            size: state.config.power_up_size,
            speed: state.config.power_up_speed,
            kind,
        });
        log::debug!("power-up {:?} dropped at x={x:.0}", kind);
    }
    count
}
