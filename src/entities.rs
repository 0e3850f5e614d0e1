/// All game entity types — pure data, no logic.

use serde::Serialize;

use crate::config::GameConfig;
use crate::store::EntityStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GameOverCause {
    /// Health ran out or a lethal contact happened.
    Killed,
    /// The round clock ran out.
    TimeUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PowerUpKind {
    /// Halves the fire interval for `rapid_fire_duration_ms`.
    RapidFire,
    /// Clears every enemy on the field.
    Bomb,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Collision radius.
    pub size: f32,
    /// Units moved per tick while a direction is held.
    pub speed: f32,
    /// Facing in degrees; 0 points along +x, 90 along +y (down).
    pub angle: f32,
    pub health: u32,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
}

// ── Enemies & pickups ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Units per tick toward the player.  Also drives the kill reward.
    pub speed: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Downward units per tick.
    pub speed: f32,
    pub kind: PowerUpKind,
}

// ── Timers ────────────────────────────────────────────────────────────────────

/// Countdown on the shared game clock.  Fires once per `period_ms`.
#[derive(Clone, Debug, PartialEq)]
pub struct Interval {
    pub period_ms: u64,
    pub next_due_ms: u64,
}

/// Periodic generators, all measured against `GameState::elapsed_ms`.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnTimers {
    /// Only used by the `Interval` enemy policy.
    pub enemy: Option<Interval>,
    pub power_up: Option<Interval>,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Which controls are held during a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub fire: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so `tick` can hand back a new copy
/// without touching the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub bullets: EntityStore<Bullet>,
    pub enemies: EntityStore<Enemy>,
    pub power_ups: EntityStore<PowerUp>,
    pub score: u32,
    /// Best score of the session; survives restarts.
    pub high_score: u32,
    pub status: GameStatus,
    pub over_cause: Option<GameOverCause>,
    pub frame: u64,
    /// Game clock, advanced by `config.tick_ms` every tick.
    pub elapsed_ms: u64,
    /// Game time at which rapid-fire wears off.
    pub rapid_fire_until: Option<u64>,
    /// Earliest game time at which the player may fire again.
    pub next_shot_ms: u64,
    pub timers: SpawnTimers,
    pub config: GameConfig,
}
