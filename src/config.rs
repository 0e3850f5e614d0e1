/// Gameplay tunables.
///
/// Everything the simulation needs to know about arena size, speeds, timers
/// and rules lives in one `GameConfig` value that travels inside the game
/// state.  Two presets exist: the default arena game (health pool, enemies
/// topped up around the player) and the timed game (lethal contact, enemies
/// dropping from the top, 20 second rounds).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

// ── Defaults ─────────────────────────────────────────────────────────────────

pub const ARENA_WIDTH: f32 = 800.0;
pub const ARENA_HEIGHT: f32 = 600.0;
/// One tick ≈ one 60 Hz frame.
pub const TICK_MS: u64 = 16;

pub const PLAYER_SIZE: f32 = 10.0;
pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_TURN_STEP_DEG: f32 = 5.0;
pub const PLAYER_MAX_HEALTH: u32 = 100;

pub const BULLET_SPEED: f32 = 10.0;

pub const ENEMY_SIZE: f32 = 15.0;
pub const ENEMY_SPEED_MIN: u32 = 1;
pub const ENEMY_SPEED_MAX: u32 = 3;
pub const MAX_ENEMIES: usize = 5;
pub const ENEMY_CAP: usize = 20;
pub const MIN_SPAWN_DISTANCE: f32 = 200.0;
pub const CULL_MARGIN: f32 = 50.0;
pub const CONTACT_DAMAGE: u32 = 10;

pub const POWER_UP_SIZE: f32 = 10.0;
pub const POWER_UP_SPEED: f32 = 2.0;

pub const FIRE_INTERVAL_MS: u64 = 100;
pub const RAPID_FIRE_INTERVAL_MS: u64 = 50;
pub const RAPID_FIRE_DURATION_MS: u64 = 5_000;

pub const TIMED_ROUND_MS: u64 = 20_000;
pub const TIMED_ENEMY_PERIOD_MS: u64 = 1_000;
pub const TIMED_POWER_UP_PERIOD_MS: u64 = 5_000;
pub const ARENA_POWER_UP_PERIOD_MS: u64 = 8_000;

// ── Rule selectors ───────────────────────────────────────────────────────────

/// What happens when an enemy touches the player.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactRule {
    /// Subtract this much health; the game ends when health reaches zero.
    Damage(u32),
    /// Any contact ends the game.
    Lethal,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemySpawn {
    /// Keep at least `max_enemies` alive, placed away from the player.
    TopUp,
    /// One enemy per period at a random column on the top edge.
    Interval { period_ms: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionTest {
    Circle,
    Aabb,
}

// ── Config ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub tick_ms: u64,

    pub player_size: f32,
    pub player_speed: f32,
    pub turn_step_deg: f32,
    pub max_health: u32,

    pub bullet_speed: f32,

    pub enemy_size: f32,
    pub enemy_speed_min: u32,
    pub enemy_speed_max: u32,
    /// Floor kept alive by the `TopUp` policy.
    pub max_enemies: usize,
    /// Hard ceiling on live enemies under any policy.
    pub enemy_cap: usize,
    pub min_spawn_distance: f32,
    pub enemy_spawn: EnemySpawn,
    /// How far outside the arena an enemy may drift before it is dropped.
    pub cull_margin: f32,

    pub power_up_size: f32,
    pub power_up_speed: f32,
    /// `None` disables power-ups.
    pub power_up_interval_ms: Option<u64>,

    pub fire_interval_ms: u64,
    pub rapid_fire_interval_ms: u64,
    pub rapid_fire_duration_ms: u64,

    pub contact: ContactRule,
    pub collision: CollisionTest,
    /// `None` means rounds never time out.
    pub time_limit_ms: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            tick_ms: TICK_MS,
            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            turn_step_deg: PLAYER_TURN_STEP_DEG,
            max_health: PLAYER_MAX_HEALTH,
            bullet_speed: BULLET_SPEED,
            enemy_size: ENEMY_SIZE,
            enemy_speed_min: ENEMY_SPEED_MIN,
            enemy_speed_max: ENEMY_SPEED_MAX,
            max_enemies: MAX_ENEMIES,
            enemy_cap: ENEMY_CAP,
            min_spawn_distance: MIN_SPAWN_DISTANCE,
            enemy_spawn: EnemySpawn::TopUp,
            cull_margin: CULL_MARGIN,
            power_up_size: POWER_UP_SIZE,
            power_up_speed: POWER_UP_SPEED,
            power_up_interval_ms: Some(ARENA_POWER_UP_PERIOD_MS),
            fire_interval_ms: FIRE_INTERVAL_MS,
            rapid_fire_interval_ms: RAPID_FIRE_INTERVAL_MS,
            rapid_fire_duration_ms: RAPID_FIRE_DURATION_MS,
            contact: ContactRule::Damage(CONTACT_DAMAGE),
            collision: CollisionTest::Circle,
            time_limit_ms: None,
        }
    }
}

impl GameConfig {
    /// Health-pool arena game.
    pub fn arena() -> Self {
        Self::default()
    }

    /// Lethal-contact game with enemies falling from the top and a fixed
    /// round length.
    pub fn timed() -> Self {
        Self {
            enemy_spawn: EnemySpawn::Interval {
                period_ms: TIMED_ENEMY_PERIOD_MS,
            },
            power_up_interval_ms: Some(TIMED_POWER_UP_PERIOD_MS),
            contact: ContactRule::Lethal,
            collision: CollisionTest::Aabb,
            time_limit_ms: Some(TIMED_ROUND_MS),
            ..Self::default()
        }
    }

    /// Reject configurations the simulation cannot honour.
    ///
    /// In particular the `TopUp` policy needs an arena wider and taller than
    /// twice `min_spawn_distance`: the far corner from any player position is
    /// then always a legal spawn point, so placement cannot loop forever.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.width.is_finite() && self.width > 0.0)
            || !(self.height.is_finite() && self.height > 0.0)
        {
            return Err(format!(
                "Arena size must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        if self.tick_ms == 0 {
            return Err("tick_ms must be greater than zero".to_string());
        }
        if self.fire_interval_ms == 0 || self.rapid_fire_interval_ms == 0 {
            return Err("Fire intervals must be greater than zero".to_string());
        }
        if self.enemy_speed_min > self.enemy_speed_max {
            return Err(format!(
                "enemy_speed_min ({}) exceeds enemy_speed_max ({})",
                self.enemy_speed_min, self.enemy_speed_max
            ));
        }
        if self.max_enemies > self.enemy_cap {
            return Err(format!(
                "max_enemies ({}) exceeds enemy_cap ({})",
                self.max_enemies, self.enemy_cap
            ));
        }
        if self.power_up_interval_ms == Some(0) {
            return Err("power_up_interval_ms must be greater than zero".to_string());
        }
        match self.enemy_spawn {
            EnemySpawn::TopUp => {
                let need = 2.0 * self.min_spawn_distance;
                if self.width <= need || self.height <= need {
                    return Err(format!(
                        "Arena {}x{} too small for min_spawn_distance {}",
                        self.width, self.height, self.min_spawn_distance
                    ));
                }
            }
            EnemySpawn::Interval { period_ms } => {
                if period_ms == 0 {
                    return Err("Enemy spawn period must be greater than zero".to_string());
                }
                if self.width <= 2.0 * self.enemy_size {
                    return Err(format!(
                        "Arena width {} too narrow for enemy size {}",
                        self.width, self.enemy_size
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Read a JSON config file.  Missing fields fall back to the arena preset.
pub fn load_config(path: &Path) -> Result<GameConfig, String> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&json)
}

pub fn parse_config(json: &str) -> Result<GameConfig, String> {
    let config: GameConfig =
        serde_json::from_str(json).map_err(|e| format!("Failed to parse config: {e}"))?;
    config.validate()?;
    Ok(config)
}
