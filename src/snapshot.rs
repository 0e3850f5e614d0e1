/// Read-only view of a `GameState` for renderers.
///
/// A renderer builds one snapshot per frame and draws from it; nothing in
/// here can reach back into the simulation.

use serde::Serialize;

use crate::compute::{rapid_fire_active, time_remaining_ms};
use crate::entities::{GameOverCause, GameState, GameStatus, PowerUpKind};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum SpriteKind {
    Player,
    Bullet,
    Enemy,
    PowerUp(PowerUpKind),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Hud {
    pub score: u32,
    pub high_score: u32,
    pub health: u32,
    pub max_health: u32,
    pub player_angle: f32,
    /// `None` when rapid-fire is off.
    pub rapid_fire_remaining_ms: Option<u64>,
    /// `None` when the round has no time limit.
    pub time_remaining_ms: Option<u64>,
    pub status: GameStatus,
    pub over_cause: Option<GameOverCause>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub width: f32,
    pub height: f32,
    pub frame: u64,
    /// Player first, then power-ups, enemies and bullets in store order.
    pub sprites: Vec<Sprite>,
    pub hud: Hud,
}

pub fn build_snapshot(state: &GameState) -> RenderSnapshot {
    let mut sprites = Vec::with_capacity(
        1 + state.power_ups.len() + state.enemies.len() + state.bullets.len(),
    );

    let p = &state.player;
    sprites.push(Sprite {
        kind: SpriteKind::Player,
        x: p.x,
        y: p.y,
        size: p.size,
    });
    for (_, pu) in state.power_ups.iter() {
        sprites.push(Sprite {
            kind: SpriteKind::PowerUp(pu.kind),
            x: pu.x,
            y: pu.y,
            size: pu.size,
        });
    }
    for (_, e) in state.enemies.iter() {
        sprites.push(Sprite {
            kind: SpriteKind::Enemy,
            x: e.x,
            y: e.y,
            size: e.size,
        });
    }
    for (_, b) in state.bullets.iter() {
        sprites.push(Sprite {
            kind: SpriteKind::Bullet,
            x: b.x,
            y: b.y,
            size: 0.0,
        });
    }

    let rapid_fire_remaining_ms = if rapid_fire_active(state) {
        state
            .rapid_fire_until
            .map(|until| until.saturating_sub(state.elapsed_ms))
    } else {
        None
    };

    RenderSnapshot {
        width: state.config.width,
        height: state.config.height,
        frame: state.frame,
        sprites,
        hud: Hud {
            score: state.score,
            high_score: state.high_score,
            health: p.health,
            max_health: state.config.max_health,
            player_angle: p.angle,
            rapid_fire_remaining_ms,
            time_remaining_ms: time_remaining_ms(state),
            status: state.status,
            over_cause: state.over_cause,
        },
    }
}
