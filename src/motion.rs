/// Per-tick movement of every entity, plus removal of whatever left the arena.

use crate::entities::{GameState, InputState};

fn finite(x: f32, y: f32) -> bool {
    x.is_finite() && y.is_finite()
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Apply held direction and rotate keys.  The player stays inside the arena.
pub fn move_player(state: &mut GameState, input: &InputState) {
    let cfg = &state.config;
    let p = &mut state.player;
    if !finite(p.x, p.y) {
        log::warn!("player position is not finite ({}, {}); skipping move", p.x, p.y);
        return;
    }

    if input.up {
        p.y -= p.speed;
    }
    if input.down {
        p.y += p.speed;
    }
    if input.left {
        p.x -= p.speed;
    }
    if input.right {
        p.x += p.speed;
    }
    p.x = p.x.clamp(0.0, cfg.width);
    p.y = p.y.clamp(0.0, cfg.height);

    if input.rotate_left {
        p.angle -= cfg.turn_step_deg;
    }
    if input.rotate_right {
        p.angle += cfg.turn_step_deg;
    }
    p.angle = p.angle.rem_euclid(360.0);
}

// ── Entities ─────────────────────────────────────────────────────────────────

pub fn advance_bullets(state: &mut GameState) {
    for (id, b) in state.bullets.iter_mut() {
        if !finite(b.x + b.dx, b.y + b.dy) {
            log::warn!("bullet {:?} has non-finite motion; skipped this tick", id);
            continue;
        }
        b.x += b.dx;
        b.y += b.dy;
    }
}

/// Every enemy steps `speed` units straight at the player's current position.
/// An enemy sitting exactly on the player stays put.
pub fn advance_enemies(state: &mut GameState) {
    let (px, py) = (state.player.x, state.player.y);
    if !finite(px, py) {
        return;
    }
    for (id, e) in state.enemies.iter_mut() {
        if !finite(e.x, e.y) {
            log::warn!("enemy {:?} position is not finite; skipped this tick", id);
            continue;
        }
        let dx = px - e.x;
        let dy = py - e.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance == 0.0 {
            continue;
        }
        let speed = e.speed as f32;
        e.x += dx / distance * speed;
        e.y += dy / distance * speed;
    }
}

pub fn advance_power_ups(state: &mut GameState) {
    for (id, pu) in state.power_ups.iter_mut() {
        if !finite(pu.x, pu.y + pu.speed) {
            log::warn!("power-up {:?} position is not finite; skipped this tick", id);
            continue;
        }
        pu.y += pu.speed;
    }
}

// ── Culling ──────────────────────────────────────────────────────────────────

/// Drop bullets and power-ups outside the arena, and enemies that wandered
/// further than `cull_margin` beyond it.  Returns the number removed.
pub fn cull_out_of_bounds(state: &mut GameState) -> usize {
    let (w, h) = (state.config.width, state.config.height);
    let m = state.config.cull_margin;

    let inside = |x: f32, y: f32, margin: f32| {
        x >= -margin && x <= w + margin && y >= -margin && y <= h + margin
    };

    // NaN compares false everywhere, so a corrupted entity is skipped here
    // rather than dropped.
    let outside = |x: f32, y: f32, margin: f32| finite(x, y) && !inside(x, y, margin);

    state.bullets.remove_all(|_, b| outside(b.x, b.y, 0.0))
        + state.power_ups.remove_all(|_, pu| outside(pu.x, pu.y, 0.0))
        + state.enemies.remove_all(|_, e| outside(e.x, e.y, m))
}
