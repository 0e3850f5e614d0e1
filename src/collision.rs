/// Overlap tests and per-tick collision resolution.
///
/// Two shape tests are available and selected by `GameConfig::collision`:
/// circles (inclusive at the boundary) and axis-aligned boxes (strict).

use crate::config::{CollisionTest, ContactRule};
use crate::entities::{GameState, PowerUpKind};
use crate::store::EntityId;

/// Reward per unit of enemy speed.
pub const POINTS_PER_SPEED: u32 = 10;

// ── Shape tests ───────────────────────────────────────────────────────────────

/// `true` when the two circles touch or overlap.
pub fn circles_overlap(ax: f32, ay: f32, ar: f32, bx: f32, by: f32, br: f32) -> bool {
    let dx = ax - bx;
    let dy = ay - by;
    let reach = ar + br;
    dx * dx + dy * dy <= reach * reach
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Box of half-extent `half` centred on (x, y).
    pub fn centered(x: f32, y: f32, half: f32) -> Self {
        Self {
            left: x - half,
            top: y - half,
            right: x + half,
            bottom: y + half,
        }
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

/// Overlap of two centred shapes of the given radius / half-extent.
pub fn hit(test: CollisionTest, ax: f32, ay: f32, ar: f32, bx: f32, by: f32, br: f32) -> bool {
    match test {
        CollisionTest::Circle => circles_overlap(ax, ay, ar, bx, by, br),
        CollisionTest::Aabb => Rect::centered(ax, ay, ar).overlaps(&Rect::centered(bx, by, br)),
    }
}

// ── Resolution ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionReport {
    pub enemies_shot: u32,
    pub score_gained: u32,
    pub enemies_rammed: u32,
    pub damage_taken: u32,
    pub lethal_contact: bool,
    pub collected: Vec<PowerUpKind>,
    pub bombed: u32,
}

/// Resolve every collision of this tick in place.
///
/// Order: bullets ↔ enemies, player ↔ enemies, player ↔ power-ups.  A
/// bullet destroys at most one enemy and an enemy is destroyed at most once.
pub fn resolve(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    let test = state.config.collision;

    // ── 1. Bullets ↔ enemies ──────────────────────────────────────────────────
    let mut used_bullets: Vec<EntityId> = Vec::new();
    let mut killed_enemies: Vec<EntityId> = Vec::new();

    for (bid, bullet) in state.bullets.iter() {
        for (eid, enemy) in state.enemies.iter() {
            if killed_enemies.contains(&eid) {
                continue;
            }
            if hit(test, bullet.x, bullet.y, 0.0, enemy.x, enemy.y, enemy.size) {
                killed_enemies.push(eid);
                used_bullets.push(bid);
                report.enemies_shot += 1;
                report.score_gained = report
                    .score_gained
                    .saturating_add(enemy.speed.saturating_mul(POINTS_PER_SPEED));
                break;
            }
        }
    }

    state.bullets.remove_all(|id, _| used_bullets.contains(&id));
    state.enemies.remove_all(|id, _| killed_enemies.contains(&id));
    state.score = state.score.saturating_add(report.score_gained);

    // ── 2. Player ↔ enemies ───────────────────────────────────────────────────
    let p = &state.player;
    let rammed = state.enemies.remove_all(|_, e| {
        hit(test, p.x, p.y, p.size, e.x, e.y, e.size)
    }) as u32;
    report.enemies_rammed = rammed;

    if rammed > 0 {
        match state.config.contact {
            ContactRule::Damage(amount) => {
                let total = amount.saturating_mul(rammed);
                report.damage_taken = total.min(state.player.health);
                state.player.health = state.player.health.saturating_sub(total);
            }
            ContactRule::Lethal => report.lethal_contact = true,
        }
    }

    // ── 3. Player ↔ power-ups ─────────────────────────────────────────────────
    let p = &state.player;
    let mut collected = Vec::new();
    state.power_ups.remove_all(|_, pu| {
        let taken = hit(test, p.x, p.y, p.size, pu.x, pu.y, pu.size);
        if taken {
            collected.push(pu.kind);
        }
        taken
    });

    for kind in &collected {
        match kind {
            PowerUpKind::RapidFire => {
                state.rapid_fire_until =
                    Some(state.elapsed_ms.saturating_add(state.config.rapid_fire_duration_ms));
            }
            PowerUpKind::Bomb => {
                report.bombed += state.enemies.len() as u32;
                state.enemies.remove_all(|_, _| true);
            }
        }
    }
    report.collected = collected;

    report
}
