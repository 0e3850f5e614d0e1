/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable render snapshot.
/// No game logic is performed; this module only translates arena
/// coordinates into terminal cells and cells into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use arena_shooter::entities::{GameOverCause, GameStatus, PowerUpKind};
use arena_shooter::snapshot::{Hud, RenderSnapshot, Sprite, SpriteKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HEALTH_OK: Color = Color::Green;
const C_HEALTH_LOW: Color = Color::Red;
const C_PLAYER: Color = Color::Blue;
const C_ENEMY: Color = Color::Red;
const C_BULLET: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_BONUS_RAPID: Color = Color::Cyan;
const C_BONUS_BOMB: Color = Color::Magenta;
const C_POWERUP_ACTIVE: Color = Color::Cyan;
const C_CLOCK: Color = Color::White;

const HEALTH_BAR_CELLS: u32 = 20;

// ── Coordinate mapping ───────────────────────────────────────────────────────

/// Terminal area the arena is drawn into: rows 2..height-2 and columns
/// 1..width-1, inside the border.
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    /// Cell for an arena position, or `None` if it falls outside the border.
    fn cell(&self, snap: &RenderSnapshot, x: f32, y: f32) -> Option<(u16, u16)> {
        if !(x.is_finite() && y.is_finite()) || snap.width <= 0.0 || snap.height <= 0.0 {
            return None;
        }
        let inner_w = self.cols.saturating_sub(3) as f32;
        let inner_h = self.rows.saturating_sub(5) as f32;
        let col = 1.0 + (x / snap.width * inner_w).round();
        let row = 2.0 + (y / snap.height * inner_h).round();
        if col < 1.0 || col > 1.0 + inner_w || row < 2.0 || row > 2.0 + inner_h {
            return None;
        }
        Some((col as u16, row as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    view: &Viewport,
    snap: &RenderSnapshot,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, view, &snap.hud)?;

    // Player is first in the list; draw it last so it stays on top.
    for sprite in snap.sprites.iter().skip(1) {
        draw_sprite(out, view, snap, sprite)?;
    }
    if let Some(player) = snap.sprites.first() {
        draw_sprite(out, view, snap, player)?;
    }

    draw_controls_hint(out, view)?;

    if snap.hud.status == GameStatus::GameOver {
        draw_game_over(out, view, &snap.hud)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, hud: &Hud) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    if hud.high_score > 0 {
        out.queue(Print(format!("Score:{:>6}  Hi:{:>6}", hud.score, hud.high_score)))?;
    } else {
        out.queue(Print(format!("Score:{:>6}", hud.score)))?;
    }

    // Round clock — centre
    if let Some(ms) = hud.time_remaining_ms {
        let clock = format!("[ {:>2}.{}s ]", ms / 1000, (ms % 1000) / 100);
        let cx = (view.cols / 2).saturating_sub(clock.len() as u16 / 2);
        out.queue(cursor::MoveTo(cx, 0))?;
        out.queue(style::SetForegroundColor(C_CLOCK))?;
        out.queue(Print(&clock))?;
    }

    // Rapid-fire tag + health bar — right side
    let power_tag = match hud.rapid_fire_remaining_ms {
        Some(ms) => format!("[! RAPID {:>2}s] ", ms / 1000 + 1),
        None => String::new(),
    };
    let filled = if hud.max_health > 0 {
        (u64::from(hud.health) * u64::from(HEALTH_BAR_CELLS) / u64::from(hud.max_health)) as usize
    } else {
        0
    };
    let bar = format!(
        "HP[{}{}]{:>4}",
        "█".repeat(filled),
        " ".repeat(HEALTH_BAR_CELLS as usize - filled.min(HEALTH_BAR_CELLS as usize)),
        hud.health
    );
    let width = power_tag.chars().count() + bar.chars().count();
    let rx = view.cols.saturating_sub(width as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;

    if !power_tag.is_empty() {
        out.queue(style::SetForegroundColor(C_POWERUP_ACTIVE))?;
        out.queue(Print(&power_tag))?;
    }
    let bar_color = if u64::from(hud.health) * 4 <= u64::from(hud.max_health) {
        C_HEALTH_LOW
    } else {
        C_HEALTH_OK
    };
    out.queue(style::SetForegroundColor(bar_color))?;
    out.queue(Print(&bar))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Arrow for the facing angle (0° = right, 90° = down).
fn facing_glyph(angle: f32) -> &'static str {
    const ARROWS: [&str; 8] = ["→", "↘", "↓", "↙", "←", "↖", "↑", "↗"];
    let octant = ((angle.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    ARROWS[octant]
}

fn draw_sprite<W: Write>(
    out: &mut W,
    view: &Viewport,
    snap: &RenderSnapshot,
    sprite: &Sprite,
) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(snap, sprite.x, sprite.y) else {
        return Ok(());
    };
    let (glyph, color) = match sprite.kind {
        SpriteKind::Player => (facing_glyph(snap.hud.player_angle), C_PLAYER),
        SpriteKind::Enemy => ("●", C_ENEMY),
        SpriteKind::Bullet => ("·", C_BULLET),
        SpriteKind::PowerUp(PowerUpKind::RapidFire) => ("!", C_BONUS_RAPID),
        SpriteKind::PowerUp(PowerUpKind::Bomb) => ("✹", C_BONUS_BOMB),
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("WASD/↑↓←→ : Move   J K : Turn   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, view: &Viewport, hud: &Hud) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", hud.score);
    let new_best = hud.score >= hud.high_score && hud.score > 0;
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", hud.high_score)
    } else {
        format!("Best Score:  {:>6}", hud.high_score)
    };
    let title = match hud.over_cause {
        Some(GameOverCause::TimeUp) => "║     TIME  UP       ║",
        _ => "║    GAME  OVER      ║",
    };

    let lines: [(&str, Color); 3] = [
        ("╔════════════════════╗", Color::Red),
        (title, Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let best_color = if new_best { Color::Yellow } else { Color::DarkGrey };

    let cx = view.cols / 2;
    let total_rows = lines.len() + 3;
    let start_row = (view.rows / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let tail: [(&str, Color); 3] = [
        (score_line.as_str(), Color::Yellow),
        (best_line.as_str(), best_color),
        ("R - Restart  M - Menu  Q - Quit", Color::White),
    ];
    for (i, (msg, color)) in tail.iter().enumerate() {
        let row = start_row + (lines.len() + i) as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
