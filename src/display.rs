/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  The fixed world space (1036×569) is
/// scaled into whatever cell grid the terminal currently offers.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use centipede::entities::{GameState, GameStatus, SCREEN_HEIGHT, SCREEN_WIDTH};
use centipede::geom::Vec2;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_SHIP: Color = Color::White;
const C_HEAD: Color = Color::Yellow;
const C_BODY: Color = Color::Green;
const C_MUSHROOM: Color = Color::Magenta;
const C_MUSHROOM_DAMAGED: Color = Color::DarkMagenta;
const C_LASER: Color = Color::Cyan;
const C_SPIDER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── World → cell mapping ──────────────────────────────────────────────────────

/// The playable interior: row 0 is the HUD, rows 1 and `rows-2` the border
/// bars, the last row the controls hint.
struct Viewport {
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn cell(&self, pos: Vec2) -> (u16, u16) {
        let play_cols = self.cols.saturating_sub(2).max(1) as f32;
        let play_rows = self.rows.saturating_sub(4).max(1) as f32;
        let col = 1.0 + (pos.x / SCREEN_WIDTH).clamp(0.0, 1.0) * (play_cols - 1.0);
        let row = 2.0 + (pos.y / SCREEN_HEIGHT).clamp(0.0, 1.0) * (play_rows - 1.0);
        (col as u16, row as u16)
    }
}

fn put<W: Write>(out: &mut W, at: (u16, u16), color: Color, glyph: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(at.0, at.1))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let vp = Viewport { cols, rows };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &vp)?;
    draw_hud(out, &vp, state)?;

    for mushroom in &state.mushrooms {
        let (color, glyph) = if mushroom.damaged {
            (C_MUSHROOM_DAMAGED, "·")
        } else {
            (C_MUSHROOM, "♣")
        };
        put(out, vp.cell(mushroom.pos), color, glyph)?;
    }

    for centipede in &state.centipedes {
        for (i, &segment) in centipede.segments.iter().enumerate() {
            if i == 0 {
                put(out, vp.cell(segment), C_HEAD, "◉")?;
            } else {
                put(out, vp.cell(segment), C_BODY, "●")?;
            }
        }
    }

    if state.spider.alive {
        put(out, vp.cell(state.spider.pos), C_SPIDER, "/∞\\")?;
    }

    for laser in &state.lasers {
        put(out, vp.cell(laser.pos), C_LASER, "║")?;
    }

    draw_ship(out, &vp, state)?;
    draw_controls_hint(out, &vp)?;

    match state.status {
        GameStatus::Won => draw_end_overlay(out, &vp, state, "║     YOU  WIN     ║", Color::Green)?,
        GameStatus::GameOver => {
            draw_end_overlay(out, &vp, state, "║    GAME  OVER    ║", Color::Red)?
        }
        GameStatus::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let w = vp.cols as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row rows-2 — bottom bar
    out.queue(cursor::MoveTo(0, vp.rows.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..vp.rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(vp.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, vp: &Viewport, state: &GameState) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>6}", state.score)))?;

    // Lives — right, one ship icon per remaining life
    let icons: String = "▲".repeat(state.ship.lives as usize);
    let lives_text = format!("Lives: {}", icons);
    let rx = vp
        .cols
        .saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    Ok(())
}

// ── Ship ──────────────────────────────────────────────────────────────────────

fn draw_ship<W: Write>(out: &mut W, vp: &Viewport, state: &GameState) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //   ▲       ← row y      (nose)
    //  /█\      ← row y+1    (fuselage + wings)
    let (col, row) = vp.cell(state.ship.pos);
    out.queue(style::SetForegroundColor(C_SHIP))?;

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print("▲"))?;

    let wing_row = row + 1;
    if wing_row < vp.rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), wing_row))?;
        out.queue(Print("/█\\"))?;
    }

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑↓→ / WASD : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── End-of-game overlays ──────────────────────────────────────────────────────

fn draw_end_overlay<W: Write>(
    out: &mut W,
    vp: &Viewport,
    state: &GameState,
    banner: &str,
    color: Color,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", color),
        (banner, color),
        ("╚══════════════════╝", color),
        (&score_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = vp.cols / 2;
    let start_row = (vp.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, line_color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*line_color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
