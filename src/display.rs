//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game.  No game logic is performed; this module only translates the
//! manager's query surface into terminal commands, scaling playfield
//! coordinates onto the character grid.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_invaders::entities::{Bullet, BulletOwner, GameStatus, Ship, Tier};
use space_invaders::high_scores::HighScoreBoard;
use space_invaders::GameManager;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_WAVE: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_ENEMY_LEVEL1: Color = Color::Green;
const C_ENEMY_LEVEL2: Color = Color::Yellow;
const C_ENEMY_LEVEL3: Color = Color::Red;
const C_BONUS: Color = Color::Magenta;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Maps playfield units onto the terminal rows/columns inside the border.
struct Viewport {
    cols: u16,
    rows: u16,
    scale_x: f64,
    scale_y: f64,
}

impl Viewport {
    fn new(game: &GameManager, cols: u16, rows: u16) -> Self {
        let inner_cols = cols.saturating_sub(2).max(1);
        let inner_rows = rows.saturating_sub(4).max(1);
        Viewport {
            cols,
            rows,
            scale_x: f64::from(inner_cols) / game.background_width(),
            scale_y: f64::from(inner_rows) / game.background_height(),
        }
    }

    /// Terminal cell for a playfield point, or `None` when it falls outside
    /// the bordered area.
    fn cell(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        let col = (x * self.scale_x).floor() + 1.0;
        let row = (y * self.scale_y).floor() + 2.0;
        let max_col = f64::from(self.cols.saturating_sub(2));
        let max_row = f64::from(self.rows.saturating_sub(3));
        if col < 1.0 || col > max_col || row < 2.0 || row > max_row {
            return None;
        }
        Some((col as u16, row as u16))
    }

    fn ship_cell(&self, ship: &Ship) -> Option<(u16, u16)> {
        self.cell(ship.center_x(), ship.y + ship.height() / 2.0)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    game: &GameManager,
    scores: &HighScoreBoard,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(game, cols, rows);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, game, &view)?;

    for enemy in game.fleet().all_ships() {
        draw_ship(out, enemy, &view)?;
    }
    if let Some(bonus) = game.bonus_ship() {
        draw_ship(out, bonus, &view)?;
    }
    for bullet in game.player_ammo().iter().chain(game.enemy_ammo()) {
        draw_bullet(out, bullet, &view)?;
    }
    if game.player_ship().active {
        draw_ship(out, game.player_ship(), &view)?;
    }

    draw_controls_hint(out, &view)?;

    if game.status().is_over() {
        draw_game_over(out, game, scores, &view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

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

fn draw_hud<W: Write>(out: &mut W, game: &GameManager, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>7}", game.game_score())))?;

    let wave_str = format!("[ WAVE {} / {} ]", game.wave(), game.config().wave_cap);
    let wx = (view.cols / 2).saturating_sub(wave_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(wx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_WAVE))?;
    out.queue(Print(&wave_str))?;

    let hearts: String = "♥".repeat(game.lives_count() as usize);
    let lives_str = format!("Lives:{}", hearts);
    let lx = view
        .cols
        .saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_ship<W: Write>(out: &mut W, ship: &Ship, view: &Viewport) -> std::io::Result<()> {
    let Some((col, row)) = view.ship_cell(ship) else {
        return Ok(());
    };
    let (sprite, color) = match ship.kind().tier() {
        Tier::Player => ("/▲\\", C_PLAYER),
        Tier::Level1 => ("«▼»", C_ENEMY_LEVEL1),
        Tier::Level2 => ("(◎)", C_ENEMY_LEVEL2),
        Tier::Level3 | Tier::Default => ("╚█╝", C_ENEMY_LEVEL3),
        Tier::Bonus => ("<◉◉>", C_BONUS),
    };
    let half = sprite.chars().count() as u16 / 2;
    out.queue(cursor::MoveTo(col.saturating_sub(half).max(1), row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, bullet: &Bullet, view: &Viewport) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(bullet.x, bullet.y) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(col, row))?;
    match bullet.owner {
        BulletOwner::Player => {
            out.queue(style::SetForegroundColor(C_BULLET_PLAYER))?;
            out.queue(Print("║"))?;
        }
        BulletOwner::Enemy => {
            out.queue(style::SetForegroundColor(C_BULLET_ENEMY))?;
            out.queue(Print("↓"))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    game: &GameManager,
    scores: &HighScoreBoard,
    view: &Viewport,
) -> std::io::Result<()> {
    let (banner, banner_color) = match game.status() {
        GameStatus::Victory => ("║    YOU  WIN!       ║", Color::Green),
        _ => ("║    GAME  OVER      ║", Color::Red),
    };
    let mut lines: Vec<(String, Color)> = vec![
        ("╔════════════════════╗".to_string(), banner_color),
        (banner.to_string(), banner_color),
        ("╚════════════════════╝".to_string(), banner_color),
        (format!("Final Score: {:>7}", game.game_score()), Color::Yellow),
        (String::new(), Color::White),
        ("── High Scores ──".to_string(), Color::Cyan),
    ];
    for (rank, entry) in scores.entries().iter().rev().enumerate() {
        lines.push((
            format!("{:>2}. {:<12} {:>7}  wave {}", rank + 1, entry.name, entry.score, entry.level),
            Color::DarkGrey,
        ));
    }
    lines.push((String::new(), Color::White));
    lines.push(("R - Play Again  Q - Quit".to_string(), Color::White));

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }

    Ok(())
}
