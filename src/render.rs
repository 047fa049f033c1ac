/// Drawing layer: what to paint and where, in world pixels.
///
/// The game never talks to a terminal directly: it paints through the
/// `Canvas` trait, which the binary implements with crossterm.  No game
/// logic is performed here; this module only translates state into draw
/// calls.

use std::io;

use crossterm::style::Color;

use crate::assets::{GameContext, Sprite};
use crate::compute::health_bar;
use crate::config::GameConfig;
use crate::entities::{Actor, GameSession};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::White;
const C_BANNER: Color = Color::White;
const C_HEALTH_EMPTY: Color = Color::Red;
const C_HEALTH_FULL: Color = Color::Green;

pub const TITLE: &str = "JOURNEY TO BENNU";
pub const START_PROMPT: &str = "Press the mouse/trackpad to begin...";
pub const LOST_BANNER: &str = "MISSION FAILED! TRY AGAIN!";
pub const CONTROLS_HINT: &str = "Arrows / WASD : Move   SPACE : Shoot   Q : Quit";

/// Row (world y) that centred banners sit on.
const BANNER_Y: i32 = 350;
/// Inset of HUD text from the viewport corners.
const HUD_INSET: i32 = 10;

// ── Drawing interface ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    Hud,
    Banner,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

pub trait Canvas {
    /// Wipe the previous frame.
    fn clear(&mut self) -> io::Result<()>;
    fn draw_sprite(&mut self, sprite: &Sprite, x: i32, y: i32) -> io::Result<()>;
    fn fill_rect(&mut self, color: Color, rect: Rect) -> io::Result<()>;
    fn draw_text(&mut self, text: &str, font: Font, color: Color, x: i32, y: i32) -> io::Result<()>;
    /// Rendered width of `text` in world pixels.
    fn text_width(&self, text: &str, font: Font) -> i32;
    /// Flush everything drawn since `clear`.
    fn present(&mut self) -> io::Result<()>;
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Paint the actor's sprite, then each of its live shots.
pub fn draw_actor<C: Canvas>(canvas: &mut C, actor: &Actor) -> io::Result<()> {
    canvas.draw_sprite(&actor.sprite, actor.x, actor.y)?;
    for projectile in &actor.projectiles {
        canvas.draw_sprite(&projectile.sprite, projectile.x, projectile.y)?;
    }
    Ok(())
}

/// Paint the player and the two-segment health bar beneath it.
pub fn draw_player<C: Canvas>(canvas: &mut C, player: &Actor, config: &GameConfig) -> io::Result<()> {
    draw_actor(canvas, player)?;

    let bar = health_bar(player, config);
    canvas.fill_rect(
        C_HEALTH_EMPTY,
        Rect { x: bar.x, y: bar.y, width: bar.width, height: bar.thickness },
    )?;
    canvas.fill_rect(
        C_HEALTH_FULL,
        Rect { x: bar.x, y: bar.y, width: bar.fill, height: bar.thickness },
    )?;
    Ok(())
}

fn draw_centered<C: Canvas>(canvas: &mut C, text: &str, font: Font, y: i32, width: i32) -> io::Result<()> {
    let x = width / 2 - canvas.text_width(text, font) / 2;
    canvas.draw_text(text, font, C_BANNER, x, y)
}

// ── Frames ────────────────────────────────────────────────────────────────────

/// Render one complete gameplay frame.
pub fn render_frame<C: Canvas>(canvas: &mut C, state: &GameSession, ctx: &GameContext) -> io::Result<()> {
    let config = &ctx.config;
    canvas.clear()?;

    // HUD: lives top-left, level top-right, score centred
    let lives = format!("Lives: {}", state.lives);
    let level = format!("Level: {}", state.level);
    let score = format!("Score: {}", state.score);
    canvas.draw_text(&lives, Font::Hud, C_HUD, HUD_INSET, HUD_INSET)?;
    let level_x = config.width - canvas.text_width(&level, Font::Hud) - HUD_INSET;
    canvas.draw_text(&level, Font::Hud, C_HUD, level_x, HUD_INSET)?;
    let score_x = config.width / 2 - canvas.text_width(&score, Font::Hud) / 2;
    canvas.draw_text(&score, Font::Hud, C_HUD, score_x, HUD_INSET)?;

    for obstacle in &state.obstacles {
        draw_actor(canvas, obstacle)?;
    }
    draw_player(canvas, &state.player, config)?;

    if state.is_lost() {
        draw_centered(canvas, LOST_BANNER, Font::Banner, BANNER_Y, config.width)?;
    }

    canvas.present()
}

/// Render the title screen.
pub fn render_menu<C: Canvas>(canvas: &mut C, ctx: &GameContext) -> io::Result<()> {
    let width = ctx.config.width;
    canvas.clear()?;
    draw_centered(canvas, TITLE, Font::Banner, BANNER_Y - 4 * ctx.config.cell_height, width)?;
    draw_centered(canvas, START_PROMPT, Font::Banner, BANNER_Y, width)?;
    draw_centered(canvas, CONTROLS_HINT, Font::Hud, BANNER_Y + 3 * ctx.config.cell_height, width)?;
    canvas.present()
}
