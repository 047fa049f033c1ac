/// Terminal rendering: the crossterm implementation of `Canvas`.
///
/// World coordinates are pixels; the terminal is a grid of cells each
/// covering `cell_w` x `cell_h` pixels.  Anything outside the viewport or the
/// real terminal is clipped.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal,
    QueueableCommand,
};
use journey_to_bennu::render::{Canvas, Font, Rect};
use journey_to_bennu::{GameConfig, Sprite};

const C_BORDER: Color = Color::DarkBlue;

pub struct TerminalCanvas<W: Write> {
    out: W,
    cell_w: i32,
    cell_h: i32,
    /// Viewport size in cells, clipped to the terminal.
    cols: i32,
    rows: i32,
    /// Whether there is room to frame the viewport on its right and bottom.
    framed: (bool, bool),
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, config: &GameConfig) -> io::Result<Self> {
        let mut canvas = Self {
            out,
            cell_w: config.cell_width,
            cell_h: config.cell_height,
            cols: 0,
            rows: 0,
            framed: (false, false),
        };
        canvas.resize(config)?;
        Ok(canvas)
    }

    /// Re-read the terminal size after a resize event.
    pub fn resize(&mut self, config: &GameConfig) -> io::Result<()> {
        let (term_cols, term_rows) = terminal::size()?;
        let (term_cols, term_rows) = (i32::from(term_cols), i32::from(term_rows));
        let want_cols = config.width / config.cell_width;
        let want_rows = config.height / config.cell_height;
        self.cols = want_cols.min(term_cols);
        self.rows = want_rows.min(term_rows);
        self.framed = (term_cols > want_cols, term_rows > want_rows);
        Ok(())
    }

    fn col(&self, x: i32) -> i32 {
        x.div_euclid(self.cell_w)
    }

    fn row(&self, y: i32) -> i32 {
        y.div_euclid(self.cell_h)
    }

    fn visible(&self, col: i32, row: i32) -> bool {
        (0..self.cols).contains(&col) && (0..self.rows).contains(&row)
    }

    /// Print `text` starting at a cell, dropping whatever falls off-screen.
    fn print_clipped(&mut self, col: i32, row: i32, text: &str) -> io::Result<()> {
        if !(0..self.rows).contains(&row) {
            return Ok(());
        }
        let skip = (-col).max(0) as usize;
        let start = col.max(0);
        let room = (self.cols - start).max(0) as usize;
        let visible: String = text.chars().skip(skip).take(room).collect();
        if visible.is_empty() {
            return Ok(());
        }
        self.out.queue(cursor::MoveTo(start as u16, row as u16))?;
        self.out.queue(Print(visible))?;
        Ok(())
    }

    fn draw_border(&mut self) -> io::Result<()> {
        self.out.queue(style::SetForegroundColor(C_BORDER))?;
        let (right, bottom) = self.framed;
        if right {
            for row in 0..self.rows {
                self.out.queue(cursor::MoveTo(self.cols as u16, row as u16))?;
                self.out.queue(Print("│"))?;
            }
        }
        if bottom {
            self.out.queue(cursor::MoveTo(0, self.rows as u16))?;
            self.out.queue(Print("─".repeat(self.cols as usize)))?;
            if right {
                self.out.queue(Print("┘"))?;
            }
        }
        Ok(())
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn clear(&mut self) -> io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border()
    }

    fn draw_sprite(&mut self, sprite: &Sprite, x: i32, y: i32) -> io::Result<()> {
        let (col0, row0) = (self.col(x), self.row(y));
        self.out.queue(style::SetForegroundColor(sprite.color))?;
        for (dy, line) in sprite.art.iter().enumerate() {
            let row = row0 + dy as i32;
            for (dx, glyph) in line.chars().enumerate() {
                let col = col0 + dx as i32;
                // Spaces are transparent
                if glyph == ' ' || !self.visible(col, row) {
                    continue;
                }
                self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
                self.out.queue(Print(glyph))?;
            }
        }
        Ok(())
    }

    fn fill_rect(&mut self, color: Color, rect: Rect) -> io::Result<()> {
        if rect.width <= 0 || rect.height <= 0 {
            return Ok(());
        }
        let (col0, col1) = (self.col(rect.x), self.col(rect.x + rect.width));
        let row0 = self.row(rect.y);
        // Anything thinner than a cell still gets one row
        let row1 = self.row(rect.y + rect.height - 1) + 1;
        if col1 <= col0 {
            return Ok(());
        }
        let span = " ".repeat((col1 - col0) as usize);
        self.out.queue(style::SetBackgroundColor(color))?;
        for row in row0..row1 {
            self.print_clipped(col0, row, &span)?;
        }
        self.out.queue(style::SetBackgroundColor(Color::Reset))?;
        Ok(())
    }

    fn draw_text(&mut self, text: &str, font: Font, color: Color, x: i32, y: i32) -> io::Result<()> {
        let (col, row) = (self.col(x), self.row(y));
        self.out.queue(style::SetForegroundColor(color))?;
        if font == Font::Banner {
            self.out.queue(style::SetAttribute(Attribute::Bold))?;
        }
        self.print_clipped(col, row, text)?;
        self.out.queue(style::SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    fn text_width(&self, text: &str, _font: Font) -> i32 {
        text.chars().count() as i32 * self.cell_w
    }

    fn present(&mut self) -> io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.max(0) as u16))?;
        self.out.flush()
    }
}
