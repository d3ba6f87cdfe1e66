/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// Screens draw onto a fixed virtual cell grid every tick:
///   1. `begin()` blanks the front buffer
///   2. `put()` / `text()` / `text_centered()` fill it
///   3. `present()` diffs front against back, emits terminal commands only
///      for changed cells, flushes once, swaps buffers
///
/// Diffing keeps a 60 fps full redraw flicker-free. The renderer has no
/// knowledge of game rules; screens tell it exactly what to show.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

/// Virtual grid size. Small enough for an 80x25 terminal.
pub const VIEW_W: i32 = 64;
pub const VIEW_H: i32 = 26;

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
}

const BLANK: Cell = Cell { ch: ' ', fg: Color::White };
/// Sentinel that differs from every real cell, forcing a full first paint.
const INVALID: Cell = Cell { ch: '\0', fg: Color::Magenta };

pub struct Renderer {
    out: BufWriter<Stdout>,
    front: Vec<Cell>,
    back: Vec<Cell>,
}

impl Renderer {
    pub fn new() -> Self {
        let cells = (VIEW_W * VIEW_H) as usize;
        Renderer {
            out: BufWriter::new(io::stdout()),
            front: vec![BLANK; cells],
            back: vec![INVALID; cells],
        }
    }

    /// Enter raw mode and the alternate screen. Must be paired with
    /// `cleanup()` before the process exits.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.out, ResetColor, Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Start a fresh frame.
    pub fn begin(&mut self) {
        self.front.fill(BLANK);
    }

    pub fn put(&mut self, x: i32, y: i32, ch: char, fg: Color) {
        if x < 0 || y < 0 || x >= VIEW_W || y >= VIEW_H {
            return;
        }
        self.front[(y * VIEW_W + x) as usize] = Cell { ch, fg };
    }

    pub fn text(&mut self, x: i32, y: i32, s: &str, fg: Color) {
        for (i, ch) in s.chars().enumerate() {
            self.put(x + i as i32, y, ch, fg);
        }
    }

    pub fn text_centered(&mut self, y: i32, s: &str, fg: Color) {
        let x = (VIEW_W - s.chars().count() as i32) / 2;
        self.text(x, y, s, fg);
    }

    /// A vertical menu with a selection marker, centered horizontally.
    pub fn menu(&mut self, top: i32, items: &[&str], selected: usize) {
        for (i, item) in items.iter().enumerate() {
            let (marker, color) = if i == selected {
                ("> ", Color::Green)
            } else {
                ("  ", Color::Grey)
            };
            let line = format!("{marker}{item}");
            self.text_centered(top + 2 * i as i32, &line, color);
        }
    }

    /// Emit only the cells that changed since the previous frame.
    pub fn present(&mut self) -> io::Result<()> {
        let mut fg = Color::White;
        queue!(self.out, SetForegroundColor(fg))?;
        for y in 0..VIEW_H {
            for x in 0..VIEW_W {
                let idx = (y * VIEW_W + x) as usize;
                let cell = self.front[idx];
                if cell == self.back[idx] {
                    continue;
                }
                queue!(self.out, MoveTo(x as u16, y as u16))?;
                if cell.fg != fg {
                    queue!(self.out, SetForegroundColor(cell.fg))?;
                    fg = cell.fg;
                }
                queue!(self.out, Print(cell.ch))?;
            }
        }
        self.out.flush()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }
}
