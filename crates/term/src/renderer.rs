//! TerminalRenderer: flushes a screen to a real terminal.
//!
//! Every frame is a full redraw: cursor home, then each row with its styles
//! switched on and reset before the line break.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, Rgb, Screen};

/// Owns the terminal while the game runs.
///
/// `enter` switches to raw mode on the alternate screen; `exit` (or drop)
/// puts everything back.
pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
    active: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;

        let setup = (|| -> Result<()> {
            self.buf.clear();
            self.buf.queue(terminal::EnterAlternateScreen)?;
            self.buf.queue(cursor::Hide)?;
            self.buf.queue(terminal::DisableLineWrap)?;
            self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
            self.flush_buf()
        })();

        if let Err(e) = setup {
            // Best effort; the setup error is the one worth reporting.
            let _ = self.exit();
            return Err(e);
        }
        Ok(())
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let screen = (|| -> Result<()> {
            self.buf.clear();
            self.buf.queue(ResetColor)?;
            self.buf.queue(SetAttribute(Attribute::Reset))?;
            self.buf.queue(terminal::EnableLineWrap)?;
            self.buf.queue(cursor::Show)?;
            self.buf.queue(terminal::LeaveAlternateScreen)?;
            self.flush_buf()
        })();
        // Raw mode must come off even if the writes failed.
        let raw = terminal::disable_raw_mode();

        screen?;
        raw?;
        Ok(())
    }

    /// Current terminal size in cells
    pub fn size(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    pub fn draw(&mut self, screen: &Screen) -> Result<()> {
        self.buf.clear();
        encode_frame_into(screen, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

impl Screen {
    /// Write the whole buffer to `out` in one flush.
    pub fn display(&self, out: &mut impl Write) -> Result<()> {
        let mut buf = Vec::with_capacity(self.cells().len() * 4);
        encode_frame_into(self, &mut buf)?;
        out.write_all(&buf)?;
        out.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
/// Plain cells emit no escapes; styled runs are reset before each line break.
pub fn encode_frame_into(screen: &Screen, out: &mut Vec<u8>) -> Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;

    for y in 0..screen.height() {
        let mut current = CellStyle::PLAIN;
        for x in 0..screen.width() {
            let cell = screen.get(x, y).unwrap_or_default();
            if cell.style != current {
                if !current.is_plain() {
                    reset_style_into(out)?;
                }
                if !cell.style.is_plain() {
                    apply_style_into(out, cell.style)?;
                }
                current = cell.style;
            }
            out.queue(Print(cell.ch))?;
        }
        if !current.is_plain() {
            reset_style_into(out)?;
        }
        if y + 1 < screen.height() {
            out.queue(Print("\r\n"))?;
        }
    }

    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    if let Some(fg) = style.fg {
        out.queue(SetForegroundColor(rgb_to_color(fg)))?;
    }
    if let Some(bg) = style.bg {
        out.queue(SetBackgroundColor(rgb_to_color(bg)))?;
    }
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn reset_style_into(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
