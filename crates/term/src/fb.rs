//! Framebuffer and style types for terminal rendering.
//!
//! [`Screen`] is a fixed-size grid of styled character cells. Drawables are
//! composited into it with [`Screen::draw`]; nothing here performs I/O.

use thiserror::Error;

use crate::object::{Object, BORDER_BL, BORDER_BR, BORDER_H, BORDER_TL, BORDER_TR, BORDER_V};

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-cell styling. `None` colors use the terminal's own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const PLAIN: CellStyle = CellStyle {
        fg: None,
        bg: None,
        bold: false,
        dim: false,
    };

    pub const fn bg(color: Rgb) -> Self {
        Self {
            bg: Some(color),
            ..Self::PLAIN
        }
    }

    pub const fn fg(color: Rgb) -> Self {
        Self {
            fg: Some(color),
            ..Self::PLAIN
        }
    }

    /// True if the cell needs no escape sequences at all
    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }

    pub fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::PLAIN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("write at column {x}, row {y} is outside the {width}x{height} screen")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: u16,
        height: u16,
    },
}

/// Fixed-size frame buffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    width: u16,
    height: u16,
    fill: char,
    cells: Vec<Cell>,
}

impl Screen {
    pub fn new(width: u16, height: u16, fill: char) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            fill,
            cells: vec![CellStyle::PLAIN.into_cell(fill); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        Some(y * (self.width as usize) + x)
    }

    fn check(&self, x: usize, y: usize) -> Result<usize, DrawError> {
        self.idx(x, y).ok_or(DrawError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x as usize, y as usize).map(|i| self.cells[i])
    }

    /// One row as plain text (styles dropped)
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|cell| cell.ch)
            .collect()
    }

    /// Reset every cell to the fill character
    pub fn clear(&mut self) {
        self.cells.fill(CellStyle::PLAIN.into_cell(self.fill));
    }

    fn put(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), DrawError> {
        let i = self.check(x, y)?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Write a string starting at `(x, y)`; nothing is written if it does not fit.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) -> Result<(), DrawError> {
        let (x, y) = (x as usize, y as usize);
        let len = s.chars().count();
        if len > 0 {
            self.check(x + len - 1, y)?;
        }
        for (dx, ch) in s.chars().enumerate() {
            self.put(x + dx, y, style.into_cell(ch))?;
        }
        Ok(())
    }

    /// Composite `object` with its top-left corner at `(x, y)`.
    ///
    /// Logical cell `(i, j)` lands at column `x + i * pixel_size + border`,
    /// row `y + j + border`. A bordered object also gets a box one cell
    /// outside the blitted region. The whole footprint is checked first, so
    /// an object that does not fit leaves the buffer untouched.
    pub fn draw(&mut self, x: u16, y: u16, object: &Object<'_>) -> Result<(), DrawError> {
        let (x0, y0) = (x as usize, y as usize);
        let b = object.border() as usize;
        let px = object.pixel_size() as usize;

        // Pass 1: validate.
        for (j, row) in object.matrix().iter().enumerate() {
            for (i, &id) in row.iter().enumerate() {
                let width = object.glyph(id).width();
                if width > 0 {
                    self.check(x0 + i * px + b + width - 1, y0 + j + b)?;
                }
            }
        }
        if object.border() {
            self.check(x0 + object.width() * px + 1, y0 + object.height() + 1)?;
        }

        // Pass 2: write.
        for (j, row) in object.matrix().iter().enumerate() {
            for (i, &id) in row.iter().enumerate() {
                let glyph = object.glyph(id);
                let col = x0 + i * px + b;
                for (k, ch) in glyph.text().chars().enumerate() {
                    self.put(col + k, y0 + j + b, glyph.style().into_cell(ch))?;
                }
            }
        }
        if object.border() {
            self.frame(x0, y0, object.width() * px + 2, object.height() + 2, object.border_style())?;
        }

        Ok(())
    }

    /// Box-drawing frame with outer size `w x h` at `(x, y)`
    fn frame(&mut self, x: usize, y: usize, w: usize, h: usize, style: CellStyle) -> Result<(), DrawError> {
        let (right, bottom) = (x + w - 1, y + h - 1);
        for cx in x + 1..right {
            self.put(cx, y, style.into_cell(BORDER_H))?;
            self.put(cx, bottom, style.into_cell(BORDER_H))?;
        }
        for cy in y + 1..bottom {
            self.put(x, cy, style.into_cell(BORDER_V))?;
            self.put(right, cy, style.into_cell(BORDER_V))?;
        }
        self.put(x, y, style.into_cell(BORDER_TL))?;
        self.put(right, y, style.into_cell(BORDER_TR))?;
        self.put(x, bottom, style.into_cell(BORDER_BL))?;
        self.put(right, bottom, style.into_cell(BORDER_BR))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Glyph, Texture};

    #[test]
    fn test_new_screen_is_filled() {
        let screen = Screen::new(3, 2, '.');
        assert_eq!(screen.row_text(0), "...");
        assert_eq!(screen.row_text(1), "...");
        assert_eq!(screen.get(3, 0), None);
    }

    #[test]
    fn test_put_str_out_of_range_is_reported_and_atomic() {
        let mut screen = Screen::new(4, 1, ' ');
        let err = screen.put_str(2, 0, "abc", CellStyle::PLAIN).unwrap_err();
        assert_eq!(
            err,
            DrawError::OutOfBounds {
                x: 4,
                y: 0,
                width: 4,
                height: 1
            }
        );
        assert_eq!(screen.row_text(0), "    ");
    }

    #[test]
    fn test_draw_without_border() {
        let texture = Texture::new()
            .with(0, Glyph::plain(".."))
            .with(1, Glyph::plain("##"));
        let object = Object::new(vec![vec![0, 1], vec![1, 0]], &texture).with_pixel_size(2);

        let mut screen = Screen::new(6, 3, ' ');
        screen.draw(1, 1, &object).unwrap();
        assert_eq!(screen.row_text(0), "      ");
        assert_eq!(screen.row_text(1), " ..## ");
        assert_eq!(screen.row_text(2), " ##.. ");
    }

    #[test]
    fn test_unmapped_id_renders_decimal() {
        let texture = Texture::new();
        let object = Object::new(vec![vec![1200]], &texture);
        let mut screen = Screen::new(6, 1, ' ');
        screen.draw(0, 0, &object).unwrap();
        assert_eq!(screen.row_text(0), "1200  ");
    }

    #[test]
    fn test_glyph_style_is_kept() {
        let red = CellStyle::bg(Rgb::new(255, 0, 0));
        let texture = Texture::new().with(1, Glyph::new("  ", red));
        let object = Object::new(vec![vec![1]], &texture).with_pixel_size(2);
        let mut screen = Screen::new(2, 1, '.');
        screen.draw(0, 0, &object).unwrap();
        assert_eq!(screen.get(0, 0), Some(red.into_cell(' ')));
        assert_eq!(screen.get(1, 0), Some(red.into_cell(' ')));
    }

    #[test]
    fn test_border_overflow_reports_corner() {
        let texture = Texture::new().with(0, Glyph::plain("."));
        let object = Object::new(vec![vec![0, 0]], &texture).with_border();
        // Outer box is 4x3; only 3 rows are available from y=1.
        let mut screen = Screen::new(10, 3, ' ');
        let err = screen.draw(0, 1, &object).unwrap_err();
        assert_eq!(
            err,
            DrawError::OutOfBounds {
                x: 3,
                y: 3,
                width: 10,
                height: 3
            }
        );
        assert!(screen.cells().iter().all(|c| c.ch == ' '));
    }

    #[test]
    fn test_clear_restores_fill() {
        let mut screen = Screen::new(2, 1, '~');
        screen.put_str(0, 0, "ab", CellStyle::PLAIN).unwrap();
        screen.clear();
        assert_eq!(screen.row_text(0), "~~");
    }
}
