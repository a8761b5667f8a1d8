//! Board colors and the textures built from them.

use crate::fb::{CellStyle, Rgb};
use crate::object::{Glyph, Texture};
use crate::types::{Cell, COLOR_COUNT, EMPTY};

/// Color table indexed by color id (1..=8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; COLOR_COUNT as usize],
    empty: CellStyle,
    border: CellStyle,
    label: CellStyle,
    value: CellStyle,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [
                Rgb::new(220, 60, 60),   // red
                Rgb::new(235, 205, 70),  // yellow
                Rgb::new(90, 200, 100),  // green
                Rgb::new(80, 205, 220),  // cyan
                Rgb::new(70, 110, 225),  // blue
                Rgb::new(200, 95, 210),  // magenta
                Rgb::new(200, 200, 200), // light gray
                Rgb::new(128, 128, 128), // gray
            ],
            empty: CellStyle {
                dim: true,
                ..CellStyle::PLAIN
            },
            border: CellStyle::fg(Rgb::new(200, 200, 200)),
            label: CellStyle {
                bold: true,
                ..CellStyle::PLAIN
            },
            value: CellStyle::PLAIN,
        }
    }
}

impl Palette {
    /// Background color for a color id, `None` for empty or unknown ids
    pub fn color(&self, id: Cell) -> Option<Rgb> {
        if id == EMPTY {
            return None;
        }
        self.colors.get(id as usize - 1).copied()
    }

    pub fn border(&self) -> CellStyle {
        self.border
    }

    pub fn label(&self) -> CellStyle {
        self.label
    }

    pub fn value(&self) -> CellStyle {
        self.value
    }

    /// Texture for board cells `pixel_size` columns wide.
    ///
    /// Empty cells are a dim dot padded with spaces; colored cells are
    /// blank with the color as background.
    pub fn board_texture(&self, pixel_size: u16) -> Texture {
        let px = pixel_size.max(1) as usize;
        let mut empty = String::with_capacity(px);
        empty.push('.');
        empty.push_str(&" ".repeat(px - 1));

        let mut texture = Texture::new().with(EMPTY as u32, Glyph::new(empty, self.empty));
        let block = " ".repeat(px);
        for (i, &rgb) in self.colors.iter().enumerate() {
            texture.insert(i as u32 + 1, Glyph::new(block.clone(), CellStyle::bg(rgb)));
        }
        texture
    }

    /// Like [`Palette::board_texture`] but empty cells are blank, for previews
    pub fn preview_texture(&self, pixel_size: u16) -> Texture {
        let mut texture = self.board_texture(pixel_size);
        texture.insert(EMPTY as u32, Glyph::plain(" ".repeat(pixel_size.max(1) as usize)));
        texture
    }
}
