//! Drawable grids of symbol ids and the textures that give them glyphs.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::fb::CellStyle;

pub(crate) const BORDER_TL: char = '┌';
pub(crate) const BORDER_TR: char = '┐';
pub(crate) const BORDER_BL: char = '└';
pub(crate) const BORDER_BR: char = '┘';
pub(crate) const BORDER_H: char = '─';
pub(crate) const BORDER_V: char = '│';

/// Text and style for one logical cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    text: String,
    style: CellStyle,
}

impl Glyph {
    pub fn new(text: impl Into<String>, style: CellStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, CellStyle::PLAIN)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> CellStyle {
        self.style
    }

    /// Width in terminal columns
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// Mapping from symbol id to glyph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Texture {
    glyphs: HashMap<u32, Glyph>,
}

impl Texture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: u32, glyph: Glyph) -> Self {
        self.insert(id, glyph);
        self
    }

    pub fn insert(&mut self, id: u32, glyph: Glyph) {
        self.glyphs.insert(id, glyph);
    }

    pub fn get(&self, id: u32) -> Option<&Glyph> {
        self.glyphs.get(&id)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// A drawable: a row-major matrix of symbol ids plus how to rasterize it.
///
/// Each logical cell advances `pixel_size` columns. Rows may be ragged;
/// width is taken from the longest row.
#[derive(Debug, Clone)]
pub struct Object<'a> {
    matrix: Vec<Vec<u32>>,
    texture: &'a Texture,
    pixel_size: u16,
    border: bool,
    border_style: CellStyle,
}

impl<'a> Object<'a> {
    pub fn new(matrix: Vec<Vec<u32>>, texture: &'a Texture) -> Self {
        Self {
            matrix,
            texture,
            pixel_size: 1,
            border: false,
            border_style: CellStyle::PLAIN,
        }
    }

    /// Build from rows of any integer-like cell type
    pub fn from_rows<I, R, T>(rows: I, texture: &'a Texture) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = T>,
        T: Into<u32>,
    {
        let matrix = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self::new(matrix, texture)
    }

    /// Single-row object of one symbol; with an empty texture this prints a number
    pub fn number(value: u32, texture: &'a Texture) -> Self {
        Self::new(vec![vec![value]], texture)
    }

    pub fn with_pixel_size(mut self, pixel_size: u16) -> Self {
        self.pixel_size = pixel_size.max(1);
        self
    }

    pub fn with_border(mut self) -> Self {
        self.border = true;
        self
    }

    pub fn border_style(&self) -> CellStyle {
        self.border_style
    }

    pub fn with_border_style(mut self, style: CellStyle) -> Self {
        self.border_style = style;
        self
    }

    pub fn matrix(&self) -> &[Vec<u32>] {
        &self.matrix
    }

    pub fn border(&self) -> bool {
        self.border
    }

    /// Terminal columns per logical cell
    pub fn pixel_size(&self) -> u16 {
        self.pixel_size
    }

    /// Logical width (longest row)
    pub fn width(&self) -> usize {
        self.matrix.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Logical height
    pub fn height(&self) -> usize {
        self.matrix.len()
    }

    /// Outer size in terminal cells, border included
    pub fn footprint(&self) -> (usize, usize) {
        let b = if self.border { 2 } else { 0 };
        (self.width() * self.pixel_size as usize + b, self.height() + b)
    }

    /// Glyph for `id`; unmapped ids render as their decimal value.
    pub fn glyph(&self, id: u32) -> Cow<'a, Glyph> {
        match self.texture.get(id) {
            Some(glyph) => Cow::Borrowed(glyph),
            None => Cow::Owned(Glyph::plain(id.to_string())),
        }
    }
}
