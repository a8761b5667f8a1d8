//! GameView: maps `core::GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameState;
use crate::fb::{DrawError, Screen};
use crate::object::{Object, Texture};
use crate::palette::Palette;

/// Preview box size in logical cells; every shape fits inside.
const PREVIEW_W: usize = 4;
const PREVIEW_H: usize = 3;

/// Widest side panel line ("GAME OVER", or a 10-digit score)
const PANEL_W: u16 = 10;

/// Lays out the board, next-piece preview and score panel.
///
/// Textures are built once at construction and reused every frame.
#[derive(Debug, Clone)]
pub struct GameView {
    palette: Palette,
    board_texture: Texture,
    preview_texture: Texture,
    text_texture: Texture,
    pixel_size: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2 columns per cell compensates for the usual glyph aspect ratio.
        Self::new(Palette::default(), 2)
    }
}

impl GameView {
    pub fn new(palette: Palette, pixel_size: u16) -> Self {
        let pixel_size = pixel_size.max(1);
        Self {
            board_texture: palette.board_texture(pixel_size),
            preview_texture: palette.preview_texture(pixel_size),
            text_texture: Texture::new(),
            palette,
            pixel_size,
        }
    }

    pub fn pixel_size(&self) -> u16 {
        self.pixel_size
    }

    // Sizes saturate at u16::MAX; no terminal that large exists, so draw reports it.
    fn board_frame(&self, board_w: usize, board_h: usize) -> (u16, u16) {
        let cols = u16::try_from(board_w).unwrap_or(u16::MAX);
        let rows = u16::try_from(board_h).unwrap_or(u16::MAX);
        (
            cols.saturating_mul(self.pixel_size).saturating_add(2),
            rows.saturating_add(2),
        )
    }

    fn panel_x(&self, board_w: usize) -> u16 {
        self.board_frame(board_w, 0).0.saturating_add(2)
    }

    /// Smallest screen that holds the whole view for a board of this size
    pub fn required_size(&self, board_w: usize, board_h: usize) -> (u16, u16) {
        let (frame_w, frame_h) = self.board_frame(board_w, board_h);
        let preview_w = (PREVIEW_W as u16).saturating_mul(self.pixel_size).saturating_add(2);
        let width = self.panel_x(board_w).saturating_add(preview_w.max(PANEL_W));
        let height = frame_h.max(PANEL_ROWS);
        (width.max(frame_w), height)
    }

    /// Compose one frame.
    ///
    /// The board sits at the top-left with the panel to its right:
    /// NEXT and its preview box, then SCORE, LINES and a status line.
    pub fn render_into(&self, state: &GameState, paused: bool, screen: &mut Screen) -> Result<(), DrawError> {
        screen.clear();

        let board = state.board();
        let rows = board.rows().map(|row| row.iter().copied());
        let board_obj = Object::from_rows(rows, &self.board_texture)
            .with_pixel_size(self.pixel_size)
            .with_border()
            .with_border_style(self.palette.border());
        screen.draw(0, 0, &board_obj)?;

        let x = self.panel_x(board.width());
        let label = self.palette.label();

        screen.put_str(x, ROW_NEXT, "NEXT", label)?;
        let preview = Object::new(preview_matrix(state), &self.preview_texture)
            .with_pixel_size(self.pixel_size)
            .with_border()
            .with_border_style(self.palette.border());
        screen.draw(x, ROW_NEXT + 1, &preview)?;

        screen.put_str(x, ROW_SCORE, "SCORE", label)?;
        screen.draw(x, ROW_SCORE + 1, &Object::number(state.score(), &self.text_texture))?;

        screen.put_str(x, ROW_LINES, "LINES", label)?;
        screen.draw(x, ROW_LINES + 1, &Object::number(state.lines(), &self.text_texture))?;

        let status = if state.game_over() {
            Some("GAME OVER")
        } else if paused {
            Some("PAUSED")
        } else {
            None
        };
        if let Some(text) = status {
            screen.put_str(x, ROW_STATUS, text, label)?;
        }

        Ok(())
    }
}

const ROW_NEXT: u16 = 0;
const ROW_SCORE: u16 = ROW_NEXT + 1 + PREVIEW_H as u16 + 2 + 1;
const ROW_LINES: u16 = ROW_SCORE + 3;
const ROW_STATUS: u16 = ROW_LINES + 3;
const PANEL_ROWS: u16 = ROW_STATUS + 1;

/// The next piece in a fixed-size box so the panel never shifts
fn preview_matrix(state: &GameState) -> Vec<Vec<u32>> {
    let mut matrix = vec![vec![0u32; PREVIEW_W]; PREVIEW_H];
    for (r, row) in state.next().preview_matrix().iter().enumerate().take(PREVIEW_H) {
        for (c, &cell) in row.iter().enumerate().take(PREVIEW_W) {
            matrix[r][c] = cell as u32;
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_for(view: &GameView, state: &GameState) -> Screen {
        let (w, h) = view.required_size(state.board().width(), state.board().height());
        Screen::new(w, h, ' ')
    }

    fn text_at(screen: &Screen, x: usize, y: u16, len: usize) -> String {
        screen.row_text(y).chars().skip(x).take(len).collect()
    }

    #[test]
    fn test_required_size_default_board() {
        let view = GameView::default();
        assert_eq!(view.required_size(10, 20), (34, 22));
    }

    #[test]
    fn test_required_size_saturates_for_huge_boards() {
        let view = GameView::default();
        assert_eq!(view.required_size(40_000, 20).0, u16::MAX);
        assert_eq!(view.required_size(10, 70_000).1, u16::MAX);
    }

    #[test]
    fn test_render_draws_board_frame() {
        let view = GameView::default();
        let state = GameState::new(10, 20, 7);
        let mut screen = screen_for(&view, &state);
        view.render_into(&state, false, &mut screen).unwrap();

        let rule = "─".repeat(20);
        assert_eq!(text_at(&screen, 0, 0, 22), format!("┌{rule}┐"));
        assert_eq!(text_at(&screen, 0, 21, 22), format!("└{rule}┘"));
        assert_eq!(screen.get(0, 5).unwrap().ch, '│');
        assert_eq!(screen.get(21, 5).unwrap().ch, '│');
    }

    #[test]
    fn test_render_shows_empty_cells_and_active_piece() {
        let view = GameView::default();
        let state = GameState::new(10, 20, 7);
        let mut screen = screen_for(&view, &state);
        view.render_into(&state, false, &mut screen).unwrap();

        // Bottom board row is empty: ten ". " cells inside the frame.
        assert_eq!(screen.row_text(20), format!("│{}│{}", ". ".repeat(10), " ".repeat(12)));
        // Some cell in the spawn rows carries the active piece color.
        let color = state.active().color();
        let bg = view.palette.color(color);
        let painted = (1..21).any(|x| screen.get(x, 1).unwrap().style.bg == bg);
        assert!(painted);
    }

    #[test]
    fn test_render_panel_labels_and_values() {
        let view = GameView::default();
        let state = GameState::new(10, 20, 7);
        let mut screen = screen_for(&view, &state);
        view.render_into(&state, false, &mut screen).unwrap();

        let x = 24;
        assert_eq!(text_at(&screen, x, ROW_NEXT, 4), "NEXT");
        assert_eq!(text_at(&screen, x, ROW_NEXT + 1, 1), "┌");
        assert_eq!(text_at(&screen, x, ROW_SCORE, 5), "SCORE");
        assert_eq!(text_at(&screen, x, ROW_SCORE + 1, 2), "0 ");
        assert_eq!(text_at(&screen, x, ROW_LINES, 5), "LINES");
        assert!(!screen.row_text(ROW_STATUS).contains("PAUSED"));
    }

    #[test]
    fn test_paused_status() {
        let view = GameView::default();
        let state = GameState::new(10, 20, 7);
        let mut screen = screen_for(&view, &state);
        view.render_into(&state, true, &mut screen).unwrap();
        assert!(screen.row_text(ROW_STATUS).contains("PAUSED"));
    }

    #[test]
    fn test_too_small_screen_is_an_error() {
        let view = GameView::default();
        let state = GameState::new(10, 20, 7);
        let mut screen = Screen::new(20, 10, ' ');
        assert!(view.render_into(&state, false, &mut screen).is_err());
    }
}
