//! Board rendering for the Reversi GUI

use crate::board::{Board, Pos, Side, BOARD_SIZE};
use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use super::theme::*;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 60.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked cell if it is one of `legal`.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        to_move: Side,
        legal: &[Pos],
        last_move: Option<Pos>,
        accept_input: bool,
    ) -> Option<Pos> {
        let available_size = ui.available_size();

        let board_size = available_size.x.min(available_size.y) - 20.0;
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / BOARD_SIZE as f32;

        let (response, painter) = ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());

        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(6), BOARD_FRAME);
        painter.rect_filled(self.grid_rect(), CornerRadius::ZERO, BOARD_BG);

        self.draw_grid(&painter);
        self.draw_coordinates(&painter);
        self.draw_discs(&painter, board);

        if let Some(pos) = last_move {
            self.draw_last_move_marker(&painter, pos);
        }

        if accept_input {
            for &pos in legal {
                self.draw_legal_hint(&painter, pos);
            }
        }

        let mut clicked_pos = None;

        if accept_input {
            if let Some(pointer_pos) = response.hover_pos() {
                if let Some(pos) = self.screen_to_board(pointer_pos) {
                    if legal.contains(&pos) {
                        self.draw_hover_preview(&painter, pos, to_move);
                        if response.clicked() {
                            clicked_pos = Some(pos);
                        }
                    }
                }
            }
        }

        clicked_pos
    }

    fn grid_rect(&self) -> Rect {
        Rect::from_min_size(
            self.board_rect.min + Vec2::splat(BOARD_MARGIN),
            Vec2::splat(self.cell_size * BOARD_SIZE as f32),
        )
    }

    /// Draw the cell borders
    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let grid = self.grid_rect();

        for i in 0..=BOARD_SIZE {
            let offset = i as f32 * self.cell_size;

            // Vertical line
            let x = grid.min.x + offset;
            painter.line_segment([Pos2::new(x, grid.min.y), Pos2::new(x, grid.max.y)], stroke);

            // Horizontal line
            let y = grid.min.y + offset;
            painter.line_segment([Pos2::new(grid.min.x, y), Pos2::new(grid.max.x, y)], stroke);
        }
    }

    /// Draw coordinate labels (a-f, 1-6)
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(14.0);
        let grid = self.grid_rect();

        for i in 0..BOARD_SIZE {
            let mid = (i as f32 + 0.5) * self.cell_size;

            let letter = (b'a' + i as u8) as char;
            let top = Pos2::new(grid.min.x + mid, self.board_rect.min.y + BOARD_MARGIN * 0.5);
            painter.text(top, egui::Align2::CENTER_CENTER, letter, font.clone(), COORD_TEXT);

            let left = Pos2::new(self.board_rect.min.x + BOARD_MARGIN * 0.5, grid.min.y + mid);
            painter.text(left, egui::Align2::CENTER_CENTER, format!("{}", i + 1), font.clone(), COORD_TEXT);
        }
    }

    /// Draw all placed discs
    fn draw_discs(&self, painter: &Painter, board: &Board) {
        for pos in Pos::all() {
            if let Some(side) = board.get(pos).side() {
                self.draw_disc(painter, pos, side);
            }
        }
    }

    /// Draw a single disc
    fn draw_disc(&self, painter: &Painter, pos: Pos, side: Side) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * DISC_RADIUS_RATIO;

        let shadow_offset = Vec2::new(2.0, 2.0);
        painter.circle_filled(center + shadow_offset, radius, Color32::from_rgba_unmultiplied(0, 0, 0, 60));

        match side {
            Side::Black => {
                painter.circle_filled(center, radius, BLACK_DISC);
                let highlight_offset = Vec2::new(-radius * 0.3, -radius * 0.3);
                painter.circle_filled(center + highlight_offset, radius * 0.2, BLACK_DISC_HIGHLIGHT);
            }
            Side::White => {
                painter.circle_filled(center, radius, WHITE_DISC);
                painter.circle_stroke(center, radius * 0.85, Stroke::new(radius * 0.1, WHITE_DISC_SHADOW));
            }
        }
    }

    fn draw_last_move_marker(&self, painter: &Painter, pos: Pos) {
        let center = self.board_to_screen(pos);
        painter.circle_filled(center, LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
    }

    /// Small dot on each legal cell
    fn draw_legal_hint(&self, painter: &Painter, pos: Pos) {
        let center = self.board_to_screen(pos);
        painter.circle_filled(center, self.cell_size * HINT_RADIUS_RATIO, legal_hint());
    }

    fn draw_hover_preview(&self, painter: &Painter, pos: Pos, side: Side) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * DISC_RADIUS_RATIO;
        let color = match side {
            Side::Black => hover_black(),
            Side::White => hover_white(),
        };
        painter.circle_filled(center, radius, color);
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.grid_rect().min;
        let col = (relative.x / self.cell_size).floor() as i32;
        let row = (relative.y / self.cell_size).floor() as i32;

        if Pos::is_valid(row, col) {
            Some(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Centre of a cell in screen coordinates
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let grid = self.grid_rect();
        let x = grid.min.x + (pos.col as f32 + 0.5) * self.cell_size;
        let y = grid.min.y + (pos.row as f32 + 0.5) * self.cell_size;
        Pos2::new(x, y)
    }
}
