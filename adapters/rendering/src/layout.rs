//! Pixel placement of the board inside the window.

use box_pusher_core::CellCoord;
use glam::Vec2;

use crate::RenderingError;

/// Placement of the board cells inside a window, below the HUD bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardLayout {
    origin: Vec2,
    cell_size: f32,
    columns: u32,
    rows: u32,
}

impl BoardLayout {
    /// Height of the score bar drawn across the top of the window.
    pub const HUD_HEIGHT: f32 = 40.0;
    /// Height reserved at the bottom for the status and instruction lines.
    pub const FOOTER_HEIGHT: f32 = 36.0;
    /// Gap reserved around the board for coordinate labels.
    pub const LABEL_MARGIN: f32 = 24.0;
    /// Largest cell edge drawn, in pixels.
    pub const MAX_CELL_SIZE: f32 = 50.0;

    /// Fits a `columns` x `rows` board into a window of the provided size.
    ///
    /// Cells are square, whole-pixel sized, and the board is centred in the
    /// space left between the HUD bar and the footer.
    pub fn fit(window: Vec2, columns: u32, rows: u32) -> Result<Self, RenderingError> {
        if columns == 0 || rows == 0 {
            return Err(RenderingError::EmptyBoard { columns, rows });
        }

        let top = Self::HUD_HEIGHT + Self::LABEL_MARGIN;
        let available = Vec2::new(
            window.x - 2.0 * Self::LABEL_MARGIN,
            window.y - top - Self::FOOTER_HEIGHT,
        );
        let per_cell = available / Vec2::new(columns as f32, rows as f32);
        let cell_size = per_cell.min_element().min(Self::MAX_CELL_SIZE).floor();
        if cell_size < 1.0 {
            return Err(RenderingError::WindowTooSmall {
                width: window.x,
                height: window.y,
            });
        }

        let board = Vec2::new(columns as f32, rows as f32) * cell_size;
        let origin = Vec2::new(
            ((window.x - board.x) / 2.0).floor(),
            top + ((available.y - board.y) / 2.0).floor(),
        );

        Ok(Self {
            origin,
            cell_size,
            columns,
            rows,
        })
    }

    /// Top-left pixel of the board.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Edge length of a single cell in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Board extent in pixels.
    #[must_use]
    pub fn board_size(&self) -> Vec2 {
        Vec2::new(self.columns as f32, self.rows as f32) * self.cell_size
    }

    /// Top-left pixel of the cell.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        self.origin + Vec2::new(cell.column() as f32, cell.row() as f32) * self.cell_size
    }

    /// Centre pixel of the cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        self.cell_origin(cell) + Vec2::splat(self.cell_size / 2.0)
    }

    /// Cell under the provided pixel, if the pixel lies on the board.
    #[must_use]
    pub fn cell_at(&self, position: Vec2) -> Option<CellCoord> {
        let local = (position - self.origin) / self.cell_size;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let column = local.x.floor() as u32;
        let row = local.y.floor() as u32;
        (column < self.columns && row < self.rows).then(|| CellCoord::new(column, row))
    }

    /// Centre of the label drawn above the column.
    #[must_use]
    pub fn column_label_position(&self, column: u32) -> Vec2 {
        let center = self.cell_center(CellCoord::new(column, 0));
        Vec2::new(center.x, self.origin.y - Self::LABEL_MARGIN / 2.0)
    }

    /// Centre of the label drawn left of the row.
    #[must_use]
    pub fn row_label_position(&self, row: u32) -> Vec2 {
        let center = self.cell_center(CellCoord::new(0, row));
        Vec2::new(self.origin.x - Self::LABEL_MARGIN / 2.0, center.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_board_fits_at_full_cell_size() {
        let layout = BoardLayout::fit(Vec2::new(800.0, 600.0), 12, 10).expect("fits");

        assert_eq!(layout.cell_size(), 50.0);
        assert_eq!(layout.board_size(), Vec2::new(600.0, 500.0));
        assert_eq!(layout.origin(), Vec2::new(100.0, 64.0));
    }

    #[test]
    fn large_boards_shrink_cells() {
        let layout = BoardLayout::fit(Vec2::new(800.0, 600.0), 30, 20).expect("fits");
        assert_eq!(layout.cell_size(), 25.0);
        assert!(layout.origin().y >= BoardLayout::HUD_HEIGHT);
    }

    #[test]
    fn cell_positions_round_trip() {
        let layout = BoardLayout::fit(Vec2::new(800.0, 600.0), 12, 10).expect("fits");
        let cell = CellCoord::new(4, 7);

        assert_eq!(layout.cell_origin(cell), Vec2::new(300.0, 414.0));
        assert_eq!(layout.cell_center(cell), Vec2::new(325.0, 439.0));
        assert_eq!(layout.cell_at(layout.cell_center(cell)), Some(cell));
        assert_eq!(layout.cell_at(Vec2::new(10.0, 10.0)), None);
        assert_eq!(layout.cell_at(Vec2::new(705.0, 100.0)), None);
    }

    #[test]
    fn labels_sit_outside_the_board() {
        let layout = BoardLayout::fit(Vec2::new(800.0, 600.0), 12, 10).expect("fits");
        assert_eq!(layout.column_label_position(0), Vec2::new(125.0, 52.0));
        assert_eq!(layout.row_label_position(1), Vec2::new(88.0, 139.0));
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        assert_eq!(
            BoardLayout::fit(Vec2::new(800.0, 600.0), 0, 4),
            Err(RenderingError::EmptyBoard {
                columns: 0,
                rows: 4
            })
        );
        assert!(matches!(
            BoardLayout::fit(Vec2::new(60.0, 90.0), 12, 10),
            Err(RenderingError::WindowTooSmall { .. })
        ));
    }
}
