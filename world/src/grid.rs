//! Dense grid of static cell kinds.

use box_pusher_core::{CellCoord, CellKind};

use crate::StateError;

/// Fixed-size grid describing walls and generation-time cell stamps.
///
/// Once a grid is handed to a [`crate::PuzzleState`] it is only reachable
/// through shared references, so cell kinds never change during play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Allocates a grid filled with [`CellKind::Empty`].
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![CellKind::Empty; capacity],
        }
    }

    /// Builds a grid from row-major nested vectors, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<CellKind>>) -> Result<Self, StateError> {
        let row_count = u32::try_from(rows.len()).map_err(|_| StateError::EmptyGrid)?;
        let columns = rows
            .first()
            .map(|row| u32::try_from(row.len()).unwrap_or(u32::MAX))
            .unwrap_or(0);
        if row_count == 0 || columns == 0 {
            return Err(StateError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(rows.len() * rows[0].len());
        for (index, row) in rows.into_iter().enumerate() {
            let actual = u32::try_from(row.len()).unwrap_or(u32::MAX);
            if actual != columns {
                return Err(StateError::RaggedRow {
                    row: u32::try_from(index).unwrap_or(u32::MAX),
                    expected: columns,
                    actual,
                });
            }
            cells.extend(row);
        }

        Ok(Self {
            columns,
            rows: row_count,
            cells,
        })
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the grid holds no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Reports whether the cell lies strictly inside the outer border.
    #[must_use]
    pub fn is_interior(&self, cell: CellCoord) -> bool {
        cell.column() >= 1
            && cell.row() >= 1
            && cell.column() + 1 < self.columns
            && cell.row() + 1 < self.rows
    }

    /// Returns the kind stored at the cell, or `None` outside the grid.
    #[must_use]
    pub fn kind(&self, cell: CellCoord) -> Option<CellKind> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the cell is a wall. Cells outside the grid are not walls.
    #[must_use]
    pub fn is_wall(&self, cell: CellCoord) -> bool {
        self.kind(cell).map_or(false, CellKind::is_wall)
    }

    /// Overwrites the kind stored at the cell, returning whether it was in bounds.
    pub fn set(&mut self, cell: CellCoord, kind: CellKind) -> bool {
        match self.index(cell).and_then(|index| self.cells.get_mut(index)) {
            Some(slot) => {
                *slot = kind;
                true
            }
            None => false,
        }
    }

    /// Stamps walls on every cell of the outer border.
    pub fn stamp_border(&mut self) {
        if self.columns == 0 || self.rows == 0 {
            return;
        }
        let last_column = self.columns - 1;
        let last_row = self.rows - 1;
        for column in 0..self.columns {
            let _ = self.set(CellCoord::new(column, 0), CellKind::Wall);
            let _ = self.set(CellCoord::new(column, last_row), CellKind::Wall);
        }
        for row in 0..self.rows {
            let _ = self.set(CellCoord::new(0, row), CellKind::Wall);
            let _ = self.set(CellCoord::new(last_column, row), CellKind::Wall);
        }
    }

    /// Iterates over the grid rows from top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellKind]> {
        let width = usize::try_from(self.columns).unwrap_or(usize::MAX).max(1);
        self.cells.chunks(width)
    }

    /// Iterates over every cell coordinate paired with its kind in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellKind)> + '_ {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, kind)| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            (CellCoord::new(index % columns, index / columns), *kind)
        })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_stamping_walls_every_edge() {
        let mut grid = Grid::new(4, 3);
        grid.stamp_border();

        let walls = grid.iter().filter(|(_, kind)| kind.is_wall()).count();
        assert_eq!(walls, 10);
        assert!(!grid.is_wall(CellCoord::new(1, 1)));
        assert!(!grid.is_wall(CellCoord::new(2, 1)));
        assert!(grid.is_wall(CellCoord::new(3, 2)));
    }

    #[test]
    fn out_of_bounds_cells_have_no_kind() {
        let grid = Grid::new(2, 2);
        assert_eq!(grid.kind(CellCoord::new(2, 0)), None);
        assert!(!grid.is_wall(CellCoord::new(5, 5)));
        assert!(!grid.clone().set(CellCoord::new(0, 2), CellKind::Wall));
    }

    #[test]
    fn interior_excludes_border() {
        let grid = Grid::new(5, 4);
        assert!(grid.is_interior(CellCoord::new(1, 1)));
        assert!(grid.is_interior(CellCoord::new(3, 2)));
        assert!(!grid.is_interior(CellCoord::new(4, 2)));
        assert!(!grid.is_interior(CellCoord::new(2, 0)));
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let rows = vec![
            vec![CellKind::Wall, CellKind::Wall],
            vec![CellKind::Wall],
        ];
        assert_eq!(
            Grid::from_rows(rows),
            Err(StateError::RaggedRow {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(Grid::from_rows(Vec::new()), Err(StateError::EmptyGrid));
    }

    #[test]
    fn rows_iterate_in_row_major_order() {
        let rows = vec![
            vec![CellKind::Wall, CellKind::Empty],
            vec![CellKind::Target, CellKind::Box],
        ];
        let grid = Grid::from_rows(rows.clone()).expect("rectangular grid");
        let collected: Vec<Vec<CellKind>> = grid.iter_rows().map(<[CellKind]>::to_vec).collect();
        assert_eq!(collected, rows);
        assert_eq!(grid.kind(CellCoord::new(1, 1)), Some(CellKind::Box));
    }
}
