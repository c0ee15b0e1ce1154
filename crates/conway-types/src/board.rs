//! The board entity: a fixed-size grid of binary cells plus metadata.
//!
//! Cells are stored in a flat vector indexed by `y * width + x`. A board is
//! never mutated in place once handed to the engine; every transition
//! produces a new value via [`Board::successor`].

use chrono::{DateTime, Utc};

use crate::cell::Cell;
use crate::error::BoardError;
use crate::ids::BoardId;

/// A finite rectangular grid with hard edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    id: BoardId,
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    generation: u64,
    created_at: DateTime<Utc>,
}

impl Board {
    /// Build a fresh board from row-major binary rows.
    ///
    /// Rows must be non-empty, all of the same non-zero length, and hold
    /// only `0` or `1`. The board gets a new random id, generation 0, and
    /// the current timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidInput`] describing the first violation.
    pub fn from_binary_grid<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if height == 0 {
            return Err(BoardError::InvalidInput("grid has no rows".to_owned()));
        }
        if width == 0 {
            return Err(BoardError::InvalidInput("grid rows are empty".to_owned()));
        }

        let mut cells = Vec::with_capacity(width.saturating_mul(height));
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(BoardError::InvalidInput(format!(
                    "row {y} has length {}, expected {width}",
                    row.len()
                )));
            }
            for (x, &value) in row.iter().enumerate() {
                let cell = Cell::from_bit(value).ok_or_else(|| {
                    BoardError::InvalidInput(format!("value {value} at ({x}, {y}) is not 0 or 1"))
                })?;
                cells.push(cell);
            }
        }

        Ok(Self {
            id: BoardId::new(),
            width,
            height,
            cells,
            generation: 0,
            created_at: Utc::now(),
        })
    }

    /// Assemble a board from already-decoded parts.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::CorruptState`] if a dimension is zero or the
    /// cell count disagrees with `width * height`.
    pub fn from_parts(
        id: BoardId,
        width: usize,
        height: usize,
        cells: Vec<Cell>,
        generation: u64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::CorruptState(format!(
                "dimensions {width}x{height} must both be positive"
            )));
        }
        let expected = width.checked_mul(height).ok_or_else(|| {
            BoardError::CorruptState(format!("dimensions {width}x{height} overflow"))
        })?;
        if cells.len() != expected {
            return Err(BoardError::CorruptState(format!(
                "{} cells do not fill a {width}x{height} grid",
                cells.len()
            )));
        }
        Ok(Self {
            id,
            width,
            height,
            cells,
            generation,
            created_at,
        })
    }

    /// The board's identifier.
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of rule applications since creation.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// When the board was constructed.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at `(x, y)`, or `None` outside the grid.
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y.checked_mul(self.width)?.checked_add(x)?).copied()
    }

    /// Number of live cells.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Canonical cell-only encoding: the grid as one row-major `0`/`1`
    /// string. Id, generation and timestamp do not participate.
    pub fn fingerprint(&self) -> String {
        self.cells.iter().map(|c| c.as_char()).collect()
    }

    /// Iterate over the rows as cell slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Row-major binary view (`1` alive, `0` dead).
    pub fn to_binary_grid(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|c| c.as_bit()).collect())
            .collect()
    }

    /// The next board in this board's trajectory.
    ///
    /// Keeps id, dimensions and timestamp, takes `cells` as the new grid
    /// and advances the generation by one. `cells` must hold exactly
    /// `width * height` entries in row-major order.
    pub fn successor(&self, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), self.cells.len());
        Self {
            id: self.id,
            width: self.width,
            height: self.height,
            cells,
            generation: self.generation.saturating_add(1),
            created_at: self.created_at,
        }
    }

    /// Return this board with its generation counter replaced.
    #[must_use]
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_valid_grid() {
        let board = Board::from_binary_grid(&[vec![0, 1, 0], vec![1, 1, 0]]).unwrap();
        assert_eq!(board.width(), 3);
        assert_eq!(board.height(), 2);
        assert_eq!(board.generation(), 0);
        assert_eq!(board.live_count(), 3);
        assert_eq!(board.cell(1, 0), Some(Cell::Alive));
        assert_eq!(board.cell(2, 1), Some(Cell::Dead));
        assert_eq!(board.cell(3, 0), None);
    }

    #[test]
    fn rejects_empty_grid() {
        let rows: Vec<Vec<i64>> = Vec::new();
        assert!(matches!(
            Board::from_binary_grid(&rows),
            Err(BoardError::InvalidInput(_))
        ));
        let rows: Vec<Vec<i64>> = vec![Vec::new(), Vec::new()];
        assert!(matches!(
            Board::from_binary_grid(&rows),
            Err(BoardError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_jagged_grid() {
        let err = Board::from_binary_grid(&[vec![0, 1], vec![1]]).unwrap_err();
        assert!(matches!(err, BoardError::InvalidInput(msg) if msg.contains("row 1")));
    }

    #[test]
    fn rejects_non_binary_values() {
        assert!(Board::from_binary_grid(&[vec![0, 2]]).is_err());
        assert!(Board::from_binary_grid(&[vec![-1, 0]]).is_err());
    }

    #[test]
    fn binary_grid_view_is_lossless() {
        let rows = vec![vec![1, 0, 0, 1], vec![0, 1, 1, 0], vec![1, 1, 1, 1]];
        let board = Board::from_binary_grid(&rows).unwrap();
        let view = board.to_binary_grid();
        assert_eq!(view.len(), 3);
        for (y, row) in rows.iter().enumerate() {
            let expected: Vec<u8> = row.iter().map(|&v| u8::try_from(v).unwrap()).collect();
            assert_eq!(view[y], expected);
        }
        assert_eq!(board.generation(), 0);
    }

    #[test]
    fn fingerprint_ignores_metadata() {
        let a = Board::from_binary_grid(&[vec![1, 0], vec![0, 1]]).unwrap();
        let b = Board::from_binary_grid(&[vec![1, 0], vec![0, 1]]).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.fingerprint(), "1001");
        assert_eq!(a.fingerprint(), b.clone().with_generation(9).fingerprint());
    }

    #[test]
    fn successor_keeps_identity_and_advances_generation() {
        let board = Board::from_binary_grid(&[vec![1, 1]]).unwrap();
        let next = board.successor(vec![Cell::Dead, Cell::Dead]);
        assert_eq!(next.id(), board.id());
        assert_eq!(next.created_at(), board.created_at());
        assert_eq!(next.generation(), 1);
        assert_eq!(next.live_count(), 0);
        assert_eq!(board.live_count(), 2);
    }

    #[test]
    fn clone_shares_no_storage() {
        let board = Board::from_binary_grid(&[vec![1, 0]]).unwrap();
        let copy = board.clone();
        let stepped = copy.successor(vec![Cell::Dead, Cell::Alive]);
        assert_eq!(board.to_binary_grid(), vec![vec![1, 0]]);
        assert_eq!(stepped.to_binary_grid(), vec![vec![0, 1]]);
    }

    #[test]
    fn from_parts_checks_dimensions() {
        let id = BoardId::new();
        let now = Utc::now();
        assert!(Board::from_parts(id, 0, 1, Vec::new(), 0, now).is_err());
        assert!(Board::from_parts(id, 2, 1, vec![Cell::Dead], 0, now).is_err());
        assert!(Board::from_parts(id, 1, 1, vec![Cell::Alive], 4, now).is_ok());
    }
}
