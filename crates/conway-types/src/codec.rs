//! Text codec for the durable board record.
//!
//! # Format
//!
//! ```text
//! <width>,<height>,<generation>
//! <row 0: width chars of '0'/'1'>
//! ...
//! <row height-1>
//! ```
//!
//! Every line, the last included, ends with `\n`. The record carries no id;
//! the storage key supplies it on decode. It carries no timestamp either, so
//! a decoded board is stamped with the time it was loaded.

use std::fmt::Write as _;

use chrono::Utc;

use crate::board::Board;
use crate::cell::Cell;
use crate::error::BoardError;
use crate::ids::BoardId;

impl Board {
    /// Encode the board as its durable text record.
    ///
    /// Output depends only on dimensions, generation and cells, so encoding
    /// the same board twice yields byte-identical text.
    pub fn serialize(&self) -> String {
        let capacity = self
            .width()
            .saturating_add(1)
            .saturating_mul(self.height())
            .saturating_add(32);
        let mut out = String::with_capacity(capacity);
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{},{},{}", self.width(), self.height(), self.generation());
        for row in self.rows() {
            out.extend(row.iter().map(|c| c.as_char()));
            out.push('\n');
        }
        out
    }

    /// Decode a durable text record under the given id.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::CorruptState`] if the header is malformed, a
    /// dimension is zero, the number of rows differs from the declared
    /// height, a row length differs from the declared width, or a character
    /// is not `'0'`/`'1'`.
    pub fn deserialize(id: BoardId, text: &str) -> Result<Self, BoardError> {
        let mut lines = text.lines();

        let header = lines
            .next()
            .ok_or_else(|| BoardError::CorruptState("record is empty".to_owned()))?;
        let (width, height, generation) = parse_header(header, text.len())?;

        let mut cells = Vec::with_capacity(width.saturating_mul(height));
        let mut rows_read: usize = 0;
        for (y, line) in lines.enumerate() {
            if y >= height {
                if line.is_empty() {
                    continue;
                }
                return Err(BoardError::CorruptState(format!(
                    "more than the declared {height} rows"
                )));
            }
            let before = cells.len();
            for (x, c) in line.chars().enumerate() {
                let cell = Cell::from_char(c).ok_or_else(|| {
                    BoardError::CorruptState(format!("invalid character {c:?} at ({x}, {y})"))
                })?;
                cells.push(cell);
            }
            let row_len = cells.len().saturating_sub(before);
            if row_len != width {
                return Err(BoardError::CorruptState(format!(
                    "row {y} has length {row_len}, expected {width}"
                )));
            }
            rows_read = rows_read.saturating_add(1);
        }

        if rows_read != height {
            return Err(BoardError::CorruptState(format!(
                "found {rows_read} rows, expected {height}"
            )));
        }

        Self::from_parts(id, width, height, cells, generation, Utc::now())
    }
}

/// Parse `"<width>,<height>,<generation>"`.
///
/// Every cell takes at least one byte of the record, so a grid larger than
/// `record_len` cells cannot be backed by the rows that follow.
fn parse_header(header: &str, record_len: usize) -> Result<(usize, usize, u64), BoardError> {
    let malformed = || BoardError::CorruptState(format!("malformed header {header:?}"));

    let mut fields = header.split(',').map(str::trim);
    let width = fields.next().ok_or_else(malformed)?;
    let height = fields.next().ok_or_else(malformed)?;
    let generation = fields.next().ok_or_else(malformed)?;
    if fields.next().is_some() {
        return Err(malformed());
    }

    let width: usize = width.parse().map_err(|_e| malformed())?;
    let height: usize = height.parse().map_err(|_e| malformed())?;
    let generation: u64 = generation.parse().map_err(|_e| malformed())?;
    if width == 0 || height == 0 {
        return Err(BoardError::CorruptState(format!(
            "dimensions {width}x{height} must both be positive"
        )));
    }
    match width.checked_mul(height) {
        Some(cells) if cells <= record_len => Ok((width, height, generation)),
        _ => Err(BoardError::CorruptState(format!(
            "dimensions {width}x{height} exceed a {record_len}-byte record"
        ))),
    }
}
