//! The Game of Life transition rule.
//!
//! [`step`] computes one generation from another. The grid has hard edges:
//! neighbours outside `[0, width) x [0, height)` do not exist and never
//! count as alive. [`step_n`] applies [`step`] a fixed number of times,
//! materializing every generation in order.
//!
//! Both functions are pure. The input board is never touched; callers
//! holding it observe no change.

use conway_types::{Board, Cell};

use crate::error::SimulationError;

/// Offsets of the eight grid-adjacent positions.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Count live cells among the in-bounds neighbours of `(x, y)`.
pub fn live_neighbors(board: &Board, x: usize, y: usize) -> u8 {
    let mut count: u8 = 0;
    for (dx, dy) in NEIGHBOR_OFFSETS {
        let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
            continue;
        };
        if board.cell(nx, ny).is_some_and(Cell::is_alive) {
            count = count.saturating_add(1);
        }
    }
    count
}

/// Apply the rule to one cell given its live neighbour count.
///
/// A live cell survives with 2 or 3 live neighbours; a dead cell is born
/// with exactly 3. Everything else is dead.
pub const fn next_state(cell: Cell, live_neighbors: u8) -> Cell {
    match (cell, live_neighbors) {
        (Cell::Alive, 2 | 3) | (Cell::Dead, 3) => Cell::Alive,
        _ => Cell::Dead,
    }
}

/// Compute the next generation.
///
/// Returns a new board with the same id, dimensions and timestamp and a
/// generation counter one higher than the input.
pub fn step(board: &Board) -> Board {
    let width = board.width();
    let coords = (0..board.height()).flat_map(|y| (0..width).map(move |x| (x, y)));
    let cells = board
        .cells()
        .iter()
        .zip(coords)
        .map(|(&cell, (x, y))| next_state(cell, live_neighbors(board, x, y)))
        .collect();
    board.successor(cells)
}

/// Apply [`step`] exactly `n` times.
///
/// `n == 0` yields a copy of the input with its generation unchanged.
pub fn step_n(board: &Board, n: u64) -> Board {
    let mut current = board.clone();
    for _ in 0..n {
        current = step(&current);
    }
    current
}

/// Validate a caller-supplied generation count.
///
/// Counts arrive signed from the outside world; the engine works in `u64`.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidArgument`] if `value` is negative.
pub fn generation_count(value: i64, name: &str) -> Result<u64, SimulationError> {
    u64::try_from(value).map_err(|_e| {
        SimulationError::InvalidArgument(format!("{name} must be non-negative, got {value}"))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn board(rows: &[&[i64]]) -> Board {
        Board::from_binary_grid(rows).unwrap()
    }

    #[test]
    fn rule_table() {
        for n in 0..=8 {
            let survives = matches!(n, 2 | 3);
            assert_eq!(next_state(Cell::Alive, n).is_alive(), survives, "alive with {n}");
            assert_eq!(next_state(Cell::Dead, n).is_alive(), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn corner_has_three_neighbours_at_most() {
        let full = board(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]);
        assert_eq!(live_neighbors(&full, 0, 0), 3);
        assert_eq!(live_neighbors(&full, 1, 0), 5);
        assert_eq!(live_neighbors(&full, 1, 1), 8);
        assert_eq!(live_neighbors(&full, 2, 2), 3);
    }

    #[test]
    fn edges_do_not_wrap() {
        // A wrapping grid would give (0, 0) a neighbour at (3, 0).
        let b = board(&[&[0, 0, 0, 1], &[0, 0, 0, 1], &[0, 0, 0, 1]]);
        assert_eq!(live_neighbors(&b, 0, 1), 0);
    }

    #[test]
    fn vertical_blinker_flips_to_horizontal_and_back() {
        let vertical = board(&[&[0, 1, 0], &[0, 1, 0], &[0, 1, 0]]);
        let once = step(&vertical);
        assert_eq!(once.to_binary_grid(), vec![vec![0, 0, 0], vec![1, 1, 1], vec![0, 0, 0]]);
        assert_eq!(once.generation(), 1);

        let twice = step(&once);
        assert_eq!(twice.to_binary_grid(), vertical.to_binary_grid());
        assert_eq!(twice.generation(), 2);
    }

    #[test]
    fn block_is_a_still_life() {
        let block = board(&[&[0, 0, 0, 0], &[0, 1, 1, 0], &[0, 1, 1, 0], &[0, 0, 0, 0]]);
        let next = step(&block);
        assert_eq!(next.fingerprint(), block.fingerprint());
        assert_eq!(next.generation(), 1);
    }

    #[test]
    fn step_is_deterministic_and_leaves_input_untouched() {
        let glider = board(&[&[0, 1, 0, 0, 0], &[0, 0, 1, 0, 0], &[1, 1, 1, 0, 0], &[0, 0, 0, 0, 0]]);
        let before = glider.clone();
        let a = step(&glider);
        let b = step(&glider);
        assert_eq!(a, b);
        assert_eq!(glider, before);
    }

    #[test]
    fn random_boards_step_identically() {
        use rand::Rng;
        let mut rng = rand::rng();
        for _ in 0..10 {
            let rows: Vec<Vec<i64>> = (0..9)
                .map(|_| (0..7).map(|_| i64::from(rng.random_bool(0.5))).collect())
                .collect();
            let b = Board::from_binary_grid(&rows).unwrap();
            assert_eq!(step(&b).fingerprint(), step(&b).fingerprint());
        }
    }

    #[test]
    fn lone_cell_dies() {
        let b = board(&[&[0, 0, 0], &[0, 1, 0], &[0, 0, 0]]);
        assert_eq!(step(&b).live_count(), 0);
    }

    #[test]
    fn step_n_zero_is_an_equal_copy() {
        let b = board(&[&[1, 1], &[1, 0]]);
        let same = step_n(&b, 0);
        assert_eq!(same, b);
        assert_eq!(same.generation(), 0);
    }

    #[test]
    fn step_n_matches_repeated_steps() {
        let b = board(&[&[0, 1, 0], &[0, 1, 0], &[0, 1, 0]]);
        let three = step_n(&b, 3);
        assert_eq!(three, step(&step(&step(&b))));
        assert_eq!(three.generation(), 3);
        assert_eq!(b.generation(), 0);
    }

    #[test]
    fn negative_counts_are_invalid() {
        assert_eq!(generation_count(4, "n").unwrap(), 4);
        assert_eq!(generation_count(0, "n").unwrap(), 0);
        assert!(matches!(
            generation_count(-1, "n"),
            Err(SimulationError::InvalidArgument(_))
        ));
    }
}
