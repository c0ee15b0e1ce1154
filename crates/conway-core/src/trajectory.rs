//! Run a board until it repeats a state or dies out.
//!
//! [`run_to_conclusion`] drives [`transition::step`](crate::transition::step)
//! while recording every state it has seen. Before each advance it checks,
//! in order:
//!
//! 1. **Cycle** -- the current fingerprint was seen before. The run stops
//!    and the board's generation is rewritten to the generation at which
//!    that fingerprint first appeared.
//! 2. **Extinct** -- the board has no live cells.
//! 3. **Budget** -- `max_generations` steps have already been taken; the
//!    run fails with [`SimulationError::Timeout`].
//!
//! A still life is therefore reported as a cycle starting where it first
//! settled, and an empty board concludes before any step.
//!
//! Fingerprints are kept as full strings, not hashes, so two distinct
//! states can never be mistaken for a repeat. Memory is bounded by the
//! budget: at most `max_generations + 1` entries.

use std::collections::HashMap;

use conway_types::Board;
use tracing::debug;

use crate::error::SimulationError;
use crate::transition;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The board reached a state it had already been in.
    Cycle {
        /// Generation at which the repeating state first appeared.
        start_generation: u64,
    },
    /// The board has no live cells.
    Extinct,
}

/// The final board of a concluded run and why it stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conclusion {
    /// The concluding board. On a cycle its generation is the cycle start.
    pub board: Board,
    /// Why the run stopped.
    pub outcome: Outcome,
    /// Number of steps taken before concluding.
    pub steps: u64,
}

impl Conclusion {
    /// Whether the run ended on a repeated state.
    pub const fn is_cycle(&self) -> bool {
        matches!(self.outcome, Outcome::Cycle { .. })
    }

    /// First generation of the repeating state, if the run cycled.
    pub const fn cycle_start_generation(&self) -> Option<u64> {
        match self.outcome {
            Outcome::Cycle { start_generation } => Some(start_generation),
            Outcome::Extinct => None,
        }
    }
}

/// Advance `board` until it cycles or dies out, taking at most
/// `max_generations` steps.
///
/// The input board is not modified.
///
/// # Errors
///
/// Returns [`SimulationError::Timeout`] if neither condition is met within
/// the budget.
pub fn run_to_conclusion(board: &Board, max_generations: u64) -> Result<Conclusion, SimulationError> {
    let mut seen: HashMap<String, u64> = HashMap::new();
    let mut current = board.clone();
    let mut steps: u64 = 0;

    loop {
        let fingerprint = current.fingerprint();

        if let Some(&start_generation) = seen.get(&fingerprint) {
            debug!(
                board_id = %current.id(),
                detected_at = current.generation(),
                start_generation,
                steps,
                "Cycle detected"
            );
            return Ok(Conclusion {
                board: current.with_generation(start_generation),
                outcome: Outcome::Cycle { start_generation },
                steps,
            });
        }

        if current.live_count() == 0 {
            debug!(
                board_id = %current.id(),
                generation = current.generation(),
                steps,
                "Board died out"
            );
            return Ok(Conclusion {
                board: current,
                outcome: Outcome::Extinct,
                steps,
            });
        }

        if steps >= max_generations {
            return Err(SimulationError::Timeout {
                board_id: current.id(),
                max_generations,
            });
        }

        seen.insert(fingerprint, current.generation());
        current = transition::step(&current);
        steps = steps.saturating_add(1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn board(rows: &[&[i64]]) -> Board {
        Board::from_binary_grid(rows).unwrap()
    }

    fn block() -> Board {
        board(&[&[0, 0, 0, 0], &[0, 1, 1, 0], &[0, 1, 1, 0], &[0, 0, 0, 0]])
    }

    fn blinker() -> Board {
        board(&[&[0, 1, 0], &[0, 1, 0], &[0, 1, 0]])
    }

    fn glider() -> Board {
        let mut rows = vec![vec![0_i64; 8]; 8];
        for (x, y) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
            if let Some(cell) = rows.get_mut(y).and_then(|r: &mut Vec<i64>| r.get_mut(x)) {
                *cell = 1;
            }
        }
        Board::from_binary_grid(&rows).unwrap()
    }

    #[test]
    fn empty_board_concludes_at_generation_zero() {
        let dead = board(&[&[0, 0, 0], &[0, 0, 0]]);
        let conclusion = run_to_conclusion(&dead, 10).unwrap();
        assert_eq!(conclusion.outcome, Outcome::Extinct);
        assert!(!conclusion.is_cycle());
        assert_eq!(conclusion.board.generation(), 0);
        assert_eq!(conclusion.steps, 0);
    }

    #[test]
    fn empty_board_needs_no_budget() {
        let dead = board(&[&[0]]);
        assert!(run_to_conclusion(&dead, 0).is_ok());
    }

    #[test]
    fn still_life_is_a_cycle_starting_at_zero() {
        let conclusion = run_to_conclusion(&block(), 10).unwrap();
        assert!(conclusion.is_cycle());
        assert_eq!(conclusion.cycle_start_generation(), Some(0));
        assert_eq!(conclusion.board.generation(), 0);
        assert_eq!(conclusion.steps, 1);
        assert_eq!(conclusion.board.fingerprint(), block().fingerprint());
    }

    #[test]
    fn oscillator_reports_first_occurrence() {
        let conclusion = run_to_conclusion(&blinker(), 10).unwrap();
        assert_eq!(conclusion.cycle_start_generation(), Some(0));
        assert_eq!(conclusion.steps, 2);
        assert_eq!(conclusion.board.fingerprint(), blinker().fingerprint());
    }

    #[test]
    fn cycle_start_is_absolute_generation() {
        let later = blinker().with_generation(40);
        let conclusion = run_to_conclusion(&later, 10).unwrap();
        assert_eq!(conclusion.cycle_start_generation(), Some(40));
        assert_eq!(conclusion.board.generation(), 40);
    }

    #[test]
    fn dying_pattern_concludes_extinct_after_steps() {
        // A domino dies in one step.
        let domino = board(&[&[0, 0, 0, 0], &[0, 1, 1, 0], &[0, 0, 0, 0]]);
        let conclusion = run_to_conclusion(&domino, 5).unwrap();
        assert_eq!(conclusion.outcome, Outcome::Extinct);
        assert_eq!(conclusion.board.generation(), 1);
    }

    #[test]
    fn settling_pattern_reports_where_it_settled() {
        // Three cells in an L become a block after one step.
        let l_shape = board(&[&[0, 0, 0, 0], &[0, 1, 1, 0], &[0, 1, 0, 0], &[0, 0, 0, 0]]);
        let conclusion = run_to_conclusion(&l_shape, 10).unwrap();
        assert_eq!(conclusion.cycle_start_generation(), Some(1));
        assert_eq!(conclusion.board.generation(), 1);
        assert_eq!(conclusion.board.live_count(), 4);
    }

    #[test]
    fn glider_exhausts_small_budget() {
        let err = run_to_conclusion(&glider(), 5).unwrap_err();
        assert!(matches!(err, SimulationError::Timeout { max_generations: 5, .. }));
    }

    #[test]
    fn glider_settles_against_the_wall_with_enough_budget() {
        // On a bounded board the glider hits a corner and becomes a block.
        let conclusion = run_to_conclusion(&glider(), 200).unwrap();
        assert!(conclusion.is_cycle());
        assert_eq!(conclusion.board.live_count(), 4);
    }

    #[test]
    fn input_board_is_untouched() {
        let original = blinker();
        let snapshot = original.clone();
        let _ = run_to_conclusion(&original, 10);
        assert_eq!(original, snapshot);
    }
}
