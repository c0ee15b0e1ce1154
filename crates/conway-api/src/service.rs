//! The board service: the collaborator contract behind every route.
//!
//! Each operation validates its arguments, loads the board through the
//! [`BoardStore`], runs the engine, persists the result, and hands back a
//! wire view. Anything that advances generations runs on the blocking pool
//! so a long run does not stall the async workers.

use conway_core::{generation_count, run_to_conclusion};
use conway_db::{BoardRepository, BoardStore, FileRepository};
use conway_types::{Board, BoardId, BoardView, ConclusionView, CreatedBoard};
use tracing::{debug, info};

use crate::error::ServiceError;

/// Board operations over a store.
#[derive(Debug)]
pub struct BoardService<R = FileRepository> {
    store: BoardStore<R>,
    default_max_generations: u64,
}

impl<R: BoardRepository> BoardService<R> {
    /// Create a service. `default_max_generations` is the run budget used
    /// when a caller does not supply one.
    pub const fn new(store: BoardStore<R>, default_max_generations: u64) -> Self {
        Self {
            store,
            default_max_generations,
        }
    }

    /// Build a board from a 0/1 grid and persist it at generation 0.
    ///
    /// # Errors
    ///
    /// [`ServiceError::InvalidInput`] for an empty, jagged, or non-binary
    /// grid; [`ServiceError::Storage`] if the write fails.
    pub async fn create<G: AsRef<[i64]>>(&self, rows: &[G]) -> Result<CreatedBoard, ServiceError> {
        let board = Board::from_binary_grid(rows)?;
        self.store.save(&board).await?;
        info!(
            board_id = %board.id(),
            width = board.width(),
            height = board.height(),
            "Board created"
        );
        Ok(CreatedBoard { id: board.id() })
    }

    /// Current state of a board.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if no board exists for `id`.
    pub async fn get(&self, id: BoardId) -> Result<BoardView, ServiceError> {
        let board = self.load(id).await?;
        Ok(BoardView::from(&board))
    }

    /// Advance a board one generation and persist it.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] or [`ServiceError::Storage`].
    pub async fn step(&self, id: BoardId) -> Result<BoardView, ServiceError> {
        let board = self.load(id).await?;
        let next = conway_core::step(&board);
        self.store.save(&next).await?;
        debug!(board_id = %id, generation = next.generation(), "Board stepped");
        Ok(BoardView::from(&next))
    }

    /// Advance a board `n` generations and persist the result.
    ///
    /// `n` is checked before the board is looked up.
    ///
    /// # Errors
    ///
    /// [`ServiceError::InvalidArgument`] for a negative `n`, otherwise as
    /// [`step`](Self::step).
    pub async fn step_n(&self, id: BoardId, n: i64) -> Result<BoardView, ServiceError> {
        let n = generation_count(n, "n")?;
        let board = self.load(id).await?;
        let next = tokio::task::spawn_blocking(move || conway_core::step_n(&board, n))
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        self.store.save(&next).await?;
        debug!(board_id = %id, steps = n, generation = next.generation(), "Board advanced");
        Ok(BoardView::from(&next))
    }

    /// Run a board until it cycles or dies out, persisting the final state.
    ///
    /// `max_generations` falls back to the configured default. On timeout
    /// nothing is persisted.
    ///
    /// # Errors
    ///
    /// [`ServiceError::InvalidArgument`] for a negative budget,
    /// [`ServiceError::SimulationTimeout`] if the budget runs out, otherwise
    /// as [`step`](Self::step).
    pub async fn run_to_conclusion(
        &self,
        id: BoardId,
        max_generations: Option<i64>,
    ) -> Result<ConclusionView, ServiceError> {
        let max_generations = match max_generations {
            Some(value) => generation_count(value, "max_generations")?,
            None => self.default_max_generations,
        };
        let board = self.load(id).await?;

        let conclusion =
            tokio::task::spawn_blocking(move || run_to_conclusion(&board, max_generations))
                .await
                .map_err(|e| ServiceError::Internal(e.to_string()))??;

        self.store.save(&conclusion.board).await?;
        info!(
            board_id = %id,
            outcome = ?conclusion.outcome,
            steps = conclusion.steps,
            "Board concluded"
        );

        Ok(ConclusionView {
            board: BoardView::from(&conclusion.board),
            cycle: conclusion.is_cycle(),
            cycle_start_generation: conclusion.cycle_start_generation(),
        })
    }

    /// Delete a board. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Storage`] if the durable delete fails.
    pub async fn delete(&self, id: BoardId) -> Result<bool, ServiceError> {
        let existed = self.store.delete(id).await?;
        if existed {
            info!(board_id = %id, "Board deleted");
        }
        Ok(existed)
    }

    /// Ids of all known boards, sorted.
    pub async fn list(&self) -> Vec<BoardId> {
        self.store.ids().await
    }

    /// The backing store.
    pub const fn store(&self) -> &BoardStore<R> {
        &self.store
    }

    async fn load(&self, id: BoardId) -> Result<Board, ServiceError> {
        self.store.get(id).await?.ok_or(ServiceError::NotFound(id))
    }
}
