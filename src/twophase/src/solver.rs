use crate::{
    cancel::CancellationToken,
    canonical_fsm::CanonicalFSMState,
    config::SolverConfig,
    cube::{CubeState, UnsolvableState},
    facelet::{self, FaceletError, MalformedInput},
    moves::{Move, MoveSequence},
    pruning::Tables,
    search::{Cancelled, Phase, Phase1, Phase2, PhaseSearch},
    start, success, working,
};
use log::{debug, error, info};
use std::{fmt, ops::ControlFlow, sync::Arc, time::Instant};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error(transparent)]
    Malformed(#[from] MalformedInput),
    #[error(transparent)]
    Unsolvable(#[from] UnsolvableState),
    /// Every reachable state has a solution well within the default limits,
    /// so this means the limits are too tight or the tables are broken.
    #[error("Internal error: no solution of at most {max_length} moves was found")]
    SearchExhausted { max_length: u8 },
    #[error("The solve was cancelled")]
    Cancelled,
}

impl SolveError {
    /// Whether the error points at the solver or its tables rather than at
    /// the cube it was given.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, SolveError::SearchExhausted { .. })
    }
}

impl From<FaceletError> for SolveError {
    fn from(err: FaceletError) -> Self {
        match err {
            FaceletError::Malformed(err) => SolveError::Malformed(err),
            FaceletError::Unsolvable(err) => SolveError::Unsolvable(err),
        }
    }
}

impl From<Cancelled> for SolveError {
    fn from(_: Cancelled) -> Self {
        SolveError::Cancelled
    }
}

/// A sequence of moves that solves a cube, and how it splits between the
/// two phases before any merging of adjacent turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub moves: MoveSequence,
    pub phase1_length: usize,
    pub phase2_length: usize,
}

impl Solution {
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.moves, f)
    }
}

/// A two-phase solver over a set of shared tables.
pub struct Solver {
    tables: Arc<Tables>,
    config: SolverConfig,
}

impl Solver {
    /// A solver using the process-wide tables, building them on first use.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self::with_tables(Tables::shared(), config)
    }

    #[must_use]
    pub fn with_tables(tables: Arc<Tables>, config: SolverConfig) -> Self {
        Self { tables, config }
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    #[must_use]
    pub fn tables(&self) -> &Arc<Tables> {
        &self.tables
    }

    /// Solve the cube described by a 54-character facelet string.
    ///
    /// # Errors
    ///
    /// Fails if the string is malformed or describes an unreachable cube,
    /// or if no solution is found within the configured limits.
    pub fn solve(&self, facelets: &str) -> Result<Solution, SolveError> {
        self.solve_with_cancel(facelets, &CancellationToken::new())
    }

    /// [`Solver::solve`] that stops with [`SolveError::Cancelled`] once
    /// `cancel` is cancelled.
    ///
    /// # Errors
    ///
    /// See [`Solver::solve`].
    pub fn solve_with_cancel(
        &self,
        facelets: &str,
        cancel: &CancellationToken,
    ) -> Result<Solution, SolveError> {
        let state = facelet::decode(facelets)?;
        self.solve_state(&state, cancel)
    }

    /// Solve a cube state.
    ///
    /// # Errors
    ///
    /// See [`Solver::solve`].
    pub fn solve_state(
        &self,
        state: &CubeState,
        cancel: &CancellationToken,
    ) -> Result<Solution, SolveError> {
        state.verify()?;
        if state.is_solved() {
            info!(success!("The cube is already solved"));
            return Ok(Solution {
                moves: MoveSequence::default(),
                phase1_length: 0,
                phase2_length: 0,
            });
        }

        info!(start!("Beginning two-phase solution search..."));
        let start = Instant::now();
        let config = &self.config;
        let tables = &*self.tables;

        let mut phase1 = PhaseSearch::<Phase1>::new(tables, cancel);
        let mut phase2 = PhaseSearch::<Phase2>::new(tables, cancel);
        let root = Phase1::coords(state);
        let mut best: Option<(Vec<Move>, usize)> = None;

        let max_phase1_depth = config.phase1_max_depth.min(config.max_length);
        let mut deepest_phase1 = None;
        for depth in phase1.heuristic(root)..=max_phase1_depth {
            // A phase one path at least as long as the best solution cannot
            // lead to a shorter one
            if best
                .as_ref()
                .is_some_and(|(moves, _)| moves.len() <= usize::from(depth))
            {
                break;
            }

            deepest_phase1 = Some(depth);
            let flow = phase1.search_depth(
                root,
                CanonicalFSMState::default(),
                depth,
                &mut |phase1_moves: &[Move], fsm_state: CanonicalFSMState| {
                    let mut limit = config
                        .phase2_max_depth
                        .min(config.max_length - depth);
                    if let Some((moves, _)) = &best {
                        // Only strictly shorter solutions are interesting
                        let Some(shorter) = u8::try_from(moves.len())
                            .unwrap_or(u8::MAX)
                            .checked_sub(depth + 1)
                        else {
                            return Ok(ControlFlow::Continue(()));
                        };
                        limit = limit.min(shorter);
                    }

                    let subgroup_state = state.apply_sequence(phase1_moves);
                    let Some(phase2_moves) =
                        phase2.shortest(Phase2::coords(&subgroup_state), fsm_state, limit)?
                    else {
                        return Ok(ControlFlow::Continue(()));
                    };

                    let moves = phase1_moves
                        .iter()
                        .chain(&phase2_moves)
                        .copied()
                        .collect::<Vec<_>>();
                    debug!(
                        working!("Found a solution of {} + {} moves"),
                        phase1_moves.len(),
                        phase2_moves.len()
                    );
                    let length = moves.len();
                    best = Some((moves, phase1_moves.len()));

                    match config.target_length {
                        Some(target) if length > usize::from(target) => {
                            Ok(ControlFlow::Continue(()))
                        }
                        _ => Ok(ControlFlow::Break(())),
                    }
                },
            )?;
            if flow.is_break() {
                break;
            }
        }

        let Some((moves, phase1_length)) = best else {
            error!(
                "No solution found after searching phase 1 to depth {} (max length {}, phase 1 \
                 limit {}, phase 2 limit {}); the pruning tables may be broken",
                deepest_phase1.map_or_else(|| "none".to_owned(), |depth| depth.to_string()),
                config.max_length,
                config.phase1_max_depth,
                config.phase2_max_depth
            );
            return Err(SolveError::SearchExhausted {
                max_length: config.max_length,
            });
        };
        let phase2_length = moves.len() - phase1_length;
        debug_assert!(tables.canonical_fsm.is_canonical(&moves));
        let moves = MoveSequence::new(moves);
        let moves = if config.coalesce {
            moves.coalesce()
        } else {
            moves
        };

        info!(
            success!("Found a {} move solution ({} + {}) in {:.3}s"),
            moves.len(),
            phase1_length,
            phase2_length,
            start.elapsed().as_secs_f64()
        );
        Ok(Solution {
            moves,
            phase1_length,
            phase2_length,
        })
    }
}

/// Solve a facelet string with the default configuration and the
/// process-wide tables.
///
/// # Errors
///
/// See [`Solver::solve`].
pub fn solve(facelets: &str) -> Result<MoveSequence, SolveError> {
    Solver::new(SolverConfig::default())
        .solve(facelets)
        .map(|solution| solution.moves)
}
