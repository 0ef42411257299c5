//! Iterative deepening A* over the coordinates of one phase.

use crate::{
    cancel::CancellationToken,
    canonical_fsm::CanonicalFSMState,
    coords::{Coordinate, CornerPerm, EdgePerm, Flip, Slice, SlicePerm, Twist},
    cube::CubeState,
    moves::Move,
    pruning::Tables,
    working,
};
use log::debug;
use std::{marker::PhantomData, ops::ControlFlow, time::Instant};

/// The search was stopped through its cancellation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

/// What a phase searches over: its coordinates, moves, heuristic, and
/// which goal paths it accepts.
pub trait Phase {
    type Coords: Copy;
    const NAME: &'static str;
    const MOVES: &'static [Move];

    fn coords(state: &CubeState) -> Self::Coords;

    fn apply(tables: &Tables, coords: Self::Coords, move_index: usize) -> Self::Coords;

    /// Admissible estimate of the moves left, zero exactly at the goal.
    fn heuristic(tables: &Tables, coords: Self::Coords) -> u8;

    /// Whether a path ending at the goal is worth reporting.
    fn accepts(_path: &[Move]) -> bool {
        true
    }
}

/// Reach `<U, D, R2, L2, F2, B2>`: every orientation is zero and the E-slice
/// edges are in the E slice.
pub struct Phase1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase1Coords {
    twist: u16,
    flip: u16,
    slice: u16,
}

/// Solve the cube using only moves that stay inside the phase one goal.
pub struct Phase2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase2Coords {
    corner_perm: u16,
    edge_perm: u16,
    slice_perm: u16,
}

impl Phase for Phase1 {
    type Coords = Phase1Coords;
    const NAME: &'static str = "phase 1";
    const MOVES: &'static [Move] = &Move::ALL;

    fn coords(state: &CubeState) -> Phase1Coords {
        Phase1Coords {
            twist: Twist::from_state(state),
            flip: Flip::from_state(state),
            slice: Slice::from_state(state),
        }
    }

    #[inline]
    fn apply(tables: &Tables, coords: Phase1Coords, move_index: usize) -> Phase1Coords {
        Phase1Coords {
            twist: tables.moves.twist.apply(coords.twist, move_index),
            flip: tables.moves.flip.apply(coords.flip, move_index),
            slice: tables.moves.slice.apply(coords.slice, move_index),
        }
    }

    #[inline]
    fn heuristic(tables: &Tables, coords: Phase1Coords) -> u8 {
        tables
            .twist_slice
            .distance(coords.twist, coords.slice)
            .max(tables.flip_slice.distance(coords.flip, coords.slice))
    }

    /// A path whose last move already stays inside the goal has a shorter
    /// prefix that is also a solution.
    fn accepts(path: &[Move]) -> bool {
        path.last().is_none_or(|last| !last.is_phase2())
    }
}

impl Phase for Phase2 {
    type Coords = Phase2Coords;
    const NAME: &'static str = "phase 2";
    const MOVES: &'static [Move] = &Move::PHASE2;

    fn coords(state: &CubeState) -> Phase2Coords {
        Phase2Coords {
            corner_perm: CornerPerm::from_state(state),
            edge_perm: EdgePerm::from_state(state),
            slice_perm: SlicePerm::from_state(state),
        }
    }

    #[inline]
    fn apply(tables: &Tables, coords: Phase2Coords, move_index: usize) -> Phase2Coords {
        Phase2Coords {
            corner_perm: tables.moves.corner_perm.apply(coords.corner_perm, move_index),
            edge_perm: tables.moves.edge_perm.apply(coords.edge_perm, move_index),
            slice_perm: tables.moves.slice_perm.apply(coords.slice_perm, move_index),
        }
    }

    #[inline]
    fn heuristic(tables: &Tables, coords: Phase2Coords) -> u8 {
        tables
            .corner_perm_slice_perm
            .distance(coords.corner_perm, coords.slice_perm)
            .max(
                tables
                    .edge_perm_slice_perm
                    .distance(coords.edge_perm, coords.slice_perm),
            )
    }
}

pub struct PhaseSearch<'a, P: Phase> {
    tables: &'a Tables,
    cancel: &'a CancellationToken,
    path: Vec<Move>,
    nodes_visited: u64,
    _marker: PhantomData<P>,
}

impl<'a, P: Phase> PhaseSearch<'a, P> {
    pub fn new(tables: &'a Tables, cancel: &'a CancellationToken) -> Self {
        Self {
            tables,
            cancel,
            path: Vec::new(),
            nodes_visited: 0,
            _marker: PhantomData,
        }
    }

    pub fn heuristic(&self, coords: P::Coords) -> u8 {
        P::heuristic(self.tables, coords)
    }

    /// Depth-first search for every accepted goal path of exactly `depth`
    /// moves that continues canonically from `fsm_state`. `visit` receives
    /// each path and the automaton state after it, and decides whether to
    /// keep going.
    pub fn search_depth<V>(
        &mut self,
        root: P::Coords,
        fsm_state: CanonicalFSMState,
        depth: u8,
        visit: &mut V,
    ) -> Result<ControlFlow<()>, Cancelled>
    where
        V: FnMut(&[Move], CanonicalFSMState) -> Result<ControlFlow<()>, Cancelled>,
    {
        debug!(working!("Searching {} depth limit {}..."), P::NAME, depth);
        let depth_start = Instant::now();
        self.path.clear();
        self.nodes_visited = 0;

        let flow = self.search_for_solution(root, fsm_state, depth, visit);

        debug!(
            working!("Traversed {} nodes in {:.3}s"),
            self.nodes_visited,
            depth_start.elapsed().as_secs_f64()
        );
        flow
    }

    /// The shortest accepted goal path of at most `max_depth` moves, if
    /// there is one.
    pub fn shortest(
        &mut self,
        root: P::Coords,
        fsm_state: CanonicalFSMState,
        max_depth: u8,
    ) -> Result<Option<Vec<Move>>, Cancelled> {
        let mut found = None;
        for depth in self.heuristic(root)..=max_depth {
            let flow = self.search_depth(root, fsm_state, depth, &mut |path: &[Move], _| {
                found = Some(path.to_vec());
                Ok(ControlFlow::Break(()))
            })?;
            if flow.is_break() {
                break;
            }
        }
        Ok(found)
    }

    fn search_for_solution<V>(
        &mut self,
        coords: P::Coords,
        fsm_state: CanonicalFSMState,
        permitted_cost: u8,
        visit: &mut V,
    ) -> Result<ControlFlow<()>, Cancelled>
    where
        V: FnMut(&[Move], CanonicalFSMState) -> Result<ControlFlow<()>, Cancelled>,
    {
        if self.cancel.is_cancelled() {
            return Err(Cancelled);
        }
        self.nodes_visited += 1;

        let admissible_prune_cost = P::heuristic(self.tables, coords);
        if admissible_prune_cost > permitted_cost {
            return Ok(ControlFlow::Continue(()));
        }
        if permitted_cost == 0 {
            // The heuristic is zero, so this is the goal
            if P::accepts(&self.path) {
                return visit(&self.path, fsm_state);
            }
            return Ok(ControlFlow::Continue(()));
        }

        for (move_index, &move_) in P::MOVES.iter().enumerate() {
            // Enforce a total ordering of commuting moves and never turn a
            // face twice in a row
            let Some(next_fsm_state) = self
                .tables
                .canonical_fsm
                .next_state(fsm_state, move_.face())
            else {
                continue;
            };

            self.path.push(move_);
            let flow = self.search_for_solution(
                P::apply(self.tables, coords, move_index),
                next_fsm_state,
                permitted_cost - 1,
                visit,
            );
            self.path.pop();

            if flow? == ControlFlow::Break(()) {
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}
