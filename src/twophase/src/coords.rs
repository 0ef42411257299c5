//! Coordinates: small integers that capture the part of a cube state one
//! search phase cares about, and move tables that apply moves to them
//! without touching the full state.

use crate::{
    FACT_UNTIL_12, choose,
    cube::{Corner, CubeState, Edge},
    moves::Move,
    start, success,
};
use log::info;
use std::time::Instant;

/// A projection of a cube state onto `0..COUNT`.
///
/// `from_state(&to_state(c)) == c` for every coordinate `c`, and the
/// coordinate of `state.apply(move_)` depends only on the coordinate of
/// `state`, for every move the coordinate is used with.
pub trait Coordinate {
    const COUNT: usize;
    const NAME: &'static str;

    fn from_state(state: &CubeState) -> u16;

    /// Some cube state with this coordinate.
    fn to_state(coord: u16) -> CubeState;
}

/// Orientation of the corners, `3^7` values. The last corner's twist follows
/// from the others.
pub struct Twist;

/// Orientation of the edges, `2^11` values.
pub struct Flip;

/// Which four slots hold the E-slice edges, ignoring their order. `C(12, 4)`
/// values, zero when they are all in the E slice.
pub struct Slice;

/// Permutation of the corners, `8!` values.
pub struct CornerPerm;

/// Permutation of the eight U and D layer edges, `8!` values. Only
/// meaningful when those edges are in the U and D layers.
pub struct EdgePerm;

/// Permutation of the four E-slice edges within the slice, `4!` values.
pub struct SlicePerm;

impl Coordinate for Twist {
    const COUNT: usize = 2187;
    const NAME: &'static str = "twist";

    fn from_state(state: &CubeState) -> u16 {
        state.co[..7]
            .iter()
            .fold(0, |acc, &twist| acc * 3 + u16::from(twist))
    }

    fn to_state(mut coord: u16) -> CubeState {
        let mut state = CubeState::SOLVED;
        let mut sum = 0;
        for i in (0..7).rev() {
            state.co[i] = (coord % 3) as u8;
            sum += state.co[i];
            coord /= 3;
        }
        state.co[7] = (3 - sum % 3) % 3;
        state
    }
}

impl Coordinate for Flip {
    const COUNT: usize = 2048;
    const NAME: &'static str = "flip";

    fn from_state(state: &CubeState) -> u16 {
        state.eo[..11]
            .iter()
            .fold(0, |acc, &flip| acc * 2 + u16::from(flip))
    }

    fn to_state(mut coord: u16) -> CubeState {
        let mut state = CubeState::SOLVED;
        let mut sum = 0;
        for i in (0..11).rev() {
            state.eo[i] = (coord % 2) as u8;
            sum += state.eo[i];
            coord /= 2;
        }
        state.eo[11] = sum % 2;
        state
    }
}

impl Coordinate for Slice {
    const COUNT: usize = 495;
    const NAME: &'static str = "slice";

    fn from_state(state: &CubeState) -> u16 {
        let mut coord = 0;
        let mut found = 0;
        for slot in (0..12).rev() {
            if state.ep[slot as usize].is_e_slice() {
                coord += choose(11 - slot, found + 1);
                found += 1;
            }
        }
        coord as u16
    }

    fn to_state(coord: u16) -> CubeState {
        let mut slots: [Option<Edge>; 12] = [None; 12];
        let mut coord = u32::from(coord);
        let mut remaining = 4;
        for slot in 0..12 {
            if remaining > 0 && coord >= choose(11 - slot, remaining) {
                slots[slot as usize] = Some(Edge::ALL[12 - remaining as usize]);
                coord -= choose(11 - slot, remaining);
                remaining -= 1;
            }
        }

        let mut ud_edges = Edge::ALL[..8].iter().copied();
        let mut state = CubeState::SOLVED;
        for (edge, slot) in state.ep.iter_mut().zip(slots) {
            // There are exactly eight empty slots for the eight U and D edges
            *edge = slot.or_else(|| ud_edges.next()).unwrap_or(Edge::UR);
        }
        state
    }
}

impl Coordinate for CornerPerm {
    const COUNT: usize = 40320;
    const NAME: &'static str = "corner permutation";

    fn from_state(state: &CubeState) -> u16 {
        rank_permutation(&state.cp)
    }

    fn to_state(coord: u16) -> CubeState {
        let mut state = CubeState::SOLVED;
        state.cp = unrank_permutation::<8>(coord).map(|i| Corner::ALL[usize::from(i)]);
        state
    }
}

impl Coordinate for EdgePerm {
    const COUNT: usize = 40320;
    const NAME: &'static str = "edge permutation";

    fn from_state(state: &CubeState) -> u16 {
        rank_permutation(&state.ep[..8])
    }

    fn to_state(coord: u16) -> CubeState {
        let mut state = CubeState::SOLVED;
        for (edge, i) in state.ep.iter_mut().zip(unrank_permutation::<8>(coord)) {
            *edge = Edge::ALL[usize::from(i)];
        }
        state
    }
}

impl Coordinate for SlicePerm {
    const COUNT: usize = 24;
    const NAME: &'static str = "slice permutation";

    fn from_state(state: &CubeState) -> u16 {
        rank_permutation(&state.ep[8..])
    }

    fn to_state(coord: u16) -> CubeState {
        let mut state = CubeState::SOLVED;
        for (edge, i) in state.ep[8..].iter_mut().zip(unrank_permutation::<4>(coord)) {
            *edge = Edge::ALL[8 + usize::from(i)];
        }
        state
    }
}

/// Lehmer code of a permutation. Only the relative order of the items
/// matters, so any slice of distinct pieces can be ranked.
fn rank_permutation<T: Ord>(perm: &[T]) -> u16 {
    let n = perm.len();
    let rank: u32 = perm
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let smaller_after = perm[i + 1..].iter().filter(|&other| other < item).count();
            smaller_after as u32 * FACT_UNTIL_12[n - 1 - i]
        })
        .sum();
    // Never more than 8! - 1
    rank as u16
}

/// The permutation of `0..N` with the given Lehmer code.
fn unrank_permutation<const N: usize>(coord: u16) -> [u8; N] {
    let mut rank = u32::from(coord);
    let mut unused: Vec<u8> = (0..N as u8).collect();
    let mut perm = [0; N];
    for (i, item) in perm.iter_mut().enumerate() {
        let factorial = FACT_UNTIL_12[N - 1 - i];
        *item = unused.remove((rank / factorial) as usize);
        rank %= factorial;
    }
    perm
}

/// Transition table of one coordinate under a fixed list of moves.
#[derive(Debug, Clone)]
pub struct MoveTable {
    move_count: usize,
    table: Box<[u16]>,
}

impl MoveTable {
    /// Tabulate `C` under `moves`, by expanding every coordinate to a cube
    /// state and turning it.
    #[must_use]
    pub fn build<C: Coordinate>(moves: &[Move]) -> Self {
        let table = (0..C::COUNT)
            .flat_map(|coord| {
                let state = C::to_state(coord as u16);
                moves
                    .iter()
                    .map(move |&move_| C::from_state(&state.apply(move_)))
            })
            .collect();
        Self {
            move_count: moves.len(),
            table,
        }
    }

    /// The coordinate reached by applying the `move_index`th move of the
    /// list the table was built with.
    #[inline]
    #[must_use]
    pub fn apply(&self, coord: u16, move_index: usize) -> u16 {
        self.table[usize::from(coord) * self.move_count + move_index]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len() / self.move_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Every move table both phases need. Phase one tables use all of
/// [`Move::ALL`], phase two tables use [`Move::PHASE2`].
#[derive(Debug, Clone)]
pub struct MoveTables {
    pub twist: MoveTable,
    pub flip: MoveTable,
    pub slice: MoveTable,
    pub corner_perm: MoveTable,
    pub edge_perm: MoveTable,
    pub slice_perm: MoveTable,
}

impl MoveTables {
    #[must_use]
    pub fn build() -> Self {
        info!(start!("Building move tables..."));
        let start = Instant::now();
        let tables = Self {
            twist: MoveTable::build::<Twist>(&Move::ALL),
            flip: MoveTable::build::<Flip>(&Move::ALL),
            slice: MoveTable::build::<Slice>(&Move::ALL),
            corner_perm: MoveTable::build::<CornerPerm>(&Move::PHASE2),
            edge_perm: MoveTable::build::<EdgePerm>(&Move::PHASE2),
            slice_perm: MoveTable::build::<SlicePerm>(&Move::PHASE2),
        };
        info!(
            success!("Built move tables in {:.3}s"),
            start.elapsed().as_secs_f64()
        );
        tables
    }
}
