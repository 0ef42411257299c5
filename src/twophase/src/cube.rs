//! The cubie-level model of a 3x3x3 cube: which piece sits in which slot,
//! and how it is twisted or flipped there.

use std::fmt;
use thiserror::Error;

/// The eight corner pieces, named by the faces they touch. The discriminant
/// doubles as the index of the corner's home slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[allow(clippy::upper_case_acronyms)]
pub enum Corner {
    URF,
    UFL,
    ULB,
    UBR,
    DFR,
    DLF,
    DBL,
    DRB,
}

/// The twelve edge pieces. `FR`, `FL`, `BL` and `BR` make up the E slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[allow(clippy::upper_case_acronyms)]
pub enum Edge {
    UR,
    UF,
    UL,
    UB,
    DR,
    DF,
    DL,
    DB,
    FR,
    FL,
    BL,
    BR,
}

impl Corner {
    pub const ALL: [Self; 8] = {
        use Corner::*;
        let v = [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };
}

impl Edge {
    pub const ALL: [Self; 12] = {
        use Edge::*;
        let v = [UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    /// Whether this edge belongs in the middle layer between U and D.
    #[must_use]
    pub fn is_e_slice(self) -> bool {
        self >= Edge::FR
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Why a cube description cannot be reached from the solved cube with face
/// turns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnsolvableState {
    #[error("this configuration cannot arise from a real cube: the corner in slot {0} has an impossible color combination")]
    UnknownCorner(Corner),
    #[error("this configuration cannot arise from a real cube: the edge in slot {0} has an impossible color combination")]
    UnknownEdge(Edge),
    #[error("this configuration cannot arise from a real cube: corner {0} appears more than once")]
    DuplicateCorner(Corner),
    #[error("this configuration cannot arise from a real cube: edge {0} appears more than once")]
    DuplicateEdge(Edge),
    #[error("this configuration cannot arise from a real cube: orientation {value} is out of range")]
    OrientationOutOfRange { value: u8 },
    #[error("this configuration cannot arise from a real cube: a corner is twisted")]
    CornerTwist,
    #[error("this configuration cannot arise from a real cube: an edge is flipped")]
    EdgeFlip,
    #[error("this configuration cannot arise from a real cube: two pieces are swapped")]
    Parity,
}

/// A full cube configuration. Slot `i` of `cp` holds the corner that
/// currently occupies corner position `i`, and `co[i]` is its clockwise twist
/// relative to the reference orientation. The same holds for the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeState {
    pub(crate) cp: [Corner; 8],
    pub(crate) co: [u8; 8],
    pub(crate) ep: [Edge; 12],
    pub(crate) eo: [u8; 12],
}

impl CubeState {
    pub const SOLVED: Self = Self {
        cp: Corner::ALL,
        co: [0; 8],
        ep: Edge::ALL,
        eo: [0; 12],
    };

    /// Create a cube state and check that it is reachable from the solved
    /// cube.
    ///
    /// # Errors
    ///
    /// Returns the first invariant the configuration breaks.
    pub fn new(
        cp: [Corner; 8],
        co: [u8; 8],
        ep: [Edge; 12],
        eo: [u8; 12],
    ) -> Result<Self, UnsolvableState> {
        let state = Self { cp, co, ep, eo };
        state.verify()?;
        Ok(state)
    }

    #[must_use]
    pub fn corner_permutation(&self) -> &[Corner; 8] {
        &self.cp
    }

    #[must_use]
    pub fn corner_orientation(&self) -> &[u8; 8] {
        &self.co
    }

    #[must_use]
    pub fn edge_permutation(&self) -> &[Edge; 12] {
        &self.ep
    }

    #[must_use]
    pub fn edge_orientation(&self) -> &[u8; 12] {
        &self.eo
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    /// Check the invariants every reachable state satisfies: each piece
    /// appears once, orientations are in range, the twist sum is a multiple
    /// of three, the flip sum is even, and the corner and edge permutations
    /// have equal parity.
    ///
    /// # Errors
    ///
    /// Returns the first invariant that does not hold.
    pub fn verify(&self) -> Result<(), UnsolvableState> {
        let mut seen_corners = [false; 8];
        for &corner in &self.cp {
            if std::mem::replace(&mut seen_corners[corner as usize], true) {
                return Err(UnsolvableState::DuplicateCorner(corner));
            }
        }
        let mut seen_edges = [false; 12];
        for &edge in &self.ep {
            if std::mem::replace(&mut seen_edges[edge as usize], true) {
                return Err(UnsolvableState::DuplicateEdge(edge));
            }
        }

        if let Some(&value) = self.co.iter().find(|&&twist| twist >= 3) {
            return Err(UnsolvableState::OrientationOutOfRange { value });
        }
        if let Some(&value) = self.eo.iter().find(|&&flip| flip >= 2) {
            return Err(UnsolvableState::OrientationOutOfRange { value });
        }

        if self.co.iter().map(|&twist| u32::from(twist)).sum::<u32>() % 3 != 0 {
            return Err(UnsolvableState::CornerTwist);
        }
        if self.eo.iter().map(|&flip| u32::from(flip)).sum::<u32>() % 2 != 0 {
            return Err(UnsolvableState::EdgeFlip);
        }

        if permutation_parity(&self.cp) != permutation_parity(&self.ep) {
            return Err(UnsolvableState::Parity);
        }

        Ok(())
    }

    /// Compose `a` and `b` into self: the result is `a` followed by `b`.
    pub fn replace_compose(&mut self, a: &Self, b: &Self) {
        for i in 0..8 {
            let from = b.cp[i] as usize;
            self.cp[i] = a.cp[from];
            self.co[i] = (a.co[from] + b.co[i]) % 3;
        }
        for i in 0..12 {
            let from = b.ep[i] as usize;
            self.ep[i] = a.ep[from];
            self.eo[i] = (a.eo[from] + b.eo[i]) % 2;
        }
    }

    /// `self` followed by `other`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        let mut result = Self::SOLVED;
        result.replace_compose(self, other);
        result
    }

    /// The state that undoes `self`, so `self.compose(&self.inverse())` is
    /// solved.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut result = Self::SOLVED;
        for i in 0..8 {
            let to = self.cp[i] as usize;
            result.cp[to] = Corner::ALL[i];
            result.co[to] = (3 - self.co[i]) % 3;
        }
        for i in 0..12 {
            let to = self.ep[i] as usize;
            result.ep[to] = Edge::ALL[i];
            result.eo[to] = (2 - self.eo[i]) % 2;
        }
        result
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::SOLVED
    }
}

/// Parity of a permutation given as a slice of piece labels: `true` when it
/// decomposes into an odd number of transpositions.
pub(crate) fn permutation_parity<T: Ord>(perm: &[T]) -> bool {
    let mut inversions = 0_usize;
    for i in 0..perm.len() {
        for j in (i + 1)..perm.len() {
            if perm[i] > perm[j] {
                inversions += 1;
            }
        }
    }
    inversions % 2 == 1
}
