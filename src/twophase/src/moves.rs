//! The 18 face turns of the cube and sequences of them.

use crate::cube::{Corner, CubeState, Edge};
use itertools::Itertools;
use std::{fmt, ops::Deref, str::FromStr, sync::LazyLock};
use thiserror::Error;

/// The six faces, in the order their facelets appear in a facelet string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [U, R, F, D, L, B];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    #[must_use]
    pub fn opposite(self) -> Self {
        Self::ALL[(self as usize + 3) % 6]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Face::U => "Up",
            Face::R => "Right",
            Face::F => "Front",
            Face::D => "Down",
            Face::L => "Left",
            Face::B => "Back",
        }
    }

    /// How to hold the cube while turning this face, assuming U stays on top
    /// and F faces the solver.
    #[must_use]
    pub fn holding_hint(self) -> &'static str {
        match self {
            Face::U => "Keep U on top and F facing you; turn the top layer.",
            Face::D => "Keep U on top and F facing you; turn the bottom layer.",
            Face::L => "Left face on your left; turn the left layer.",
            Face::R => "Right face on your right; turn the right layer.",
            Face::F => "Front face towards you; turn the front layer.",
            Face::B => "Back face away from you; turn the back layer.",
        }
    }

    pub(crate) fn from_char(c: char) -> Option<Self> {
        match c {
            'U' => Some(Face::U),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'B' => Some(Face::B),
            _ => None,
        }
    }

    pub(crate) fn as_char(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One of the 18 face turns. Quarter turns are clockwise when looking at the
/// face, `Prime` turns are counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Move {
    U,
    U2,
    UPrime,
    R,
    R2,
    RPrime,
    F,
    F2,
    FPrime,
    D,
    D2,
    DPrime,
    L,
    L2,
    LPrime,
    B,
    B2,
    BPrime,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("Unknown move {0:?}; expected one of U, U2, U' and so on for the faces U R F D L B")]
    UnknownMove(String),
}

/// The basic clockwise quarter turn of each face, in `Face` order.
const FACE_TURNS: [CubeState; 6] = {
    use Corner::*;
    use Edge::*;
    [
        // U
        CubeState {
            cp: [UBR, URF, UFL, ULB, DFR, DLF, DBL, DRB],
            co: [0, 0, 0, 0, 0, 0, 0, 0],
            ep: [UB, UR, UF, UL, DR, DF, DL, DB, FR, FL, BL, BR],
            eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        },
        // R
        CubeState {
            cp: [DFR, UFL, ULB, URF, DRB, DLF, DBL, UBR],
            co: [2, 0, 0, 1, 1, 0, 0, 2],
            ep: [FR, UF, UL, UB, BR, DF, DL, DB, DR, FL, BL, UR],
            eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        },
        // F
        CubeState {
            cp: [UFL, DLF, ULB, UBR, URF, DFR, DBL, DRB],
            co: [1, 2, 0, 0, 2, 1, 0, 0],
            ep: [UR, FL, UL, UB, DR, FR, DL, DB, UF, DF, BL, BR],
            eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
        },
        // D
        CubeState {
            cp: [URF, UFL, ULB, UBR, DLF, DBL, DRB, DFR],
            co: [0, 0, 0, 0, 0, 0, 0, 0],
            ep: [UR, UF, UL, UB, DF, DL, DB, DR, FR, FL, BL, BR],
            eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        },
        // L
        CubeState {
            cp: [URF, ULB, DBL, UBR, DFR, UFL, DLF, DRB],
            co: [0, 1, 2, 0, 0, 2, 1, 0],
            ep: [UR, UF, BL, UB, DR, DF, FL, DB, FR, UL, DL, BR],
            eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        },
        // B
        CubeState {
            cp: [URF, UFL, UBR, DRB, DFR, DLF, ULB, DBL],
            co: [0, 0, 1, 2, 0, 0, 2, 1],
            ep: [UR, UF, UL, BR, DR, DF, DL, BL, FR, FL, UB, DB],
            eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
        },
    ]
};

/// The cube state of every move, indexed by `Move as usize`.
static MOVE_STATES: LazyLock<[CubeState; 18]> = LazyLock::new(|| {
    let mut states = [CubeState::SOLVED; 18];
    for face in Face::ALL {
        let mut power = CubeState::SOLVED;
        for turns in 1..=3 {
            power = power.compose(&FACE_TURNS[face as usize]);
            states[Move::new(face, turns) as usize] = power;
        }
    }
    states
});

impl Move {
    pub const ALL: [Self; 18] = {
        use Move::*;
        let v = [
            U, U2, UPrime, R, R2, RPrime, F, F2, FPrime, D, D2, DPrime, L, L2, LPrime, B, B2,
            BPrime,
        ];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    /// The moves that keep a cube inside the phase two subgroup
    /// `<U, D, R2, L2, F2, B2>`.
    pub const PHASE2: [Self; 10] = {
        use Move::*;
        [U, U2, UPrime, R2, F2, D, D2, DPrime, L2, B2]
    };

    /// The move turning `face` clockwise `turns` quarter turns. `turns` is
    /// taken modulo four and must not be a multiple of four.
    #[must_use]
    pub(crate) fn new(face: Face, turns: u8) -> Self {
        let turns = turns % 4;
        assert!(turns != 0, "a move must turn its face");
        Self::ALL[face as usize * 3 + usize::from(turns) - 1]
    }

    #[must_use]
    pub fn face(self) -> Face {
        Face::ALL[self as usize / 3]
    }

    /// Number of clockwise quarter turns, one to three.
    #[must_use]
    pub fn turns(self) -> u8 {
        self as u8 % 3 + 1
    }

    #[must_use]
    pub fn is_half_turn(self) -> bool {
        self.turns() == 2
    }

    /// How many times the move must be applied to return to where it
    /// started.
    #[must_use]
    pub fn order(self) -> usize {
        if self.is_half_turn() { 2 } else { 4 }
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        Self::new(self.face(), 4 - self.turns())
    }

    #[must_use]
    pub fn is_phase2(self) -> bool {
        self.is_half_turn() || matches!(self.face(), Face::U | Face::D)
    }

    /// The permutation and orientation change this move applies.
    #[must_use]
    pub fn cube_state(self) -> &'static CubeState {
        &MOVE_STATES[self as usize]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        const NAMES: [&str; 18] = [
            "U", "U2", "U'", "R", "R2", "R'", "F", "F2", "F'", "D", "D2", "D'", "L", "L2", "L'",
            "B", "B2", "B'",
        ];
        NAMES[self as usize]
    }

    /// A plain-language description of the move for presentation.
    #[must_use]
    pub fn description(self) -> String {
        let direction = match self.turns() {
            1 => "clockwise",
            2 => "180°",
            _ => "counter-clockwise",
        };
        format!("Rotate {} face {direction}", self.face().name())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let face = chars
            .next()
            .and_then(Face::from_char)
            .ok_or_else(|| ParseMoveError::UnknownMove(s.to_owned()))?;
        let turns = match chars.as_str() {
            "" => 1,
            "2" => 2,
            "'" => 3,
            _ => return Err(ParseMoveError::UnknownMove(s.to_owned())),
        };
        Ok(Move::new(face, turns))
    }
}

impl CubeState {
    /// The state reached by turning `move_` on this cube.
    #[must_use]
    pub fn apply(&self, move_: Move) -> Self {
        self.compose(move_.cube_state())
    }

    /// The state reached by turning each move of `moves` in order.
    #[must_use]
    pub fn apply_sequence<'a>(&self, moves: impl IntoIterator<Item = &'a Move>) -> Self {
        let mut result_1 = *self;
        let mut result_2 = *self;
        for &move_ in moves {
            result_2.replace_compose(&result_1, move_.cube_state());
            std::mem::swap(&mut result_1, &mut result_2);
        }
        result_1
    }
}

/// An ordered sequence of moves, written in the usual whitespace-separated
/// notation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MoveSequence(pub Vec<Move>);

impl MoveSequence {
    #[must_use]
    pub fn new(moves: Vec<Move>) -> Self {
        Self(moves)
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Move> {
        self.0
    }

    /// The sequence undoing this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self(self.0.iter().rev().map(|move_| move_.inverse()).collect())
    }

    /// Merge turns of the same face that are adjacent, or separated only by
    /// turns of the opposite face. Turns adding up to nothing disappear.
    #[must_use]
    pub fn coalesce(&self) -> Self {
        let mut merged: Vec<Move> = Vec::with_capacity(self.0.len());
        for &move_ in &self.0 {
            let face = move_.face();
            // Only the trailing run of moves on this axis commutes with `move_`
            let run_start = merged
                .iter()
                .rposition(|prev| prev.face() != face && prev.face() != face.opposite())
                .map_or(0, |i| i + 1);
            match merged[run_start..]
                .iter()
                .position(|prev| prev.face() == face)
            {
                Some(offset) => {
                    let i = run_start + offset;
                    let turns = (merged[i].turns() + move_.turns()) % 4;
                    if turns == 0 {
                        merged.remove(i);
                    } else {
                        merged[i] = Move::new(face, turns);
                    }
                }
                None => merged.push(move_),
            }
        }
        Self(merged)
    }

    /// A random sequence of `length` moves that never turns the same face
    /// twice in a row.
    #[must_use]
    pub fn random(length: usize, rng: &mut fastrand::Rng) -> Self {
        let mut moves: Vec<Move> = Vec::with_capacity(length);
        while moves.len() < length {
            let move_ = Move::ALL[rng.usize(..Move::ALL.len())];
            if moves.last().is_some_and(|last| last.face() == move_.face()) {
                continue;
            }
            moves.push(move_);
        }
        Self(moves)
    }

    /// One description per move, for step-by-step presentation.
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|move_| {
                format!(
                    "{move_}: {}. {}",
                    move_.description(),
                    move_.face().holding_hint()
                )
            })
            .collect()
    }
}

impl Deref for MoveSequence {
    type Target = [Move];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Move>> for MoveSequence {
    fn from(moves: Vec<Move>) -> Self {
        Self(moves)
    }
}

impl<'a> IntoIterator for &'a MoveSequence {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

impl FromStr for MoveSequence {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}
