//! Conversion between the 54-character facelet description of a cube and
//! its cubie-level state.
//!
//! Facelets are listed face by face in the order U, R, F, D, L, B, each face
//! read row by row from its top-left sticker, as seen when looking straight
//! at that face with the cube held in its reference orientation:
//!
//! ```text
//!              |U1 U2 U3|
//!              |U4 U5 U6|
//!              |U7 U8 U9|
//!     |L1 L2 L3|F1 F2 F3|R1 R2 R3|B1 B2 B3|
//!     |L4 L5 L6|F4 F5 F6|R4 R5 R6|B4 B5 B6|
//!     |L7 L8 L9|F7 F8 F9|R7 R8 R9|B7 B8 B9|
//!              |D1 D2 D3|
//!              |D4 D5 D6|
//!              |D7 D8 D9|
//! ```
//!
//! Any six distinct characters may be used as colors. The color of each
//! center sticker names its face, so `"UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB"`
//! and `"WWWWWWWWWRRRRRRRRRGGGGGGGGGYYYYYYYYYOOOOOOOOOBBBBBBBBB"` both describe
//! the solved cube.

use crate::{
    cube::{Corner, CubeState, Edge, UnsolvableState},
    moves::Face,
};
use fxhash::FxHashMap;
use itertools::Itertools;
use thiserror::Error;

pub const FACELET_COUNT: usize = 54;

/// Facelet indices of each corner slot, starting from its U or D sticker and
/// continuing clockwise.
const CORNER_FACELETS: [[usize; 3]; 8] = [
    [8, 9, 20],
    [6, 18, 38],
    [0, 36, 47],
    [2, 45, 11],
    [29, 26, 15],
    [27, 44, 24],
    [33, 53, 42],
    [35, 17, 51],
];

/// Facelet indices of each edge slot, reference sticker first.
const EDGE_FACELETS: [[usize; 2]; 12] = [
    [5, 10],
    [7, 19],
    [3, 37],
    [1, 46],
    [32, 16],
    [28, 25],
    [30, 43],
    [34, 52],
    [23, 12],
    [21, 41],
    [50, 39],
    [48, 14],
];

const CORNER_COLORS: [[Face; 3]; 8] = {
    use Face::*;
    [
        [U, R, F],
        [U, F, L],
        [U, L, B],
        [U, B, R],
        [D, F, R],
        [D, L, F],
        [D, B, L],
        [D, R, B],
    ]
};

const EDGE_COLORS: [[Face; 2]; 12] = {
    use Face::*;
    [
        [U, R],
        [U, F],
        [U, L],
        [U, B],
        [D, R],
        [D, F],
        [D, L],
        [D, B],
        [F, R],
        [F, L],
        [B, L],
        [B, R],
    ]
};

/// A facelet string that does not describe a cube at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedInput {
    #[error("Expected {FACELET_COUNT} facelets but got {0}")]
    WrongLength(usize),
    #[error("Expected exactly 6 colors but found {count}: {colors:?}")]
    WrongColorCount { count: usize, colors: String },
    #[error("The color {color:?} appears {count} times; every color must appear exactly 9 times")]
    UnbalancedColor { color: char, count: usize },
    #[error("The centers must all have different colors but {color:?} is on more than one")]
    DuplicateCenter { color: char },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FaceletError {
    #[error(transparent)]
    Malformed(#[from] MalformedInput),
    #[error(transparent)]
    Unsolvable(#[from] UnsolvableState),
}

/// Read a facelet string into a cube state, rejecting anything that is not a
/// legal cube.
///
/// # Errors
///
/// Fails with [`FaceletError::Malformed`] if the string has the wrong length,
/// the wrong number of colors, a color that does not appear exactly nine
/// times, or two centers of the same color. Fails with
/// [`FaceletError::Unsolvable`] if the stickers describe pieces that do not
/// exist or a configuration no sequence of face turns can produce.
pub fn decode(facelets: &str) -> Result<CubeState, FaceletError> {
    let faces = faces_of(facelets)?;

    let mut cp = Corner::ALL;
    let mut co = [0; 8];
    for (slot, facelet_indices) in CORNER_FACELETS.iter().enumerate() {
        let colors = facelet_indices.map(|i| faces[i]);
        // The sticker facing U or D tells us how the corner is twisted
        let twist = colors
            .iter()
            .position(|&face| matches!(face, Face::U | Face::D))
            .ok_or(UnsolvableState::UnknownCorner(Corner::ALL[slot]))?;
        let clockwise = [colors[(twist + 1) % 3], colors[(twist + 2) % 3]];
        let corner = CORNER_COLORS
            .iter()
            .position(|reference| reference[0] == colors[twist] && reference[1..] == clockwise)
            .ok_or(UnsolvableState::UnknownCorner(Corner::ALL[slot]))?;
        cp[slot] = Corner::ALL[corner];
        co[slot] = u8::try_from(twist).unwrap_or_default();
    }

    let mut ep = Edge::ALL;
    let mut eo = [0; 12];
    for (slot, facelet_indices) in EDGE_FACELETS.iter().enumerate() {
        let colors = facelet_indices.map(|i| faces[i]);
        let (edge, flip) = EDGE_COLORS
            .iter()
            .enumerate()
            .find_map(|(edge, reference)| {
                if *reference == colors {
                    Some((edge, 0))
                } else if *reference == [colors[1], colors[0]] {
                    Some((edge, 1))
                } else {
                    None
                }
            })
            .ok_or(UnsolvableState::UnknownEdge(Edge::ALL[slot]))?;
        ep[slot] = Edge::ALL[edge];
        eo[slot] = flip;
    }

    Ok(CubeState::new(cp, co, ep, eo)?)
}

/// Write a cube state as a facelet string using the face letters
/// `U R F D L B` as colors. `decode(&encode(state))` is `state` for every
/// valid state.
#[must_use]
pub fn encode(state: &CubeState) -> String {
    let mut faces = [Face::U; FACELET_COUNT];
    for face in Face::ALL {
        faces[face as usize * 9 + 4] = face;
    }
    for (slot, facelet_indices) in CORNER_FACELETS.iter().enumerate() {
        let corner = state.cp[slot] as usize;
        let twist = usize::from(state.co[slot]);
        for n in 0..3 {
            faces[facelet_indices[(n + twist) % 3]] = CORNER_COLORS[corner][n];
        }
    }
    for (slot, facelet_indices) in EDGE_FACELETS.iter().enumerate() {
        let edge = state.ep[slot] as usize;
        let flip = usize::from(state.eo[slot]);
        for n in 0..2 {
            faces[facelet_indices[(n + flip) % 2]] = EDGE_COLORS[edge][n];
        }
    }
    faces.iter().map(|face| face.as_char()).collect()
}

/// Check the shape of the input and translate each sticker color into the
/// face whose center carries that color.
fn faces_of(facelets: &str) -> Result<[Face; FACELET_COUNT], MalformedInput> {
    let chars = facelets.chars().collect_vec();
    if chars.len() != FACELET_COUNT {
        return Err(MalformedInput::WrongLength(chars.len()));
    }

    let counts = chars.iter().copied().counts();
    if counts.len() != 6 {
        return Err(MalformedInput::WrongColorCount {
            count: counts.len(),
            colors: chars.iter().unique().collect(),
        });
    }
    if let Some((&color, &count)) = chars
        .iter()
        .unique()
        .map(|color| (color, &counts[color]))
        .find(|&(_, &count)| count != 9)
    {
        return Err(MalformedInput::UnbalancedColor { color, count });
    }

    let mut center_faces = FxHashMap::default();
    for face in Face::ALL {
        let color = chars[face as usize * 9 + 4];
        if center_faces.insert(color, face).is_some() {
            return Err(MalformedInput::DuplicateCenter { color });
        }
    }

    let mut faces = [Face::U; FACELET_COUNT];
    for (face, color) in faces.iter_mut().zip(&chars) {
        // Six colors and six distinct centers means every color is a center
        *face = center_faces[color];
    }
    Ok(faces)
}
