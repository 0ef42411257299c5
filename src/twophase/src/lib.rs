//! A two-phase Rubik's Cube solver.
//!
//! A cube is read from its 54-facelet description, checked for legality, and
//! solved by iterative deepening A* in two stages: first into the subgroup
//! `<U, D, R2, L2, F2, B2>`, then to the solved state inside that subgroup.
//! Both stages are guided by pruning tables that are built once and shared
//! by every subsequent solve.

#![warn(clippy::pedantic)]
#![allow(clippy::similar_names, clippy::too_many_lines)]

pub mod cancel;
pub(crate) mod canonical_fsm;
pub mod config;
pub mod coords;
pub mod cube;
pub mod facelet;
pub mod moves;
pub mod pruning;
pub(crate) mod search;
pub mod solver;

pub use cancel::CancellationToken;
pub use config::{Config, SolverConfig, TableConfig};
pub use cube::{CubeState, UnsolvableState};
pub use facelet::{FaceletError, MalformedInput};
pub use moves::{Face, Move, MoveSequence};
pub use pruning::Tables;
pub use solver::{Solution, SolveError, Solver, solve};

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}

/// A precomputed factorial table where index `i` is `i!`. Permutations on the
/// cube never have more than 12 elements.
const FACT_UNTIL_12: [u32; 13] = {
    let mut arr = [0; 13];
    arr[0] = 1;
    let mut i = 1;
    while i < arr.len() {
        arr[i] = arr[i - 1] * i as u32;
        i += 1;
    }
    arr
};

/// Binomial coefficient `n` choose `k`, zero when `k > n`.
const fn choose(n: u32, k: u32) -> u32 {
    if k > n {
        return 0;
    }
    let mut result = 1;
    let mut i = 0;
    while i < k {
        result = result * (n - i) / (i + 1);
        i += 1;
    }
    result
}
