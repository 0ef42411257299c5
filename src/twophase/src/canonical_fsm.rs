//! Canonical sequence automaton over face turns, derived primarily from
//! Lucas Garron's implementation in twsearch with permission:
//! https://github.com/cubing/twsearch/blob/main/src/rs/_internal/canonical_fsm/canonical_fsm.rs
//!
//! Every face is a move class. A face may not follow itself, and of two
//! commuting faces only one order is accepted, which for the cube means a
//! face is never followed by its opposite face with a lower index.

use crate::moves::{Face, Move};
use fxhash::FxHashMap;

const NUM_MOVE_CLASSES: usize = Face::ALL.len();

// Bit N is indexed by `Face as usize` of N.
#[derive(Copy, Clone, Eq, Hash, PartialEq)]
struct MoveClassMask(u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CanonicalFSMState(usize);

struct MaskToState(FxHashMap<MoveClassMask, CanonicalFSMState>);

struct StateToMask(Vec<MoveClassMask>);

#[derive(Debug, Clone)]
pub struct CanonicalFSM {
    next_state_lookup: Vec<[CanonicalFSMState; NUM_MOVE_CLASSES]>,
}

/// Whether turning `a` then `b` always equals turning `b` then `a`.
fn faces_commute(a: Face, b: Face) -> bool {
    let a = Move::new(a, 1).cube_state();
    let b = Move::new(b, 1).cube_state();
    a.compose(b) == b.compose(a)
}

impl CanonicalFSM {
    #[must_use]
    pub fn new() -> Self {
        let mut commutes = [MoveClassMask((1 << NUM_MOVE_CLASSES) - 1); NUM_MOVE_CLASSES];

        for face_1 in Face::ALL {
            for face_2 in Face::ALL {
                if !faces_commute(face_1, face_2) {
                    let (i, j) = (face_1 as usize, face_2 as usize);
                    commutes[i].0 &= !(1 << j);
                    commutes[j].0 &= !(1 << i);
                }
            }
        }

        let mut next_state_lookup = vec![];

        let mut mask_to_state = MaskToState(FxHashMap::default());
        mask_to_state
            .0
            .insert(MoveClassMask(0), CanonicalFSMState(0));
        // Indexed by state ordinal, holds the set of faces in the sequence so
        // far that no later face has failed to commute with
        let mut state_to_mask = StateToMask(vec![MoveClassMask(0)]);

        let mut queue_index = 0;
        while queue_index < state_to_mask.0.len() {
            // illegal state
            let mut next_state = [CanonicalFSMState(!0); NUM_MOVE_CLASSES];

            let dequeue_move_class_mask = state_to_mask.0[queue_index];
            queue_index += 1;

            for move_class_index in 0..NUM_MOVE_CLASSES {
                // A greater face in the state that commutes with this one
                // must come after it, and a face never follows itself
                let skip = (dequeue_move_class_mask.0 & commutes[move_class_index].0)
                    >> (move_class_index + 1)
                    != 0
                    || ((dequeue_move_class_mask.0 >> move_class_index) & 1) != 0;
                if skip {
                    continue;
                }

                let mut next_state_bits = (dequeue_move_class_mask.0
                    & commutes[move_class_index].0)
                    | (1 << move_class_index);

                // Of two set bits with the same commuting faces only the
                // higher one matters
                for i in 0..NUM_MOVE_CLASSES {
                    if (next_state_bits >> i) & 1 != 0 {
                        for j in (i + 1)..NUM_MOVE_CLASSES {
                            if ((next_state_bits >> j) & 1) != 0 && commutes[i] == commutes[j] {
                                next_state_bits &= !(1 << i);
                            }
                        }
                    }
                }

                let next_move_mask_class = MoveClassMask(next_state_bits);
                next_state[move_class_index] = match mask_to_state.0.get(&next_move_mask_class) {
                    Some(&state) => state,
                    None => {
                        let next_state = CanonicalFSMState(state_to_mask.0.len());
                        mask_to_state.0.insert(next_move_mask_class, next_state);
                        state_to_mask.0.push(next_move_mask_class);
                        next_state
                    }
                };
            }
            next_state_lookup.push(next_state);
        }

        Self { next_state_lookup }
    }

    /// The state after turning `face`, or `None` if that turn would make the
    /// sequence non-canonical.
    #[inline]
    #[must_use]
    pub fn next_state(
        &self,
        current_fsm_state: CanonicalFSMState,
        face: Face,
    ) -> Option<CanonicalFSMState> {
        match self.next_state_lookup[current_fsm_state.0][face as usize] {
            CanonicalFSMState(illegal_state) if illegal_state == !0 => None,
            state => Some(state),
        }
    }

    /// Whether every consecutive pair of moves is accepted.
    #[must_use]
    pub fn is_canonical(&self, moves: &[Move]) -> bool {
        moves
            .iter()
            .try_fold(CanonicalFSMState::default(), |state, move_| {
                self.next_state(state, move_.face())
            })
            .is_some()
    }
}

impl Default for CanonicalFSM {
    fn default() -> Self {
        Self::new()
    }
}
