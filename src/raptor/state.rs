use bitvec::prelude::*;

use crate::shared::{Time, time};

/// Reconstruction pointer: which stop the label came from, and on board
/// of which trip. `trip == None` marks a footpath edge.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParentEdge {
    pub prev: u32,
    pub trip: Option<u32>,
}

/// Per-query scratch state. Allocated once per query, sized for the
/// index; the index itself stays untouched.
pub(crate) struct SearchState {
    /// Best arrival at each stop using the rounds completed so far.
    pub best_prev: Vec<Time>,
    /// Staging labels for the round in progress.
    pub best_cur: Vec<Time>,
    /// Flat `(max_rounds + 1) x stop_count` matrix of reconstruction
    /// pointers; row 0 stays empty.
    parents: Vec<Option<ParentEdge>>,
    /// Stops whose labels changed last round, the boarding frontier.
    pub marked: BitVec<usize, Lsb0>,
    /// Stops improved by a trip in the round in progress.
    pub improved: BitVec<usize, Lsb0>,
    /// Earliest boardable position per trip this round; `u32::MAX`
    /// means the trip was not reached.
    pub boardings: Vec<u32>,
    /// Trips touched this round, in discovery order.
    pub touched: Vec<u32>,
    stop_count: usize,
}

impl SearchState {
    pub fn new(stop_count: usize, trip_count: usize, max_rounds: usize) -> Self {
        Self {
            best_prev: vec![time::MAX; stop_count],
            best_cur: vec![time::MAX; stop_count],
            parents: vec![None; stop_count * (max_rounds + 1)],
            marked: bitvec!(usize, Lsb0; 0; stop_count),
            improved: bitvec!(usize, Lsb0; 0; stop_count),
            boardings: vec![u32::MAX; trip_count],
            touched: Vec::with_capacity(64),
            stop_count,
        }
    }

    pub fn parent(&self, round: usize, stop: u32) -> Option<ParentEdge> {
        self.parents[flat_matrix(round, stop as usize, self.stop_count)]
    }

    pub fn set_parent(&mut self, round: usize, stop: u32, edge: ParentEdge) {
        self.parents[flat_matrix(round, stop as usize, self.stop_count)] = Some(edge);
    }

    /// Resets the per-round buffers; labels and parents carry over.
    pub fn clear_round(&mut self) {
        self.improved.fill(false);
        self.boardings.fill(u32::MAX);
        self.touched.clear();
    }
}

/// Converts a (round, stop_index) coordinate into a flat index for the
/// 1D parents matrix.
#[inline(always)]
pub(crate) fn flat_matrix(outer: usize, inner: usize, count: usize) -> usize {
    (outer * count) + inner
}

#[test]
fn flat_matrix_test() {
    let a = flat_matrix(0, 0, 10);
    let b = flat_matrix(0, 1, 10);
    assert_eq!(a + 1, b);

    let a = flat_matrix(1, 0, 10);
    let b = flat_matrix(1, 1, 10);
    assert_eq!(a + 1, b);

    let a = flat_matrix(0, 0, 10);
    let b = flat_matrix(1, 0, 10);
    assert_eq!(a + 10, b);
}
