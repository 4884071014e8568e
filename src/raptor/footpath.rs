use std::{cmp::Reverse, collections::BinaryHeap};

use bitvec::prelude::*;

use crate::{
    raptor::RaptorIndex,
    shared::{Time, time},
};

/// Result of one footpath pass: every stop settled by the walk (seeds
/// included) and the walk predecessor of each stop that a footpath
/// actually improved.
pub(crate) struct Relaxation {
    pub improved: BitVec<usize, Lsb0>,
    pub preds: Vec<Option<u32>>,
}

/// Dijkstra over the foot graph, keyed by arrival time and seeded with
/// the stops that changed this round. Walking does not consume a
/// round, so stops reachable only on foot still join the frontier.
/// Self-loops carry weight zero and never improve anything.
pub(crate) fn relax_footpaths(
    index: &RaptorIndex,
    best: &mut [Time],
    seeds: impl Iterator<Item = usize>,
) -> Relaxation {
    let stop_count = index.stop_count();
    let mut improved = bitvec!(usize, Lsb0; 0; stop_count);
    let mut preds: Vec<Option<u32>> = vec![None; stop_count];

    let mut queue: BinaryHeap<Reverse<(Time, u32)>> = BinaryHeap::new();
    for seed in seeds {
        if best[seed] < time::MAX {
            queue.push(Reverse((best[seed], seed as u32)));
        }
    }

    while let Some(Reverse((arrival, stop))) = queue.pop() {
        if arrival > best[stop as usize] {
            continue;
        }
        improved.set(stop as usize, true);
        for edge in index.foot_edges(stop) {
            let next_arrival = arrival + edge.duration;
            if next_arrival < best[edge.to as usize] {
                best[edge.to as usize] = next_arrival;
                preds[edge.to as usize] = Some(stop);
                queue.push(Reverse((next_arrival, edge.to)));
            }
        }
    }

    Relaxation { improved, preds }
}
