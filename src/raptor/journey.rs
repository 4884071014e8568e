use std::{collections::VecDeque, sync::Arc};

use crate::{
    raptor::{Error, RaptorIndex, state::SearchState},
    shared::{Duration, Time},
};

/// A single continuous edge of a journey: one ride on one trip, or one
/// walk between two stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leg {
    Trip {
        trip_id: Arc<str>,
        from: Arc<str>,
        to: Arc<str>,
    },
    Walk {
        duration: Duration,
        from: Arc<str>,
        to: Arc<str>,
    },
}

impl Leg {
    pub fn from_id(&self) -> &Arc<str> {
        match self {
            Leg::Trip { from, .. } => from,
            Leg::Walk { from, .. } => from,
        }
    }

    pub fn to_id(&self) -> &Arc<str> {
        match self {
            Leg::Trip { to, .. } => to,
            Leg::Walk { to, .. } => to,
        }
    }

    pub fn is_walk(&self) -> bool {
        matches!(self, Leg::Walk { .. })
    }
}

/// A reconstructed connection: the visited stops from origin to
/// destination, the legs between them and the final arrival time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    pub stops: Vec<Arc<str>>,
    pub legs: Vec<Leg>,
    pub arrival_time: Time,
}

impl Journey {
    pub fn trip_ids(&self) -> Vec<Arc<str>> {
        self.legs
            .iter()
            .filter_map(|leg| match leg {
                Leg::Trip { trip_id, .. } => Some(trip_id.clone()),
                Leg::Walk { .. } => None,
            })
            .collect()
    }
}

/// Walks the parent matrix back from the target, starting at the
/// highest round that recorded it. Rounds without an entry for the
/// current stop mean the label was carried over from an earlier round.
/// The walk is budgeted so a malformed parent chain terminates instead
/// of spinning.
pub(crate) fn assemble(
    index: &RaptorIndex,
    state: &SearchState,
    origin: u32,
    target: u32,
    max_rounds: usize,
) -> Result<Journey, Error> {
    let mut final_round = 0;
    for round in (1..=max_rounds).rev() {
        if state.parent(round, target).is_some() {
            final_round = round;
            break;
        }
    }

    let mut path: VecDeque<u32> = VecDeque::new();
    path.push_back(target);
    let mut legs: VecDeque<Leg> = VecDeque::new();
    let mut current = target;
    let mut round = final_round;
    let mut budget = (max_rounds + 1) * (index.stop_count() + 1);

    while current != origin && round > 0 {
        if budget == 0 {
            return Err(Error::NoJourney);
        }
        budget -= 1;

        let Some(edge) = state.parent(round, current) else {
            round -= 1;
            continue;
        };
        let from = index.stop_id(edge.prev).clone();
        let to = index.stop_id(current).clone();
        legs.push_front(match edge.trip {
            Some(trip_index) => Leg::Trip {
                trip_id: index.trip(trip_index).id.clone(),
                from,
                to,
            },
            None => Leg::Walk {
                duration: state.best_prev[current as usize] - state.best_prev[edge.prev as usize],
                from,
                to,
            },
        });
        path.push_front(edge.prev);
        current = edge.prev;
        if round > 0 && state.parent(round, current).is_none() {
            round -= 1;
        }
    }

    if current != origin {
        return Err(Error::NoJourney);
    }

    Ok(Journey {
        stops: path
            .into_iter()
            .map(|stop| index.stop_id(stop).clone())
            .collect(),
        legs: merge_walks(legs),
        arrival_time: state.best_prev[target as usize],
    })
}

/// Merges runs of consecutive walks that share their junction stop
/// into one walk with summed duration. Trip legs never merge.
fn merge_walks(legs: VecDeque<Leg>) -> Vec<Leg> {
    let mut merged: Vec<Leg> = Vec::with_capacity(legs.len());
    for leg in legs {
        if let (
            Some(Leg::Walk {
                duration: lead_duration,
                to: lead_to,
                ..
            }),
            Leg::Walk {
                duration, from, to, ..
            },
        ) = (merged.last_mut(), &leg)
            && lead_to == from
        {
            *lead_duration += *duration;
            *lead_to = to.clone();
            continue;
        }
        merged.push(leg);
    }
    merged
}
