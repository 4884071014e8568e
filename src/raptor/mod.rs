mod footpath;
mod index;
mod journey;
mod state;

pub use index::*;
pub use journey::*;

use std::{iter, mem};

use thiserror::Error;
use tracing::trace;

use crate::{
    raptor::{
        footpath::relax_footpaths,
        state::{ParentEdge, SearchState},
    },
    shared::{Time, time},
};

pub const DEFAULT_MAX_ROUNDS: usize = 8;

/// Query-time failures. Both variants mean "no result" to callers; the
/// engine never panics on query input.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Stop id does not match any entry")]
    UnknownStop,
    #[error("Could not find a journey")]
    NoJourney,
}

/// One earliest-arrival search between two stops.
///
/// The search runs in rounds: round `k` settles every stop reachable
/// with exactly `k` trip boardings, then lets footpaths extend the
/// frontier without consuming a round. The index is shared read-only;
/// all scratch state lives inside this query.
pub struct Raptor<'a> {
    index: &'a RaptorIndex,
    from: &'a str,
    to: &'a str,
    departure: Time,
    max_rounds: usize,
}

impl<'a> Raptor<'a> {
    pub(crate) fn new(index: &'a RaptorIndex, from: &'a str, to: &'a str) -> Self {
        Self {
            index,
            from,
            to,
            departure: Time::now(),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Sets the earliest time the journey can begin. Defaults to the
    /// current wall-clock time of day.
    pub fn departure_at(mut self, departure: Time) -> Self {
        self.departure = departure;
        self
    }

    /// Caps the number of trip boardings. Footpaths are free. At least
    /// one round always runs.
    pub fn max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds.max(1);
        self
    }

    /// Runs the search and reconstructs the best journey.
    ///
    /// Unknown stop ids, targets that stay unreachable and departures
    /// after the last boardable event all surface as `Err`; the caller
    /// treats them as an empty result.
    pub fn solve(self) -> Result<Journey, self::Error> {
        let origin = self
            .index
            .stop_index(self.from)
            .ok_or(self::Error::UnknownStop)?;
        let target = self
            .index
            .stop_index(self.to)
            .ok_or(self::Error::UnknownStop)?;

        let mut state = SearchState::new(
            self.index.stop_count(),
            self.index.trip_count(),
            self.max_rounds,
        );
        state.best_prev[origin as usize] = self.departure;

        // The initial walk widens the origin before any boarding; it
        // does not count as a round.
        let initial = relax_footpaths(
            self.index,
            &mut state.best_prev,
            iter::once(origin as usize),
        );
        for stop in initial.improved.iter_ones() {
            if let Some(pred) = initial.preds[stop] {
                state.set_parent(
                    1,
                    stop as u32,
                    ParentEdge {
                        prev: pred,
                        trip: None,
                    },
                );
            }
        }
        state.marked = initial.improved;

        for round in 1..=self.max_rounds {
            trace!("Round {round}");
            state.best_cur.copy_from_slice(&state.best_prev);
            state.clear_round();

            // For every marked stop, binary-search its departure
            // events and keep the earliest boardable position on each
            // trip encountered.
            let marked = mem::take(&mut state.marked);
            for stop in marked.iter_ones() {
                let label = state.best_prev[stop];
                if label == time::MAX {
                    continue;
                }
                let events = self.index.events(stop as u32);
                let start = events.departures.partition_point(|dep| *dep < label);
                for at in start..events.departures.len() {
                    let trip = events.trips[at] as usize;
                    let position = events.positions[at];
                    if position < state.boardings[trip] {
                        if state.boardings[trip] == u32::MAX {
                            state.touched.push(trip as u32);
                        }
                        state.boardings[trip] = position;
                    }
                }
            }

            if state.touched.is_empty() {
                break;
            }

            // Ride every boarded trip past its boarding position. Only
            // strict improvements win, so an equal arrival never
            // replaces an earlier predecessor.
            let touched = mem::take(&mut state.touched);
            for &trip_index in &touched {
                let trip = self.index.trip(trip_index);
                let boarded = state.boardings[trip_index as usize] as usize;
                let mut prev = trip.stops[boarded];
                for position in boarded + 1..trip.stops.len() {
                    let stop = trip.stops[position];
                    let arrival = trip.arrivals[position];
                    if arrival < state.best_cur[stop as usize] {
                        state.best_cur[stop as usize] = arrival;
                        state.set_parent(
                            round,
                            stop,
                            ParentEdge {
                                prev,
                                trip: Some(trip_index),
                            },
                        );
                        state.improved.set(stop as usize, true);
                    }
                    prev = stop;
                }
            }
            state.touched = touched;

            if state.improved.not_any() {
                state.best_prev.copy_from_slice(&state.best_cur);
                break;
            }

            // Walks extend the improved set; a footpath predecessor
            // never overwrites a trip edge recorded this round.
            let relax = relax_footpaths(
                self.index,
                &mut state.best_cur,
                state.improved.iter_ones(),
            );
            for stop in relax.improved.iter_ones() {
                if state.improved[stop] {
                    continue;
                }
                if let Some(pred) = relax.preds[stop]
                    && state.parent(round, stop as u32).is_none()
                {
                    state.set_parent(
                        round,
                        stop as u32,
                        ParentEdge {
                            prev: pred,
                            trip: None,
                        },
                    );
                }
            }

            state.best_prev.copy_from_slice(&state.best_cur);
            state.marked = relax.improved;
            if state.best_prev[target as usize] < time::MAX {
                break;
            }
        }

        if state.best_prev[target as usize] == time::MAX {
            return Err(self::Error::NoJourney);
        }

        journey::assemble(self.index, &state, origin, target, self.max_rounds)
    }
}
