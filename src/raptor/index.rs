use std::{collections::HashMap, sync::Arc, time::Instant};

use tracing::{debug, info};

use crate::{
    feed::Feed,
    raptor::Raptor,
    shared::{Duration, Time},
};

/// The timetable of one trip as parallel arrays, ordered by
/// `stop_sequence`. Always at least two events long.
#[derive(Debug, Clone)]
pub struct TripTimetable {
    pub id: Arc<str>,
    pub stops: Box<[u32]>,
    pub arrivals: Box<[Time]>,
    pub departures: Box<[Time]>,
}

/// Departure events of one stop, sorted ascending by departure time.
/// Only the first boardable occurrence of the stop on each trip is
/// recorded, so a loop trip cannot be boarded at a later revisit.
#[derive(Debug, Clone, Default)]
pub struct StopEvents {
    pub departures: Box<[Time]>,
    pub trips: Box<[u32]>,
    pub positions: Box<[u32]>,
}

/// A directed walk edge of the foot graph.
#[derive(Debug, Clone, Copy)]
pub struct FootEdge {
    pub to: u32,
    pub duration: Duration,
}

/// Precomputed routing index over a feed: dense stop indices, per-trip
/// timetables, per-stop departure events for binary search and a
/// reflexive foot graph. Built once at startup, read-only afterwards;
/// queries share it freely across threads.
pub struct RaptorIndex {
    stop_ids: Box<[Arc<str>]>,
    stop_lookup: HashMap<Arc<str>, u32>,
    trips: Box<[TripTimetable]>,
    trip_lookup: HashMap<Arc<str>, u32>,
    events: Box<[StopEvents]>,
    foot: Box<[Box<[FootEdge]>]>,
}

impl RaptorIndex {
    /// One pass over the feed. Rows the builder cannot use (bad time
    /// literals, unknown stop ids, trips with fewer than two events)
    /// are dropped and counted, never fatal.
    pub fn from_feed(feed: &Feed) -> Self {
        info!("Building raptor index...");
        let total = Instant::now();

        let (stop_ids, stop_lookup) = assign_stop_indices(feed);
        let (trips, trip_lookup) = collect_trips(feed, &stop_lookup);
        let events = collect_stop_events(&trips, stop_ids.len());
        let foot = build_foot_graph(feed, &stop_lookup, stop_ids.len());

        info!(
            "Raptor index ready: {} stops, {} trips in {:?}",
            stop_ids.len(),
            trips.len(),
            total.elapsed()
        );
        Self {
            stop_ids,
            stop_lookup,
            trips,
            trip_lookup,
            events,
            foot,
        }
    }

    pub fn stop_count(&self) -> usize {
        self.stop_ids.len()
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    pub fn stop_index(&self, stop_id: &str) -> Option<u32> {
        self.stop_lookup.get(stop_id).copied()
    }

    pub fn stop_id(&self, stop_index: u32) -> &Arc<str> {
        &self.stop_ids[stop_index as usize]
    }

    pub fn trip(&self, trip_index: u32) -> &TripTimetable {
        &self.trips[trip_index as usize]
    }

    pub fn trip_by_id(&self, trip_id: &str) -> Option<&TripTimetable> {
        let index = self.trip_lookup.get(trip_id)?;
        Some(&self.trips[*index as usize])
    }

    pub fn events(&self, stop_index: u32) -> &StopEvents {
        &self.events[stop_index as usize]
    }

    pub fn foot_edges(&self, stop_index: u32) -> &[FootEdge] {
        &self.foot[stop_index as usize]
    }

    /// Starts an earliest-arrival query between two stop ids.
    pub fn query<'a>(&'a self, from: &'a str, to: &'a str) -> Raptor<'a> {
        Raptor::new(self, from, to)
    }
}

/// Every distinct stop id from the stops table gets a dense index, in
/// table order, whether or not any trip serves it.
fn assign_stop_indices(feed: &Feed) -> (Box<[Arc<str>]>, HashMap<Arc<str>, u32>) {
    let now = Instant::now();
    let mut stop_ids: Vec<Arc<str>> = Vec::with_capacity(feed.stops.len());
    let mut stop_lookup: HashMap<Arc<str>, u32> = HashMap::with_capacity(feed.stops.len());
    for stop in feed.stops.iter() {
        if stop_lookup.contains_key(stop.stop_id.as_str()) {
            continue;
        }
        let id: Arc<str> = stop.stop_id.as_str().into();
        stop_lookup.insert(id.clone(), stop_ids.len() as u32);
        stop_ids.push(id);
    }
    debug!(
        "Assigned {} stop indices in {:?}",
        stop_ids.len(),
        now.elapsed()
    );
    (stop_ids.into(), stop_lookup)
}

struct RawEvent {
    sequence: i64,
    stop: u32,
    arrival: Time,
    departure: Time,
}

fn collect_trips(
    feed: &Feed,
    stop_lookup: &HashMap<Arc<str>, u32>,
) -> (Box<[TripTimetable]>, HashMap<Arc<str>, u32>) {
    let now = Instant::now();
    let mut events_by_trip: HashMap<&str, Vec<RawEvent>> = HashMap::new();
    let mut trip_order: Vec<&str> = Vec::new();
    let mut dropped_events: usize = 0;

    for stop_time in feed.stop_times.iter() {
        let arrival = Time::from_hms(&stop_time.arrival_time);
        let departure = Time::from_hms(&stop_time.departure_time);
        let stop = stop_lookup.get(stop_time.stop_id.as_str());
        let (Some(arrival), Some(departure), Some(&stop)) = (arrival, departure, stop) else {
            dropped_events += 1;
            continue;
        };
        let events = match events_by_trip.entry(stop_time.trip_id.as_str()) {
            std::collections::hash_map::Entry::Occupied(entry) => entry.into_mut(),
            std::collections::hash_map::Entry::Vacant(entry) => {
                trip_order.push(stop_time.trip_id.as_str());
                entry.insert(Vec::new())
            }
        };
        events.push(RawEvent {
            sequence: stop_time.stop_sequence,
            stop,
            arrival,
            departure,
        });
    }

    let mut trips: Vec<TripTimetable> = Vec::with_capacity(trip_order.len());
    let mut trip_lookup: HashMap<Arc<str>, u32> = HashMap::with_capacity(trip_order.len());
    let mut dropped_trips: usize = 0;
    for trip_id in trip_order {
        let mut events = events_by_trip.remove(trip_id).unwrap_or_default();
        if events.len() < 2 {
            dropped_trips += 1;
            continue;
        }
        events.sort_by_key(|event| event.sequence);

        let id: Arc<str> = trip_id.into();
        trip_lookup.insert(id.clone(), trips.len() as u32);
        trips.push(TripTimetable {
            id,
            stops: events.iter().map(|event| event.stop).collect(),
            arrivals: events.iter().map(|event| event.arrival).collect(),
            departures: events.iter().map(|event| event.departure).collect(),
        });
    }

    debug!(
        "Collected {} trips ({} events dropped, {} short trips dropped) in {:?}",
        trips.len(),
        dropped_events,
        dropped_trips,
        now.elapsed()
    );
    (trips.into(), trip_lookup)
}

fn collect_stop_events(trips: &[TripTimetable], stop_count: usize) -> Box<[StopEvents]> {
    let now = Instant::now();
    let mut buckets: Vec<Vec<(Time, u32, u32)>> = vec![Vec::new(); stop_count];
    for (trip_index, trip) in trips.iter().enumerate() {
        let mut seen: HashMap<u32, u32> = HashMap::new();
        for (position, &stop) in trip.stops.iter().enumerate() {
            seen.entry(stop).or_insert(position as u32);
        }
        for (stop, position) in seen {
            buckets[stop as usize].push((
                trip.departures[position as usize],
                trip_index as u32,
                position,
            ));
        }
    }

    let events = buckets
        .into_iter()
        .map(|mut bucket| {
            // Ties stay in trip order, which is deterministic.
            bucket.sort_by_key(|(departure, trip, _)| (*departure, *trip));
            StopEvents {
                departures: bucket.iter().map(|(departure, _, _)| *departure).collect(),
                trips: bucket.iter().map(|(_, trip, _)| *trip).collect(),
                positions: bucket.iter().map(|(_, _, position)| *position).collect(),
            }
        })
        .collect();
    debug!("Collected stop events in {:?}", now.elapsed());
    events
}

/// Reflexive self-loops for every stop, plus every transfers row that
/// is not "no transfer possible" (type 3). Edges naming unknown stops
/// are dropped and counted.
fn build_foot_graph(
    feed: &Feed,
    stop_lookup: &HashMap<Arc<str>, u32>,
    stop_count: usize,
) -> Box<[Box<[FootEdge]>]> {
    let now = Instant::now();
    let mut foot: Vec<Vec<FootEdge>> = (0..stop_count)
        .map(|stop| {
            vec![FootEdge {
                to: stop as u32,
                duration: Duration::from_seconds(0),
            }]
        })
        .collect();

    let mut dropped_transfers: usize = 0;
    for transfer in feed.transfers.iter() {
        if transfer.transfer_type() == 3 {
            continue;
        }
        let from = stop_lookup.get(transfer.from_stop_id.as_str());
        let to = stop_lookup.get(transfer.to_stop_id.as_str());
        let (Some(&from), Some(&to)) = (from, to) else {
            dropped_transfers += 1;
            continue;
        };
        foot[from as usize].push(FootEdge {
            to,
            duration: Duration::from_seconds(transfer.min_seconds().max(0)),
        });
    }

    debug!(
        "Built foot graph ({} transfers dropped) in {:?}",
        dropped_transfers,
        now.elapsed()
    );
    foot.into_iter().map(|edges| edges.into()).collect()
}
