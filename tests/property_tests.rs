mod common;

use std::{cmp::Reverse, collections::BinaryHeap};

use common::{route, stop, stop_time, t, transfer, trip};
use openfahrplan::{
    feed::{Feed, FeedStop, FeedStopTime, FeedTransfer, FeedTrip},
    raptor::{Leg, RaptorIndex},
    shared::{Time, time},
};

/// Random small network: up to 50 stops, a few dozen trips with 2..6
/// stops each, and a handful of transfers of mixed type.
fn random_feed(rng: &mut fastrand::Rng) -> Feed {
    let stop_count = rng.usize(5..=50);
    let stops: Vec<FeedStop> = (0..stop_count)
        .map(|i| stop(&format!("s{i}"), &format!("Stop {i}")))
        .collect();

    let trip_count = rng.usize(5..=120);
    let mut stop_times: Vec<FeedStopTime> = Vec::new();
    let mut trips: Vec<FeedTrip> = Vec::new();
    for trip_index in 0..trip_count {
        let trip_id = format!("t{trip_index}");
        trips.push(trip(&trip_id, "r0"));

        let length = rng.usize(2..=stop_count.min(6));
        let mut order: Vec<usize> = (0..stop_count).collect();
        rng.shuffle(&mut order);

        let mut clock = rng.i64(5 * 3600..20 * 3600);
        for (position, stop_index) in order.into_iter().take(length).enumerate() {
            let arrival = Time::from_seconds(clock);
            let departure = Time::from_seconds(clock + rng.i64(0..120));
            clock = departure.as_seconds() + rng.i64(60..600);
            stop_times.push(stop_time(
                &trip_id,
                &format!("s{stop_index}"),
                &arrival.to_hms_string(),
                &departure.to_hms_string(),
                position as i64,
            ));
        }
    }
    // Row order in the table must not matter.
    rng.shuffle(&mut stop_times);

    let transfer_count = rng.usize(0..=stop_count);
    let transfers: Vec<FeedTransfer> = (0..transfer_count)
        .map(|_| {
            let from = rng.usize(0..stop_count);
            let to = rng.usize(0..stop_count);
            transfer(
                &format!("s{from}"),
                &format!("s{to}"),
                Some(rng.i64(0..=3)),
                Some(rng.i64(0..=300)),
            )
        })
        .collect();

    Feed::from_tables(
        stops,
        stop_times,
        trips,
        vec![route("r0", "R", 3)],
        transfers,
    )
    .unwrap()
}

/// Time-expanded Dijkstra over the exact same event set the engine
/// uses: at any settled stop you may walk its foot edges or board any
/// later departure and ride the rest of that trip. No round limit.
fn brute_force_arrivals(index: &RaptorIndex, origin: u32, departure: Time) -> Vec<Time> {
    let mut best = vec![time::MAX; index.stop_count()];
    best[origin as usize] = departure;
    let mut queue: BinaryHeap<Reverse<(Time, u32)>> = BinaryHeap::new();
    queue.push(Reverse((departure, origin)));

    while let Some(Reverse((at, current))) = queue.pop() {
        if at > best[current as usize] {
            continue;
        }
        for edge in index.foot_edges(current) {
            let arrival = at + edge.duration;
            if arrival < best[edge.to as usize] {
                best[edge.to as usize] = arrival;
                queue.push(Reverse((arrival, edge.to)));
            }
        }
        let events = index.events(current);
        let first = events.departures.partition_point(|dep| *dep < at);
        for event in first..events.departures.len() {
            let timetable = index.trip(events.trips[event]);
            let boarded = events.positions[event] as usize;
            for position in boarded + 1..timetable.stops.len() {
                let stop = timetable.stops[position];
                let arrival = timetable.arrivals[position];
                if arrival < best[stop as usize] {
                    best[stop as usize] = arrival;
                    queue.push(Reverse((arrival, stop)));
                }
            }
        }
    }
    best
}

/// The engine reaches exactly the stops the time-expanded optimum
/// reaches, and never reports an arrival earlier than it. (The engine
/// may arrive later: it stops at the first round that settles the
/// target instead of optimizing further.)
#[test]
fn engine_agrees_with_brute_force_reachability() {
    for seed in 0..8 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let feed = random_feed(&mut rng);
        let index = RaptorIndex::from_feed(&feed);
        let departure = t("07:30:00");
        // Enough rounds that the limit cannot bite.
        let rounds = index.trip_count().max(1);

        for origin in 0..(index.stop_count() as u32).min(3) {
            let brute = brute_force_arrivals(&index, origin, departure);
            let origin_id = index.stop_id(origin).clone();

            for target in 0..index.stop_count() as u32 {
                let target_id = index.stop_id(target).clone();
                let result = index
                    .query(&origin_id, &target_id)
                    .departure_at(departure)
                    .max_rounds(rounds)
                    .solve();
                match result {
                    Ok(journey) => {
                        assert!(
                            brute[target as usize] < time::MAX,
                            "seed {seed}: engine reached {target_id} but dijkstra did not"
                        );
                        assert!(
                            journey.arrival_time >= brute[target as usize],
                            "seed {seed}: {origin_id} -> {target_id} engine {:?} beat dijkstra {:?}",
                            journey.arrival_time,
                            brute[target as usize]
                        );
                    }
                    Err(_) => {
                        assert_eq!(
                            brute[target as usize],
                            time::MAX,
                            "seed {seed}: dijkstra reached {target_id} but the engine did not"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn journeys_are_contiguous_and_bounded() {
    for seed in 100..104 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let feed = random_feed(&mut rng);
        let index = RaptorIndex::from_feed(&feed);
        let departure = t("06:00:00");

        let origin_id = index.stop_id(0).clone();
        for target in 0..index.stop_count() as u32 {
            let target_id = index.stop_id(target).clone();
            let Ok(journey) = index
                .query(&origin_id, &target_id)
                .departure_at(departure)
                .solve()
            else {
                continue;
            };

            assert_eq!(journey.stops.first().unwrap(), &origin_id);
            assert_eq!(journey.stops.last().unwrap(), &target_id);
            for pair in journey.legs.windows(2) {
                assert_eq!(pair[0].to_id(), pair[1].from_id());
            }

            for leg in &journey.legs {
                match leg {
                    Leg::Trip { trip_id, from, to } => {
                        // Every trip leg rides a real trip that serves
                        // both stops in this order.
                        let timetable = index.trip_by_id(trip_id).unwrap();
                        let position_of = |id: &str| {
                            timetable
                                .stops
                                .iter()
                                .position(|stop| index.stop_id(*stop).as_ref() == id)
                        };
                        let boarded = position_of(from).unwrap();
                        let alighted = position_of(to).unwrap();
                        assert!(boarded < alighted);
                    }
                    Leg::Walk { duration, .. } => {
                        assert!(duration.as_seconds() >= 0);
                    }
                }
            }
        }
    }
}

#[test]
fn later_departures_never_arrive_earlier() {
    for seed in 200..204 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let feed = random_feed(&mut rng);
        let index = RaptorIndex::from_feed(&feed);

        let origin_id = index.stop_id(0).clone();
        for target in 0..index.stop_count() as u32 {
            let target_id = index.stop_id(target).clone();
            let early = index
                .query(&origin_id, &target_id)
                .departure_at(t("06:00:00"))
                .solve();
            let late = index
                .query(&origin_id, &target_id)
                .departure_at(t("09:00:00"))
                .solve();
            if let (Ok(early), Ok(late)) = (early, late) {
                assert!(late.arrival_time >= early.arrival_time);
            }
        }
    }
}

#[test]
fn queries_are_deterministic() {
    let mut rng = fastrand::Rng::with_seed(42);
    let feed = random_feed(&mut rng);
    let index = RaptorIndex::from_feed(&feed);

    let origin_id = index.stop_id(0).clone();
    for target in 0..index.stop_count() as u32 {
        let target_id = index.stop_id(target).clone();
        let first = index
            .query(&origin_id, &target_id)
            .departure_at(t("08:00:00"))
            .solve();
        let second = index
            .query(&origin_id, &target_id)
            .departure_at(t("08:00:00"))
            .solve();
        match (first, second) {
            (Ok(first), Ok(second)) => assert_eq!(first, second),
            (Err(_), Err(_)) => {}
            _ => panic!("query was not deterministic"),
        }
    }
}
