#![allow(dead_code)]

use openfahrplan::feed::{Feed, FeedRoute, FeedStop, FeedStopTime, FeedTransfer, FeedTrip};
use openfahrplan::shared::Time;

pub fn stop(id: &str, name: &str) -> FeedStop {
    FeedStop {
        stop_id: id.into(),
        stop_name: name.into(),
        stop_lat: 49.45,
        stop_lon: 11.08,
        parent_station: None,
        location_type: None,
    }
}

pub fn platform(id: &str, name: &str, parent: &str) -> FeedStop {
    FeedStop {
        parent_station: Some(parent.into()),
        location_type: Some(0),
        ..stop(id, name)
    }
}

pub fn station(id: &str, name: &str) -> FeedStop {
    FeedStop {
        location_type: Some(1),
        ..stop(id, name)
    }
}

pub fn stop_time(trip: &str, stop: &str, arrival: &str, departure: &str, seq: i64) -> FeedStopTime {
    FeedStopTime {
        trip_id: trip.into(),
        stop_id: stop.into(),
        arrival_time: arrival.into(),
        departure_time: departure.into(),
        stop_sequence: seq,
    }
}

pub fn trip(id: &str, route: &str) -> FeedTrip {
    FeedTrip {
        trip_id: id.into(),
        route_id: route.into(),
        direction_id: Some(0),
    }
}

pub fn route(id: &str, short_name: &str, route_type: i64) -> FeedRoute {
    FeedRoute {
        route_id: id.into(),
        route_short_name: Some(short_name.into()),
        route_long_name: None,
        route_type,
    }
}

pub fn transfer(
    from: &str,
    to: &str,
    transfer_type: Option<i64>,
    min_transfer_time: Option<i64>,
) -> FeedTransfer {
    FeedTransfer {
        from_stop_id: from.into(),
        to_stop_id: to.into(),
        transfer_type,
        min_transfer_time,
    }
}

pub fn feed(
    stops: Vec<FeedStop>,
    stop_times: Vec<FeedStopTime>,
    trips: Vec<FeedTrip>,
    routes: Vec<FeedRoute>,
    transfers: Vec<FeedTransfer>,
) -> Feed {
    Feed::from_tables(stops, stop_times, trips, routes, transfers).unwrap()
}

pub fn t(literal: &str) -> Time {
    Time::from_hms(literal).unwrap()
}
