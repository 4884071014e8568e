use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet, VecDeque},
};

use rayon::prelude::*;
use unicode_normalization::UnicodeNormalization;

use crate::{
    feed::{Feed, FeedStop},
    shared::{Duration, fuzzy},
};

/// Transfers longer than this are not considered "related" stops.
const RELATED_MAX_TRANSFER: Duration = Duration::from_minutes(5);

/// Canonical form used for station-name matching: lowercased, ASCII
/// folded, punctuation stripped and the German street suffix collapsed
/// so that "Str", "Str." and "Straße" all compare equal.
pub fn normalize_station_name(name: &str) -> String {
    let lowered = name.to_lowercase().replace('ß', "ss");
    let folded: String = lowered
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| match c {
            '-' | '_' | '/' | '.' | ',' => ' ',
            _ => c,
        })
        .collect();
    folded
        .split_whitespace()
        .map(|token| match token {
            "str" | "strasse" => "strasse",
            other => other,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl Feed {
    /// Fuzzy search over station names.
    ///
    /// Candidates are plain stops (`location_type` 0 or null),
    /// de-duplicated by name. Both the query and each candidate are
    /// normalized before token-set scoring, results are sorted by score
    /// (ties by name) and cut to `limit`. An empty query is an empty
    /// result, never an error.
    pub fn find_station(&self, query: &str, limit: usize) -> Vec<(&FeedStop, f64)> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let needle = normalize_station_name(query);

        let mut seen_names = HashSet::new();
        let candidates: Vec<&FeedStop> = self
            .stops
            .iter()
            .filter(|stop| stop.is_stop())
            .filter(|stop| seen_names.insert(stop.stop_name.as_str()))
            .collect();

        let mut matches: Vec<(&FeedStop, f64)> = candidates
            .into_par_iter()
            .map(|stop| {
                let score = fuzzy::token_set_ratio(&needle, &normalize_station_name(&stop.stop_name));
                (stop, score)
            })
            .collect();

        matches.sort_by(|(stop_a, score_a), (stop_b, score_b)| {
            score_b
                .partial_cmp(score_a)
                .unwrap_or(Ordering::Equal)
                .then_with(|| stop_a.stop_name.cmp(&stop_b.stop_name))
        });
        matches.truncate(limit);
        matches
    }

    /// All stops under the same parent station as `stop_id`. A stop
    /// without a parent acts as its own pseudo-parent, so its platforms
    /// are still found.
    pub fn find_siblings(&self, stop_id: &str, include_self: bool) -> Vec<&FeedStop> {
        let Some(stop) = self.stop_by_id(stop_id) else {
            return Vec::new();
        };
        let parent_id = stop.parent().unwrap_or(stop_id);

        self.stops
            .iter()
            .filter(|candidate| candidate.parent() == Some(parent_id))
            .filter(|candidate| include_self || candidate.stop_id != stop_id)
            .collect()
    }

    /// All stops carrying exactly the same `stop_name` as `stop_id`.
    pub fn find_matching_name_stops(&self, stop_id: &str, include_self: bool) -> Vec<&FeedStop> {
        let Some(stop) = self.stop_by_id(stop_id) else {
            return Vec::new();
        };

        self.stops
            .iter()
            .filter(|candidate| candidate.stop_name == stop.stop_name)
            .filter(|candidate| include_self || candidate.stop_id != stop_id)
            .collect()
    }

    /// Breadth-first search over the undirected graph of timed and
    /// same-station transfers (types 1 and 2) whose minimum time fits
    /// within `max_transfer_time`. Types 0 and 3 never link stops here.
    pub fn reachable_transfers(
        &self,
        origin_id: &str,
        max_transfer_time: Duration,
        include_origin: bool,
    ) -> Vec<&FeedStop> {
        let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
        self.transfers
            .iter()
            .filter(|transfer| matches!(transfer.transfer_type(), 1 | 2))
            .filter(|transfer| transfer.min_seconds() <= max_transfer_time.as_seconds())
            .for_each(|transfer| {
                adjacency
                    .entry(&transfer.from_stop_id)
                    .or_default()
                    .push(&transfer.to_stop_id);
                adjacency
                    .entry(&transfer.to_stop_id)
                    .or_default()
                    .push(&transfer.from_stop_id);
            });

        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        seen.insert(origin_id);
        queue.push_back(origin_id);
        while let Some(current) = queue.pop_front() {
            for &next in adjacency.get(current).into_iter().flatten() {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        let mut seen_ids = HashSet::new();
        self.stops
            .iter()
            .filter(|stop| seen_ids.insert(stop.stop_id.as_str()))
            .filter(|stop| seen.contains(stop.stop_id.as_str()))
            .filter(|stop| include_origin || stop.stop_id != origin_id)
            .collect()
    }

    /// Union of the stop itself, its transfer-reachable stops, its
    /// platform siblings and its name twins, de-duplicated by id.
    pub fn find_related_stops(&self, stop_id: &str) -> Vec<&FeedStop> {
        let groups = [
            self.stop_by_id(stop_id).into_iter().collect(),
            self.reachable_transfers(stop_id, RELATED_MAX_TRANSFER, false),
            self.find_siblings(stop_id, false),
            self.find_matching_name_stops(stop_id, false),
        ];

        let mut related: Vec<&FeedStop> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for stop in groups.into_iter().flatten() {
            if seen.insert(stop.stop_id.as_str()) {
                related.push(stop);
            }
        }
        related
    }
}
