//! Transit routing core over GTFS timetables: a precomputed RAPTOR
//! index, round-based earliest-arrival queries and stop-graph search.
//!
//! The [`Router`] bundles a parsed [`feed::Feed`] with its
//! [`raptor::RaptorIndex`]; build it once at startup and hand out
//! references to query handlers.

pub mod display;
pub mod feed;
pub mod raptor;
pub mod shared;

use crate::{
    feed::{Config, Feed},
    raptor::{Journey, Raptor, RaptorIndex},
    shared::Time,
};

/// The startup value of the application: the immutable feed plus the
/// routing index built over it. Queries never mutate either, so a
/// single `Router` is shared read-only across threads.
pub struct Router {
    feed: Feed,
    index: RaptorIndex,
}

impl Router {
    pub fn new(feed: Feed) -> Self {
        let index = RaptorIndex::from_feed(&feed);
        Self { feed, index }
    }

    /// Loads the feed named by the configuration and indexes it.
    pub fn from_config(config: &Config) -> Result<Self, feed::Error> {
        Ok(Self::new(Feed::open(config)?))
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn index(&self) -> &RaptorIndex {
        &self.index
    }

    /// Starts an earliest-arrival query between two stop ids.
    pub fn query<'a>(&'a self, from: &'a str, to: &'a str) -> Raptor<'a> {
        self.index.query(from, to)
    }

    /// Convenience wrapper: one connection at the given departure with
    /// the default round limit.
    pub fn connection(
        &self,
        from: &str,
        to: &str,
        departure: Time,
    ) -> Result<Journey, raptor::Error> {
        self.index.query(from, to).departure_at(departure).solve()
    }
}
