mod config;
pub mod models;
mod queries;

pub use config::*;
pub use models::*;
pub use queries::normalize_station_name;

use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
    time::Instant,
};
use thiserror::Error;
use tracing::{debug, info, warn};
use zip::ZipArchive;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not find required table: {0}")]
    TableNotFound(String),
    #[error("Stops table has no rows")]
    EmptyStops,
}

/// A parsed GTFS feed: one typed array per table, read-only after
/// construction. Times inside `stop_times` stay raw strings; the
/// routing index parses them later and drops what it cannot read.
pub struct Feed {
    pub stops: Box<[FeedStop]>,
    pub stop_times: Box<[FeedStopTime]>,
    pub trips: Box<[FeedTrip]>,
    pub routes: Box<[FeedRoute]>,
    /// Empty when the feed ships no transfers table.
    pub transfers: Box<[FeedTransfer]>,
}

impl Feed {
    /// Reads the tables from `<data_dir>/<feed_name>/` as configured.
    pub fn open(config: &Config) -> Result<Self, self::Error> {
        let dir = config.feed_dir();
        info!("Loading feed from {:?}...", dir);
        let now = Instant::now();

        let stops = read_table_from_dir(&dir, &config.stops_path)?;
        let stop_times = read_table_from_dir(&dir, &config.stop_times_path)?;
        let trips = read_table_from_dir(&dir, &config.trips_path)?;
        let routes = read_table_from_dir(&dir, &config.routes_path)?;
        let transfers = read_optional_table_from_dir(&dir, &config.transfers_path)?;

        let feed = Self::from_tables(stops, stop_times, trips, routes, transfers)?;
        info!(
            "Loaded {} stops, {} stop times, {} trips, {} routes, {} transfers in {:?}",
            feed.stops.len(),
            feed.stop_times.len(),
            feed.trips.len(),
            feed.routes.len(),
            feed.transfers.len(),
            now.elapsed()
        );
        Ok(feed)
    }

    /// Reads the same tables straight out of a GTFS zip archive.
    pub fn from_zip<P: AsRef<Path>>(path: P, config: &Config) -> Result<Self, self::Error> {
        info!("Loading feed from archive {:?}...", path.as_ref());
        let now = Instant::now();
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file)?;

        let stops = read_table_from_zip(&mut archive, &config.stops_path)?;
        let stop_times = read_table_from_zip(&mut archive, &config.stop_times_path)?;
        let trips = read_table_from_zip(&mut archive, &config.trips_path)?;
        let routes = read_table_from_zip(&mut archive, &config.routes_path)?;
        let transfers = read_optional_table_from_zip(&mut archive, &config.transfers_path)?;

        let feed = Self::from_tables(stops, stop_times, trips, routes, transfers)?;
        debug!("Loading archive took {:?}", now.elapsed());
        Ok(feed)
    }

    /// Builds a feed from already-parsed tables. Fails when the stops
    /// table is empty; everything else is validated downstream.
    pub fn from_tables(
        stops: Vec<FeedStop>,
        stop_times: Vec<FeedStopTime>,
        trips: Vec<FeedTrip>,
        routes: Vec<FeedRoute>,
        transfers: Vec<FeedTransfer>,
    ) -> Result<Self, self::Error> {
        if stops.is_empty() {
            return Err(self::Error::EmptyStops);
        }
        Ok(Self {
            stops: stops.into(),
            stop_times: stop_times.into(),
            trips: trips.into(),
            routes: routes.into(),
            transfers: transfers.into(),
        })
    }

    /// Looks up a stop row by id; the first row wins on duplicates.
    pub fn stop_by_id(&self, stop_id: &str) -> Option<&FeedStop> {
        self.stops.iter().find(|stop| stop.stop_id == stop_id)
    }
}

fn read_table_from_dir<T: DeserializeOwned>(
    dir: &Path,
    file_name: &str,
) -> Result<Vec<T>, self::Error> {
    let path = dir.join(file_name);
    if !path.exists() {
        return Err(self::Error::TableNotFound(file_name.to_string()));
    }
    let file = File::open(path)?;
    // BufReader is critical here for speed
    let reader = BufReader::with_capacity(128 * 1024, file);
    parse_csv(reader)
}

fn read_optional_table_from_dir<T: DeserializeOwned>(
    dir: &Path,
    file_name: &str,
) -> Result<Vec<T>, self::Error> {
    match read_table_from_dir(dir, file_name) {
        Ok(rows) => Ok(rows),
        Err(self::Error::TableNotFound(name)) => {
            warn!("Optional table {name} missing, continuing without it");
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}

fn read_table_from_zip<T: DeserializeOwned>(
    archive: &mut ZipArchive<File>,
    file_name: &str,
) -> Result<Vec<T>, self::Error> {
    let index = archive
        .index_for_name(file_name)
        .ok_or_else(|| self::Error::TableNotFound(file_name.to_string()))?;
    let file = archive.by_index(index)?;
    parse_csv(file)
}

fn read_optional_table_from_zip<T: DeserializeOwned>(
    archive: &mut ZipArchive<File>,
    file_name: &str,
) -> Result<Vec<T>, self::Error> {
    match read_table_from_zip(archive, file_name) {
        Ok(rows) => Ok(rows),
        Err(self::Error::TableNotFound(name)) => {
            warn!("Optional table {name} missing, continuing without it");
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}

fn parse_csv<R, T>(reader: R) -> Result<Vec<T>, self::Error>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut rdr = csv::Reader::from_reader(reader);
    let mut buf = Vec::new();
    for result in rdr.deserialize() {
        let record: T = result?;
        buf.push(record);
    }
    Ok(buf)
}
