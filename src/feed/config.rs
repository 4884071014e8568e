use std::{
    env,
    path::{Path, PathBuf},
};

/// Environment variable naming the directory that holds one
/// subdirectory of GTFS tables per feed.
pub const DATA_DIR_ENV: &str = "OPENFAHRPLAN_DATA_DIR";

pub struct Config {
    pub data_dir: PathBuf,
    pub feed_name: String,
    pub stops_path: String,
    pub stop_times_path: String,
    pub trips_path: String,
    pub routes_path: String,
    pub transfers_path: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = env::var(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        Self {
            data_dir,
            feed_name: "vgn".into(),
            stops_path: "stops.txt".into(),
            stop_times_path: "stop_times.txt".into(),
            trips_path: "trips.txt".into(),
            routes_path: "routes.txt".into(),
            transfers_path: "transfers.txt".into(),
        }
    }
}

impl Config {
    pub fn with_feed_name(mut self, feed_name: impl Into<String>) -> Self {
        self.feed_name = feed_name.into();
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    pub fn feed_dir(&self) -> PathBuf {
        self.data_dir.join(&self.feed_name)
    }
}
