use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FeedStop {
    pub stop_id: String,
    pub stop_name: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
    #[serde(default)]
    pub parent_station: Option<String>,
    #[serde(default)]
    pub location_type: Option<i64>,
}

impl FeedStop {
    /// `location_type` null is equivalent to 0 (a plain stop).
    pub fn is_stop(&self) -> bool {
        self.location_type.unwrap_or(0) == 0
    }

    /// Blank parent ids count as "no parent".
    pub fn parent(&self) -> Option<&str> {
        self.parent_station
            .as_deref()
            .map(str::trim)
            .filter(|parent| !parent.is_empty())
    }
}

/// One stop event of a trip. Times stay raw strings here; the index
/// builder parses them and drops rows it cannot read.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FeedStopTime {
    pub trip_id: String,
    pub stop_id: String,
    pub arrival_time: String,
    pub departure_time: String,
    pub stop_sequence: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FeedTrip {
    pub trip_id: String,
    pub route_id: String,
    #[serde(default)]
    pub direction_id: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FeedRoute {
    pub route_id: String,
    #[serde(default)]
    pub route_short_name: Option<String>,
    #[serde(default)]
    pub route_long_name: Option<String>,
    pub route_type: i64,
}

impl FeedRoute {
    pub fn display_name(&self) -> &str {
        self.route_short_name
            .as_deref()
            .or(self.route_long_name.as_deref())
            .unwrap_or(&self.route_id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FeedTransfer {
    pub from_stop_id: String,
    pub to_stop_id: String,
    #[serde(default)]
    pub transfer_type: Option<i64>,
    #[serde(default)]
    pub min_transfer_time: Option<i64>,
}

impl FeedTransfer {
    /// Null transfer types count as 0 (recommended transfer point).
    pub fn transfer_type(&self) -> i64 {
        self.transfer_type.unwrap_or(0)
    }

    /// Null minimum times count as instantaneous.
    pub fn min_seconds(&self) -> i64 {
        self.min_transfer_time.unwrap_or(0)
    }
}
