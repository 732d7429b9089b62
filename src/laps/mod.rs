pub mod format;
pub mod stats;
pub mod trend;

use serde::{Deserialize, Serialize};

pub use format::format_lap_time;
pub use stats::{LapStats, calculate_stats};
pub use trend::{TREND_WINDOW_LAPS, rolling_average};

/// One timed lap as returned by the lap service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LapRecord {
    /// Lap number, starting at 1
    pub lap: u32,
    /// Lap time in seconds
    pub lap_time_sec: f64,
}

/// Event details from the service's `/race` endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RaceInfo {
    #[serde(rename = "EventName")]
    pub event_name: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Date")]
    pub date: String,
}

impl RaceInfo {
    pub fn title(&self) -> String {
        format!("{} ({}, {})", self.event_name, self.location, self.country)
    }
}

/// Lap numbers and lap times as two parallel series, in response order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LapSeries {
    pub laps: Vec<u32>,
    pub times: Vec<f64>,
}

impl LapSeries {
    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    /// `[lap, time]` pairs in the shape the plot wants.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.laps
            .iter()
            .zip(&self.times)
            .map(|(lap, time)| [*lap as f64, *time])
            .collect()
    }
}

impl From<&[LapRecord]> for LapSeries {
    fn from(records: &[LapRecord]) -> Self {
        let (laps, times): (Vec<u32>, Vec<f64>) =
            records.iter().map(|r| (r.lap, r.lap_time_sec)).unzip();
        Self { laps, times }
    }
}
