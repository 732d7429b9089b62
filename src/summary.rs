use std::fmt::Write;

use serde::Serialize;

use crate::{
    laps::{LapRecord, LapStats, RaceInfo, format_lap_time},
    loader::LoadedLaps,
};

/// Headless rendition of a load, for the `summary` command.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub year: String,
    pub race: String,
    pub driver: String,
    pub event: Option<RaceInfo>,
    pub laps: Vec<LapRecord>,
    pub stats: Option<LapStats>,
}

impl From<LoadedLaps> for SummaryReport {
    fn from(loaded: LoadedLaps) -> Self {
        let laps = loaded
            .series
            .laps
            .iter()
            .zip(&loaded.series.times)
            .map(|(lap, time)| LapRecord {
                lap: *lap,
                lap_time_sec: *time,
            })
            .collect();
        Self {
            year: loaded.query.year,
            race: loaded.query.race,
            driver: loaded.query.driver,
            event: loaded.race_info,
            laps,
            stats: loaded.stats,
        }
    }
}

impl SummaryReport {
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = match &self.event {
            Some(event) => writeln!(out, "{} - {} ({})", self.driver, event.title(), self.year),
            None => writeln!(out, "{} - {} {}", self.driver, self.year, self.race),
        };
        let _ = writeln!(out);
        let _ = writeln!(out, "{:>4}  {:>9}", "Lap", "Time");
        for lap in &self.laps {
            let _ = writeln!(out, "{:>4}  {:>9}", lap.lap, format_lap_time(lap.lap_time_sec));
        }
        if let Some(stats) = &self.stats {
            let _ = writeln!(out);
            for (label, value) in [
                ("Fastest Lap", stats.fastest),
                ("Slowest Lap", stats.slowest),
                ("Average Lap", stats.average),
                ("Median Lap", stats.median),
            ] {
                let _ = writeln!(out, "{:<12} {}", label, format_lap_time(value));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        laps::{LapSeries, calculate_stats},
        query::LapQuery,
    };

    fn loaded() -> LoadedLaps {
        let times = vec![85.123, 84.9, 86.0];
        LoadedLaps {
            query: LapQuery::from_form("2023", "Monza", "ham").unwrap(),
            series: LapSeries {
                laps: vec![1, 2, 3],
                times: times.clone(),
            },
            stats: calculate_stats(&times),
            race_info: None,
        }
    }

    #[test]
    fn test_text_report() {
        let text = SummaryReport::from(loaded()).to_text();
        let expected = "\
HAM - 2023 Monza

 Lap       Time
   1   1:25.123
   2   1:24.900
   3   1:26.000

Fastest Lap  1:24.900
Slowest Lap  1:26.000
Average Lap  1:25.341
Median Lap   1:25.123
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_json_report() {
        let json = serde_json::to_value(SummaryReport::from(loaded())).unwrap();
        assert_eq!(json["driver"], "HAM");
        assert_eq!(json["laps"][1]["lap"], 2);
        assert_eq!(json["laps"][1]["lap_time_sec"], 84.9);
        assert_eq!(json["stats"]["fastest"], 84.9);
        assert!(json["event"].is_null());
    }
}
