use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Summary of a driver's lap times, in seconds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct LapStats {
    pub fastest: f64,
    pub slowest: f64,
    pub average: f64,
    pub median: f64,
}

/// Computes fastest, slowest, average and median lap. Returns `None` for an
/// empty list.
pub fn calculate_stats(times: &[f64]) -> Option<LapStats> {
    if times.is_empty() {
        return None;
    }

    let sorted = times.iter().copied().sorted_by(f64::total_cmp).collect_vec();
    let count = sorted.len();
    let sum: f64 = sorted.iter().sum();

    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.
    } else {
        sorted[count / 2]
    };

    Some(LapStats {
        fastest: sorted[0],
        slowest: sorted[count - 1],
        average: sum / count as f64,
        median,
    })
}
