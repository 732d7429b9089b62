use simple_moving_average::{SMA, SumTreeSMA};

/// Number of laps averaged by the trend line.
pub const TREND_WINDOW_LAPS: usize = 3;

/// Trailing moving average of lap times, one value per lap. The first laps
/// average over however many laps are available so far.
pub fn rolling_average(times: &[f64]) -> Vec<f64> {
    let mut average = SumTreeSMA::<f64, f64, TREND_WINDOW_LAPS>::new();
    times
        .iter()
        .map(|time| {
            average.add_sample(*time);
            average.get_average()
        })
        .collect()
}
