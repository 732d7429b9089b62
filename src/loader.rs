use std::{
    sync::{
        Arc,
        mpsc::{self, Receiver},
    },
    thread,
};

use log::{info, warn};

use crate::{
    LapchartError,
    client::LapSource,
    laps::{LapSeries, LapStats, RaceInfo, calculate_stats},
    query::LapQuery,
};

pub type LoadResult = Result<LoadedLaps, LapchartError>;

/// Everything a single successful load produces.
#[derive(Clone, Debug)]
pub struct LoadedLaps {
    pub query: LapQuery,
    pub series: LapSeries,
    pub stats: Option<LapStats>,
    pub race_info: Option<RaceInfo>,
}

/// Fetches and summarizes one driver's laps. Race info is best-effort.
pub fn load_laps<S: LapSource + ?Sized>(source: &S, query: &LapQuery) -> LoadResult {
    let records = source.laps(query)?;
    if records.is_empty() {
        return Err(LapchartError::NoLapData);
    }

    let series = LapSeries::from(records.as_slice());
    let stats = calculate_stats(&series.times);

    let race_info = source
        .race_info(&query.year, &query.race)
        .map_err(|e| {
            warn!(
                "Could not load race info for {} {}: {}",
                query.year, query.race, e
            )
        })
        .ok();

    info!(
        "Loaded {} laps for {} at {} {}",
        series.len(),
        query.driver,
        query.year,
        query.race
    );
    Ok(LoadedLaps {
        query: query.clone(),
        series,
        stats,
        race_info,
    })
}

/// Runs `load_laps` on a background thread. The receiver yields exactly one
/// result, or disconnects if the thread dies first.
pub fn spawn_load<S: LapSource + ?Sized>(source: Arc<S>, query: LapQuery) -> Receiver<LoadResult> {
    let (result_tx, result_rx) = mpsc::channel::<LoadResult>();
    thread::spawn(move || {
        let result = load_laps(source.as_ref(), &query);
        if result_tx.send(result).is_err() {
            warn!("Lap load for {} finished after the viewer went away", query.driver);
        }
    });
    result_rx
}
