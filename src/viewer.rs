use std::sync::{
    Arc,
    mpsc::{Receiver, TryRecvError},
};

use log::{debug, error};

use crate::{
    LapchartError,
    client::LapSource,
    laps::{LapSeries, LapStats, rolling_average},
    loader::{LoadResult, LoadedLaps, spawn_load},
    query::LapQuery,
};

#[derive(Clone, Debug, PartialEq)]
pub enum ViewStatus {
    Idle,
    Loading,
    Error { message: String },
    Ready,
}

/// Raw text of the three form inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LapForm {
    pub year: String,
    pub race: String,
    pub driver: String,
}

impl LapForm {
    pub fn new(year: impl Into<String>, race: impl Into<String>, driver: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            race: race.into(),
            driver: driver.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.year.trim().is_empty() && !self.race.trim().is_empty() && !self.driver.trim().is_empty()
    }
}

/// Plot-ready data for one load. Replaced wholesale on every successful load.
#[derive(Clone, Debug)]
pub struct LapChart {
    pub title: String,
    pub series: LapSeries,
    pub points: Vec<[f64; 2]>,
    pub trend: Vec<[f64; 2]>,
}

impl LapChart {
    pub fn from_loaded(loaded: &LoadedLaps) -> Self {
        let title = match &loaded.race_info {
            Some(info) => format!("{} - {}", loaded.query.driver, info.title()),
            None => format!(
                "{} - {} {}",
                loaded.query.driver, loaded.query.year, loaded.query.race
            ),
        };
        let trend = loaded
            .series
            .laps
            .iter()
            .zip(rolling_average(&loaded.series.times))
            .map(|(lap, avg)| [*lap as f64, avg])
            .collect();

        Self {
            title,
            points: loaded.series.points(),
            series: loaded.series.clone(),
            trend,
        }
    }
}

/// Form, load and display state behind the lap chart window. Independent of
/// the UI toolkit; the window calls `submit` on user action and `poll` every
/// frame.
pub struct LapViewer<S: LapSource + ?Sized> {
    source: Arc<S>,
    pub form: LapForm,
    status: ViewStatus,
    pending: Option<Receiver<LoadResult>>,
    chart: Option<LapChart>,
    stats: Option<LapStats>,
}

impl<S: LapSource + ?Sized> LapViewer<S> {
    pub fn new(source: Arc<S>, form: LapForm) -> Self {
        Self {
            source,
            form,
            status: ViewStatus::Idle,
            pending: None,
            chart: None,
            stats: None,
        }
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            ViewStatus::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn chart(&self) -> Option<&LapChart> {
        self.chart.as_ref()
    }

    /// The chart is only visible once a load has succeeded and no error is
    /// being shown.
    pub fn visible_chart(&self) -> Option<&LapChart> {
        match self.status {
            ViewStatus::Ready => self.chart.as_ref(),
            _ => None,
        }
    }

    pub fn stats(&self) -> Option<&LapStats> {
        self.stats.as_ref()
    }

    /// Replaces the stats panel content; `None` clears it.
    pub fn set_stats(&mut self, stats: Option<LapStats>) {
        self.stats = stats;
    }

    pub fn origin(&self) -> &str {
        self.source.origin()
    }

    /// Validates the form and starts a background load. Returns `false` when
    /// nothing was started, either because a load is already running or the
    /// input is invalid.
    pub fn submit(&mut self) -> bool {
        if self.is_loading() {
            debug!("Ignoring submit while a load is in flight");
            return false;
        }

        let query = match LapQuery::from_form(&self.form.year, &self.form.race, &self.form.driver) {
            Ok(query) => query,
            Err(e) => {
                self.show_error(&e);
                return false;
            }
        };

        self.form.driver = query.driver.clone();
        self.status = ViewStatus::Loading;
        self.pending = Some(spawn_load(self.source.clone(), query));
        true
    }

    /// Picks up a finished load without blocking. Returns `true` when the
    /// view changed.
    pub fn poll(&mut self) -> bool {
        let Some(pending) = self.pending.as_ref() else {
            return false;
        };

        let result = match pending.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(LapchartError::LoaderDisconnected),
        };
        self.pending = None;
        self.apply(result);
        true
    }

    fn apply(&mut self, result: LoadResult) {
        match result {
            Ok(loaded) => {
                // drop the previous chart before installing the new one
                self.chart.take();
                self.chart = Some(LapChart::from_loaded(&loaded));
                self.set_stats(loaded.stats);
                self.status = ViewStatus::Ready;
            }
            Err(e) => {
                error!("Error loading laps: {}", e);
                self.show_error(&e);
            }
        }
    }

    fn show_error(&mut self, error: &LapchartError) {
        self.status = ViewStatus::Error {
            message: error.banner_message(self.source.origin()),
        };
    }
}
