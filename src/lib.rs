// Library interface for lapchart
// This allows integration tests to access internal modules

pub mod client;
pub mod config;
pub mod errors;
pub mod laps;
pub mod loader;
pub mod query;
pub mod summary;
pub mod ui;
pub mod viewer;

// Re-export commonly used types
pub use client::{HttpLapSource, LapSource};
pub use config::AppConfig;
pub use errors::LapchartError;
pub use laps::{LapRecord, LapStats, RaceInfo, calculate_stats, format_lap_time};
pub use loader::{LoadedLaps, load_laps};
pub use query::LapQuery;
pub use viewer::{LapForm, LapViewer, ViewStatus};
