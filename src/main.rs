use std::{process::ExitCode, sync::Arc};

use clap::{Args, Parser, Subcommand};
use egui::Vec2;
use lapchart::{
    AppConfig, HttpLapSource, LapForm, LapQuery, LapViewer, LapchartError, LapSource, load_laps,
    summary::SummaryReport, ui::LapchartApp,
};
use log::{debug, info};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct ServiceArgs {
    /// Base URL of the lap-timing service
    #[arg(short, long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the lap chart window
    View {
        #[arg(short, long)]
        year: Option<String>,

        #[arg(short, long)]
        race: Option<String>,

        #[arg(short, long)]
        driver: Option<String>,

        #[command(flatten)]
        service: ServiceArgs,
    },
    /// Print a driver's laps and lap statistics
    Summary {
        #[arg(short, long)]
        year: String,

        #[arg(short, long)]
        race: String,

        #[arg(short, long)]
        driver: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        service: ServiceArgs,
    },
}

fn lap_source(
    app_config: &mut AppConfig,
    args: &ServiceArgs,
) -> Result<HttpLapSource, LapchartError> {
    if let Some(base_url) = &args.base_url {
        app_config.base_url = base_url.clone();
    }
    if let Some(timeout) = args.timeout {
        app_config.request_timeout_s = timeout;
    }
    HttpLapSource::new(&app_config.base_url, app_config.request_timeout())
        .inspect_err(|e| eprintln!("{}", e))
}

fn view(
    year: Option<String>,
    race: Option<String>,
    driver: Option<String>,
    service_args: &ServiceArgs,
) -> Result<(), LapchartError> {
    let mut app_config = AppConfig::from_local_file().unwrap_or_default();
    let source = Arc::new(lap_source(&mut app_config, service_args)?);

    let form = LapForm::new(
        year.unwrap_or_else(|| app_config.last_year.clone()),
        race.unwrap_or_else(|| app_config.last_race.clone()),
        driver.unwrap_or_else(|| app_config.last_driver.clone()),
    );
    let mut viewer = LapViewer::new(source, form);
    if viewer.form.is_complete() {
        info!("Loading laps for {} on start", viewer.form.driver);
        viewer.submit();
    }

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options
        .viewport
        .with_title("Lapchart")
        .with_inner_size(Vec2::new(1000., 640.));

    eframe::run_native(
        "Lapchart",
        native_options,
        Box::new(|cc| Ok(Box::new(LapchartApp::new(viewer, app_config, cc)))),
    )
    .map_err(|e| LapchartError::WindowError {
        reason: e.to_string(),
    })
    .inspect_err(|e| eprintln!("{}", e))
}

fn summary(query: &LapQuery, json: bool, service_args: &ServiceArgs) -> Result<(), LapchartError> {
    let mut app_config = AppConfig::from_local_file().unwrap_or_default();
    let source = lap_source(&mut app_config, service_args)?;

    let loaded = load_laps(&source, query)
        .inspect_err(|e| eprintln!("{}", e.banner_message(source.origin())))?;
    let report = SummaryReport::from(loaded);
    if json {
        let body = serde_json::to_string_pretty(&report)
            .map_err(|e| LapchartError::ReportSerializeError { source: e })?;
        println!("{body}");
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}

fn main() -> ExitCode {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Cli::parse();
    ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    })
    .expect("Could not set Ctrl-C handler");

    let result = match cli.command {
        Commands::View {
            year,
            race,
            driver,
            service,
        } => view(year, race, driver, &service),
        Commands::Summary {
            year,
            race,
            driver,
            json,
            service,
        } => LapQuery::from_form(&year, &race, &driver)
            .inspect_err(|e| eprintln!("{}", e))
            .and_then(|query| summary(&query, json, &service)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("lapchart failed: {:?}", e);
            ExitCode::FAILURE
        }
    }
}
