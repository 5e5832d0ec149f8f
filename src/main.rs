use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod app;
mod controller;
mod inputter;
mod ui;

use app::App;
use controller::Controller;
use datatable::domain::AppConfig;
use datatable::{DEFAULT_PER_PAGE, DTError, DataTable, DataTableConfig, loader};

/// Browse a CSV, Parquet or Arrow file as a searchable, sortable, paged table.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Data file to show
    path: String,

    /// Number of rows per page
    #[arg(short, long, default_value_t = DEFAULT_PER_PAGE)]
    per_page: usize,

    /// Where to write the log
    #[arg(long, default_value = "datatable.log")]
    log_file: String,
}

fn expand_path(path: &str) -> Result<PathBuf, DTError> {
    shellexpand::full(path)
        .map(|p| PathBuf::from(p.into_owned()))
        .map_err(|e| DTError::LoadingFailed(e.to_string()))
}

const LOG_ENV: &str = "DATATABLE_LOG";

fn init_logging(cfg: &AppConfig) -> Result<(), DTError> {
    let file = File::create(&cfg.log_file)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(ErrorLayer::default())
        .init();
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Err(e) => {
            ratatui::restore();
            error!("Exiting with error: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => {
            ratatui::restore();
            ExitCode::SUCCESS
        }
    }
}

fn run(args: Args) -> Result<(), DTError> {
    let cfg = AppConfig::default().log_file(expand_path(&args.log_file)?);
    init_logging(&cfg)?;

    let path = expand_path(&args.path)?;
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("???")
        .to_string();
    let items = loader::load_records(path)?;
    let config = DataTableConfig::default()
        .items(items)
        .per_page(args.per_page);
    let table = DataTable::new(config)?;
    info!("Starting datatable on {name}");

    let mut app = App::new(name, table);
    let controller = Controller::new(&cfg);
    let mut terminal = ratatui::init();

    while !app.quitting {
        terminal.draw(|f| ui::draw(&app, f))?;

        if let Some(command) = controller.handle_event(&app)? {
            app.update(command)?;
        }
    }

    Ok(())
}
