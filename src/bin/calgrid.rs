extern crate calgrid as lib;

use flexi_logger::{FileSpec, Logger};
use std::path::PathBuf;
use structopt::StructOpt;

use lib::{
    CalendarMonth, EventSource, MonthController, StaticEventSource, TomlEventSource, WEEKDAYS,
};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "calgrid",
    about = "Month-view calendar grid with event overlay."
)]
pub struct Args {
    #[structopt(help = "TOML file with [[events]] records", parse(from_os_str))]
    pub events: Option<PathBuf>,

    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(short = "m", long = "month", help = "month to show (1-12)")]
    pub month: Option<u32>,

    #[structopt(short = "y", long = "year", help = "year to show")]
    pub year: Option<i32>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let source: Box<dyn EventSource> = match args.events.or(config.events_file) {
        Some(path) => Box::new(TomlEventSource::new(&path)),
        None => Box::new(StaticEventSource::empty()),
    };

    let mut controller = match (args.month, args.year) {
        (Some(month), Some(year)) => {
            MonthController::with_provider(source, lib::default_provider(), month, year)?
        }
        (None, None) => MonthController::new(source)?,
        _ => return Err("either give both --month and --year or neither".into()),
    };

    // A failed fetch still leaves a renderable grid with empty cells;
    // anything else is fatal.
    if let Err(err) = controller.refresh().await {
        if !err.is_fetch_error() {
            return Err(err.into());
        }
        log::warn!("{}", err);
    }

    render(controller.view());

    Ok(())
}

fn render(grid: &CalendarMonth) {
    println!("{} {}", grid.name(), grid.year());

    let header: String = WEEKDAYS.iter().map(|day| format!("{:>5}", day)).collect();
    println!("{}", header);

    for week in grid.cells().chunks(7) {
        let row: String = week
            .iter()
            .map(|cell| match cell.date() {
                Some(day) => {
                    let marker = if cell.is_today() { "*" } else { "" };
                    format!("{:>5}", format!("{}{}", day, marker))
                }
                None => " ".repeat(5),
            })
            .collect();
        println!("{}", row);
    }

    for cell in grid.cells() {
        for event in cell.events() {
            println!(
                "{:>2}. {}",
                cell.date().unwrap_or(0),
                event.summary().unwrap_or("(untitled event)")
            );
        }
    }
}
