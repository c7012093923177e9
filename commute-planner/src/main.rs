use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::Parser;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use commute_planner::cache::{CacheConfig, CachedTimetableClient};
use commute_planner::config::{CommuteConfig, ConfigError};
use commute_planner::domain::LineId;
use commute_planner::fetch::{FetchError, fetch_lines};
use commute_planner::planner::{PlanError, plan_commute};
use commute_planner::render::{OutputFormat, RenderError, render};
use commute_planner::source::{
    DEFAULT_BASE_URL, DEFAULT_OPERATOR, SourceError, TimetableClient, TimetableClientConfig,
};

/// Print the buses between home and office for one or more lines.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON file with the walking minutes from home and office to their stops
    config: PathBuf,

    /// Lines to consolidate
    #[arg(required = true, value_parser = LineId::parse)]
    lines: Vec<LineId>,

    /// Operator name as shown in the line search
    #[arg(long, default_value = DEFAULT_OPERATOR)]
    operator: String,

    /// Output format: text or latex
    #[arg(long, default_value = "text", value_parser = OutputFormat::from_str)]
    format: OutputFormat,

    /// Root of the timetable website
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Service date (YYYY-MM-DD); repeat for several. Defaults to today
    #[arg(long = "date")]
    dates: Vec<NaiveDate>,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Log to stderr so stdout carries only the rendered table.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(args: Args) -> Result<String, AppError> {
    let (home, office) = CommuteConfig::load(&args.config)?.anchors()?;
    info!(
        home_stops = home.len(),
        office_stops = office.len(),
        "loaded anchors"
    );

    let dates = if args.dates.is_empty() {
        vec![chrono::Local::now().date_naive()]
    } else {
        args.dates
    };

    let client_config = TimetableClientConfig::new()
        .with_base_url(args.base_url)
        .with_operator(args.operator);
    let client = CachedTimetableClient::new(
        TimetableClient::new(client_config)?,
        &CacheConfig::default(),
    );

    let lines = fetch_lines(&client, &args.lines, &dates).await?;
    let table = plan_commute(&lines, &home, &office)?;
    info!(
        home_to_office = table.home_to_office.len(),
        office_to_home = table.office_to_home.len(),
        "planned commute"
    );

    Ok(render(args.format, &table)?)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run(args).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
