use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use log::{LevelFilter, info};
use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

use icuplan::config::{DEFAULT_BASE_URL, DEFAULT_INPUT_PATH};
use icuplan::plan::normalize_duration;
use icuplan::transform::render_plan;
use icuplan::{Config, IntervalsClient, Publisher, UploadError, load_plan, logging};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Off => write!(f, "off"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "icuplan - upload a training plan to intervals.icu", long_about = None)]
struct Args {
    #[arg(long, global = true, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
    #[command(subcommand)]
    command: Commands,
}

#[derive(ClapArgs, Debug)]
struct PlanArgs {
    #[arg(short, long, env = "ICU_PLAN_FILE", default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,
}

#[derive(ClapArgs, Debug)]
struct RemoteArgs {
    #[arg(long, env = "ICU_ATHLETE_ID")]
    athlete_id: String,
    #[arg(long, env = "ICU_API_KEY", hide_env_values = true)]
    api_key: String,
    #[arg(long, env = "ICU_PLAN_NAME")]
    plan_name: String,
    #[arg(long, env = "ICU_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

impl RemoteArgs {
    fn into_config(self, input: PathBuf) -> Config {
        Config::new(&self.athlete_id, &self.api_key, &self.plan_name)
            .with_base_url(&self.base_url)
            .with_input_path(input)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the plan folder and upload every training into it
    Upload {
        #[command(flatten)]
        plan: PlanArgs,
        #[command(flatten)]
        remote: RemoteArgs,
    },
    /// Render the plan without contacting intervals.icu
    Preview {
        #[command(flatten)]
        plan: PlanArgs,
    },
    /// Print the canonical value of a duration token
    Convert { token: String },
}

async fn upload(config: Config) -> Result<()> {
    config.validate()?;
    info!("Loading plan from {}", config.input_path.display());
    let plan = load_plan(&config.input_path)?;

    let client = IntervalsClient::new(&config)?;
    let publisher = Publisher::from_config(client, &config);
    info!("Creating folder '{}'", config.plan_name);
    let report = publisher.publish(&plan).await?;
    info!(
        "Uploaded {} workouts into folder {}",
        report.uploaded, report.folder_id
    );
    Ok(())
}

fn preview(input: PathBuf) -> Result<()> {
    let plan = load_plan(&input)?;
    let drafts = render_plan(&plan);
    println!("{}", serde_json::to_string_pretty(&drafts)?);
    Ok(())
}

fn convert(token: &str) -> Result<()> {
    let quantity = normalize_duration(token)?;
    println!("{}", quantity);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let args = Args::parse();
    logging::init_logger(args.log_level.into());

    let result = match args.command {
        Commands::Upload { plan, remote } => upload(remote.into_config(plan.input)).await,
        Commands::Preview { plan } => preview(plan.input),
        Commands::Convert { token } => convert(&token),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            let code = e
                .downcast_ref::<UploadError>()
                .map(|u| u.exit_code())
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
