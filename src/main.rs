use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use foursome::config::Config;
use foursome::course::Course;
use foursome::error::{FoursomeError, FsResult};
use foursome::ingest::cache::CachedExtractor;
use foursome::ingest::extract::{CommandExtractor, FallbackExtractor, ScoreExtractor};
use foursome::ingest::sanitize::{into_event, parse_provider_response, sanitize};
use foursome::ingest::{load_event_file, EventData};
use std::fs;
use std::path::Path;
use std::process;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Score file (.json event or .csv sheet)
    #[arg(global = true, short, long)]
    scores: Option<String>,

    /// Recorded provider answers for scorecard photos, in upload order
    #[arg(global = true, short = 'x', long)]
    extracted: Vec<String>,

    /// Scorecard photos to read with --extract-cmd
    #[arg(global = true, long)]
    image: Vec<String>,

    /// Extraction provider command (repeat for fallbacks)
    #[arg(global = true, long = "extract-cmd")]
    extract_cmd: Vec<String>,

    /// JSON settings file; explicit flags win over it
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Award tallies and rankings
    Awards(cmd::awards::AwardsArgs),
    /// Handicap-adjusted standings and winners
    Winner(cmd::winner::WinnerArgs),
    /// Validate score data without scoring it
    Check(cmd::check::CheckArgs),
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

fn gather_event(cli: &Cli, config: &Config, course: &Course) -> FsResult<EventData> {
    let mut event = EventData::default();

    if let Some(path) = &cli.scores {
        event.merge(load_event_file(path, course)?);
    }

    let mut image_order = 0;
    for path in &cli.extracted {
        image_order += 1;
        info!("🖼️  Reading recorded extraction #{}: {}", image_order, path);
        let text = fs::read_to_string(path)?;
        let card = sanitize(&parse_provider_response(&text)?);
        event.merge(into_event(&card, image_order));
    }

    if !cli.image.is_empty() {
        if cli.extract_cmd.is_empty() {
            return Err(FoursomeError::Config(
                "--image needs at least one --extract-cmd".to_string(),
            ));
        }
        let providers = cli
            .extract_cmd
            .iter()
            .map(|c| CommandExtractor::parse(c).map(|p| Box::new(p) as Box<dyn ScoreExtractor>))
            .collect::<FsResult<Vec<_>>>()?;
        let fallback = FallbackExtractor::new(providers).with_retry_delay(Duration::from_millis(
            config.extraction.extraction_retry_delay_ms,
        ));
        let mut reader =
            CachedExtractor::new(fallback, config.extraction.extraction_cache_capacity);

        for path in &cli.image {
            image_order += 1;
            info!("📷 Reading scorecard photo #{}: {}", image_order, path);
            let bytes = fs::read(path)?;
            let card = reader.read(&bytes, mime_for(Path::new(path)))?;
            event.merge(into_event(&card, image_order));
        }
        info!(
            "Extraction cache: {} hits, {} misses",
            reader.cache().hits,
            reader.cache().misses
        );
    }

    if event.is_empty() {
        return Err(FoursomeError::Config(
            "nothing to score: pass --scores, --extracted or --image".to_string(),
        ));
    }
    Ok(event)
}

fn run(cli: Cli, matches: &clap::ArgMatches) -> FsResult<bool> {
    let (cli_config, sub_matches) = match &cli.command {
        Commands::Awards(args) => (&args.config, matches.subcommand_matches("awards")),
        Commands::Winner(args) => (&args.config, matches.subcommand_matches("winner")),
        Commands::Check(args) => (&args.config, matches.subcommand_matches("check")),
    };

    let config = match (&cli.config, sub_matches) {
        (Some(path), Some(sub)) => {
            info!("⚙️  Loading settings from: {}", path);
            let mut file_config = Config::load_from_file(path)?;
            file_config.merge_from_cli(cli_config, sub);
            file_config
        }
        _ => cli_config.clone(),
    };

    let course = config.course.course()?;
    let event = gather_event(&cli, &config, &course)?;

    match &cli.command {
        Commands::Awards(args) => cmd::awards::run(args, &event, &config, cli.json).map(|_| true),
        Commands::Winner(args) => cmd::winner::run(args, &event, &config, cli.json).map(|_| true),
        Commands::Check(args) => cmd::check::run(args, &event, cli.json),
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli, &matches) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("❌ {}", e);
            process::exit(1);
        }
    }
}
