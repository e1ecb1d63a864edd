use crate::reports;
use clap::Args;
use foursome::api::{self, EventState};
use foursome::config::Config;
use foursome::error::{FoursomeError, FsResult};
use foursome::ingest::loader::{load_handicaps, parse_handicap_arg, resolve_team};
use foursome::ingest::{ensure_valid, EventData};
use serde_json::json;
use std::fs::File;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct WinnerArgs {
    #[command(flatten)]
    pub config: Config,

    /// TEAM=N, team by id or name (repeatable, wins over --handicaps)
    #[arg(long = "handicap")]
    pub handicap: Vec<String>,

    /// CSV file with `team,handicap` rows
    #[arg(long)]
    pub handicaps: Option<String>,
}

fn apply_handicaps(args: &WinnerArgs, event: &EventData, state: &EventState) -> FsResult<()> {
    if let Some(path) = &args.handicaps {
        let file = File::open(path).map_err(|e| {
            FoursomeError::Config(format!("could not open handicaps '{}': {}", path, e))
        })?;
        let loaded = load_handicaps(file, &event.teams)?;
        info!("Loaded {} handicaps from {}", loaded.len(), path);
        for (team_id, value) in loaded {
            api::set_handicap(state, &team_id, value)?;
        }
    }

    for arg in &args.handicap {
        let (key, value) = parse_handicap_arg(arg)?;
        let team = resolve_team(&event.teams, &key)
            .ok_or_else(|| FoursomeError::Config(format!("unknown team '{}' in --handicap", key)))?;
        api::set_handicap(state, &team.id, value)?;
    }
    Ok(())
}

pub fn run(args: &WinnerArgs, event: &EventData, config: &Config, json: bool) -> FsResult<()> {
    ensure_valid(event)?;

    let state = EventState::default();
    api::replace_event(&state, event.clone())?;
    apply_handicaps(args, event, &state)?;
    let board = api::scoreboard(&state, &config.awards)?;

    if json {
        let out = json!({
            "standings": board.standings,
            "winners": board.winners,
            "summaries": board.summaries,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("\n🏌️ === STANDINGS === 🏌️");
    reports::print_standings(&board.standings, &board.winners);
    Ok(())
}
