use crate::reports;
use clap::Args;
use foursome::api::{self, EventState};
use foursome::config::Config;
use foursome::error::FsResult;
use foursome::ingest::{ensure_valid, EventData};
use serde_json::json;

#[derive(Args, Debug, Clone)]
pub struct AwardsArgs {
    #[command(flatten)]
    pub config: Config,

    /// Also print every team's hole-by-hole card
    #[arg(long, default_value_t = false)]
    pub cards: bool,
}

pub fn run(args: &AwardsArgs, event: &EventData, config: &Config, json: bool) -> FsResult<()> {
    ensure_valid(event)?;

    let state = EventState::default();
    api::replace_event(&state, event.clone())?;
    let board = api::scoreboard(&state, &config.awards)?;

    if json {
        let out = json!({
            "tallies": board.tallies,
            "awards": board.awards,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let locale = config.awards.locale;
    println!("\n⛳ === AWARDS === ⛳");
    if args.cards {
        reports::print_scorecard_grid(event, &board.summaries);
    }
    reports::print_tally_report(&board.tallies, locale);
    reports::print_podium(&board.awards, locale);
    reports::print_award_board(&board.awards, locale);
    Ok(())
}
