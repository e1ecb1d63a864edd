use crate::reports;
use clap::Args;
use foursome::config::Config;
use foursome::error::FsResult;
use foursome::ingest::{validate_event, EventData, Severity};

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: Config,

    /// Treat warnings as failures
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

/// Returns whether the data passed.
pub fn run(args: &CheckArgs, event: &EventData, json: bool) -> FsResult<bool> {
    let issues = validate_event(event);
    let passed = !issues
        .iter()
        .any(|i| i.severity == Severity::Error || args.strict);

    if json {
        println!("{}", serde_json::to_string_pretty(&issues)?);
    } else {
        println!(
            "\n🔎 Checked {} teams, {} scorecards",
            event.teams.len(),
            event.rounds.len()
        );
        reports::print_issues(&issues);
    }
    Ok(passed)
}
