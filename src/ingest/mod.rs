pub mod cache;
pub mod extract;
pub mod loader;
pub mod sanitize;
pub mod validate;

use crate::course::Course;
use crate::error::{FoursomeError, FsResult};
use crate::scorecard::{Team, TeamRound};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::info;

pub use self::validate::{
    ensure_valid, validate_event, Severity, ValidationIssue, MAX_HOLE_STROKES,
};

/// Roster plus the rounds recorded for it, as handed to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventData {
    pub teams: Vec<Team>,
    pub rounds: Vec<TeamRound>,
}

impl EventData {
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty() && self.rounds.is_empty()
    }

    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    /// Appends another source's teams and rounds; teams already known by id are kept.
    pub fn merge(&mut self, other: EventData) {
        for team in other.teams {
            if self.team(&team.id).is_none() {
                self.teams.push(team);
            }
        }
        self.rounds.extend(other.rounds);
    }
}

/// Loads a `.json` event file or a `.csv` score sheet.
pub fn load_event_file<P: AsRef<Path>>(path: P, course: &Course) -> FsResult<EventData> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let file = File::open(path).map_err(|e| {
        FoursomeError::Config(format!("could not open '{}': {}", path.display(), e))
    })?;

    let event = match ext.as_deref() {
        Some("json") => loader::load_event_json(file)?,
        Some("csv") => loader::load_scores_csv(file, course)?,
        _ => {
            return Err(FoursomeError::Config(format!(
                "unsupported score file '{}': expected .csv or .json",
                path.display()
            )))
        }
    };

    info!(
        "📂 Loaded {} teams and {} scorecards from {}",
        event.teams.len(),
        event.rounds.len(),
        path.display()
    );
    Ok(event)
}
