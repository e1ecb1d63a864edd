use crate::awards::{
    decide, rank_all, standings, AwardBoard, Handicaps, WinnerCandidate, WinnerOutcome,
};
use crate::config::AwardParams;
use crate::course::Course;
use crate::error::{FoursomeError, FsResult};
use crate::ingest::{load_event_file, EventData};
use crate::scorecard::{aggregate, canonical_rounds, summarize, RoundSummary, TeamTallies};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub team_id: String,
    pub team_name: String,
    #[serde(flatten)]
    pub summary: RoundSummary,
}

/// Everything the presentation layer needs for one event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Scoreboard {
    pub tallies: TeamTallies,
    pub awards: AwardBoard,
    pub winners: WinnerOutcome,
    pub standings: Vec<WinnerCandidate>,
    pub summaries: Vec<TeamSummary>,
}

pub fn build_scoreboard(
    event: &EventData,
    handicaps: &Handicaps,
    params: &AwardParams,
) -> Scoreboard {
    let tallies = aggregate(&event.teams, &event.rounds);
    let awards = rank_all(&tallies, params.rank_levels);
    let winners = decide(&event.rounds, handicaps, params.tie_break);
    let standings = standings(&event.rounds, handicaps);
    let summaries = canonical_rounds(&event.rounds)
        .into_iter()
        .map(|r| TeamSummary {
            team_id: r.team_id.clone(),
            team_name: r.team_name.clone(),
            summary: summarize(r),
        })
        .collect();

    Scoreboard {
        tallies,
        awards,
        winners,
        standings,
        summaries,
    }
}

/// Stable hash of everything a scoreboard depends on.
pub fn fingerprint_inputs(
    event: &EventData,
    handicaps: &Handicaps,
    params: &AwardParams,
) -> FsResult<String> {
    let mut hasher = Sha256::new();

    hasher.update(serde_json::to_string(event)?.as_bytes());

    // HashMap order is not stable
    let ordered: BTreeMap<&String, &i32> = handicaps.iter().collect();
    hasher.update(serde_json::to_string(&ordered)?.as_bytes());

    hasher.update(serde_json::to_string(params)?.as_bytes());

    Ok(hex::encode(hasher.finalize()))
}

struct Memo {
    key: String,
    board: Scoreboard,
}

/// The current event and handicaps, shared by whoever drives the dashboard.
pub struct EventState {
    pub event: Mutex<Option<EventData>>,
    pub handicaps: Mutex<Handicaps>,
    memo: Mutex<Option<Memo>>,
    computations: AtomicUsize,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            event: Mutex::new(None),
            handicaps: Mutex::new(Handicaps::new()),
            memo: Mutex::new(None),
            computations: AtomicUsize::new(0),
        }
    }
}

impl EventState {
    /// How many times a scoreboard was actually computed (memo misses).
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }
}

fn lock<T>(m: &Mutex<T>) -> FsResult<MutexGuard<'_, T>> {
    m.lock().map_err(|e| FoursomeError::State(e.to_string()))
}

/// Service: Load an event file and make it current.
pub fn load_event<P: AsRef<Path>>(
    state: &EventState,
    path: P,
    course: &Course,
) -> FsResult<String> {
    let event = load_event_file(path, course)?;
    let msg = format!(
        "Loaded {} teams, {} scorecards",
        event.teams.len(),
        event.rounds.len()
    );
    replace_event(state, event)?;
    Ok(msg)
}

/// Service: Make `event` current (e.g. after a photo was read).
pub fn replace_event(state: &EventState, event: EventData) -> FsResult<()> {
    let mut guard = lock(&state.event)?;
    *guard = Some(event);
    Ok(())
}

/// Service: Set one team's handicap. Other teams keep theirs.
pub fn set_handicap(state: &EventState, team_id: &str, value: i32) -> FsResult<()> {
    let mut guard = lock(&state.handicaps)?;
    guard.insert(team_id.to_string(), value);
    Ok(())
}

pub fn clear_handicaps(state: &EventState) -> FsResult<()> {
    lock(&state.handicaps)?.clear();
    Ok(())
}

/// Service: Current scoreboard, recomputed only when its inputs changed.
pub fn scoreboard(state: &EventState, params: &AwardParams) -> FsResult<Scoreboard> {
    let event_guard = lock(&state.event)?;
    let event = event_guard
        .as_ref()
        .ok_or_else(|| FoursomeError::Config("No event loaded. Load scores first.".to_string()))?;
    let handicaps = lock(&state.handicaps)?;

    let key = fingerprint_inputs(event, &handicaps, params)?;

    let mut memo = lock(&state.memo)?;
    if let Some(m) = memo.as_ref().filter(|m| m.key == key) {
        debug!("Scoreboard memo hit");
        return Ok(m.board.clone());
    }

    let board = build_scoreboard(event, &handicaps, params);
    state.computations.fetch_add(1, Ordering::Relaxed);
    info!("🏌️ Scoreboard computed for {} teams", board.tallies.len());

    *memo = Some(Memo {
        key,
        board: board.clone(),
    });
    Ok(board)
}
