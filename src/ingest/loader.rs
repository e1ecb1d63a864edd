use super::EventData;
use crate::awards::Handicaps;
use crate::course::{Course, HOLES_PER_ROUND};
use crate::error::{FoursomeError, FsResult};
use crate::scorecard::{HoleRecord, Player, Team, TeamRound};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, warn};

const PLAYER_COLUMNS: [&str; 4] = ["player", "name", "플레이어", "이름"];
const TEAM_COLUMNS: [&str; 3] = ["team", "팀", "팀명"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadedEvent {
    teams: Vec<Team>,
    scorecards: Vec<UploadedScorecard>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadedScorecard {
    team_id: String,
    #[serde(default)]
    holes: Vec<UploadedHole>,
}

#[derive(Debug, Deserialize)]
struct UploadedHole {
    hole: u8,
    par: u8,
    score: u32,
}

/// Reads the `{ "teams": [...], "scorecards": [...] }` upload format.
pub fn load_event_json<R: Read>(reader: R) -> FsResult<EventData> {
    let uploaded: UploadedEvent = serde_json::from_reader(reader)?;

    let names: HashMap<&str, &str> = uploaded
        .teams
        .iter()
        .map(|t| (t.id.as_str(), t.name.as_str()))
        .collect();

    let rounds = uploaded
        .scorecards
        .iter()
        .map(|card| {
            let team_name = names
                .get(card.team_id.as_str())
                .copied()
                .unwrap_or(card.team_id.as_str());
            TeamRound {
                team_id: card.team_id.clone(),
                team_name: team_name.to_string(),
                holes: card
                    .holes
                    .iter()
                    .map(|h| HoleRecord::new(h.hole, h.par, h.score))
                    .collect(),
            }
        })
        .collect();

    Ok(EventData {
        teams: uploaded.teams,
        rounds,
    })
}

fn hole_column(header: &str) -> Option<u8> {
    let h = header.trim().to_lowercase();
    let digits = h
        .strip_prefix("hole")
        .or_else(|| h.strip_prefix('홀'))
        .unwrap_or(&h);
    let n: u8 = digits.trim().parse().ok()?;
    (1..=HOLES_PER_ROUND as u8).contains(&n).then_some(n)
}

fn find_column(headers: &csv::StringRecord, aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| aliases.iter().any(|a| h.trim().eq_ignore_ascii_case(a)))
}

/// Reads a wide score sheet: one row per player with a team column and
/// `hole1`..`hole18` stroke columns. Pars come from `course`.
///
/// Every row becomes a scorecard for its team; the aggregator keeps the first.
pub fn load_scores_csv<R: Read>(reader: R, course: &Course) -> FsResult<EventData> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let player_col = find_column(&headers, &PLAYER_COLUMNS).ok_or_else(|| {
        FoursomeError::Validation("score sheet has no player column".to_string())
    })?;
    let team_col = find_column(&headers, &TEAM_COLUMNS);
    let hole_cols: Vec<(usize, u8)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| hole_column(h).map(|n| (i, n)))
        .collect();

    if hole_cols.is_empty() {
        return Err(FoursomeError::Validation(
            "score sheet has no hole columns (hole1..hole18)".to_string(),
        ));
    }

    let mut event = EventData::default();
    let mut team_index: HashMap<String, usize> = HashMap::new();
    let mut player_ids: HashMap<String, String> = HashMap::new();
    let mut skipped = 0;

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = result?;
        let line = row_idx + 2;

        let player_name = rec.get(player_col).unwrap_or("").to_string();
        if player_name.is_empty() {
            return Err(FoursomeError::Validation(format!(
                "row {} has no player name",
                line
            )));
        }

        let next_player = player_ids.len() + 1;
        let player_id = player_ids
            .entry(player_name.clone())
            .or_insert_with(|| format!("player_{}", next_player))
            .clone();

        let team_name = team_col.and_then(|c| rec.get(c)).unwrap_or("").to_string();
        if team_name.is_empty() {
            warn!("Row {}: player '{}' has no team, skipped", line, player_name);
            skipped += 1;
            continue;
        }

        let idx = match team_index.get(&team_name).copied() {
            Some(idx) => idx,
            None => {
                let idx = event.teams.len();
                event
                    .teams
                    .push(Team::new(format!("team_{}", idx + 1), team_name.clone()));
                team_index.insert(team_name.clone(), idx);
                idx
            }
        };

        let team = &mut event.teams[idx];
        if !team.players.iter().any(|p| p.id == player_id) {
            team.players.push(Player {
                id: player_id,
                name: player_name,
            });
        }

        let mut round = TeamRound::new(&team.id, &team.name);
        for &(col, hole_number) in &hole_cols {
            let cell = rec.get(col).unwrap_or("");
            match cell.parse::<u32>() {
                Ok(strokes) if strokes > 0 => {
                    let par = course.par(hole_number).unwrap_or(4);
                    round.holes.push(HoleRecord::new(hole_number, par, strokes));
                }
                _ => debug!("Row {}: hole {} has no score ('{}')", line, hole_number, cell),
            }
        }

        if round.holes.is_empty() {
            skipped += 1;
            continue;
        }
        event.rounds.push(round);
    }

    if skipped > 0 {
        warn!("⚠️  Skipped {} rows without a team or scores.", skipped);
    }
    Ok(event)
}

/// Finds a roster team by id, falling back to its display name.
pub fn resolve_team<'a>(roster: &'a [Team], key: &str) -> Option<&'a Team> {
    let key = key.trim();
    roster
        .iter()
        .find(|t| t.id == key)
        .or_else(|| roster.iter().find(|t| t.name == key))
}

/// Reads `team,handicap` rows. The team may be given by id or name.
pub fn load_handicaps<R: Read>(reader: R, roster: &[Team]) -> FsResult<Handicaps> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut handicaps = Handicaps::new();
    for (row_idx, result) in rdr.records().enumerate() {
        let rec = result?;
        let line = row_idx + 2;
        if rec.len() < 2 {
            continue;
        }

        let value: i32 = rec[1].parse().map_err(|_| {
            FoursomeError::Validation(format!("row {}: invalid handicap '{}'", line, &rec[1]))
        })?;

        match resolve_team(roster, &rec[0]) {
            Some(team) => {
                handicaps.insert(team.id.clone(), value);
            }
            None => warn!("Row {}: unknown team '{}' in handicap file", line, &rec[0]),
        }
    }
    Ok(handicaps)
}

/// Parses a `TEAM=N` command-line handicap.
pub fn parse_handicap_arg(arg: &str) -> FsResult<(String, i32)> {
    let (team, value) = arg.split_once('=').ok_or_else(|| {
        FoursomeError::Config(format!("handicap '{}' must look like TEAM=N", arg))
    })?;
    let value: i32 = value.trim().parse().map_err(|_| {
        FoursomeError::Config(format!("handicap '{}' has an invalid number", arg))
    })?;
    Ok((team.trim().to_string(), value))
}
