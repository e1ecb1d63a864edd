use super::EventData;
use crate::course::{is_valid_par, HOLES_PER_ROUND};
use crate::error::{FoursomeError, FsResult};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use strum_macros::Display;

/// Highest stroke count accepted for one hole.
pub const MAX_HOLE_STROKES: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The engine would mis-score this; uploads are rejected.
    Error,
    /// Scored as-is, but worth a look (e.g. an unfinished round).
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub severity: Severity,
    pub team_id: String,
    pub hole_number: Option<u8>,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hole_number {
            Some(h) => write!(
                f,
                "[{}] team {} hole {}: {}",
                self.severity, self.team_id, h, self.message
            ),
            None => write!(f, "[{}] team {}: {}", self.severity, self.team_id, self.message),
        }
    }
}

struct Issues(Vec<ValidationIssue>);

impl Issues {
    fn push(&mut self, severity: Severity, team_id: &str, hole: Option<u8>, message: String) {
        self.0.push(ValidationIssue {
            severity,
            team_id: team_id.to_string(),
            hole_number: hole,
            message,
        });
    }
}

/// Checks an event against the rules the engine relies on.
pub fn validate_event(event: &EventData) -> Vec<ValidationIssue> {
    let mut issues = Issues(Vec::new());

    let mut roster_ids = HashSet::new();
    for team in &event.teams {
        if !roster_ids.insert(team.id.as_str()) {
            issues.push(
                Severity::Error,
                &team.id,
                None,
                "team id appears twice in the roster".to_string(),
            );
        }
    }

    let mut carded = HashSet::new();
    for round in &event.rounds {
        let id = round.team_id.as_str();

        if !roster_ids.contains(id) {
            issues.push(
                Severity::Error,
                id,
                None,
                "scorecard for a team that is not on the roster".to_string(),
            );
        }
        if !carded.insert(id) {
            issues.push(
                Severity::Warning,
                id,
                None,
                "extra scorecard; only the first one is scored".to_string(),
            );
        }
        if round.holes.len() > HOLES_PER_ROUND {
            issues.push(
                Severity::Error,
                id,
                None,
                format!("{} holes recorded, a round has {}", round.holes.len(), HOLES_PER_ROUND),
            );
        } else if round.holes.len() < HOLES_PER_ROUND {
            issues.push(
                Severity::Warning,
                id,
                None,
                format!("only {} of {} holes recorded", round.holes.len(), HOLES_PER_ROUND),
            );
        }

        let mut seen = HashSet::new();
        for hole in &round.holes {
            let n = hole.hole_number;
            if n == 0 || n as usize > HOLES_PER_ROUND {
                issues.push(Severity::Error, id, Some(n), "hole number out of range".to_string());
            } else if !seen.insert(n) {
                issues.push(Severity::Error, id, Some(n), "hole recorded twice".to_string());
            }
            if !is_valid_par(hole.par) {
                issues.push(
                    Severity::Error,
                    id,
                    Some(n),
                    format!("par {} is not 3, 4 or 5", hole.par),
                );
            }
            if hole.strokes == 0 {
                issues.push(Severity::Error, id, Some(n), "strokes must be positive".to_string());
            } else if hole.strokes > MAX_HOLE_STROKES {
                issues.push(
                    Severity::Error,
                    id,
                    Some(n),
                    format!("{} strokes is more than {}", hole.strokes, MAX_HOLE_STROKES),
                );
            }
        }
    }

    for team in &event.teams {
        if !carded.contains(team.id.as_str()) {
            issues.push(
                Severity::Warning,
                &team.id,
                None,
                "no scorecard recorded".to_string(),
            );
        }
    }

    issues.0
}

/// Rejects the event if any issue is an error. Warnings pass.
pub fn ensure_valid(event: &EventData) -> FsResult<()> {
    let errors: Vec<String> = validate_event(event)
        .into_iter()
        .filter(|i| i.severity == Severity::Error)
        .map(|i| i.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(FoursomeError::Validation(format!(
            "{} problem(s): {}",
            errors.len(),
            errors.join("; ")
        )))
    }
}
