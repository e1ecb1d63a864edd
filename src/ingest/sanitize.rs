use super::EventData;
use crate::course::{is_valid_par, HOLES_PER_ROUND, STANDARD_PARS};
use crate::error::{FoursomeError, FsResult};
use crate::scorecard::{Player, Team, TeamRound};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Score used for a hole the extraction could not read.
pub const FALLBACK_STROKES: u32 = 4;
/// Par used for a hole whose extracted par is not 3, 4 or 5.
pub const FALLBACK_PAR: u8 = 4;
pub const MAX_READABLE_STROKES: i64 = 12;

/// Best-effort scorecard as returned by a vision provider. Values are loose JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedScorecard {
    #[serde(default)]
    pub teams: Vec<ExtractedTeam>,
    #[serde(default)]
    pub pars: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedTeam {
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub scores: Vec<Value>,
    #[serde(default)]
    pub players: Vec<ExtractedPlayer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPlayer {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedTeam {
    pub name: String,
    pub strokes: [u32; HOLES_PER_ROUND],
    pub players: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedScorecard {
    pub teams: Vec<SanitizedTeam>,
    pub pars: [u8; HOLES_PER_ROUND],
}

/// Pulls the JSON object out of a provider's free-text answer.
pub fn parse_provider_response(text: &str) -> FsResult<ExtractedScorecard> {
    let json = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    };

    let card: ExtractedScorecard = serde_json::from_str(json)
        .map_err(|e| FoursomeError::Extraction(format!("response is not scorecard JSON: {}", e)))?;

    if card.teams.is_empty() {
        return Err(FoursomeError::Extraction(
            "no teams found on the scorecard".to_string(),
        ));
    }
    Ok(card)
}

/// Reads a leading integer the way a lenient form field would: `"5"`, `5`, `5.0`, `"5 "`.
fn leading_int(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            let end = s
                .char_indices()
                .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
                .map(|(i, _)| i)
                .unwrap_or(s.len());
            s[..end].parse().ok()
        }
        _ => None,
    }
}

fn sanitize_pars(pars: Option<&[Value]>) -> [u8; HOLES_PER_ROUND] {
    let Some(pars) = pars.filter(|p| p.len() == HOLES_PER_ROUND) else {
        return STANDARD_PARS;
    };

    let mut out = [FALLBACK_PAR; HOLES_PER_ROUND];
    for (slot, v) in out.iter_mut().zip(pars) {
        if let Some(par) = leading_int(v)
            .and_then(|p| u8::try_from(p).ok())
            .filter(|&p| is_valid_par(p))
        {
            *slot = par;
        }
    }
    out
}

fn sanitize_strokes(scores: &[Value]) -> [u32; HOLES_PER_ROUND] {
    let mut out = [FALLBACK_STROKES; HOLES_PER_ROUND];
    for (slot, v) in out.iter_mut().zip(scores) {
        if let Some(s) = leading_int(v).filter(|s| (1..=MAX_READABLE_STROKES).contains(s)) {
            *slot = s as u32;
        }
    }
    out
}

fn non_blank(s: &Option<String>) -> Option<String> {
    s.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Forces an extraction into a full 18-hole card.
///
/// Unreadable or implausible strokes become 4, missing holes are padded with 4
/// and extra ones dropped. Pars fall back to the standard course unless all 18
/// are present; a single bad par becomes 4.
pub fn sanitize(card: &ExtractedScorecard) -> SanitizedScorecard {
    let teams = card
        .teams
        .iter()
        .enumerate()
        .map(|(ti, team)| SanitizedTeam {
            name: non_blank(&team.team_name).unwrap_or_else(|| format!("Team {}", ti + 1)),
            strokes: sanitize_strokes(&team.scores),
            players: team
                .players
                .iter()
                .enumerate()
                .map(|(pi, p)| non_blank(&p.name).unwrap_or_else(|| format!("Player {}", pi + 1)))
                .collect(),
        })
        .collect();

    SanitizedScorecard {
        teams,
        pars: sanitize_pars(card.pars.as_deref()),
    }
}

/// Turns the `image_order`-th photo into event data.
///
/// Team names get an `<order>-` prefix so teams from the same photo sort together.
pub fn into_event(card: &SanitizedScorecard, image_order: usize) -> EventData {
    let mut event = EventData::default();

    for (ti, team) in card.teams.iter().enumerate() {
        let team_id = format!("team-{}-{}", image_order, ti + 1);
        let team_name = format!("{}-{}", image_order, team.name);

        let players = team
            .players
            .iter()
            .enumerate()
            .map(|(pi, name)| Player {
                id: format!("player-{}-{}-{}", image_order, ti + 1, pi + 1),
                name: name.clone(),
            })
            .collect();

        event.rounds.push(TeamRound::from_strokes(
            &team_id,
            &team_name,
            &card.pars,
            &team.strokes,
        ));
        event.teams.push(Team {
            id: team_id,
            name: team_name,
            players,
        });
    }
    event
}
