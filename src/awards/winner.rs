use super::ranker::display_group;
use crate::scorecard::{canonical_rounds, scored_holes, TeamRound};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumString};
use tracing::info;

/// Team id -> handicap. Teams missing from the map play off zero.
pub type Handicaps = HashMap<String, i32>;

/// How a tie on the lowest adjusted total is settled.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Every team on the lowest adjusted total is a co-winner.
    #[default]
    Shared,
    /// The highest handicap among the tied teams wins; equal handicaps stay tied.
    HigherHandicap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerCandidate {
    pub team_id: String,
    pub team_name: String,
    pub raw_total: u64,
    pub handicap: i32,
    pub adjusted_total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerOutcome {
    pub rule: TieBreak,
    /// All teams on the lowest adjusted total.
    pub co_winners: Vec<WinnerCandidate>,
    /// `co_winners` after `rule` has been applied.
    pub champions: Vec<WinnerCandidate>,
}

impl WinnerOutcome {
    pub fn is_tied(&self) -> bool {
        self.champions.len() > 1
    }
}

/// Every team with a scored canonical round, lowest adjusted total first.
/// Equal totals are listed by handicap (highest first), then display group.
pub fn standings(rounds: &[TeamRound], handicaps: &Handicaps) -> Vec<WinnerCandidate> {
    let mut field: Vec<WinnerCandidate> = canonical_rounds(rounds)
        .into_iter()
        .filter_map(|round| {
            let holes = scored_holes(round);
            if holes.is_empty() {
                return None;
            }
            let raw_total: u64 = holes.iter().map(|h| h.strokes as u64).sum();
            let handicap = handicaps.get(&round.team_id).copied().unwrap_or(0);
            Some(WinnerCandidate {
                team_id: round.team_id.clone(),
                team_name: round.team_name.clone(),
                raw_total,
                handicap,
                adjusted_total: raw_total as i64 - handicap as i64,
            })
        })
        .collect();

    field.sort_by(|a, b| {
        a.adjusted_total
            .cmp(&b.adjusted_total)
            .then_with(|| b.handicap.cmp(&a.handicap))
            .then_with(|| display_group(&a.team_name).cmp(&display_group(&b.team_name)))
    });
    field
}

/// All teams sharing the minimum adjusted total. Empty when nobody has a score.
pub fn compute_winners(rounds: &[TeamRound], handicaps: &Handicaps) -> Vec<WinnerCandidate> {
    let field = standings(rounds, handicaps);
    let Some(best) = field.first().map(|c| c.adjusted_total) else {
        return Vec::new();
    };
    field
        .into_iter()
        .take_while(|c| c.adjusted_total == best)
        .collect()
}

pub fn apply_tie_break(co_winners: &[WinnerCandidate], rule: TieBreak) -> Vec<WinnerCandidate> {
    match rule {
        TieBreak::Shared => co_winners.to_vec(),
        TieBreak::HigherHandicap => {
            let Some(top) = co_winners.iter().map(|c| c.handicap).max() else {
                return Vec::new();
            };
            co_winners
                .iter()
                .filter(|c| c.handicap == top)
                .cloned()
                .collect()
        }
    }
}

pub fn decide(rounds: &[TeamRound], handicaps: &Handicaps, rule: TieBreak) -> WinnerOutcome {
    let co_winners = compute_winners(rounds, handicaps);
    let champions = apply_tie_break(&co_winners, rule);

    if co_winners.len() > 1 {
        info!(
            "{} teams tied on {} (adjusted); tie-break '{}' leaves {}",
            co_winners.len(),
            co_winners[0].adjusted_total,
            rule,
            champions.len()
        );
    }

    WinnerOutcome {
        rule,
        co_winners,
        champions,
    }
}
