use super::category::{classify, AwardCategory};
use super::types::{HoleRecord, Team, TeamRound};
use crate::course::HOLES_PER_ROUND;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use strum::IntoEnumIterator;
use tracing::{debug, warn};

/// One team's count for one award category (ranker input).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub team_id: String,
    pub team_name: String,
    pub category: AwardCategory,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamTally {
    pub team_id: String,
    pub team_name: String,
    pub counts: BTreeMap<AwardCategory, u32>,
    pub holes_played: usize,
}

impl TeamTally {
    pub fn zero(team_id: impl Into<String>, team_name: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            team_name: team_name.into(),
            counts: AwardCategory::iter().map(|c| (c, 0)).collect(),
            holes_played: 0,
        }
    }

    pub fn count(&self, category: AwardCategory) -> u32 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn category_count(&self, category: AwardCategory) -> CategoryCount {
        CategoryCount {
            team_id: self.team_id.clone(),
            team_name: self.team_name.clone(),
            category,
            count: self.count(category),
        }
    }
}

/// Per-team tallies in roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTallies {
    tallies: Vec<TeamTally>,
}

impl TeamTallies {
    pub fn iter(&self) -> impl Iterator<Item = &TeamTally> {
        self.tallies.iter()
    }

    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    pub fn get(&self, team_id: &str) -> Option<&TeamTally> {
        self.tallies.iter().find(|t| t.team_id == team_id)
    }

    pub fn counts_for(&self, category: AwardCategory) -> Vec<CategoryCount> {
        self.tallies
            .iter()
            .map(|t| t.category_count(category))
            .collect()
    }
}

/// Picks one scorecard per team: the first round encountered wins.
pub fn canonical_rounds(rounds: &[TeamRound]) -> Vec<&TeamRound> {
    let mut seen = HashSet::new();
    let mut canonical = Vec::with_capacity(rounds.len());

    for round in rounds {
        if seen.insert(round.team_id.as_str()) {
            canonical.push(round);
        } else {
            warn!(
                "Ignoring extra scorecard for team '{}' ({}); the first one is canonical",
                round.team_name, round.team_id
            );
        }
    }
    canonical
}

/// Holes that count toward a round: numbered 1..=18, first occurrence of each number.
pub fn scored_holes(round: &TeamRound) -> Vec<&HoleRecord> {
    let mut seen = HashSet::new();
    let mut holes = Vec::with_capacity(round.holes.len().min(HOLES_PER_ROUND));

    for hole in &round.holes {
        if hole.hole_number == 0 || hole.hole_number as usize > HOLES_PER_ROUND {
            debug!(
                "Skipping hole {} for team {}: outside the round",
                hole.hole_number, round.team_id
            );
            continue;
        }
        if !seen.insert(hole.hole_number) {
            debug!(
                "Skipping repeated hole {} for team {}",
                hole.hole_number, round.team_id
            );
            continue;
        }
        holes.push(hole);
    }
    holes
}

/// Folds each team's canonical round into award counts.
///
/// Every roster team is present in the result, with zeros if it has no round.
/// Teams that only appear in `rounds` are appended in first-seen order.
pub fn aggregate(roster: &[Team], rounds: &[TeamRound]) -> TeamTallies {
    let mut tallies: Vec<TeamTally> = Vec::with_capacity(roster.len());
    let mut slot_of: HashMap<String, usize> = HashMap::new();

    for team in roster {
        if slot_of.contains_key(&team.id) {
            continue;
        }
        slot_of.insert(team.id.clone(), tallies.len());
        tallies.push(TeamTally::zero(&team.id, &team.name));
    }

    for round in canonical_rounds(rounds) {
        let slot = match slot_of.get(&round.team_id).copied() {
            Some(slot) => slot,
            None => {
                slot_of.insert(round.team_id.clone(), tallies.len());
                tallies.push(TeamTally::zero(&round.team_id, &round.team_name));
                tallies.len() - 1
            }
        };
        let tally = &mut tallies[slot];

        for hole in scored_holes(round) {
            tally.holes_played += 1;
            if let Some(award) = classify(hole.strokes, hole.par).award() {
                *tally.counts.entry(award).or_insert(0) += 1;
            }
        }
    }

    TeamTallies { tallies }
}
