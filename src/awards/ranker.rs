use crate::scorecard::{AwardCategory, CategoryCount, TeamTallies};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// Lowest rank that still receives an award.
pub const MAX_RANK_LEVELS: usize = 3;

/// Display group for team names without a `<n>-` prefix.
pub const UNGROUPED: u32 = 999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardEntry {
    pub team_id: String,
    pub team_name: String,
    pub count: u32,
    pub rank: usize,
}

/// Leading group number of a team name such as `2-Eagles`.
pub fn display_group(team_name: &str) -> u32 {
    match team_name.split_once('-') {
        Some((prefix, _)) if !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) => {
            prefix.parse().unwrap_or(UNGROUPED)
        }
        _ => UNGROUPED,
    }
}

pub fn rank(counts: &[CategoryCount]) -> Vec<AwardEntry> {
    rank_with_levels(counts, MAX_RANK_LEVELS)
}

/// Competition ranking ("1224") of one category's counts.
///
/// Zero counts are dropped and equal counts share a rank. A new count takes
/// the rank of its position, so a two-way tie for 2nd is followed by 4th.
/// Entries ranked below `levels` are cut. Teams sharing a rank are listed by
/// display group, then input order; the group never affects the rank itself.
pub fn rank_with_levels(counts: &[CategoryCount], levels: usize) -> Vec<AwardEntry> {
    let mut contenders: Vec<&CategoryCount> = counts.iter().filter(|c| c.count > 0).collect();
    contenders.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| display_group(&a.team_name).cmp(&display_group(&b.team_name)))
    });

    let mut ranked = Vec::with_capacity(contenders.len());
    let mut current_rank = 0;
    let mut previous_count = None;

    for (position, c) in contenders.into_iter().enumerate() {
        if previous_count != Some(c.count) {
            current_rank = position + 1;
            previous_count = Some(c.count);
        }
        if current_rank > levels {
            break;
        }
        ranked.push(AwardEntry {
            team_id: c.team_id.clone(),
            team_name: c.team_name.clone(),
            count: c.count,
            rank: current_rank,
        });
    }
    ranked
}

/// Ranked entries for every award category. Categories nobody scored stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AwardBoard {
    pub categories: BTreeMap<AwardCategory, Vec<AwardEntry>>,
}

impl AwardBoard {
    pub fn entries(&self, category: AwardCategory) -> &[AwardEntry] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Entries holding `rank` in each category, for a rank-by-rank table.
    pub fn podium(&self, rank: usize) -> Vec<(AwardCategory, Vec<&AwardEntry>)> {
        AwardCategory::iter()
            .map(|c| {
                let holders = self.entries(c).iter().filter(|e| e.rank == rank).collect();
                (c, holders)
            })
            .collect()
    }

    /// Deepest rank present in any category.
    pub fn depth(&self) -> usize {
        self.categories
            .values()
            .flat_map(|entries| entries.iter().map(|e| e.rank))
            .max()
            .unwrap_or(0)
    }
}

pub fn rank_all(tallies: &TeamTallies, levels: usize) -> AwardBoard {
    let categories = AwardCategory::iter()
        .map(|c| (c, rank_with_levels(&tallies.counts_for(c), levels)))
        .collect();
    AwardBoard { categories }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_group_prefixes() {
        assert_eq!(display_group("2-Eagles"), 2);
        assert_eq!(display_group("10-Hawks"), 10);
        assert_eq!(display_group("Hawks"), UNGROUPED);
        assert_eq!(display_group("-Hawks"), UNGROUPED);
        assert_eq!(display_group("A1-Hawks"), UNGROUPED);
        assert_eq!(display_group("3-"), 3);
    }

    #[test]
    fn test_display_group_overflow_is_ungrouped() {
        assert_eq!(display_group("99999999999999999999-x"), UNGROUPED);
    }
}
