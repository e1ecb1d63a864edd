use super::aggregate::scored_holes;
use super::types::TeamRound;
use serde::{Deserialize, Serialize};

const FRONT_NINE_LAST: u8 = 9;

/// Out / In subtotals of a round and its score relative to par.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub front_nine: u64,
    pub back_nine: u64,
    pub total: u64,
    pub par_total: u64,
    pub to_par: i64,
}

impl RoundSummary {
    /// `E` for even, `+3` over, `-2` under.
    pub fn to_par_label(&self) -> String {
        match self.to_par {
            0 => "E".to_string(),
            d if d > 0 => format!("+{}", d),
            d => d.to_string(),
        }
    }
}

pub fn summarize(round: &TeamRound) -> RoundSummary {
    let mut s = RoundSummary::default();

    for hole in scored_holes(round) {
        if hole.hole_number <= FRONT_NINE_LAST {
            s.front_nine += hole.strokes as u64;
        } else {
            s.back_nine += hole.strokes as u64;
        }
        s.par_total += hole.par as u64;
    }

    s.total = s.front_nine + s.back_nine;
    s.to_par = s.total as i64 - s.par_total as i64;
    s
}
