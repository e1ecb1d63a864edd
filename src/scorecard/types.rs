use serde::{Deserialize, Serialize};

/// One team's result on one hole. Foursome play: the team plays one ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoleRecord {
    pub hole_number: u8, // 1..=18
    pub par: u8,         // 3, 4 or 5
    pub strokes: u32,
}

impl HoleRecord {
    pub fn new(hole_number: u8, par: u8, strokes: u32) -> Self {
        Self {
            hole_number,
            par,
            strokes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRound {
    pub team_id: String,
    pub team_name: String,
    pub holes: Vec<HoleRecord>,
}

impl TeamRound {
    pub fn new(team_id: impl Into<String>, team_name: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            team_name: team_name.into(),
            holes: Vec::new(),
        }
    }

    /// Builds a full round from parallel par/stroke slices, numbering holes from 1.
    pub fn from_strokes(
        team_id: impl Into<String>,
        team_name: impl Into<String>,
        pars: &[u8],
        strokes: &[u32],
    ) -> Self {
        let holes = pars
            .iter()
            .zip(strokes)
            .enumerate()
            .map(|(i, (&par, &s))| HoleRecord::new((i + 1) as u8, par, s))
            .collect();
        Self {
            holes,
            ..Self::new(team_id, team_name)
        }
    }

    pub fn total_strokes(&self) -> u64 {
        self.holes.iter().map(|h| h.strokes as u64).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
}

/// Roster entry. Players are display-only; aggregation works per team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub players: Vec<Player>,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            players: Vec::new(),
        }
    }
}
