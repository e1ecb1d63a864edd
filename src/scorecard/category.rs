use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Classification of a single hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Eagle,
    Birdie,
    Par,
    Bogey,
    DoublePar,
    Other,
}

/// The five categories an award is given for. `Other` never wins anything.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AwardCategory {
    DoublePar,
    Eagle,
    Birdie,
    Par,
    Bogey,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Ko,
}

impl AwardCategory {
    pub fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, Self::DoublePar) => "Most Double Pars",
            (Locale::En, Self::Eagle) => "Most Eagles",
            (Locale::En, Self::Birdie) => "Most Birdies",
            (Locale::En, Self::Par) => "Most Pars",
            (Locale::En, Self::Bogey) => "Most Bogeys",
            (Locale::Ko, Self::DoublePar) => "다양파상",
            (Locale::Ko, Self::Eagle) => "다이글상",
            (Locale::Ko, Self::Birdie) => "다버디상",
            (Locale::Ko, Self::Par) => "다파상",
            (Locale::Ko, Self::Bogey) => "다보기상",
        }
    }
}

impl Category {
    pub fn award(self) -> Option<AwardCategory> {
        match self {
            Self::Eagle => Some(AwardCategory::Eagle),
            Self::Birdie => Some(AwardCategory::Birdie),
            Self::Par => Some(AwardCategory::Par),
            Self::Bogey => Some(AwardCategory::Bogey),
            Self::DoublePar => Some(AwardCategory::DoublePar),
            Self::Other => None,
        }
    }
}

/// Classifies one hole. A double par is checked before the par difference,
/// so a par-3 scored 6 is `DoublePar`.
pub fn classify(strokes: u32, par: u8) -> Category {
    let par = par as i64;
    let strokes = strokes as i64;

    if strokes == par * 2 {
        return Category::DoublePar;
    }

    match strokes - par {
        -2 => Category::Eagle,
        -1 => Category::Birdie,
        0 => Category::Par,
        1 => Category::Bogey,
        _ => Category::Other,
    }
}
