pub mod aggregate;
pub mod category;
pub mod totals;
pub mod types;

pub use self::aggregate::{
    aggregate, canonical_rounds, scored_holes, CategoryCount, TeamTallies, TeamTally,
};
pub use self::category::{classify, AwardCategory, Category, Locale};
pub use self::totals::{summarize, RoundSummary};
pub use self::types::{HoleRecord, Player, Team, TeamRound};
