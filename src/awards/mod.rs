pub mod ranker;
pub mod winner;

pub use self::ranker::{
    display_group, rank, rank_all, rank_with_levels, AwardBoard, AwardEntry, MAX_RANK_LEVELS,
    UNGROUPED,
};
pub use self::winner::{
    apply_tie_break, compute_winners, decide, standings, Handicaps, TieBreak, WinnerCandidate,
    WinnerOutcome,
};
