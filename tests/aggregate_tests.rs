use foursome::course::STANDARD_PARS;
use foursome::scorecard::{
    aggregate, canonical_rounds, scored_holes, summarize, AwardCategory, HoleRecord, Team,
    TeamRound,
};

/// 11 pars on holes 1-11, birdies on 12-15, bogeys on 16-18.
fn mixed_strokes() -> Vec<u32> {
    STANDARD_PARS
        .iter()
        .enumerate()
        .map(|(i, &p)| match i + 1 {
            1..=11 => p as u32,
            12..=15 => p as u32 - 1,
            _ => p as u32 + 1,
        })
        .collect()
}

fn roster(names: &[(&str, &str)]) -> Vec<Team> {
    names.iter().map(|(id, name)| Team::new(*id, *name)).collect()
}

#[test]
fn test_full_round_counts() {
    let teams = roster(&[("t1", "1-Eagles")]);
    let rounds = vec![TeamRound::from_strokes(
        "t1",
        "1-Eagles",
        &STANDARD_PARS,
        &mixed_strokes(),
    )];

    let tallies = aggregate(&teams, &rounds);
    let t = tallies.get("t1").unwrap();

    assert_eq!(t.count(AwardCategory::Par), 11);
    assert_eq!(t.count(AwardCategory::Birdie), 4);
    assert_eq!(t.count(AwardCategory::Bogey), 3);
    assert_eq!(t.count(AwardCategory::Eagle), 0);
    assert_eq!(t.count(AwardCategory::DoublePar), 0);
    assert_eq!(t.holes_played, 18);
}

#[test]
fn test_all_fours_on_standard_course() {
    let teams = roster(&[("a", "Team A")]);
    let rounds = vec![TeamRound::from_strokes("a", "Team A", &STANDARD_PARS, &[4; 18])];

    let tallies = aggregate(&teams, &rounds);
    let t = tallies.get("a").unwrap();

    // Four par 3s, four par 5s, ten par 4s
    assert_eq!(t.count(AwardCategory::Bogey), 4);
    assert_eq!(t.count(AwardCategory::Birdie), 4);
    assert_eq!(t.count(AwardCategory::Par), 10);
    assert_eq!(t.count(AwardCategory::Eagle), 0);
    assert_eq!(t.count(AwardCategory::DoublePar), 0);
}

#[test]
fn test_roster_teams_without_rounds_get_zeros() {
    let teams = roster(&[("t1", "1-Eagles"), ("t2", "2-Hawks")]);
    let rounds = vec![TeamRound::from_strokes(
        "t1",
        "1-Eagles",
        &STANDARD_PARS,
        &mixed_strokes(),
    )];

    let tallies = aggregate(&teams, &rounds);
    assert_eq!(tallies.len(), 2);

    let idle = tallies.get("t2").unwrap();
    assert_eq!(idle.holes_played, 0);
    assert_eq!(idle.counts.len(), 5, "every category present");
    assert!(idle.counts.values().all(|&c| c == 0));
}

#[test]
fn test_roster_order_is_kept_and_strangers_appended() {
    let teams = roster(&[("b", "Bravo"), ("a", "Alpha")]);
    let rounds = vec![
        TeamRound::from_strokes("x", "Xray", &STANDARD_PARS, &[4; 18]),
        TeamRound::from_strokes("a", "Alpha", &STANDARD_PARS, &[4; 18]),
    ];

    let tallies = aggregate(&teams, &rounds);
    let ids: Vec<&str> = tallies.iter().map(|t| t.team_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "x"]);
}

#[test]
fn test_only_first_round_per_team_counts() {
    let teams = roster(&[("t1", "Eagles")]);
    let all_pars: Vec<u32> = STANDARD_PARS.iter().map(|&p| p as u32).collect();
    let all_bogeys: Vec<u32> = STANDARD_PARS.iter().map(|&p| p as u32 + 1).collect();
    let rounds = vec![
        TeamRound::from_strokes("t1", "Eagles", &STANDARD_PARS, &all_pars),
        TeamRound::from_strokes("t1", "Eagles", &STANDARD_PARS, &all_bogeys),
    ];

    assert_eq!(canonical_rounds(&rounds).len(), 1);

    let tallies = aggregate(&teams, &rounds);
    let t = tallies.get("t1").unwrap();
    assert_eq!(t.count(AwardCategory::Par), 18);
    assert_eq!(t.count(AwardCategory::Bogey), 0);
}

#[test]
fn test_repeated_and_out_of_range_holes_are_ignored() {
    let mut round = TeamRound::new("t1", "Eagles");
    round.holes.push(HoleRecord::new(1, 4, 4));
    round.holes.push(HoleRecord::new(1, 4, 8)); // repeat
    round.holes.push(HoleRecord::new(0, 4, 3));
    round.holes.push(HoleRecord::new(19, 4, 3));
    round.holes.push(HoleRecord::new(2, 3, 6));

    assert_eq!(scored_holes(&round).len(), 2);

    let tallies = aggregate(&[Team::new("t1", "Eagles")], &[round]);
    let t = tallies.get("t1").unwrap();
    assert_eq!(t.holes_played, 2);
    assert_eq!(t.count(AwardCategory::Par), 1);
    assert_eq!(t.count(AwardCategory::DoublePar), 1);
    assert_eq!(t.count(AwardCategory::Birdie), 0);
}

#[test]
fn test_partial_round_counts_what_was_played() {
    let mut round = TeamRound::new("t1", "Eagles");
    for h in 1..=9u8 {
        round.holes.push(HoleRecord::new(h, 4, 3));
    }
    let tallies = aggregate(&[], &[round]);
    let t = tallies.get("t1").unwrap();
    assert_eq!(t.holes_played, 9);
    assert_eq!(t.count(AwardCategory::Birdie), 9);
}

#[test]
fn test_empty_inputs() {
    assert!(aggregate(&[], &[]).is_empty());
}

#[test]
fn test_summary_splits_out_and_in() {
    let round = TeamRound::from_strokes("t1", "Eagles", &STANDARD_PARS, &mixed_strokes());
    let s = summarize(&round);

    assert_eq!(s.front_nine, 36); // front nine played to par
    assert_eq!(s.par_total, 72);
    assert_eq!(s.total, 71);
    assert_eq!(s.to_par, -1);
    assert_eq!(s.to_par_label(), "-1");
    assert_eq!(s.front_nine + s.back_nine, s.total);
}

#[test]
fn test_summary_labels() {
    let even: Vec<u32> = STANDARD_PARS.iter().map(|&p| p as u32).collect();
    let s = summarize(&TeamRound::from_strokes("t", "T", &STANDARD_PARS, &even));
    assert_eq!(s.to_par_label(), "E");

    let over: Vec<u32> = STANDARD_PARS.iter().map(|&p| p as u32 + 1).collect();
    let s = summarize(&TeamRound::from_strokes("t", "T", &STANDARD_PARS, &over));
    assert_eq!(s.to_par_label(), "+18");
}
