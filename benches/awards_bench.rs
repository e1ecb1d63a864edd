use criterion::{criterion_group, criterion_main, Criterion};
use foursome::api::build_scoreboard;
use foursome::awards::{rank_all, Handicaps, MAX_RANK_LEVELS};
use foursome::config::AwardParams;
use foursome::course::STANDARD_PARS;
use foursome::ingest::EventData;
use foursome::scorecard::{aggregate, Team, TeamRound};
use std::hint::black_box;

fn setup_event(team_count: usize) -> EventData {
    let mut event = EventData::default();
    for t in 0..team_count {
        let id = format!("t{}", t);
        let name = format!("{}-Team {}", t % 12 + 1, t);
        // Deterministic spread of scores around par
        let strokes: Vec<u32> = STANDARD_PARS
            .iter()
            .enumerate()
            .map(|(h, &p)| (p as u32 + ((t * 7 + h * 3) % 5) as u32).saturating_sub(1).max(1))
            .collect();
        event
            .rounds
            .push(TeamRound::from_strokes(&id, &name, &STANDARD_PARS, &strokes));
        event.teams.push(Team::new(id, name));
    }
    event
}

fn bench_awards(c: &mut Criterion) {
    let event = setup_event(200);
    let handicaps: Handicaps = event
        .teams
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id.clone(), (i % 20) as i32))
        .collect();
    let params = AwardParams::default();

    c.bench_function("aggregate_200_teams", |b| {
        b.iter(|| aggregate(black_box(&event.teams), black_box(&event.rounds)))
    });

    let tallies = aggregate(&event.teams, &event.rounds);
    c.bench_function("rank_all_categories", |b| {
        b.iter(|| rank_all(black_box(&tallies), MAX_RANK_LEVELS))
    });

    c.bench_function("full_scoreboard", |b| {
        b.iter(|| build_scoreboard(black_box(&event), black_box(&handicaps), &params))
    });
}

criterion_group!(benches, bench_awards);
criterion_main!(benches);
