use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use foursome::api::TeamSummary;
use foursome::awards::{AwardBoard, WinnerCandidate, WinnerOutcome};
use foursome::course::HOLES_PER_ROUND;
use foursome::ingest::{EventData, Severity, ValidationIssue};
use foursome::scorecard::{canonical_rounds, AwardCategory, Locale, TeamTallies};
use strum::IntoEnumIterator;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn medal(rank: usize) -> &'static str {
    match rank {
        1 => "🥇",
        2 => "🥈",
        3 => "🥉",
        _ => "  ",
    }
}

/// Hole-by-hole strokes of each team's scored card, par row on top.
pub fn print_scorecard_grid(event: &EventData, summaries: &[TeamSummary]) {
    let rounds = canonical_rounds(&event.rounds);
    let Some(first) = rounds.first() else {
        return;
    };

    let mut table = new_table();
    let mut header = vec![Cell::new("Team").add_attribute(Attribute::Bold)];
    header.extend(
        (1..=HOLES_PER_ROUND).map(|h| Cell::new(h).set_alignment(CellAlignment::Center)),
    );
    header.push(Cell::new("Out"));
    header.push(Cell::new("In"));
    header.push(Cell::new("Total").add_attribute(Attribute::Bold));
    header.push(Cell::new("+/-"));
    table.add_row(header);

    let mut par_row = vec![Cell::new("Par").fg(Color::DarkGrey)];
    for h in 1..=HOLES_PER_ROUND as u8 {
        let par = first
            .holes
            .iter()
            .find(|r| r.hole_number == h)
            .map(|r| r.par.to_string())
            .unwrap_or_default();
        par_row.push(Cell::new(par).fg(Color::DarkGrey));
    }
    table.add_row(par_row);

    for round in rounds {
        let mut row = vec![Cell::new(&round.team_name).add_attribute(Attribute::Bold)];
        for h in 1..=HOLES_PER_ROUND as u8 {
            let cell = match round.holes.iter().find(|r| r.hole_number == h) {
                Some(r) if r.strokes < r.par as u32 => Cell::new(r.strokes).fg(Color::Red),
                Some(r) if r.strokes == r.par as u32 * 2 => Cell::new(r.strokes).fg(Color::Blue),
                Some(r) => Cell::new(r.strokes),
                None => Cell::new("-"),
            };
            row.push(cell);
        }
        match summaries.iter().find(|s| s.team_id == round.team_id) {
            Some(s) => {
                row.push(Cell::new(s.summary.front_nine));
                row.push(Cell::new(s.summary.back_nine));
                row.push(Cell::new(s.summary.total).add_attribute(Attribute::Bold));
                row.push(Cell::new(s.summary.to_par_label()));
            }
            None => row.extend((0..4).map(|_| Cell::new(""))),
        }
        table.add_row(row);
    }

    align_right(&mut table, 1..=HOLES_PER_ROUND + 4);
    println!("\n{}", table);
}

pub fn print_tally_report(tallies: &TeamTallies, locale: Locale) {
    let mut table = new_table();

    let mut header = vec![Cell::new("Team").add_attribute(Attribute::Bold)];
    header.extend(AwardCategory::iter().map(|c| Cell::new(c.label(locale))));
    header.push(Cell::new("Holes"));
    table.add_row(header);

    for tally in tallies.iter() {
        let mut row = vec![Cell::new(&tally.team_name).add_attribute(Attribute::Bold)];
        row.extend(AwardCategory::iter().map(|c| Cell::new(tally.count(c))));
        row.push(Cell::new(tally.holes_played).fg(Color::DarkGrey));
        table.add_row(row);
    }

    align_right(&mut table, 1..=AwardCategory::iter().count() + 1);
    println!("\n{}", table);
}

/// One table per award: every ranked team with its count.
pub fn print_award_board(board: &AwardBoard, locale: Locale) {
    for category in AwardCategory::iter() {
        let entries = board.entries(category);
        println!("\n🏆 {}", category.label(locale));

        if entries.is_empty() {
            println!("   (no team scored one)");
            continue;
        }

        let mut table = new_table();
        table.add_row(vec![
            Cell::new("Rank"),
            Cell::new("Team").add_attribute(Attribute::Bold),
            Cell::new("Count"),
        ]);
        for e in entries {
            let team = if e.rank == 1 {
                Cell::new(&e.team_name)
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold)
            } else {
                Cell::new(&e.team_name)
            };
            table.add_row(vec![
                Cell::new(format!("{} {}", medal(e.rank), e.rank)),
                team,
                Cell::new(e.count),
            ]);
        }
        align_right(&mut table, 2..=2);
        println!("{}", table);
    }
}

/// Rank rows by award columns; tied teams share a cell.
pub fn print_podium(board: &AwardBoard, locale: Locale) {
    let depth = board.depth();
    if depth == 0 {
        println!("\nNo awards: nobody recorded a qualifying hole.");
        return;
    }

    let mut table = new_table();
    let mut header = vec![Cell::new("")];
    header.extend(
        AwardCategory::iter().map(|c| Cell::new(c.label(locale)).add_attribute(Attribute::Bold)),
    );
    table.add_row(header);

    for rank in 1..=depth {
        let mut row = vec![Cell::new(format!("{} {}", medal(rank), rank))];
        for (_, entries) in board.podium(rank) {
            let text = if entries.is_empty() {
                "-".to_string()
            } else {
                entries
                    .iter()
                    .map(|e| format!("{} ({})", e.team_name, e.count))
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            row.push(Cell::new(text).set_alignment(CellAlignment::Center));
        }
        table.add_row(row);
    }
    println!("\n{}", table);
}

pub fn print_standings(standings: &[WinnerCandidate], outcome: &WinnerOutcome) {
    if standings.is_empty() {
        println!("\nNo scored rounds, no winner.");
        return;
    }

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("#"),
        Cell::new("Team").add_attribute(Attribute::Bold),
        Cell::new("Gross"),
        Cell::new("Hcp"),
        Cell::new("Net").fg(Color::Cyan),
    ]);

    for (i, c) in standings.iter().enumerate() {
        let champion = outcome.champions.iter().any(|w| w.team_id == c.team_id);
        let name = if champion {
            Cell::new(format!("🏆 {}", c.team_name))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&c.team_name)
        };
        table.add_row(vec![
            Cell::new(i + 1),
            name,
            Cell::new(c.raw_total),
            Cell::new(c.handicap),
            Cell::new(c.adjusted_total).fg(Color::Cyan),
        ]);
    }
    align_right(&mut table, 2..=4);
    println!("\n{}", table);

    let names = |list: &[WinnerCandidate]| {
        list.iter()
            .map(|c| c.team_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    if outcome.is_tied() {
        println!(
            "🤝 Tied on {}: {} (tie-break: {})",
            outcome.co_winners[0].adjusted_total,
            names(&outcome.co_winners),
            outcome.rule
        );
    }
    println!("🏁 Winner: {}", names(&outcome.champions));
}

pub fn print_issues(issues: &[ValidationIssue]) {
    if issues.is_empty() {
        println!("✅ No problems found.");
        return;
    }

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Severity"),
        Cell::new("Team"),
        Cell::new("Hole"),
        Cell::new("Problem").add_attribute(Attribute::Bold),
    ]);
    for issue in issues {
        let severity = match issue.severity {
            Severity::Error => Cell::new(issue.severity).fg(Color::Red),
            Severity::Warning => Cell::new(issue.severity).fg(Color::Yellow),
        };
        table.add_row(vec![
            severity,
            Cell::new(&issue.team_id),
            Cell::new(issue.hole_number.map(|h| h.to_string()).unwrap_or_default()),
            Cell::new(&issue.message),
        ]);
    }
    println!("\n{}", table);
}
