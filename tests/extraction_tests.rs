use foursome::course::STANDARD_PARS;
use foursome::error::{FoursomeError, FsResult};
use foursome::ingest::cache::{fingerprint, CachedExtractor, ExtractionCache};
use foursome::ingest::extract::{read_scorecard, FallbackExtractor, ScoreExtractor};
use foursome::ingest::sanitize::{
    into_event, parse_provider_response, sanitize, SanitizedScorecard, SanitizedTeam,
    FALLBACK_STROKES,
};
use std::cell::Cell;
use std::rc::Rc;

const CARD_JSON: &str = r#"{
  "teams": [
    { "teamName": "Eagles", "scores": [3, "4", 5.0, "x", 0, 15], "players": [{ "name": "Kim" }, { "name": " " }] },
    { "teamName": null, "scores": [] }
  ]
}"#;

/// Answers with a fixed text (or fails) and counts calls.
struct MockProvider {
    name: &'static str,
    answer: Option<String>,
    calls: Rc<Cell<usize>>,
}

impl MockProvider {
    fn new(name: &'static str, answer: Option<&str>) -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let provider = Self {
            name,
            answer: answer.map(str::to_string),
            calls: Rc::clone(&calls),
        };
        (provider, calls)
    }
}

impl ScoreExtractor for MockProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn extract(&mut self, _image: &[u8], _mime: &str) -> FsResult<String> {
        self.calls.set(self.calls.get() + 1);
        self.answer
            .clone()
            .ok_or_else(|| FoursomeError::Extraction(format!("{} is down", self.name)))
    }
}

// --- PARSING & SANITIZING ---

#[test]
fn test_response_wrapped_in_prose() {
    let text = format!("Sure! Here is the card:\n```json\n{}\n```\nAnything else?", CARD_JSON);
    let card = parse_provider_response(&text).unwrap();
    assert_eq!(card.teams.len(), 2);
}

#[test]
fn test_response_without_teams_is_rejected() {
    assert!(parse_provider_response(r#"{"teams": []}"#).is_err());
    assert!(parse_provider_response("I could not read that image.").is_err());
}

#[test]
fn test_sanitize_fills_and_clamps() {
    let card = sanitize(&parse_provider_response(CARD_JSON).unwrap());

    let eagles = &card.teams[0];
    assert_eq!(eagles.name, "Eagles");
    assert_eq!(&eagles.strokes[..3], &[3, 4, 5]);
    // "x", 0 and 15 are unreadable
    assert_eq!(&eagles.strokes[3..6], &[FALLBACK_STROKES; 3]);
    // Missing holes padded
    assert!(eagles.strokes[6..].iter().all(|&s| s == FALLBACK_STROKES));
    assert_eq!(eagles.players, vec!["Kim".to_string(), "Player 2".to_string()]);

    let unnamed = &card.teams[1];
    assert_eq!(unnamed.name, "Team 2");
    assert_eq!(unnamed.strokes, [FALLBACK_STROKES; 18]);

    // No pars on the photo: standard course
    assert_eq!(card.pars, STANDARD_PARS);
}

#[test]
fn test_sanitize_pars() {
    let mut pars: Vec<String> = vec!["5".to_string(); 18];
    pars[2] = "7".to_string();
    let text = format!(
        r#"{{"teams":[{{"teamName":"A","scores":[]}}],"pars":[{}]}}"#,
        pars.iter()
            .map(|p| format!("\"{}\"", p))
            .collect::<Vec<_>>()
            .join(",")
    );
    let card = sanitize(&parse_provider_response(&text).unwrap());
    assert_eq!(card.pars[0], 5);
    assert_eq!(card.pars[2], 4);

    // A short par list is ignored entirely
    let short = r#"{"teams":[{"teamName":"A","scores":[]}],"pars":[5,5,5]}"#;
    let card = sanitize(&parse_provider_response(short).unwrap());
    assert_eq!(card.pars, STANDARD_PARS);
}

#[test]
fn test_extra_scores_are_dropped() {
    let scores = vec!["3"; 20].join(",");
    let text = format!(r#"{{"teams":[{{"teamName":"A","scores":[{}]}}]}}"#, scores);
    let card = sanitize(&parse_provider_response(&text).unwrap());
    assert_eq!(card.teams[0].strokes, [3; 18]);
}

#[test]
fn test_into_event_prefixes_by_photo_order() {
    let card = SanitizedScorecard {
        teams: vec![
            SanitizedTeam {
                name: "Eagles".to_string(),
                strokes: [4; 18],
                players: vec!["Kim".to_string()],
            },
            SanitizedTeam {
                name: "Hawks".to_string(),
                strokes: [5; 18],
                players: vec![],
            },
        ],
        pars: STANDARD_PARS,
    };

    let event = into_event(&card, 2);
    assert_eq!(event.teams.len(), 2);
    assert_eq!(event.teams[0].id, "team-2-1");
    assert_eq!(event.teams[0].name, "2-Eagles");
    assert_eq!(event.teams[0].players[0].id, "player-2-1-1");
    assert_eq!(event.rounds[1].team_id, "team-2-2");
    assert_eq!(event.rounds[1].holes.len(), 18);
    assert_eq!(event.rounds[1].holes[17].hole_number, 18);
}

// --- PROVIDERS ---

#[test]
fn test_read_scorecard_runs_whole_pipeline() {
    let (mut provider, calls) = MockProvider::new("mock", Some(CARD_JSON));
    let card = read_scorecard(&mut provider, b"img", "image/png").unwrap();
    assert_eq!(card.teams.len(), 2);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_fallback_sticks_to_last_working_provider() {
    let (down, down_calls) = MockProvider::new("primary", None);
    let (up, up_calls) = MockProvider::new("secondary", Some(CARD_JSON));
    let mut fallback = FallbackExtractor::new(vec![
        Box::new(down) as Box<dyn ScoreExtractor>,
        Box::new(up),
    ]);

    assert!(fallback.extract(b"one", "image/jpeg").is_ok());
    assert_eq!(fallback.preferred(), Some("secondary"));
    assert_eq!(down_calls.get(), 1);

    assert!(fallback.extract(b"two", "image/jpeg").is_ok());
    assert_eq!(down_calls.get(), 1, "primary is not retried first");
    assert_eq!(up_calls.get(), 2);
}

#[test]
fn test_fallback_reports_every_failure() {
    let (a, _) = MockProvider::new("a", None);
    let (b, _) = MockProvider::new("b", None);
    let mut fallback = FallbackExtractor::new(vec![
        Box::new(a) as Box<dyn ScoreExtractor>,
        Box::new(b),
    ]);

    match fallback.extract(b"img", "image/png") {
        Err(FoursomeError::Extraction(msg)) => {
            assert!(msg.contains("a is down"));
            assert!(msg.contains("b is down"));
        }
        other => panic!("expected extraction error, got {:?}", other.map(|_| ())),
    }
    assert_eq!(fallback.preferred(), None);

    let mut empty = FallbackExtractor::new(Vec::new());
    assert!(empty.extract(b"img", "image/png").is_err());
}

#[cfg(unix)]
#[test]
fn test_command_extractor_pipes_stdin_to_stdout() {
    use foursome::ingest::extract::CommandExtractor;

    let mut cat = CommandExtractor::parse("cat").unwrap();
    let out = cat.extract(CARD_JSON.as_bytes(), "image/png").unwrap();
    assert_eq!(out, CARD_JSON);

    let mut failing = CommandExtractor::parse("false").unwrap();
    assert!(matches!(
        failing.extract(b"img", "image/png"),
        Err(FoursomeError::Extraction(_))
    ));

    assert!(CommandExtractor::parse("   ").is_err());
}

#[cfg(unix)]
#[test]
fn test_command_extractor_streams_large_images() {
    use foursome::ingest::extract::CommandExtractor;

    // Far larger than a pipe buffer in both directions
    let image: Vec<u8> = (0..4 * 1024 * 1024).map(|i| b'a' + (i % 26) as u8).collect();

    let mut cat = CommandExtractor::parse("cat").unwrap();
    let out = cat.extract(&image, "image/jpeg").unwrap();
    assert_eq!(out.len(), image.len());
    assert_eq!(out.as_bytes(), &image[..]);
}

#[cfg(unix)]
#[test]
fn test_command_extractor_tolerates_child_ignoring_stdin() {
    use foursome::ingest::extract::CommandExtractor;

    let image = vec![b'x'; 4 * 1024 * 1024];

    let mut quiet = CommandExtractor::parse("true").unwrap();
    assert_eq!(quiet.extract(&image, "image/jpeg").unwrap(), "");

    let mut failing = CommandExtractor::parse("false").unwrap();
    assert!(matches!(
        failing.extract(&image, "image/jpeg"),
        Err(FoursomeError::Extraction(_))
    ));
}

// --- CACHE ---

#[test]
fn test_fingerprint_is_sha256_hex() {
    assert_eq!(
        fingerprint(b""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_ne!(fingerprint(b"a"), fingerprint(b"b"));
}

#[test]
fn test_cached_extractor_skips_provider_on_repeat() {
    let (provider, calls) = MockProvider::new("mock", Some(CARD_JSON));
    let mut reader = CachedExtractor::new(provider, 4);

    let first = reader.read(b"photo", "image/png").unwrap();
    let second = reader.read(b"photo", "image/png").unwrap();
    assert_eq!(first, second);
    assert_eq!(calls.get(), 1);
    assert_eq!(reader.cache().hits, 1);
    assert_eq!(reader.cache().misses, 1);

    reader.read(b"other photo", "image/png").unwrap();
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_failures_are_not_cached() {
    let (provider, calls) = MockProvider::new("mock", Some("no json here"));
    let mut reader = CachedExtractor::new(provider, 4);

    assert!(reader.read(b"photo", "image/png").is_err());
    assert!(reader.read(b"photo", "image/png").is_err());
    assert_eq!(calls.get(), 2);
    assert!(reader.cache().is_empty());
}

#[test]
fn test_cache_evicts_least_recently_used() {
    let card = sanitize(&parse_provider_response(CARD_JSON).unwrap());
    let mut cache = ExtractionCache::new(2);

    cache.insert("a".into(), card.clone());
    cache.insert("b".into(), card.clone());
    assert!(cache.get("a").is_some()); // a is now newest
    cache.insert("c".into(), card.clone());

    assert_eq!(cache.len(), 2);
    assert!(cache.contains("a"));
    assert!(!cache.contains("b"));
    assert!(cache.contains("c"));

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_large_cache_keeps_recency_across_repeated_hits() {
    let card = sanitize(&parse_provider_response(CARD_JSON).unwrap());
    let capacity = 10_000;
    let mut cache = ExtractionCache::new(capacity);

    for i in 0..capacity {
        cache.insert(format!("k{i}"), card.clone());
    }
    // Hit the oldest half twice over; the untouched second half is now oldest.
    for _ in 0..2 {
        for i in 0..capacity / 2 {
            assert!(cache.get(&format!("k{i}")).is_some());
        }
    }
    // Re-inserting an existing key refreshes it without growing the cache.
    cache.insert(format!("k{}", capacity / 2), card.clone());
    assert_eq!(cache.len(), capacity);

    for i in 0..3 {
        cache.insert(format!("new{i}"), card.clone());
    }

    assert_eq!(cache.len(), capacity);
    assert_eq!(cache.hits, capacity as u64);
    assert!(cache.contains("k0"));
    assert!(cache.contains(&format!("k{}", capacity / 2)));
    for i in 1..=3 {
        assert!(!cache.contains(&format!("k{}", capacity / 2 + i)));
    }
    assert!(cache.contains(&format!("k{}", capacity / 2 + 4)));
    assert!(cache.contains("new2"));
}

#[test]
fn test_zero_capacity_disables_cache() {
    let (provider, calls) = MockProvider::new("mock", Some(CARD_JSON));
    let mut reader = CachedExtractor::new(provider, 0);
    reader.read(b"photo", "image/png").unwrap();
    reader.read(b"photo", "image/png").unwrap();
    assert_eq!(calls.get(), 2);
    assert_eq!(reader.provider().name(), "mock");
}
