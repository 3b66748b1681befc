//! Evidence log integration tests
//!
//! A session writing to the JSON-lines evidence log, and model stores loaded
//! from disk that only know part of the prompt space.

use std::fs;
use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shape_quiz::analytics::{
    read_log, Entity, EntityKind, Item, JsonlEvidenceLog, LogRecord, RecordingSdk, Taxonomy,
    EVIDENCE_EVENT, GAME_FILTER,
};
use shape_quiz::quiz::{describe_prompt, QuizInput, QuizSession};

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("shape-quiz-{}-{}", tag, uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_session_writes_evidence_and_trials() {
    let dir = temp_dir("log");
    let path = dir.join("evidence.jsonl");
    let store = Taxonomy::builtin();
    let mut sdk = JsonlEvidenceLog::new(&path);
    let mut session = QuizSession::new("logger", ChaCha8Rng::seed_from_u64(5));

    for _ in 0..7 {
        session.handle_input(QuizInput::Check, &mut sdk, &store);
        session.handle_input(QuizInput::Next, &mut sdk, &store);
    }

    let records = read_log(&path).unwrap();
    let evidence: Vec<_> = records
        .iter()
        .filter_map(|r| match r {
            LogRecord::Evidence { report, .. } => Some(report),
            _ => None,
        })
        .collect();
    let trials = records
        .iter()
        .filter(|r| matches!(r, LogRecord::TrialStarted { .. }))
        .count();

    assert_eq!(evidence.len(), 7);
    assert_eq!(trials, 1);
    assert!(evidence.iter().all(|r| r.event_name == EVIDENCE_EVENT));
    assert!(evidence.iter().all(|r| r.learner_id == "logger"));

    // Trial boundary is written right after the fifth report
    assert!(matches!(records[5], LogRecord::TrialStarted { .. }));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_partial_taxonomy_skips_unknown_prompts() {
    let dir = temp_dir("taxonomy");
    let path = dir.join("taxonomy.json");

    // Find the first prompt of a seeded session and register only that one
    let first = QuizSession::new("scout", ChaCha8Rng::seed_from_u64(9));
    let known_uri = describe_prompt(first.state.prompt);

    let taxonomy = Taxonomy {
        entities: vec![Entity {
            kind: EntityKind::Prompt,
            uri: known_uri.clone(),
            name: known_uri.clone(),
        }],
        items: vec![Item {
            uri: format!("{}#whole", known_uri),
            game: GAME_FILTER.to_string(),
            prompt_uri: known_uri.clone(),
        }],
        categories: Vec::new(),
    };
    taxonomy.save(&path).unwrap();
    let store = Taxonomy::load(&path).unwrap();

    let mut sdk = RecordingSdk::new();
    let mut session = QuizSession::new("scout", ChaCha8Rng::seed_from_u64(9));
    for _ in 0..6 {
        session.handle_input(QuizInput::Check, &mut sdk, &store);
        session.handle_input(QuizInput::Next, &mut sdk, &store);
    }

    let sent = session.stats.reports_sent;
    assert!(sent >= 1);
    assert_eq!(sent + session.stats.reports_skipped, 6);
    assert!(sdk.reports.iter().all(|r| r.prompt_uri == known_uri));
    assert_eq!(sdk.reports[0].attempts.len(), 1);
    assert!(sdk.reports[0].prompt_answers.is_empty());

    // Grading and trials are unaffected by skipped reports
    assert_eq!(session.stats.prompts_graded, 6);
    assert_eq!(sdk.trials.len(), 1);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_items_for_other_games_are_ignored() {
    let mut store = Taxonomy::builtin();
    for item in store.items.iter_mut() {
        item.game = "mushroom-sort".to_string();
    }

    let mut sdk = RecordingSdk::new();
    let mut session = QuizSession::new("kid", ChaCha8Rng::seed_from_u64(1));
    session.handle_input(QuizInput::Check, &mut sdk, &store);

    assert_eq!(session.stats.reports_skipped, 1);
    assert!(sdk.reports.is_empty());
}
