//! Shape Quiz Headless Simulator
//!
//! Plays the quiz with a scripted learner, without any UI, through the same
//! `QuizSession` the terminal front end uses. Useful for checking choice-set
//! balance and the trial cadence of evidence reporting.
//!
//! Usage:
//!   cargo run --bin quiz-simulator -- [OPTIONS]
//!
//! Options:
//!   --prompts N     Prompts to play (default: 100)
//!   --seed N        RNG seed (default: 42)
//!   --accuracy P    Chance the learner answers exactly right, 0 to 1 (default: 0.7)
//!   --learner ID    Learner id on reports (default: simulated-learner)
//!   --log FILE      Append evidence to a JSON-lines file
//!   --json          Print the report as JSON
//!   --quiet         Only the final summary line

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use shape_quiz::analytics::{JsonlEvidenceLog, LearningSdk, NullSdk, Taxonomy};
use shape_quiz::quiz::{
    compute_correct_mask, describe_prompt, match_score, QuizInput, QuizSession, SessionStats,
    NUM_CHOICES,
};

// ── CLI Configuration ────────────────────────────────────────────────

struct SimConfig {
    prompts: u32,
    seed: u64,
    accuracy: f64,
    learner: String,
    log_path: Option<String>,
    json: bool,
    quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            prompts: 100,
            seed: 42,
            accuracy: 0.7,
            learner: "simulated-learner".to_string(),
            log_path: None,
            json: false,
            quiet: false,
        }
    }
}

fn parse_number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    args.get(i)
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| format!("{} requires a number", flag))
}

fn parse_value(args: &[String], i: usize, flag: &str) -> Result<String, String> {
    args.get(i)
        .cloned()
        .ok_or_else(|| format!("{} requires a value", flag))
}

/// Parse simulator flags (without the program name). `Ok(None)` means help
/// was requested.
fn parse_args(args: &[String]) -> Result<Option<SimConfig>, String> {
    let mut config = SimConfig::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--prompts" => {
                i += 1;
                config.prompts = parse_number(args, i, "--prompts")?;
            }
            "--seed" => {
                i += 1;
                config.seed = parse_number(args, i, "--seed")?;
            }
            "--accuracy" => {
                i += 1;
                let accuracy: f64 = parse_number(args, i, "--accuracy")?;
                if !(0.0..=1.0).contains(&accuracy) {
                    return Err(format!(
                        "--accuracy must be between 0 and 1, got {}",
                        accuracy
                    ));
                }
                config.accuracy = accuracy;
            }
            "--learner" => {
                i += 1;
                config.learner = parse_value(args, i, "--learner")?;
            }
            "--log" => {
                i += 1;
                config.log_path = Some(parse_value(args, i, "--log")?);
            }
            "--json" => config.json = true,
            "--quiet" => config.quiet = true,
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("Unknown argument: {other}")),
        }
        i += 1;
    }
    Ok(Some(config))
}

fn print_usage() {
    eprintln!(
        "Shape Quiz Headless Simulator\n\
         \n\
         Usage: quiz-simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --prompts N     Prompts to play (default: 100)\n\
         \x20 --seed N        RNG seed (default: 42)\n\
         \x20 --accuracy P    Chance of an exactly right answer, 0 to 1 (default: 0.7)\n\
         \x20 --learner ID    Learner id on reports\n\
         \x20 --log FILE      Append evidence to a JSON-lines file\n\
         \x20 --json          Print the report as JSON\n\
         \x20 --quiet         Only final summary line\n\
         \x20 --help, -h      Show this help"
    );
}

// ── Simulation Report ────────────────────────────────────────────────

#[derive(Debug, Default, Serialize)]
struct ChoiceMix {
    full: u32,
    partial: u32,
    none: u32,
}

#[derive(Debug, Serialize)]
struct SimReport {
    seed: u64,
    accuracy_target: f64,
    stats: SessionStats,
    accuracy: f64,
    choice_mix: ChoiceMix,
    distinct_prompt_uris: usize,
}

/// Pick the selection the scripted learner submits for the current prompt.
fn scripted_answer<R: Rng>(correct: u8, accuracy: f64, rng: &mut R) -> u8 {
    if rng.gen_bool(accuracy) {
        return correct;
    }
    // Any other selection; flipping at least one bit guarantees a mistake
    let flips: u8 = rng.gen_range(1..(1u8 << NUM_CHOICES));
    correct ^ flips
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_args(&args) {
        Ok(Some(config)) => config,
        Ok(None) => {
            print_usage();
            std::process::exit(0);
        }
        Err(msg) => {
            eprintln!("{}", msg);
            print_usage();
            std::process::exit(1);
        }
    };
    pretty_env_logger::init();

    let store = Taxonomy::builtin();
    let mut sdk: Box<dyn LearningSdk> = match &config.log_path {
        Some(path) => Box::new(JsonlEvidenceLog::new(path)),
        None => Box::new(NullSdk),
    };

    let mut session = QuizSession::new(config.learner.clone(), StdRng::seed_from_u64(config.seed));
    let mut learner_rng = StdRng::seed_from_u64(config.seed.wrapping_add(1));

    let mut mix = ChoiceMix::default();
    let mut uris = std::collections::BTreeSet::new();

    for n in 0..config.prompts {
        let state = session.state.clone();
        for &choice in &state.choices {
            match match_score(state.prompt, choice) {
                3 => mix.full += 1,
                0 => mix.none += 1,
                _ => mix.partial += 1,
            }
        }
        uris.insert(describe_prompt(state.prompt));

        let correct = compute_correct_mask(state.prompt, &state.choices);
        let answer = scripted_answer(correct, config.accuracy, &mut learner_rng);
        for i in 0..NUM_CHOICES {
            if answer >> i & 1 == 1 {
                session.handle_input(QuizInput::Toggle(i), sdk.as_mut(), &store);
            }
        }
        session.handle_input(QuizInput::Check, sdk.as_mut(), &store);

        if !config.quiet && !config.json {
            println!(
                "#{:<4} {:<32} correct:{:06b} answer:{:06b} {}",
                n + 1,
                describe_prompt(state.prompt),
                correct,
                answer,
                if answer == correct { "ok" } else { "miss" }
            );
        }

        session.handle_input(QuizInput::Next, sdk.as_mut(), &store);
    }

    let report = SimReport {
        seed: config.seed,
        accuracy_target: config.accuracy,
        accuracy: session.stats.accuracy(),
        stats: session.stats.clone(),
        choice_mix: mix,
        distinct_prompt_uris: uris.len(),
    };

    if config.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!(
            "prompts:{} correct:{} accuracy:{:.1}% trials:{} reports:{} skipped:{} failed:{} \
             mix(full/partial/none):{}/{}/{} uris:{}",
            report.stats.prompts_graded,
            report.stats.prompts_correct,
            report.accuracy * 100.0,
            report.stats.trials_started,
            report.stats.reports_sent,
            report.stats.reports_skipped,
            report.stats.reports_failed,
            report.choice_mix.full,
            report.choice_mix.partial,
            report.choice_mix.none,
            report.distinct_prompt_uris,
        );
    }
}
