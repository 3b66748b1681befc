mod input;
mod ui;

use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::{map_key, KeyAction};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::Backend;
use ratatui::{backend::CrosstermBackend, Terminal};
use shape_quiz::analytics::{JsonlEvidenceLog, LearningSdk, ModelStore, NullSdk, Taxonomy};
use shape_quiz::build_info;
use shape_quiz::config::{self, CliAction, QuizConfig};
use shape_quiz::quiz::{QuizSession, Sound};

/// Log lines go to stderr underneath the quiz screen, so only warnings are
/// shown and RUST_LOG is not consulted.
const TUI_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Warn;

fn usage() -> String {
    [
        "Shape Quiz - pick the figures that match the prompt",
        "",
        "Usage: shape-quiz [options]",
        "",
        "Options:",
        "  --seed N          Reproducible prompts",
        "  --learner ID      Learner the evidence is reported for",
        "  --taxonomy FILE   Model store JSON (default: built-in)",
        "  --no-log          Do not write evidence.jsonl",
        "  --quiet           No bell on wrong answers",
        "  --version         Show version information",
        "  --help            Show this help message",
        "",
        "Only warnings are logged here; use quiz-simulator with RUST_LOG=debug",
        "to trace evidence reporting.",
    ]
    .join("\n")
}

fn load_store(config: &QuizConfig) -> Taxonomy {
    match &config.taxonomy_path {
        Some(path) => match Taxonomy::load(path) {
            Ok(taxonomy) => taxonomy,
            Err(e) => {
                log::warn!(
                    "could not load taxonomy {}: {}, using built-in",
                    path.display(),
                    e
                );
                Taxonomy::builtin()
            }
        },
        None => Taxonomy::builtin(),
    }
}

fn open_sdk(config: &QuizConfig) -> io::Result<Box<dyn LearningSdk>> {
    if config.evidence_log {
        Ok(Box::new(JsonlEvidenceLog::new(config::evidence_log_path()?)))
    } else {
        Ok(Box::new(NullSdk))
    }
}

fn main() -> io::Result<()> {
    pretty_env_logger::formatted_builder()
        .filter_level(TUI_LOG_LEVEL)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = config::load_config();

    match config.apply_args(&args) {
        Ok(CliAction::Run) => {}
        Ok(CliAction::Version) => {
            println!("{}", build_info::version_line("shape-quiz"));
            std::process::exit(0);
        }
        Ok(CliAction::Help) => {
            println!("{}", usage());
            std::process::exit(0);
        }
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("Run 'shape-quiz --help' for usage.");
            std::process::exit(1);
        }
    }

    let store = load_store(&config);
    let mut sdk = open_sdk(&config)?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = QuizSession::new(config.learner_id.clone(), rng);

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = run(&mut terminal, &mut session, sdk.as_mut(), &store, config.sound);

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result?;

    let stats = &session.stats;
    println!(
        "{} correct out of {} ({} skipped, {} trials)",
        stats.prompts_correct, stats.prompts_graded, stats.prompts_skipped, stats.trials_started
    );
    Ok(())
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &mut QuizSession<StdRng>,
    sdk: &mut dyn LearningSdk,
    store: &dyn ModelStore,
    sound: bool,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, &session.state, &session.stats))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        match map_key(key, session.state.showing_answers.is_active()) {
            KeyAction::Quit => return Ok(()),
            KeyAction::Quiz(input) => {
                let sounds = session.handle_input(input, sdk, store);
                if sound && sounds.contains(&Sound::Incorrect) {
                    // Terminal bell
                    let mut stdout = io::stdout();
                    stdout.write_all(b"\x07")?;
                    stdout.flush()?;
                }
            }
            KeyAction::Ignored => {}
        }
    }
}
