//! Quiz configuration, stored as JSON in `~/.shape-quiz/config.json`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Settings shared by the terminal quiz and the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Learner the evidence is reported for
    pub learner_id: String,

    /// RNG seed for reproducible prompts (None = random)
    pub seed: Option<u64>,

    /// Model store to load instead of the built-in taxonomy
    pub taxonomy_path: Option<PathBuf>,

    /// Append evidence to `evidence.jsonl` in the data directory
    pub evidence_log: bool,

    /// Ring the terminal bell on a wrong answer
    pub sound: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            learner_id: "guest".to_string(),
            seed: None,
            taxonomy_path: None,
            evidence_log: true,
            sound: true,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliAction {
    Run,
    Version,
    Help,
}

impl QuizConfig {
    /// Apply command-line flags on top of this config.
    pub fn apply_args(&mut self, args: &[String]) -> Result<CliAction, String> {
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    let value = flag_value(args, i)?;
                    self.seed = Some(
                        value
                            .parse()
                            .map_err(|_| format!("--seed requires a number, got '{}'", value))?,
                    );
                    i += 1;
                }
                "--learner" => {
                    self.learner_id = flag_value(args, i)?.to_string();
                    i += 1;
                }
                "--taxonomy" => {
                    self.taxonomy_path = Some(PathBuf::from(flag_value(args, i)?));
                    i += 1;
                }
                "--no-log" => self.evidence_log = false,
                "--quiet" => self.sound = false,
                "--version" | "-v" => return Ok(CliAction::Version),
                "--help" | "-h" => return Ok(CliAction::Help),
                other => return Err(format!("Unknown argument: {}", other)),
            }
            i += 1;
        }
        Ok(CliAction::Run)
    }
}

fn flag_value<'a>(args: &'a [String], i: usize) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("{} requires a value", args[i]))
}

/// `~/.shape-quiz`, created on first use.
pub fn data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".shape-quiz");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn config_path() -> io::Result<PathBuf> {
    Ok(data_dir()?.join("config.json"))
}

pub fn evidence_log_path() -> io::Result<PathBuf> {
    Ok(data_dir()?.join("evidence.jsonl"))
}

/// Load the config from disk, writing the defaults on first run. Falls back
/// to the default if the data directory is unavailable.
pub fn load_config() -> QuizConfig {
    match config_path() {
        Ok(path) => load_or_create_config(&path),
        Err(_) => QuizConfig::default(),
    }
}

/// Like `load_config_from`, but saves the defaults when no file exists yet.
pub fn load_or_create_config(path: &Path) -> QuizConfig {
    if path.exists() {
        return load_config_from(path);
    }
    let config = QuizConfig::default();
    if let Err(e) = save_config_to(&config, path) {
        log::warn!("could not write default config {}: {}", path.display(), e);
    }
    config
}

pub fn load_config_from(path: &Path) -> QuizConfig {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => QuizConfig::default(),
    }
}

pub fn save_config_to(config: &QuizConfig, path: &Path) -> io::Result<()> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}
