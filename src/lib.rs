//! Shape Quiz - shape/color/size quiz with learner evidence reporting
//!
//! This module exposes the quiz logic, the analytics seams and configuration
//! for the terminal front end, the simulator and tests.

pub mod analytics;
pub mod build_info;
pub mod config;
pub mod quiz;

pub use analytics::{JsonlEvidenceLog, LearningSdk, ModelStore, NullSdk, Taxonomy};
pub use config::QuizConfig;
pub use quiz::{QuizInput, QuizPromptState, QuizSession};
