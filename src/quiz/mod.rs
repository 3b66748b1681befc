//! Shape quiz: prompts over shape, color and size, six candidate figures per
//! prompt, grading, and the session that reports learner evidence.

pub mod logic;
pub mod session;
pub mod types;

pub use logic::*;
pub use session::{QuizSession, SessionStats};
pub use types::*;
