//! A running quiz: the prompt state, its RNG, and the execution of the
//! commands each transition produces.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{apply_input, new_quiz, QuizCommand, QuizInput, QuizPromptState, Sound};
use crate::analytics::{report_graded_prompt, LearningSdk, ModelStore, ReportOutcome};

/// Running totals for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub prompts_graded: u32,
    pub prompts_correct: u32,
    pub prompts_skipped: u32,
    pub trials_started: u32,
    pub reports_sent: u32,
    pub reports_skipped: u32,
    pub reports_failed: u32,
}

impl SessionStats {
    pub fn accuracy(&self) -> f64 {
        if self.prompts_graded == 0 {
            0.0
        } else {
            self.prompts_correct as f64 / self.prompts_graded as f64
        }
    }
}

pub struct QuizSession<R: Rng> {
    pub state: QuizPromptState,
    pub learner_id: String,
    pub stats: SessionStats,
    rng: R,
}

impl<R: Rng> QuizSession<R> {
    pub fn new(learner_id: impl Into<String>, mut rng: R) -> Self {
        let state = new_quiz(&mut rng);
        Self {
            state,
            learner_id: learner_id.into(),
            stats: SessionStats::default(),
            rng,
        }
    }

    /// Apply one learner action, then run the resulting commands against the
    /// collaborators. Returns the sound cues for the front end to play.
    pub fn handle_input(
        &mut self,
        input: QuizInput,
        sdk: &mut dyn LearningSdk,
        store: &dyn ModelStore,
    ) -> Vec<Sound> {
        let was_active = self.state.showing_answers.is_active();
        let (next, commands) = apply_input(&self.state, input, &mut self.rng);
        if input == QuizInput::Skip && was_active {
            self.stats.prompts_skipped += 1;
        }
        self.state = next;
        self.execute(commands, sdk, store)
    }

    fn execute(
        &mut self,
        commands: Vec<QuizCommand>,
        sdk: &mut dyn LearningSdk,
        store: &dyn ModelStore,
    ) -> Vec<Sound> {
        let mut sounds = Vec::new();
        for command in commands {
            match command {
                QuizCommand::PlaySound(sound) => sounds.push(sound),
                QuizCommand::ReportEvidence(graded) => {
                    self.stats.prompts_graded += 1;
                    if graded.grade.is_correct {
                        self.stats.prompts_correct += 1;
                    }
                    match report_graded_prompt(sdk, store, &self.learner_id, &graded) {
                        ReportOutcome::Sent => self.stats.reports_sent += 1,
                        ReportOutcome::Skipped => self.stats.reports_skipped += 1,
                        ReportOutcome::Failed => self.stats.reports_failed += 1,
                    }
                }
                QuizCommand::StartTrial => {
                    self.stats.trials_started += 1;
                    log::info!(
                        "starting trial {} for {}",
                        self.stats.trials_started,
                        self.learner_id
                    );
                    if let Err(e) = sdk.start_trial(&self.learner_id) {
                        log::warn!("start_trial for {} failed: {}", self.learner_id, e);
                    }
                }
            }
        }
        sounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{RecordingSdk, Taxonomy};
    use crate::quiz::{compute_correct_mask, ShowingAnswers, PROMPTS_PER_TRIAL};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn session() -> QuizSession<ChaCha8Rng> {
        QuizSession::new("learner-7", ChaCha8Rng::seed_from_u64(7))
    }

    fn answer_correctly(
        session: &mut QuizSession<ChaCha8Rng>,
        sdk: &mut RecordingSdk,
        store: &Taxonomy,
    ) {
        let mask = compute_correct_mask(session.state.prompt, &session.state.choices);
        for i in 0..6 {
            if mask >> i & 1 == 1 {
                session.handle_input(QuizInput::Toggle(i), &mut *sdk, store);
            }
        }
    }

    #[test]
    fn test_correct_answer_reported() {
        let store = Taxonomy::builtin();
        let mut sdk = RecordingSdk::new();
        let mut session = session();

        answer_correctly(&mut session, &mut sdk, &store);
        let sounds = session.handle_input(QuizInput::Check, &mut sdk, &store);

        assert_eq!(sounds, vec![Sound::Correct]);
        assert_eq!(session.state.showing_answers, ShowingAnswers::Correct);
        assert_eq!(session.stats.prompts_graded, 1);
        assert_eq!(session.stats.prompts_correct, 1);
        assert_eq!(session.stats.reports_sent, 1);
        assert_eq!(sdk.reports.len(), 1);
        assert!(sdk.reports[0].all_outcomes(true));
        assert_eq!(sdk.reports[0].learner_id, "learner-7");
    }

    #[test]
    fn test_toggle_plays_select_sound() {
        let store = Taxonomy::builtin();
        let mut sdk = RecordingSdk::new();
        let mut session = session();

        let sounds = session.handle_input(QuizInput::Toggle(0), &mut sdk, &store);
        assert_eq!(sounds, vec![Sound::Select]);
        assert_eq!(session.state.answer, 1);
        assert!(sdk.reports.is_empty());
    }

    #[test]
    fn test_trial_boundary_after_five_prompts() {
        let store = Taxonomy::builtin();
        let mut sdk = RecordingSdk::new();
        let mut session = session();

        for _ in 0..PROMPTS_PER_TRIAL {
            session.handle_input(QuizInput::Check, &mut sdk, &store);
            assert!(sdk.trials.is_empty());
            session.handle_input(QuizInput::Next, &mut sdk, &store);
        }

        assert_eq!(sdk.trials, vec!["learner-7".to_string()]);
        assert_eq!(session.state.progress, 0);
        assert_eq!(session.stats.trials_started, 1);
        assert_eq!(session.stats.prompts_graded, 5);
        assert_eq!(sdk.reports.len(), 5);
    }

    #[test]
    fn test_skip_counts_and_keeps_progress() {
        let store = Taxonomy::builtin();
        let mut sdk = RecordingSdk::new();
        let mut session = session();

        session.handle_input(QuizInput::Check, &mut sdk, &store);
        session.handle_input(QuizInput::Next, &mut sdk, &store);
        session.handle_input(QuizInput::Skip, &mut sdk, &store);

        assert_eq!(session.stats.prompts_skipped, 1);
        assert_eq!(session.state.progress, 1);

        // Skip while answers are shown is ignored
        session.handle_input(QuizInput::Check, &mut sdk, &store);
        session.handle_input(QuizInput::Skip, &mut sdk, &store);
        assert_eq!(session.stats.prompts_skipped, 1);
    }

    #[test]
    fn test_sdk_failures_do_not_block_the_quiz() {
        let store = Taxonomy::builtin();
        let mut sdk = RecordingSdk {
            fail: true,
            ..Default::default()
        };
        let mut session = session();

        for _ in 0..PROMPTS_PER_TRIAL {
            session.handle_input(QuizInput::Check, &mut sdk, &store);
            session.handle_input(QuizInput::Next, &mut sdk, &store);
        }

        assert_eq!(session.stats.prompts_graded, 5);
        assert_eq!(session.stats.reports_failed, 5);
        assert_eq!(session.stats.trials_started, 1);
        assert_eq!(session.state.progress, 0);
    }

    #[test]
    fn test_missing_model_skips_reporting() {
        let store = Taxonomy::default();
        let mut sdk = RecordingSdk::new();
        let mut session = session();

        session.handle_input(QuizInput::Check, &mut sdk, &store);
        assert_eq!(session.stats.reports_skipped, 1);
        assert!(sdk.reports.is_empty());
        assert_eq!(session.state.progress, 1);
    }

    #[test]
    fn test_accuracy() {
        let mut stats = SessionStats::default();
        assert_eq!(stats.accuracy(), 0.0);
        stats.prompts_graded = 4;
        stats.prompts_correct = 3;
        assert!((stats.accuracy() - 0.75).abs() < f64::EPSILON);
    }
}
