//! Shape quiz logic.
//!
//! Prompt and choice generation, answer grading, analytics URI derivation,
//! and the UI-agnostic state transitions driven by learner input.

use super::{
    Choice, Dimension, Grade, GradedPrompt, Prompt, QuizPromptState, ShowingAnswers,
    ANYTHING_GOES, NUM_CHOICES, PROMPTS_PER_TRIAL,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// At most this many fully matching figures per choice set.
pub const FULL_MATCH_QUOTA: usize = 2;

/// At most this many figures matching on no dimension per choice set.
pub const NO_MATCH_QUOTA: usize = 2;

/// Input actions for the quiz (UI-agnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizInput {
    /// Select or deselect the choice at this index
    Toggle(usize),
    Check,
    Next,
    Skip,
    Other,
}

/// Audio cue requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Select,
    Correct,
    Incorrect,
}

/// Side effects produced by a transition, executed after the new state is in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizCommand {
    PlaySound(Sound),
    ReportEvidence(GradedPrompt),
    StartTrial,
}

/// Draw a prompt. Each field is in 1..=7; the all-eligible prompt is redrawn.
pub fn generate_prompt<R: Rng>(rng: &mut R) -> Prompt {
    loop {
        let prompt = Prompt::from_fields(
            rng.gen_range(1..=7),
            rng.gen_range(1..=7),
            rng.gen_range(1..=7),
        );
        if prompt.bits() != ANYTHING_GOES {
            return prompt;
        }
    }
}

/// Number of dimensions (0..=3) on which `choice` is eligible under `prompt`.
pub fn match_score(prompt: Prompt, choice: Choice) -> u8 {
    Dimension::ALL
        .iter()
        .filter(|&&d| prompt.is_eligible(d, choice.variant(d)))
        .count() as u8
}

/// Pick six figures: up to two full matches, up to two non-matches, the rest
/// partial matches, in random order.
pub fn generate_choice_set<R: Rng>(prompt: Prompt, rng: &mut R) -> [Choice; NUM_CHOICES] {
    let mut full = Vec::new();
    let mut none = Vec::new();
    let mut partial = Vec::new();
    for choice in Choice::all() {
        match match_score(prompt, choice) {
            3 => full.push(choice),
            0 => none.push(choice),
            _ => partial.push(choice),
        }
    }

    full.shuffle(rng);
    none.shuffle(rng);
    partial.shuffle(rng);

    let mut full = full.into_iter();
    let mut none = none.into_iter();

    let mut picked: Vec<Choice> = Vec::with_capacity(NUM_CHOICES);
    picked.extend(full.by_ref().take(FULL_MATCH_QUOTA));
    picked.extend(none.by_ref().take(NO_MATCH_QUOTA));
    let remaining = NUM_CHOICES - picked.len();
    picked.extend(partial.into_iter().take(remaining));

    // Generated prompts always leave at least nine partial matches, so this
    // only adds anything for prompts the generator never produces (511, or an
    // empty field).
    let shortfall = NUM_CHOICES - picked.len();
    picked.extend(full.chain(none).take(shortfall));

    picked.shuffle(rng);

    let mut choices = [Choice(0); NUM_CHOICES];
    choices.copy_from_slice(&picked);
    choices
}

/// Bit i set iff `choices[i]` matches the prompt on every dimension.
pub fn compute_correct_mask(prompt: Prompt, choices: &[Choice]) -> u8 {
    choices
        .iter()
        .take(8)
        .enumerate()
        .filter(|&(_, c)| match_score(prompt, *c) == 3)
        .fold(0u8, |mask, (i, _)| mask | 1 << i)
}

/// Compare a submitted selection mask against the correct one.
pub fn grade(prompt: Prompt, choices: &[Choice], submitted: u8) -> Grade {
    let correct_mask = compute_correct_mask(prompt, choices);
    let error_mask = correct_mask ^ submitted;
    Grade {
        correct_mask,
        error_mask,
        is_correct: error_mask == 0,
    }
}

/// Describe one dimension of a prompt: the single eligible variant, `not_`
/// the single ineligible one, or nothing.
pub fn describe_field(prompt: Prompt, dimension: Dimension) -> Option<String> {
    let field = prompt.field(dimension);
    if field.count_ones() == 1 {
        return Some(dimension.variant_name(field.trailing_zeros() as usize).to_string());
    }
    let missing = !field & 0b111;
    if missing.count_ones() == 1 {
        return Some(format!(
            "not_{}",
            dimension.variant_name(missing.trailing_zeros() as usize)
        ));
    }
    None
}

/// Analytics URI for a prompt, e.g. `red_circle`, `not_blue_large`, or
/// `small_square` when shape and size are set but color is open.
pub fn describe_prompt(prompt: Prompt) -> String {
    let shape = describe_field(prompt, Dimension::Shape);
    let color = describe_field(prompt, Dimension::Color);
    let size = describe_field(prompt, Dimension::Size);

    match (shape, color, size) {
        (Some(shape), None, Some(size)) => format!("{}_{}", size, shape),
        (shape, color, size) => [color, shape, size]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("_"),
    }
}

/// A fresh prompt at the start of a session.
pub fn new_quiz<R: Rng>(rng: &mut R) -> QuizPromptState {
    fresh_prompt(0, rng)
}

fn fresh_prompt<R: Rng>(progress: u8, rng: &mut R) -> QuizPromptState {
    let prompt = generate_prompt(rng);
    let choices = generate_choice_set(prompt, rng);
    QuizPromptState::new(prompt, choices, progress)
}

/// Replace the prompt. Wraps progress and opens a new trial once the current
/// one is complete.
pub fn next_prompt<R: Rng>(
    state: &QuizPromptState,
    rng: &mut R,
) -> (QuizPromptState, Vec<QuizCommand>) {
    let mut commands = Vec::new();
    let progress = if state.trial_complete() {
        commands.push(QuizCommand::StartTrial);
        0
    } else {
        state.progress
    };
    (fresh_prompt(progress, rng), commands)
}

/// Grade the current selection and reveal the result.
pub fn check_answer(state: &QuizPromptState) -> (QuizPromptState, Vec<QuizCommand>) {
    let grade = grade(state.prompt, &state.choices, state.answer);

    let mut next = state.clone();
    next.showing_answers = if grade.is_correct {
        ShowingAnswers::Correct
    } else {
        ShowingAnswers::Incorrect
    };
    next.progress = state.progress.saturating_add(1).min(PROMPTS_PER_TRIAL);

    let sound = if grade.is_correct {
        Sound::Correct
    } else {
        Sound::Incorrect
    };
    let commands = vec![
        QuizCommand::PlaySound(sound),
        QuizCommand::ReportEvidence(GradedPrompt {
            prompt: state.prompt,
            choices: state.choices,
            answer: state.answer,
            grade,
        }),
    ];
    (next, commands)
}

/// Flip the selection of one choice while the prompt is active.
pub fn toggle_choice(state: &QuizPromptState, index: usize) -> (QuizPromptState, Vec<QuizCommand>) {
    if !state.showing_answers.is_active() || index >= NUM_CHOICES {
        return (state.clone(), Vec::new());
    }
    let mut next = state.clone();
    next.answer ^= 1 << index;
    (next, vec![QuizCommand::PlaySound(Sound::Select)])
}

/// Process one learner action. Inputs that do not apply in the current
/// phase leave the state unchanged and produce no commands.
pub fn apply_input<R: Rng>(
    state: &QuizPromptState,
    input: QuizInput,
    rng: &mut R,
) -> (QuizPromptState, Vec<QuizCommand>) {
    let active = state.showing_answers.is_active();
    match input {
        QuizInput::Toggle(index) => toggle_choice(state, index),
        QuizInput::Check if active => check_answer(state),
        QuizInput::Skip if active => next_prompt(state, rng),
        QuizInput::Next if !active => next_prompt(state, rng),
        _ => (state.clone(), Vec::new()),
    }
}
