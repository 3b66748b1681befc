//! Shape quiz data structures.
//!
//! A prompt marks which shapes, colors and sizes are eligible; the learner
//! picks the figures among six candidates that match on every dimension.

use serde::{Deserialize, Serialize};

/// Number of candidate figures shown for each prompt.
pub const NUM_CHOICES: usize = 6;

/// Every (shape, color, size) combination, encoded in base 3.
pub const NUM_COMBINATIONS: u8 = 27;

/// Graded prompts per analytics trial.
pub const PROMPTS_PER_TRIAL: u8 = 5;

/// Bits of one dimension field inside a prompt.
pub const FIELD_MASK: u16 = 0b111;

/// Prompt value with every variant eligible on every dimension.
pub const ANYTHING_GOES: u16 = 0b111_111_111;

/// The three axes a figure varies along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Shape,
    Color,
    Size,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Shape, Dimension::Color, Dimension::Size];

    pub fn index(&self) -> usize {
        match self {
            Self::Shape => 0,
            Self::Color => 1,
            Self::Size => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Shape => "shape",
            Self::Color => "color",
            Self::Size => "size",
        }
    }

    pub fn variants(&self) -> [&'static str; 3] {
        match self {
            Self::Shape => ["circle", "square", "triangle"],
            Self::Color => ["green", "red", "blue"],
            Self::Size => ["small", "medium", "large"],
        }
    }

    /// Name of variant `index` (0..3) of this dimension.
    pub fn variant_name(&self, index: usize) -> &'static str {
        self.variants()[index % 3]
    }
}

/// Packed eligibility mask: bits 0-2 shape, 3-5 color, 6-8 size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Prompt(pub u16);

impl Prompt {
    /// Pack three 3-bit fields, shape first.
    pub fn from_fields(shape: u8, color: u8, size: u8) -> Self {
        let bits = (shape as u16 & FIELD_MASK)
            | (color as u16 & FIELD_MASK) << 3
            | (size as u16 & FIELD_MASK) << 6;
        Self(bits)
    }

    pub fn bits(&self) -> u16 {
        self.0
    }

    pub fn field(&self, dimension: Dimension) -> u8 {
        (self.0 >> (3 * dimension.index()) & FIELD_MASK) as u8
    }

    pub fn is_eligible(&self, dimension: Dimension, variant: usize) -> bool {
        self.field(dimension) >> variant & 1 == 1
    }

    /// A prompt the generator could have produced.
    pub fn is_valid(&self) -> bool {
        self.0 != ANYTHING_GOES
            && self.0 <= ANYTHING_GOES
            && Dimension::ALL.iter().all(|&d| self.field(d) != 0)
    }
}

/// One of the 27 figures: `shape + 3 * color + 9 * size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Choice(pub u8);

impl Choice {
    pub fn from_variants(shape: usize, color: usize, size: usize) -> Self {
        Self((shape % 3 + 3 * (color % 3) + 9 * (size % 3)) as u8)
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Choice> {
        (0..NUM_COMBINATIONS).map(Choice)
    }

    pub fn variant(&self, dimension: Dimension) -> usize {
        let divisor = 3usize.pow(dimension.index() as u32);
        self.0 as usize / divisor % 3
    }

    pub fn shape(&self) -> usize {
        self.variant(Dimension::Shape)
    }

    pub fn color(&self) -> usize {
        self.variant(Dimension::Color)
    }

    pub fn size(&self) -> usize {
        self.variant(Dimension::Size)
    }

    /// e.g. `"small red square"`
    pub fn label(&self) -> String {
        format!(
            "{} {} {}",
            Dimension::Size.variant_name(self.size()),
            Dimension::Color.variant_name(self.color()),
            Dimension::Shape.variant_name(self.shape()),
        )
    }
}

/// Whether the prompt is still being answered or its result is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShowingAnswers {
    #[default]
    PromptActive,
    Incorrect,
    Correct,
}

impl ShowingAnswers {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::PromptActive => 0,
            Self::Incorrect => 1,
            Self::Correct => 2,
        }
    }

    pub fn is_active(&self) -> bool {
        *self == Self::PromptActive
    }
}

/// Outcome of checking a submitted answer mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    /// Bit i set when choice i matches the prompt on all three dimensions
    pub correct_mask: u8,
    /// Bits where the submission disagrees with `correct_mask`
    pub error_mask: u8,
    pub is_correct: bool,
}

/// State of the quiz screen for the prompt currently shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizPromptState {
    pub prompt: Prompt,
    pub choices: [Choice; NUM_CHOICES],
    /// Bit i set while choice i is selected
    pub answer: u8,
    /// Prompts graded in the current trial (0..=5)
    pub progress: u8,
    pub showing_answers: ShowingAnswers,
}

impl QuizPromptState {
    pub fn new(prompt: Prompt, choices: [Choice; NUM_CHOICES], progress: u8) -> Self {
        Self {
            prompt,
            choices,
            answer: 0,
            progress,
            showing_answers: ShowingAnswers::PromptActive,
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        index < NUM_CHOICES && self.answer >> index & 1 == 1
    }

    pub fn selected_choices(&self) -> impl Iterator<Item = Choice> + '_ {
        self.choices
            .iter()
            .enumerate()
            .filter(|(i, _)| self.is_selected(*i))
            .map(|(_, c)| *c)
    }

    pub fn trial_complete(&self) -> bool {
        self.progress >= PROMPTS_PER_TRIAL
    }
}

/// A graded prompt, handed to the analytics layer after `Check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedPrompt {
    pub prompt: Prompt,
    pub choices: [Choice; NUM_CHOICES],
    pub answer: u8,
    pub grade: Grade,
}

impl GradedPrompt {
    pub fn selected_choices(&self) -> impl Iterator<Item = Choice> + '_ {
        self.choices
            .iter()
            .enumerate()
            .filter(|(i, _)| self.answer >> *i & 1 == 1)
            .map(|(_, c)| *c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_from_fields_packs_shape_low() {
        let prompt = Prompt::from_fields(0b011, 0b100, 0b101);
        assert_eq!(prompt.bits(), 0b101_100_011);
        assert_eq!(prompt.bits(), 355);
        assert_eq!(prompt.field(Dimension::Shape), 0b011);
        assert_eq!(prompt.field(Dimension::Color), 0b100);
        assert_eq!(prompt.field(Dimension::Size), 0b101);
    }

    #[test]
    fn test_prompt_validity() {
        assert!(Prompt::from_fields(1, 2, 4).is_valid());
        assert!(Prompt::from_fields(7, 7, 6).is_valid());
        assert!(!Prompt(ANYTHING_GOES).is_valid());
        assert!(!Prompt::from_fields(0, 2, 4).is_valid());
        assert!(!Prompt(512).is_valid());
    }

    #[test]
    fn test_choice_decoding() {
        let choice = Choice(0);
        assert_eq!((choice.shape(), choice.color(), choice.size()), (0, 0, 0));

        let choice = Choice(26);
        assert_eq!((choice.shape(), choice.color(), choice.size()), (2, 2, 2));

        // 1 + 3*2 + 9*1
        let choice = Choice(16);
        assert_eq!((choice.shape(), choice.color(), choice.size()), (1, 2, 1));
    }

    #[test]
    fn test_choice_from_variants_inverts_decoding() {
        for choice in Choice::all() {
            let rebuilt = Choice::from_variants(choice.shape(), choice.color(), choice.size());
            assert_eq!(rebuilt, choice);
        }
        assert_eq!(Choice::all().count(), 27);
    }

    #[test]
    fn test_choice_label() {
        assert_eq!(Choice(0).label(), "small green circle");
        assert_eq!(Choice(16).label(), "medium blue square");
        assert_eq!(Choice(26).label(), "large blue triangle");
    }

    #[test]
    fn test_dimension_names() {
        assert_eq!(Dimension::Shape.name(), "shape");
        assert_eq!(Dimension::Color.variant_name(1), "red");
        assert_eq!(Dimension::Size.variant_name(2), "large");
        assert_eq!(Dimension::ALL.len(), 3);
    }

    #[test]
    fn test_showing_answers_codes() {
        assert_eq!(ShowingAnswers::PromptActive.as_u8(), 0);
        assert_eq!(ShowingAnswers::Incorrect.as_u8(), 1);
        assert_eq!(ShowingAnswers::Correct.as_u8(), 2);
        assert!(ShowingAnswers::default().is_active());
    }

    #[test]
    fn test_trial_complete_at_five() {
        let choices = [Choice(0), Choice(1), Choice(2), Choice(3), Choice(4), Choice(5)];
        let prompt = Prompt::from_fields(1, 1, 1);
        assert!(!QuizPromptState::new(prompt, choices, 4).trial_complete());
        assert!(QuizPromptState::new(prompt, choices, PROMPTS_PER_TRIAL).trial_complete());
    }

    #[test]
    fn test_state_selection() {
        let choices = [Choice(0), Choice(1), Choice(2), Choice(3), Choice(4), Choice(5)];
        let mut state = QuizPromptState::new(Prompt::from_fields(1, 1, 1), choices, 0);
        assert_eq!(state.selected_choices().count(), 0);

        state.answer = 0b100_101;
        assert!(state.is_selected(0));
        assert!(!state.is_selected(1));
        assert!(state.is_selected(5));
        assert!(!state.is_selected(6));
        let selected: Vec<Choice> = state.selected_choices().collect();
        assert_eq!(selected, vec![Choice(0), Choice(2), Choice(5)]);
    }
}
