//! Learning-analytics data: model entities and evidence reports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::quiz::Dimension;

/// Kinds of entity the model store can look up by URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Prompt,
    Item,
    Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub uri: String,
    #[serde(default)]
    pub name: String,
}

/// A skill item assessed whenever its prompt is answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub uri: String,
    /// Game the item belongs to (the store's game filter)
    pub game: String,
    pub prompt_uri: String,
}

/// An answer category recorded alongside the attempts for a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub uri: String,
    pub dimension: Dimension,
    pub prompt_uri: String,
}

/// Outcome for a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub item_uri: String,
    pub outcome: bool,
}

/// One evidence submission to the learning SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceReport {
    pub event_name: String,
    pub learner_id: String,
    pub prompt_uri: String,
    pub attempts: Vec<Attempt>,
    /// Category URI -> what the learner picked in that category
    pub prompt_answers: BTreeMap<String, String>,
}

impl EvidenceReport {
    pub fn all_outcomes(&self, outcome: bool) -> bool {
        self.attempts.iter().all(|a| a.outcome == outcome)
    }
}
