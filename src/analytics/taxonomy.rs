//! Analytics model store: which prompt URIs exist and the items and
//! categories attached to them.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Category, Entity, EntityKind, Item};
use crate::quiz::{describe_field, describe_prompt, Dimension, Prompt, ANYTHING_GOES};

/// Game filter under which the quiz's items are registered.
pub const GAME_FILTER: &str = "shape-quiz";

/// Read-only lookups into the learning model.
pub trait ModelStore {
    fn entity_by_uri(&self, kind: EntityKind, uri: &str) -> Option<&Entity>;

    fn items(&self, game_filter: &str, prompt_uri: &str) -> Vec<&Item>;

    fn categories(&self, prompt_uri: &str) -> Vec<&Category>;
}

/// In-memory model store, either built in or loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Taxonomy {
    /// One prompt entity per URI any generated prompt can produce, one item
    /// per described dimension, and one category per described dimension.
    pub fn builtin() -> Self {
        let mut taxonomy = Taxonomy::default();
        let mut seen = BTreeSet::new();

        for prompt in (0..=ANYTHING_GOES).map(Prompt).filter(|p| p.is_valid()) {
            let uri = describe_prompt(prompt);
            if !seen.insert(uri.clone()) {
                continue;
            }

            taxonomy.entities.push(Entity {
                kind: EntityKind::Prompt,
                uri: uri.clone(),
                name: uri.replace('_', " "),
            });

            for dimension in Dimension::ALL {
                if describe_field(prompt, dimension).is_none() {
                    continue;
                }
                taxonomy.items.push(Item {
                    uri: format!("{}#{}", uri, dimension.name()),
                    game: GAME_FILTER.to_string(),
                    prompt_uri: uri.clone(),
                });
                taxonomy.categories.push(Category {
                    uri: format!("category/{}", dimension.name()),
                    dimension,
                    prompt_uri: uri.clone(),
                });
            }
        }

        taxonomy
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }
}

impl ModelStore for Taxonomy {
    fn entity_by_uri(&self, kind: EntityKind, uri: &str) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| e.kind == kind && e.uri == uri)
    }

    fn items(&self, game_filter: &str, prompt_uri: &str) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|i| i.game == game_filter && i.prompt_uri == prompt_uri)
            .collect()
    }

    fn categories(&self, prompt_uri: &str) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.prompt_uri == prompt_uri)
            .collect()
    }
}
