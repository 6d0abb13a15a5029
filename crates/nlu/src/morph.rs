// crates/nlu/src/morph.rs
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use prigorod_core::{PrigorodError, PrigorodResult};
use tracing::info;

/// Three agreement forms of a Russian unit word, e.g.
/// "минуту" / "минуты" / "минут".
#[derive(Debug, Clone, Copy)]
pub struct PluralForms<'a> {
    pub one: &'a str,
    pub few: &'a str,
    pub many: &'a str,
}

/// Linguistic backend the normalizer and the duration formatter depend on.
/// Swappable so tests and alternate analyzers can be plugged in.
pub trait Morphology: Send + Sync {
    /// Nominative singular base form of a word, if the backend knows one.
    fn nominative(&self, word: &str) -> Option<String>;

    /// Picks the unit-word form agreeing with `count` by the standard
    /// Russian rule: 11–14 take the many-form, then last digit 1 takes the
    /// one-form, last digit 2–4 the few-form, everything else the many-form.
    fn agree<'a>(&self, count: i64, forms: PluralForms<'a>) -> &'a str {
        let n = count.abs();
        match (n % 100, n % 10) {
            (11..=14, _) => forms.many,
            (_, 1) => forms.one,
            (_, 2..=4) => forms.few,
            _ => forms.many,
        }
    }
}

/// Table-driven backend: a flat form→lemma dictionary loaded from JSON.
#[derive(Debug, Default)]
pub struct DictionaryMorph {
    lemmas: HashMap<String, String>,
}

impl DictionaryMorph {
    pub fn from_file(path: &Path) -> PrigorodResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PrigorodError::Config(format!("failed to read morph dictionary {path:?}: {e}"))
        })?;
        let lemmas: HashMap<String, String> = serde_json::from_str(&content).map_err(|e| {
            PrigorodError::Config(format!("failed to parse morph dictionary {path:?}: {e}"))
        })?;

        info!(forms = lemmas.len(), "loaded morph dictionary");
        Ok(Self { lemmas })
    }

    pub fn from_table<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            lemmas: entries
                .into_iter()
                .map(|(form, lemma)| (form.into(), lemma.into()))
                .collect(),
        }
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

impl Morphology for DictionaryMorph {
    fn nominative(&self, word: &str) -> Option<String> {
        let lowered = word.to_lowercase();
        self.lemmas.get(&lowered).cloned()
    }
}
