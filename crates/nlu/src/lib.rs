// crates/nlu/src/lib.rs

use std::collections::HashMap;
use std::sync::Arc;

use prigorod_core::{Entity, TokenSpan, NUMBER_ENTITY};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub mod duration;
pub mod morph;

use morph::Morphology;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    #[serde(default = "default_stopwords")]
    pub stopwords: Vec<String>,
    #[serde(default = "default_abbreviations")]
    pub abbreviations: HashMap<String, String>,
}

fn default_stopwords() -> Vec<String> {
    ["от", "с", "из", "до", "на", "к", "в"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_abbreviations() -> HashMap<String, String> {
    HashMap::from([("километр".to_string(), "км".to_string())])
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            stopwords: default_stopwords(),
            abbreviations: default_abbreviations(),
        }
    }
}

/// Turns a slot's token span into a canonical nominative phrase ready for
/// station-directory lookup.
pub struct Normalizer {
    config: NormalizerConfig,
    morph: Arc<dyn Morphology>,
}

impl Normalizer {
    pub fn new(morph: Arc<dyn Morphology>) -> Self {
        Self::with_config(NormalizerConfig::default(), morph)
    }

    pub fn with_config(config: NormalizerConfig, morph: Arc<dyn Morphology>) -> Self {
        Self { config, morph }
    }

    /// Entity substitution pass over the whole utterance, applied once
    /// before any slot is sliced out. Each NUMBER entity collapses into a
    /// digit string at its span start; the rest of its span is blanked so
    /// token indices stay stable.
    pub fn substitute_numbers(&self, tokens: &[String], entities: &[Entity]) -> Vec<String> {
        let mut tokens = tokens.to_vec();

        for entity in entities {
            if entity.kind != NUMBER_ENTITY {
                continue;
            }
            let Some(rendered) = render_number(&entity.value) else {
                continue;
            };
            let TokenSpan { start, end } = entity.tokens;
            if start >= tokens.len() {
                continue;
            }
            tokens[start] = rendered;
            // The span may be degenerate or run past the array; never index
            // beyond either bound.
            for i in start + 1..end.min(tokens.len()) {
                tokens[i].clear();
            }
        }

        tokens
    }

    /// Normalizes one slot's span of the (already substituted) token list:
    /// drops blanks and prepositions, inflects each survivor to nominative,
    /// applies domain abbreviations and joins with single spaces.
    pub fn normalize_span(&self, tokens: &[String], span: TokenSpan) -> String {
        // Clamp start against the clamped end so an inverted span collapses
        // to an empty slice instead of slicing out of order.
        let end = span.end.min(tokens.len());
        let start = span.start.min(end);

        let phrase = tokens[start..end]
            .iter()
            .filter(|token| !token.is_empty() && !self.is_stopword(token))
            .map(|token| self.normalize_token(token))
            .collect::<Vec<_>>()
            .join(" ");

        debug!(%phrase, "normalized slot span");
        phrase
    }

    fn is_stopword(&self, token: &str) -> bool {
        self.config.stopwords.iter().any(|s| s == token)
    }

    fn normalize_token(&self, token: &str) -> String {
        let base = self
            .morph
            .nominative(token)
            .unwrap_or_else(|| token.to_string());

        match self.config.abbreviations.get(&base) {
            Some(short) => short.clone(),
            None => base,
        }
    }
}

fn render_number(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(i.to_string()),
            None => Some(n.to_string()),
        },
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph::DictionaryMorph;
    use serde_json::json;

    fn entity(start: usize, end: usize, value: Value) -> Entity {
        Entity {
            kind: NUMBER_ENTITY.to_string(),
            value,
            tokens: TokenSpan { start, end },
        }
    }

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn normalizer(table: &[(&str, &str)]) -> Normalizer {
        Normalizer::new(Arc::new(DictionaryMorph::from_table(table.to_vec())))
    }

    #[test]
    fn multiword_numeral_collapses_with_abbreviation() {
        let n = normalizer(&[("километров", "километр")]);
        let raw = tokens(&["двадцать", "пять", "километров"]);
        let substituted = n.substitute_numbers(&raw, &[entity(0, 2, json!(25))]);

        let phrase = n.normalize_span(&substituted, TokenSpan { start: 0, end: 3 });
        assert_eq!(phrase, "25 км");
    }

    #[test]
    fn numeral_span_past_the_end_is_clamped() {
        let n = normalizer(&[]);
        let raw = tokens(&["сорок", "два"]);
        let substituted = n.substitute_numbers(&raw, &[entity(0, 5, json!(42))]);
        assert_eq!(substituted, tokens(&["42", ""]));

        // Span start beyond the array is ignored outright.
        let untouched = n.substitute_numbers(&raw, &[entity(7, 9, json!(1))]);
        assert_eq!(untouched, raw);
    }

    #[test]
    fn stopwords_and_blanks_are_dropped() {
        let n = normalizer(&[("тверской", "тверская")]);
        let raw = tokens(&["с", "тверской", "до", "выхино"]);
        let phrase = n.normalize_span(&raw, TokenSpan { start: 0, end: 2 });
        assert_eq!(phrase, "тверская");
    }

    #[test]
    fn idempotent_on_already_normal_input() {
        let n = normalizer(&[]);
        let raw = tokens(&["тверская"]);
        let once = n.normalize_span(&raw, TokenSpan { start: 0, end: 1 });
        let again = n.normalize_span(&[once.clone()], TokenSpan { start: 0, end: 1 });
        assert_eq!(once, again);
    }

    #[test]
    fn empty_span_yields_empty_phrase() {
        let n = normalizer(&[]);
        let phrase = n.normalize_span(&[], TokenSpan { start: 0, end: 0 });
        assert_eq!(phrase, "");
    }

    #[test]
    fn inverted_span_yields_empty_phrase() {
        let n = normalizer(&[]);
        let raw = tokens(&["а", "б", "в", "г"]);
        let phrase = n.normalize_span(&raw, TokenSpan { start: 3, end: 1 });
        assert_eq!(phrase, "");
    }

    #[test]
    fn unknown_word_form_is_kept_verbatim() {
        let n = normalizer(&[]);
        let raw = tokens(&["каланчёвская"]);
        let phrase = n.normalize_span(&raw, TokenSpan { start: 0, end: 1 });
        assert_eq!(phrase, "каланчёвская");
    }
}
