//! Lexical store: the word lists a run builds candidates from
//!
//! Every entry is normalized on the way in (trimmed, lower-cased, ASCII
//! alphanumerics only). Entries that normalize to nothing are dropped and
//! duplicates keep their first position, so iteration order is stable.

mod catalog;

pub use catalog::{Category, CONNECTORS, DEFAULT_ENDINGS, NUMERIC_AFFIXES};

use serde::Serialize;

/// Normalize a single word list entry
pub fn normalize_word(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Split a comma/whitespace separated list, as typed in an env var or on a command line
pub fn parse_word_list(input: &str) -> Vec<String> {
    input
        .split(&[',', ' ', '\n', '\t'][..])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Immutable word lists for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WordSet {
    custom_words: Vec<String>,
    partial_stems: Vec<String>,
    compulsory_words: Vec<String>,
    endings: Vec<String>,
}

impl WordSet {
    pub fn builder() -> WordSetBuilder {
        WordSetBuilder::default()
    }

    pub fn custom_words(&self) -> &[String] {
        &self.custom_words
    }

    pub fn partial_stems(&self) -> &[String] {
        &self.partial_stems
    }

    pub fn compulsory_words(&self) -> &[String] {
        &self.compulsory_words
    }

    pub fn endings(&self) -> &[String] {
        &self.endings
    }

    /// At least one list the combinator can build from is non-empty
    pub fn has_combinable_input(&self) -> bool {
        !self.custom_words.is_empty() || !self.partial_stems.is_empty()
    }

    /// True when there are no compulsory words or `name` contains one of them
    pub fn satisfies_compulsory(&self, name: &str) -> bool {
        self.compulsory_words.is_empty()
            || self
                .compulsory_words
                .iter()
                .any(|word| name.contains(word.as_str()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct WordSetBuilder {
    custom_words: Vec<String>,
    partial_stems: Vec<String>,
    compulsory_words: Vec<String>,
    endings: Vec<String>,
}

impl WordSetBuilder {
    pub fn custom_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.custom_words
            .extend(words.into_iter().map(|w| w.as_ref().to_string()));
        self
    }

    pub fn partial_stems<I, S>(mut self, stems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.partial_stems
            .extend(stems.into_iter().map(|w| w.as_ref().to_string()));
        self
    }

    pub fn compulsory_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.compulsory_words
            .extend(words.into_iter().map(|w| w.as_ref().to_string()));
        self
    }

    pub fn endings<I, S>(mut self, endings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.endings
            .extend(endings.into_iter().map(|w| w.as_ref().to_string()));
        self
    }

    /// Use the built-in startup endings
    pub fn default_endings(self) -> Self {
        self.endings(DEFAULT_ENDINGS.iter().copied())
    }

    /// Add a built-in category's words to the custom words
    pub fn category(self, category: Category) -> Self {
        self.custom_words(category.words().iter().copied())
    }

    pub fn build(self) -> WordSet {
        WordSet {
            custom_words: normalize_list(self.custom_words),
            partial_stems: normalize_list(self.partial_stems),
            compulsory_words: normalize_list(self.compulsory_words),
            endings: normalize_list(self.endings),
        }
    }
}

fn normalize_list(raw: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for entry in raw {
        let word = normalize_word(&entry);
        if !word.is_empty() && !out.contains(&word) {
            out.push(word);
        }
    }
    out
}
