//! Combinatorial base name builder

use super::candidates::CandidateSet;
use crate::domain::validator::is_valid_base_name;
use crate::error::{DomainForgeError, Result};
use crate::lexicon::{WordSet, CONNECTORS, NUMERIC_AFFIXES};
use crate::types::Candidate;
use serde::{Deserialize, Serialize};

/// Which building-block pairings to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinationRules {
    /// `word + word` over ordered pairs of distinct custom words
    pub word_word: bool,
    /// `word + ending`
    pub word_ending: bool,
    /// `stem + ending`
    pub stem_ending: bool,
    /// `stem + word`
    pub stem_word: bool,
    /// `word + connector + word`, e.g. `dataforcloud`
    pub word_connector_word: bool,
    /// Trailing digit variants of every surviving name
    pub numeric_suffixes: bool,
    /// Leading digit variants of every surviving name
    pub numeric_prefixes: bool,
}

impl Default for CombinationRules {
    fn default() -> Self {
        Self {
            word_word: true,
            word_ending: true,
            stem_ending: true,
            stem_word: true,
            word_connector_word: false,
            numeric_suffixes: false,
            numeric_prefixes: false,
        }
    }
}

impl CombinationRules {
    pub fn with_numbers(mut self, enabled: bool) -> Self {
        self.numeric_suffixes = enabled;
        self
    }

    fn numeric(&self) -> bool {
        self.numeric_suffixes || self.numeric_prefixes
    }
}

/// Builds candidates from a [`WordSet`]
pub struct Combinator<'a> {
    words: &'a WordSet,
    rules: CombinationRules,
}

impl<'a> Combinator<'a> {
    pub fn new(words: &'a WordSet, rules: CombinationRules) -> Self {
        Self { words, rules }
    }

    /// Produce the deduplicated candidate list
    ///
    /// Fails with `EmptyInput` when there are neither custom words nor
    /// partial stems. An empty result is not an error here; the caller
    /// decides once AI output has been merged.
    pub fn generate(&self) -> Result<Vec<Candidate>> {
        if !self.words.has_combinable_input() {
            return Err(DomainForgeError::empty_input(
                "at least one custom word or partial stem is required",
            ));
        }

        let mut set = CandidateSet::new();
        let mut filtered = 0usize;

        for name in self.base_names() {
            if !self.accepts(&name) {
                filtered += 1;
                continue;
            }
            // A base already taken by an earlier numeric variant still owns its own variants
            set.insert(Candidate::combined(name.as_str(), true));
            if self.rules.numeric() {
                for variant in self.numeric_variants(&name) {
                    if is_valid_base_name(&variant) {
                        set.insert(Candidate::combined(variant, true));
                    }
                }
            }
        }

        tracing::debug!(
            candidates = set.len(),
            filtered,
            compulsory = self.words.compulsory_words().len(),
            "Combinator finished"
        );

        Ok(set.into_vec())
    }

    fn accepts(&self, name: &str) -> bool {
        is_valid_base_name(name) && self.words.satisfies_compulsory(name)
    }

    /// Raw concatenations in rule order, before filtering
    fn base_names(&self) -> Vec<String> {
        let words = self.words.custom_words();
        let stems = self.words.partial_stems();
        let endings = self.words.endings();
        let mut names = Vec::new();

        if self.rules.word_word {
            for (i, first) in words.iter().enumerate() {
                for (j, second) in words.iter().enumerate() {
                    if i != j {
                        names.push(format!("{}{}", first, second));
                    }
                }
            }
        }

        if self.rules.word_ending {
            names.extend(cross(words, endings));
        }

        if self.rules.stem_ending {
            names.extend(cross(stems, endings));
        }

        if self.rules.stem_word {
            names.extend(cross(stems, words));
        }

        if self.rules.word_connector_word {
            for (i, first) in words.iter().enumerate() {
                for connector in CONNECTORS {
                    for (j, second) in words.iter().enumerate() {
                        if i != j {
                            names.push(format!("{}{}{}", first, connector, second));
                        }
                    }
                }
            }
        }

        names
    }

    fn numeric_variants(&self, name: &str) -> Vec<String> {
        let mut variants = Vec::new();
        if self.rules.numeric_suffixes {
            variants.extend(NUMERIC_AFFIXES.iter().map(|n| format!("{}{}", name, n)));
        }
        if self.rules.numeric_prefixes {
            variants.extend(NUMERIC_AFFIXES.iter().map(|n| format!("{}{}", n, name)));
        }
        variants
    }
}

fn cross<'b>(left: &'b [String], right: &'b [String]) -> impl Iterator<Item = String> + 'b {
    left.iter()
        .flat_map(move |l| right.iter().map(move |r| format!("{}{}", l, r)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Category;
    use crate::types::CandidateSource;
    use std::collections::HashSet;

    fn names(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.base_name.as_str()).collect()
    }

    #[test]
    fn test_single_word_single_ending() {
        let words = WordSet::builder().custom_words(["zen"]).endings(["ly"]).build();
        let out = Combinator::new(&words, CombinationRules::default()).generate().unwrap();
        assert_eq!(names(&out), vec!["zenly"]);
        assert_eq!(out[0].source, CandidateSource::Combined);
        assert!(out[0].compulsory_satisfied);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let words = WordSet::builder().endings(["ly"]).compulsory_words(["zen"]).build();
        let err = Combinator::new(&words, CombinationRules::default())
            .generate()
            .unwrap_err();
        assert!(matches!(err, DomainForgeError::EmptyInput { .. }));
    }

    #[test]
    fn test_rule_order_and_pairs() {
        let words = WordSet::builder()
            .custom_words(["zen", "flow"])
            .partial_stems(["meta"])
            .endings(["ly"])
            .build();
        let out = Combinator::new(&words, CombinationRules::default()).generate().unwrap();
        assert_eq!(
            names(&out),
            vec!["zenflow", "flowzen", "zenly", "flowly", "metaly", "metazen", "metaflow"]
        );
    }

    #[test]
    fn test_disabled_rules_emit_nothing() {
        let words = WordSet::builder().custom_words(["zen", "flow"]).endings(["ly"]).build();
        let rules = CombinationRules {
            word_word: false,
            ..CombinationRules::default()
        };
        let out = Combinator::new(&words, rules).generate().unwrap();
        assert_eq!(names(&out), vec!["zenly", "flowly"]);
    }

    #[test]
    fn test_connector_rule() {
        let words = WordSet::builder().custom_words(["data", "cloud"]).build();
        let rules = CombinationRules {
            word_word: false,
            word_connector_word: true,
            ..CombinationRules::default()
        };
        let out = Combinator::new(&words, rules).generate().unwrap();
        assert!(names(&out).contains(&"dataforcloud"));
        assert!(names(&out).contains(&"cloudanddata"));
        assert_eq!(out.len(), 2 * CONNECTORS.len());
    }

    #[test]
    fn test_compulsory_filter() {
        let words = WordSet::builder()
            .custom_words(["zen", "flow", "calm"])
            .endings(["ly", "hub"])
            .compulsory_words(["zen"])
            .build();
        let out = Combinator::new(&words, CombinationRules::default()).generate().unwrap();
        assert!(!out.is_empty());
        assert!(out.iter().all(|c| c.base_name.contains("zen")));
        assert!(out.iter().all(|c| c.compulsory_satisfied));
    }

    #[test]
    fn test_numeric_variants_of_colliding_base() {
        let words = WordSet::builder().custom_words(["zen"]).endings(["ly", "ly7"]).build();
        let rules = CombinationRules::default().with_numbers(true);
        let out = Combinator::new(&words, rules).generate().unwrap();
        let names = names(&out);

        assert_eq!(names.iter().filter(|n| **n == "zenly7").count(), 1);
        assert!(names.contains(&"zenly724"));
        assert!(names.contains(&"zenly799"));
        assert_eq!(out.len(), 1 + 2 * NUMERIC_AFFIXES.len());
    }

    #[test]
    fn test_numeric_variants_follow_their_base() {
        let words = WordSet::builder().custom_words(["zen"]).endings(["ly"]).build();
        let rules = CombinationRules::default().with_numbers(true);
        let out = Combinator::new(&words, rules).generate().unwrap();
        assert_eq!(out[0].base_name, "zenly");
        assert_eq!(out.len(), 1 + NUMERIC_AFFIXES.len());
        assert_eq!(out[1].base_name, format!("zenly{}", NUMERIC_AFFIXES[0]));

        let rules = CombinationRules {
            numeric_prefixes: true,
            ..CombinationRules::default()
        };
        let out = Combinator::new(&words, rules).generate().unwrap();
        assert!(names(&out).contains(&"24zenly"));
    }

    #[test]
    fn test_invalid_names_are_dropped() {
        // "a" + "b" is too short to be a domain label
        let words = WordSet::builder().custom_words(["a", "b"]).build();
        let out = Combinator::new(&words, CombinationRules::default()).generate().unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_uniqueness_and_determinism() {
        let words = WordSet::builder()
            .category(Category::Tech)
            .category(Category::Data)
            .partial_stems(["meta", "neo"])
            .default_endings()
            .build();
        let rules = CombinationRules::default().with_numbers(true);

        let first = Combinator::new(&words, rules).generate().unwrap();
        let second = Combinator::new(&words, rules).generate().unwrap();
        assert_eq!(first, second);

        let mut seen = HashSet::new();
        for candidate in &first {
            assert!(seen.insert(candidate.normalized_key()), "duplicate {}", candidate.base_name);
            assert!(is_valid_base_name(&candidate.base_name));
        }
    }
}
