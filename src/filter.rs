use std::collections::BTreeMap;

use crate::analyzer::trim_punctuation;
use crate::stopwords::StopwordSet;

/// Output shape requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// All surviving tokens on one line.
    #[default]
    Line,
    /// One surviving token per line.
    List,
    /// Occurrence count per surviving token.
    Count,
}

/// Occurrences of each surviving token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTally {
    counts: BTreeMap<String, usize>,
}

impl FrequencyTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, token: String) {
        *self.counts.entry(token).or_insert(0) += 1;
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.counts.get(token).copied()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Entries ordered by ascending count, ties broken by word.
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(word, count)| (word.as_str(), *count))
            .collect();
        // keys come out of the BTreeMap in word order, the stable sort keeps it on ties
        entries.sort_by_key(|(_, count)| *count);
        entries
    }
}

impl FromIterator<String> for FrequencyTally {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut tally = FrequencyTally::new();
        for token in iter {
            tally.add(token);
        }
        tally
    }
}

/// Tokens left after stopword removal: in order, or tallied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilteredResult {
    Tokens(Vec<String>),
    Tally(FrequencyTally),
}

impl FilteredResult {
    pub fn is_empty(&self) -> bool {
        match self {
            FilteredResult::Tokens(tokens) => tokens.is_empty(),
            FilteredResult::Tally(tally) => tally.is_empty(),
        }
    }
}

/// Whether `token` is a stopword. A token that still carries punctuation at its
/// edges is also looked up with that punctuation trimmed.
pub fn is_stopword(token: &str, stopwords: &StopwordSet) -> bool {
    if stopwords.contains(token) {
        return true;
    }
    let trimmed = trim_punctuation(token);
    !trimmed.is_empty() && trimmed.len() != token.len() && stopwords.contains(trimmed)
}

/// Removes stopwords from `tokens`. Survivors keep their order, or are tallied
/// when `mode` is [`OutputMode::Count`].
pub fn filter(tokens: Vec<String>, stopwords: &StopwordSet, mode: OutputMode) -> FilteredResult {
    let survivors = tokens
        .into_iter()
        .filter(|token| !is_stopword(token, stopwords));
    match mode {
        OutputMode::Count => FilteredResult::Tally(survivors.collect()),
        OutputMode::Line | OutputMode::List => FilteredResult::Tokens(survivors.collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> StopwordSet {
        StopwordSet::from_words("english", ["the", "over", "and", "how", "are", "you", "don't"])
    }

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_filter_preserves_order_and_duplicates() {
        let tokens = toks(&["the", "fox", "and", "the", "fox", "dog"]);
        let result = filter(tokens, &english(), OutputMode::List);
        assert_eq!(result, FilteredResult::Tokens(toks(&["fox", "fox", "dog"])));
    }

    #[test]
    fn test_filter_count_mode() {
        let tokens = toks(&["the", "fox", "and", "the", "fox", "dog"]);
        let FilteredResult::Tally(tally) = filter(tokens, &english(), OutputMode::Count) else {
            panic!("expected a tally");
        };
        assert_eq!(tally.get("fox"), Some(2));
        assert_eq!(tally.get("dog"), Some(1));
        assert_eq!(tally.get("the"), None);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_sorted_ascending_count_then_word() {
        let tally: FrequencyTally = toks(&["zeta", "fox", "alpha", "fox", "beta", "beta", "beta"])
            .into_iter()
            .collect();
        assert_eq!(
            tally.sorted(),
            vec![("alpha", 1), ("zeta", 1), ("fox", 2), ("beta", 3)]
        );
    }

    #[test]
    fn test_is_stopword_trims_edge_punctuation() {
        let set = english();
        assert!(is_stopword("you?", &set));
        assert!(is_stopword("\"the", &set));
        assert!(is_stopword("don't", &set));
        assert!(!is_stopword("world!", &set));
        assert!(!is_stopword("?!", &set));
        assert!(!is_stopword("the-end", &set));
        assert!(is_stopword("€the™", &set));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let tokens = toks(&["quick", "the", "brown", "over", "fox"]);
        let once = filter(tokens, &english(), OutputMode::Line);
        let FilteredResult::Tokens(survivors) = once.clone() else {
            panic!("expected tokens");
        };
        assert_eq!(filter(survivors, &english(), OutputMode::Line), once);
    }

    #[test]
    fn test_empty_tokens() {
        assert!(filter(vec![], &english(), OutputMode::Line).is_empty());
        assert!(filter(vec![], &english(), OutputMode::Count).is_empty());
    }
}
