use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::Result;
use crate::source::{LanguageSource, normalize_code};

/// Case-folded set of stopwords for one language. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    language: String,
    words: HashSet<String>,
}

impl StopwordSet {
    /// Loads the word list for `code` from `source`.
    ///
    /// Fails with [`crate::error::StopwordsError::UnsupportedLanguage`] when the
    /// source has no list for the code; falling back is the caller's job.
    pub fn load(source: &dyn LanguageSource, code: &str) -> Result<Self> {
        let language = normalize_code(code)?;
        let words = source.words(&language)?;
        let set = Self::from_words(language, words);
        log::debug!(
            "loaded {} stopwords for {} from {}",
            set.len(),
            set.language,
            source.name()
        );
        Ok(set)
    }

    pub fn from_words<I, S>(language: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self {
            language: language.into(),
            words,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Exact, case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        // tokens are normally already lowercase
        word.chars().any(char::is_uppercase) && self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Lazily built, shared stopword sets keyed by language code.
/// Entries are inserted once and never replaced.
#[derive(Debug, Default)]
pub struct StopwordCache {
    sets: DashMap<String, Arc<StopwordSet>>,
}

impl StopwordCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(
        &self,
        source: &dyn LanguageSource,
        code: &str,
    ) -> Result<Arc<StopwordSet>> {
        let language = normalize_code(code)?;
        if let Some(set) = self.sets.get(&language) {
            return Ok(Arc::clone(set.value()));
        }
        let loaded = Arc::new(StopwordSet::load(source, &language)?);
        // a concurrent loader may have won the race; keep the first entry
        let entry = self.sets.entry(language).or_insert(loaded);
        Ok(Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
