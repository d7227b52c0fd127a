use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use stop_words::LANGUAGE;

use crate::error::{Result, StopwordsError};

/// Supplies raw word lists keyed by language code.
///
/// Implementations report a missing list as [`StopwordsError::UnsupportedLanguage`]
/// and anything that makes the whole source unusable as
/// [`StopwordsError::Configuration`].
pub trait LanguageSource: Send + Sync {
    fn words(&self, code: &str) -> Result<Vec<String>>;

    /// Available language codes, sorted.
    fn languages(&self) -> Result<Vec<String>>;

    fn name(&self) -> &'static str;
}

/// Trims and lowercases a language code. Codes that could escape a data
/// directory or that no list could ever be named after are rejected.
pub fn normalize_code(code: &str) -> Result<String> {
    let code = code.trim().to_lowercase();
    if code.is_empty()
        || !code
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == '_' || c == '-')
    {
        return Err(StopwordsError::UnsupportedLanguage(code));
    }
    Ok(code)
}

/// Word lists stored as `<dir>/<code>.txt`, one word per line.
#[derive(Debug, Clone)]
pub struct DataDirSource {
    dir: PathBuf,
}

impl DataDirSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    fn ensure_dir(&self) -> Result<()> {
        if self.dir.is_dir() {
            Ok(())
        } else {
            Err(StopwordsError::configuration(format!(
                "stopwords data directory not found: {}",
                self.dir.display()
            )))
        }
    }
}

impl LanguageSource for DataDirSource {
    fn words(&self, code: &str) -> Result<Vec<String>> {
        self.ensure_dir()?;
        let code = normalize_code(code)?;
        let path = self.dir.join(format!("{code}.txt"));
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StopwordsError::UnsupportedLanguage(code));
            }
            Err(e) => return Err(e.into()),
        };
        log::debug!("read word list {}", path.display());
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn languages(&self) -> Result<Vec<String>> {
        self.ensure_dir()?;
        let mut languages = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "txt") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    languages.push(stem.to_string());
                }
            }
        }
        languages.sort();
        Ok(languages)
    }

    fn name(&self) -> &'static str {
        "data-dir"
    }
}

/// Word lists compiled into the binary by the `stop-words` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSource;

const BUILTIN_LANGUAGES: &[&str] = &[
    "arabic",
    "danish",
    "dutch",
    "english",
    "finnish",
    "french",
    "german",
    "greek",
    "hungarian",
    "italian",
    "norwegian",
    "portuguese",
    "romanian",
    "russian",
    "spanish",
    "swedish",
    "turkish",
];

fn builtin_language(code: &str) -> Option<LANGUAGE> {
    let language = match code {
        "arabic" => LANGUAGE::Arabic,
        "danish" => LANGUAGE::Danish,
        "dutch" => LANGUAGE::Dutch,
        "english" => LANGUAGE::English,
        "finnish" => LANGUAGE::Finnish,
        "french" => LANGUAGE::French,
        "german" => LANGUAGE::German,
        "greek" => LANGUAGE::Greek,
        "hungarian" => LANGUAGE::Hungarian,
        "italian" => LANGUAGE::Italian,
        "norwegian" => LANGUAGE::Norwegian,
        "portuguese" => LANGUAGE::Portuguese,
        "romanian" => LANGUAGE::Romanian,
        "russian" => LANGUAGE::Russian,
        "spanish" => LANGUAGE::Spanish,
        "swedish" => LANGUAGE::Swedish,
        "turkish" => LANGUAGE::Turkish,
        _ => return None,
    };
    Some(language)
}

impl LanguageSource for BuiltinSource {
    fn words(&self, code: &str) -> Result<Vec<String>> {
        let code = normalize_code(code)?;
        let language =
            builtin_language(&code).ok_or(StopwordsError::UnsupportedLanguage(code))?;
        Ok(stop_words::get(language)
            .into_iter()
            .map(|x| x.to_string())
            .collect())
    }

    fn languages(&self) -> Result<Vec<String>> {
        Ok(BUILTIN_LANGUAGES
            .iter()
            .map(|name| name.to_string())
            .collect())
    }

    fn name(&self) -> &'static str {
        "builtin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("  English ").unwrap(), "english");
        assert_eq!(normalize_code("simple_english").unwrap(), "simple_english");
        assert!(normalize_code("../etc/passwd").is_err());
        assert!(normalize_code("").is_err());
        assert!(normalize_code("en 2").is_err());
    }

    #[test]
    fn test_missing_data_dir_is_configuration_error() {
        let source = DataDirSource::new("/nonexistent/stopwords/data");
        let err = source.words("english").unwrap_err();
        assert!(matches!(err, StopwordsError::Configuration(_)));
        assert!(matches!(
            source.languages().unwrap_err(),
            StopwordsError::Configuration(_)
        ));
    }

    #[test]
    fn test_builtin_languages_sorted() {
        let languages = BuiltinSource.languages().unwrap();
        let mut sorted = languages.clone();
        sorted.sort();
        assert_eq!(languages, sorted);
        assert!(languages.contains(&"english".to_string()));
    }

    #[test]
    fn test_builtin_unknown_language() {
        let err = BuiltinSource.words("klingon").unwrap_err();
        assert!(err.is_unsupported_language());
    }
}
