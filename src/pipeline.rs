use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use crate::analyzer::{PunctuationPolicy, tokenize};
use crate::config::DEFAULT_LANGUAGE;
use crate::error::{Result, StopwordsError};
use crate::filter::{FilteredResult, OutputMode, filter};
use crate::formatter::format;
use crate::source::LanguageSource;
use crate::stopwords::{StopwordCache, StopwordSet};

/// Where the text to filter comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputSource {
    /// Literal text, e.g. positional arguments.
    Text(String),
    File(PathBuf),
    /// Read the whole standard input stream.
    #[default]
    Stdin,
}

/// Resolved settings for one filtering run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    pub language: String,
    pub policy: PunctuationPolicy,
    pub mode: OutputMode,
    pub input: InputSource,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            policy: PunctuationPolicy::default(),
            mode: OutputMode::default(),
            input: InputSource::default(),
        }
    }
}

impl FilterConfig {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            input: InputSource::Text(text.into()),
            ..Self::default()
        }
    }

    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_policy(mut self, policy: PunctuationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutput {
    /// Rendered output, without a trailing newline. Empty when nothing survived.
    pub text: String,
    /// Language whose stopwords were applied.
    pub language: String,
    /// The requested language, when it was replaced by the default.
    pub fallback_from: Option<String>,
    pub result: FilteredResult,
}

/// Called with the requested and the substituted language when a run falls back.
pub type FallbackNotice = Box<dyn Fn(&str, &str) + Send + Sync>;

/// Wires tokenizer, filter and formatter around a language source.
pub struct Pipeline {
    source: Box<dyn LanguageSource>,
    cache: Option<StopwordCache>,
    on_fallback: Option<FallbackNotice>,
}

impl Pipeline {
    pub fn new(source: Box<dyn LanguageSource>) -> Self {
        Self {
            source,
            cache: None,
            on_fallback: None,
        }
    }

    /// Keeps loaded stopword sets around for later runs.
    pub fn with_cache(mut self) -> Self {
        self.cache = Some(StopwordCache::new());
        self
    }

    /// Reports a fallback as soon as it happens, before any input is read.
    pub fn with_fallback_notice<F>(mut self, notice: F) -> Self
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        self.on_fallback = Some(Box::new(notice));
        self
    }

    pub fn languages(&self) -> Result<Vec<String>> {
        self.source.languages()
    }

    fn load(&self, code: &str) -> Result<Arc<StopwordSet>> {
        match &self.cache {
            Some(cache) => cache.get_or_load(self.source.as_ref(), code),
            None => Ok(Arc::new(StopwordSet::load(self.source.as_ref(), code)?)),
        }
    }

    /// Loads the stopwords for `code`, substituting [`DEFAULT_LANGUAGE`] once
    /// if `code` has no list. Returns the set and the replaced code, if any.
    pub fn resolve_language(&self, code: &str) -> Result<(Arc<StopwordSet>, Option<String>)> {
        match self.load(code) {
            Ok(set) => Ok((set, None)),
            Err(StopwordsError::UnsupportedLanguage(requested)) => {
                if requested == DEFAULT_LANGUAGE {
                    return Err(StopwordsError::configuration(format!(
                        "default language '{DEFAULT_LANGUAGE}' is not available"
                    )));
                }
                log::info!("language '{requested}' not found, falling back to {DEFAULT_LANGUAGE}");
                match self.load(DEFAULT_LANGUAGE) {
                    Ok(set) => {
                        if let Some(notice) = &self.on_fallback {
                            notice(&requested, set.language());
                        }
                        Ok((set, Some(requested)))
                    }
                    Err(StopwordsError::UnsupportedLanguage(_)) => {
                        Err(StopwordsError::configuration(format!(
                            "default language '{DEFAULT_LANGUAGE}' is not available"
                        )))
                    }
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    pub fn run(&self, config: &FilterConfig) -> Result<FilterOutput> {
        self.run_with_reader(config, io::stdin().lock())
    }

    /// Like [`Pipeline::run`], reading [`InputSource::Stdin`] from `stdin`.
    pub fn run_with_reader<R: Read>(&self, config: &FilterConfig, stdin: R) -> Result<FilterOutput> {
        let (stopwords, fallback_from) = self.resolve_language(&config.language)?;
        let text = read_input(&config.input, stdin)?;
        Ok(self.process(&text, &stopwords, config, fallback_from))
    }

    fn process(
        &self,
        text: &str,
        stopwords: &StopwordSet,
        config: &FilterConfig,
        fallback_from: Option<String>,
    ) -> FilterOutput {
        let tokens = tokenize(text, config.policy);
        log::debug!("{} tokens from {} bytes of input", tokens.len(), text.len());
        let result = filter(tokens, stopwords, config.mode);
        FilterOutput {
            text: format(&result, config.mode),
            language: stopwords.language().to_string(),
            fallback_from,
            result,
        }
    }
}

/// Materializes the whole input.
pub fn read_input<R: Read>(input: &InputSource, mut stdin: R) -> Result<String> {
    match input {
        InputSource::Text(text) => Ok(text.clone()),
        InputSource::File(path) => {
            if !path.is_file() {
                return Err(StopwordsError::InputNotFound(path.clone()));
            }
            Ok(fs::read_to_string(path)?)
        }
        InputSource::Stdin => {
            let mut text = String::new();
            stdin.read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FixedSource(Vec<(&'static str, Vec<&'static str>)>);

    impl LanguageSource for FixedSource {
        fn words(&self, code: &str) -> Result<Vec<String>> {
            self.0
                .iter()
                .find(|(name, _)| *name == code)
                .map(|(_, words)| words.iter().map(|w| w.to_string()).collect())
                .ok_or_else(|| StopwordsError::UnsupportedLanguage(code.to_string()))
        }

        fn languages(&self) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|(name, _)| name.to_string()).collect())
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    fn pipeline() -> Pipeline {
        Pipeline::new(Box::new(FixedSource(vec![
            ("english", vec!["the", "over", "and"]),
            ("dutch", vec!["de", "het", "en"]),
        ])))
    }

    #[test]
    fn test_run_line_mode() {
        let config = FilterConfig::text("The quick brown fox jumps over the lazy dog");
        let output = pipeline().run_with_reader(&config, io::empty()).unwrap();
        assert_eq!(output.text, "quick brown fox jumps lazy dog");
        assert_eq!(output.language, "english");
        assert_eq!(output.fallback_from, None);
    }

    #[test]
    fn test_fallback_to_default_language() {
        let config = FilterConfig::text("the fox").with_language("klingon");
        let output = pipeline().run_with_reader(&config, io::empty()).unwrap();
        assert_eq!(output.text, "fox");
        assert_eq!(output.language, "english");
        assert_eq!(output.fallback_from.as_deref(), Some("klingon"));
    }

    #[test]
    fn test_missing_default_is_configuration_error() {
        let pipeline = Pipeline::new(Box::new(FixedSource(vec![("dutch", vec!["de"])])));
        for language in ["english", "klingon"] {
            let config = FilterConfig::text("the fox").with_language(language);
            let err = pipeline.run_with_reader(&config, io::empty()).unwrap_err();
            assert!(matches!(err, StopwordsError::Configuration(_)), "{err}");
        }
    }

    #[test]
    fn test_reads_stdin_when_no_text() {
        let config = FilterConfig::default().with_mode(OutputMode::List);
        let output = pipeline()
            .run_with_reader(&config, "The fox and the dog".as_bytes())
            .unwrap();
        assert_eq!(output.text, "fox\ndog");
    }

    #[test]
    fn test_literal_empty_text_does_not_read_stdin() {
        let config = FilterConfig::text("");
        let output = pipeline()
            .run_with_reader(&config, "fox".as_bytes())
            .unwrap();
        assert_eq!(output.text, "");
    }

    #[test]
    fn test_missing_input_file() {
        let config = FilterConfig {
            input: InputSource::File(PathBuf::from("/nonexistent/input.txt")),
            ..FilterConfig::default()
        };
        let err = pipeline().run_with_reader(&config, io::empty()).unwrap_err();
        assert!(matches!(err, StopwordsError::InputNotFound(_)));
    }

    fn recording_pipeline() -> (Pipeline, Arc<Mutex<Vec<String>>>) {
        let notices = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&notices);
        let pipeline = pipeline().with_fallback_notice(move |requested, used| {
            sink.lock().unwrap().push(format!("{requested}->{used}"));
        });
        (pipeline, notices)
    }

    #[test]
    fn test_fallback_notice_precedes_failing_input() {
        let (pipeline, notices) = recording_pipeline();
        let config = FilterConfig {
            language: "klingon".to_string(),
            input: InputSource::File(PathBuf::from("/nonexistent/input.txt")),
            ..FilterConfig::default()
        };
        let err = pipeline.run_with_reader(&config, io::empty()).unwrap_err();
        assert!(matches!(err, StopwordsError::InputNotFound(_)));
        assert_eq!(*notices.lock().unwrap(), vec!["klingon->english"]);
    }

    struct NoticeCheckingReader {
        notices: Arc<Mutex<Vec<String>>>,
        data: &'static [u8],
    }

    impl Read for NoticeCheckingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            assert!(!self.notices.lock().unwrap().is_empty(), "input read before notice");
            self.data.read(buf)
        }
    }

    #[test]
    fn test_fallback_notice_precedes_stdin() {
        let (pipeline, notices) = recording_pipeline();
        let reader = NoticeCheckingReader {
            notices: Arc::clone(&notices),
            data: b"the fox",
        };
        let config = FilterConfig::default().with_language("klingon");
        let output = pipeline.run_with_reader(&config, reader).unwrap();
        assert_eq!(output.text, "fox");
        assert_eq!(notices.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_no_notice_without_fallback() {
        let (pipeline, notices) = recording_pipeline();
        let config = FilterConfig::text("de kat").with_language("dutch");
        pipeline.run_with_reader(&config, io::empty()).unwrap();
        assert!(notices.lock().unwrap().is_empty());
    }

    #[test]
    fn test_cached_pipeline_reuses_sets() {
        let pipeline = pipeline().with_cache();
        let (first, _) = pipeline.resolve_language("dutch").unwrap();
        let (second, _) = pipeline.resolve_language("dutch").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
