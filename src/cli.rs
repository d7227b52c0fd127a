//! Command line arguments for the `stopwords` binary.

use clap::Parser;
use clap::error::ErrorKind;
use std::path::PathBuf;

use crate::analyzer::PunctuationPolicy;
use crate::config::Config;
use crate::error::StopwordsError;
use crate::filter::OutputMode;
use crate::pipeline::{FilterConfig, InputSource};
use crate::source::{BuiltinSource, DataDirSource, LanguageSource};

/// Remove stopwords (articles, conjunctions, pronouns, ...) from text.
///
/// Reads TEXT, or --file, or standard input when neither is given.
#[derive(Parser, Debug, Clone)]
#[command(name = "stopwords")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Text to filter; words are joined with single spaces
    #[arg(value_name = "TEXT", conflicts_with = "file")]
    pub text: Vec<String>,

    /// Stopword language [default: english, or $STOPWORDS_LANGUAGE]
    #[arg(short, long, value_name = "LANG")]
    pub language: Option<String>,

    /// Split on whitespace only and keep punctuation on words
    #[arg(short = 'p', long)]
    pub keep_punctuation: bool,

    /// Print one word per line
    #[arg(short = 'L', long, conflicts_with = "count")]
    pub list: bool,

    /// Print "<count> <word>" lines, least frequent first
    #[arg(short, long)]
    pub count: bool,

    /// Read the text from a file
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Directory holding <language>.txt word lists [default: $STOPWORDS_DATA_DIR or ./data]
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Use the word lists compiled into the binary instead of a data directory
    #[arg(long, conflicts_with = "data_dir")]
    pub builtin: bool,

    /// List available languages and exit
    #[arg(long)]
    pub languages: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn policy(&self) -> PunctuationPolicy {
        if self.keep_punctuation {
            PunctuationPolicy::Keep
        } else {
            PunctuationPolicy::Strip
        }
    }

    pub fn mode(&self) -> OutputMode {
        if self.count {
            OutputMode::Count
        } else if self.list {
            OutputMode::List
        } else {
            OutputMode::Line
        }
    }

    pub fn input(&self) -> InputSource {
        if let Some(path) = &self.file {
            InputSource::File(path.clone())
        } else if !self.text.is_empty() {
            InputSource::Text(self.text.join(" "))
        } else {
            InputSource::Stdin
        }
    }

    /// Settings for the run; `defaults` fills in what was not given on the command line.
    pub fn filter_config(&self, defaults: &Config) -> FilterConfig {
        FilterConfig {
            language: self
                .language
                .clone()
                .unwrap_or_else(|| defaults.language.clone()),
            policy: self.policy(),
            mode: self.mode(),
            input: self.input(),
        }
    }

    pub fn language_source(&self, defaults: &Config) -> Box<dyn LanguageSource> {
        if self.builtin {
            Box::new(BuiltinSource)
        } else {
            let dir = self
                .data_dir
                .clone()
                .unwrap_or_else(|| defaults.data_dir.clone());
            Box::new(DataDirSource::new(dir))
        }
    }

    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

/// Classifies a clap failure. Help and version requests are not failures and
/// yield `None`.
pub fn usage_error(err: &clap::Error) -> Option<StopwordsError> {
    let message = err
        .render()
        .to_string()
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string();
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => None,
        ErrorKind::InvalidValue
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::WrongNumberOfValues
        | ErrorKind::TooFewValues
        | ErrorKind::NoEquals => Some(StopwordsError::MissingArgument(message)),
        _ => Some(StopwordsError::InvalidOption(message)),
    }
}
