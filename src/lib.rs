pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod pipeline;
pub mod source;
pub mod stopwords;

pub use analyzer::{PunctuationPolicy, tokenize};
pub use error::{Result, StopwordsError};
pub use filter::{FilteredResult, FrequencyTally, OutputMode, filter};
pub use formatter::format;
pub use pipeline::{FilterConfig, FilterOutput, InputSource, Pipeline};
pub use source::{BuiltinSource, DataDirSource, LanguageSource};
pub use stopwords::{StopwordCache, StopwordSet};
