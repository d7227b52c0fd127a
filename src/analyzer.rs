use unicode_segmentation::UnicodeSegmentation;

/// How punctuation is treated while splitting text into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PunctuationPolicy {
    /// Split on whitespace only; tokens keep their punctuation.
    Keep,
    /// Replace punctuation with spaces before splitting.
    #[default]
    Strip,
}

/// A character filter receives the original text and can transform it by adding,
/// removing, or changing characters before it reaches the tokenizer.
pub trait CharacterFilter: Send + Sync {
    fn filter(&self, text: String) -> String;
}

/// Case-folds the whole text once, so everything downstream is lowercase.
pub struct LowerCaseCharFilter;

impl CharacterFilter for LowerCaseCharFilter {
    fn filter(&self, text: String) -> String {
        text.to_lowercase()
    }
}

/// Drops the possessive marker: `'s` followed by a space becomes a single space.
pub struct PossessiveFilter;

impl CharacterFilter for PossessiveFilter {
    fn filter(&self, text: String) -> String {
        if !text.contains("s ") {
            return text;
        }
        text.replace("'s ", " ").replace("\u{2019}s ", " ")
    }
}

/// Replaces every non-word character, and any whitespace, with a plain space.
/// Works per grapheme so combining marks stay attached to their letters.
pub struct PunctuationFilter;

impl CharacterFilter for PunctuationFilter {
    fn filter(&self, text: String) -> String {
        text.graphemes(true)
            .map(|g| if is_word_grapheme(g) { g } else { " " })
            .collect()
    }
}

/// Letters and digits of any script, and `_`.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Anything that is neither a word character nor whitespace: punctuation,
/// symbols, currency signs, emoji.
pub fn is_punctuation(c: char) -> bool {
    !is_word_char(c) && !c.is_whitespace()
}

fn is_word_grapheme(g: &str) -> bool {
    g.chars().next().is_some_and(is_word_char)
}

fn is_punctuation_grapheme(g: &str) -> bool {
    g.chars().next().is_some_and(is_punctuation)
}

/// `token` without leading and trailing punctuation.
pub fn trim_punctuation(token: &str) -> &str {
    let Some(start) = token
        .grapheme_indices(true)
        .find(|(_, g)| !is_punctuation_grapheme(g))
        .map(|(i, _)| i)
    else {
        return "";
    };
    let end = token
        .grapheme_indices(true)
        .rev()
        .find(|(_, g)| !is_punctuation_grapheme(g))
        .map_or(token.len(), |(i, g)| i + g.len());
    &token[start..end]
}

/// A tokenizer receives a stream of characters, breaks it up into individual tokens (usually individual words),
/// and outputs a stream of tokens.
/// For instance, a whitespace tokenizer breaks text into tokens whenever it sees any whitespace.
/// It would convert the text "Quick brown fox!" into the terms [Quick, brown, fox!].
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: String) -> Vec<String>;
}

pub struct WhiteSpaceTokenizer;

impl Tokenizer for WhiteSpaceTokenizer {
    fn tokenize(&self, text: String) -> Vec<String> {
        text.split_whitespace()
            .map(|w| w.to_string())
            .collect::<Vec<String>>()
    }
}

/// A token filter receives the token stream and may add, remove, or change tokens.
pub trait TokenFilter: Send + Sync {
    fn filter(&self, tokens: Vec<String>) -> Vec<String>;
}

const RESIDUAL_QUOTES: &[char] = &['`', '"', '_', '\'', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}'];

/// Removes leftover quote, backtick and underscore characters from each token
/// and drops tokens left empty.
pub struct QuoteStripFilter;

impl TokenFilter for QuoteStripFilter {
    fn filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter_map(|token| {
                let stripped = if token.contains(RESIDUAL_QUOTES) {
                    token.replace(RESIDUAL_QUOTES, "")
                } else {
                    token
                };
                (!stripped.is_empty()).then_some(stripped)
            })
            .collect()
    }
}

/// Pure text analysis pipeline: character filters, one tokenizer, token filters.
pub struct TextAnalyzer {
    char_filters: Vec<Box<dyn CharacterFilter>>,
    tokenizer: Box<dyn Tokenizer>,
    token_filters: Vec<Box<dyn TokenFilter>>,
}

impl TextAnalyzer {
    pub fn new(
        char_filters: Vec<Box<dyn CharacterFilter>>,
        tokenizer: Box<dyn Tokenizer>,
        token_filters: Vec<Box<dyn TokenFilter>>,
    ) -> Self {
        Self {
            char_filters,
            tokenizer,
            token_filters,
        }
    }

    /// The analyzer implementing `policy`.
    pub fn for_policy(policy: PunctuationPolicy) -> Self {
        match policy {
            PunctuationPolicy::Keep => Self::new(
                vec![Box::new(LowerCaseCharFilter)],
                Box::new(WhiteSpaceTokenizer),
                vec![],
            ),
            PunctuationPolicy::Strip => Self::new(
                vec![
                    Box::new(LowerCaseCharFilter),
                    Box::new(PossessiveFilter),
                    Box::new(PunctuationFilter),
                ],
                Box::new(WhiteSpaceTokenizer),
                vec![Box::new(QuoteStripFilter)],
            ),
        }
    }

    pub fn char_filter(&self, mut content: String) -> String {
        for filter in self.char_filters.iter() {
            content = filter.filter(content);
        }
        content
    }

    pub fn tokenize(&self, content: String) -> Vec<String> {
        self.tokenizer.tokenize(content)
    }

    pub fn token_filter(&self, mut tokens: Vec<String>) -> Vec<String> {
        for filter in self.token_filters.iter() {
            tokens = filter.filter(tokens);
        }
        tokens
    }

    /// Analyzes raw content into lowercase, non-empty tokens, in input order.
    pub fn analyze(&self, raw_content: String) -> Vec<String> {
        let content = self.char_filter(raw_content);
        let tokens = self.tokenize(content);
        self.token_filter(tokens)
    }
}

/// Splits `text` into tokens under `policy`.
pub fn tokenize(text: &str, policy: PunctuationPolicy) -> Vec<String> {
    TextAnalyzer::for_policy(policy).analyze(text.to_string())
}
