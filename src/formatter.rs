use crate::filter::{FilteredResult, OutputMode};

/// Renders a filtered result. Lines are joined with `\n` and there is no
/// trailing newline; an empty result renders as an empty string.
///
/// A tally is always rendered as `<count> <word>` lines; a token sequence is
/// rendered as one line unless `mode` is [`OutputMode::List`].
pub fn format(result: &FilteredResult, mode: OutputMode) -> String {
    match result {
        FilteredResult::Tally(tally) => tally
            .sorted()
            .into_iter()
            .map(|(word, count)| format!("{count} {word}"))
            .collect::<Vec<String>>()
            .join("\n"),
        FilteredResult::Tokens(tokens) => match mode {
            OutputMode::List => tokens.join("\n"),
            OutputMode::Line | OutputMode::Count => tokens.join(" "),
        },
    }
}
