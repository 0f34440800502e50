use thiserror::Error;

/// A command line that did not parse.
///
/// `offset` is the byte position where parsing stopped and `found` the word
/// starting there, if any.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid command at offset {offset} ({}): {message}", found_text(.found))]
pub struct ParseError {
    offset: usize,
    found: Option<String>,
    message: String,
}

fn found_text(found: &Option<String>) -> String {
    match found {
        Some(word) => format!("found '{word}'"),
        None => "at end of input".to_owned(),
    }
}

impl ParseError {
    pub(crate) fn new(input: &str, offset: usize, message: impl Into<String>) -> Self {
        let found = input
            .get(offset..)
            .and_then(|rest| rest.split_whitespace().next())
            .map(str::to_owned);
        let message = message.into();
        Self {
            offset,
            found,
            message: if message.is_empty() {
                "unexpected input".to_owned()
            } else {
                message.replace('\n', "; ")
            },
        }
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The word the parser stopped at, or `None` at end of input.
    #[must_use]
    pub fn found(&self) -> Option<&str> {
        self.found.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
