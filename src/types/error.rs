use thiserror::Error;

/// A per-rule diagnostic. The offending rule is dropped; the rest of the
/// list is still usable.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid pattern '{pattern}' in rule {index}: {source}")]
    Compile {
        index: usize,
        pattern: String,
        #[source]
        source: PatternError,
    },

    #[error("score {score} in rule {index} exceeds the maximum of {max}", max = crate::MAX_SCORE)]
    ScoreOutOfRange { index: usize, score: i64 },

    #[error("malformed rule at {location} ('{input}'): {reason}")]
    Parse {
        location: String,
        input: String,
        reason: String,
    },
}

impl RuleError {
    pub(crate) fn parse_at_line(line: usize, input: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            location: format!("line {line}"),
            input: input.to_owned(),
            reason: reason.into(),
        }
    }

    #[cfg(feature = "json")]
    pub(crate) fn parse_at_entry(entry: usize, input: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            location: format!("entry {entry}"),
            input: input.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Why a pattern could not be turned into a matcher.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error(transparent)]
    Syntax(#[from] regex_syntax::Error),

    #[error(transparent)]
    Build(#[from] regex_automata::meta::BuildError),
}

/// Errors produced by rule list edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("index {index} out of range for rule list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_out_of_range_message() {
        let err = EditError::IndexOutOfRange { index: 3, len: 3 };
        assert_eq!(
            err.to_string(),
            "index 3 out of range for rule list of length 3"
        );
    }

    #[test]
    fn parse_message_names_line() {
        let err = RuleError::parse_at_line(4, "core = zero", "score is not an integer");
        assert_eq!(
            err.to_string(),
            "malformed rule at line 4 ('core = zero'): score is not an integer"
        );
    }

    #[test]
    fn compile_message_names_pattern_and_index() {
        let source = regex_syntax::Parser::new().parse("(").unwrap_err().into();
        let err = RuleError::Compile {
            index: 2,
            pattern: "(".into(),
            source,
        };
        assert!(err.to_string().starts_with("invalid pattern '(' in rule 2: "));
    }

    #[test]
    fn score_out_of_range_message() {
        let err = RuleError::ScoreOutOfRange {
            index: 0,
            score: i64::MAX,
        };
        assert_eq!(
            err.to_string(),
            format!(
                "score {} in rule 0 exceeds the maximum of {}",
                i64::MAX,
                i64::MAX - 1
            )
        );
    }
}
