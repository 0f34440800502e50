mod error;
mod grammar;

pub use error::ParseError;
pub use grammar::RuleSyntaxError;

use crate::{Command, RuleError, RuleList};

/// Parse the line-oriented `pattern = score` rule format.
///
/// Blank lines and lines whose first non-blank character is `#` are
/// skipped. A malformed line is reported with its 1-based line number and
/// left out of the returned list; the remaining lines are still parsed.
pub fn parse_rules(input: &str) -> (RuleList, Vec<RuleError>) {
    let mut rules = RuleList::new();
    let mut errors = Vec::new();

    for (i, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match grammar::rule_spec(trimmed) {
            Ok(rule) => rules.append(rule),
            Err(reason) => {
                errors.push(RuleError::parse_at_line(i + 1, trimmed, reason.to_string()));
            }
        }
    }

    (rules, errors)
}

/// Render rules in the format read by [`parse_rules`].
#[must_use]
pub fn format_rules(rules: &RuleList) -> String {
    let mut out = String::new();
    for rule in rules {
        out.push_str(&rule.to_string());
        out.push('\n');
    }
    out
}

/// Parse a single command line such as `rules move 0 2`.
///
/// # Errors
///
/// Returns [`ParseError`] if the line is not a known command or its
/// arguments are malformed.
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    use winnow::Parser;
    grammar::command
        .parse(input)
        .map_err(|e| ParseError::new(input, e.offset(), e.inner().to_string()))
}
