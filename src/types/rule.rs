use std::fmt;

use regex_automata::meta::Regex;

/// Highest score a rule may carry. The fallback is one above the best rule,
/// so it must stay representable.
pub const MAX_SCORE: i64 = i64::MAX - 1;

/// A raw `(pattern, score)` pair as stored by the user.
///
/// The pattern is an uncompiled regular expression. It only becomes a
/// matcher once the owning [`RuleList`](super::RuleList) is compiled into a
/// [`RuleSet`](super::RuleSet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub pattern: String,
    pub score: i64,
}

impl RuleSpec {
    pub fn new(pattern: impl Into<String>, score: i64) -> Self {
        Self {
            pattern: pattern.into(),
            score,
        }
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.pattern, self.score)
    }
}

impl<P: Into<String>> From<(P, i64)> for RuleSpec {
    fn from((pattern, score): (P, i64)) -> Self {
        Self::new(pattern, score)
    }
}

/// A rule whose pattern has been compiled into an anchored matcher.
///
/// `index` is the rule's position in the source [`RuleList`](super::RuleList),
/// kept so diagnostics can point back at what the user wrote even after
/// invalid rules were dropped.
#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) pattern: String,
    pub(crate) matcher: Regex,
    pub(crate) score: i64,
    pub(crate) index: usize,
}

impl CompiledRule {
    pub(crate) fn matches(&self, prefix: &str) -> bool {
        self.matcher.is_match(prefix)
    }
}
