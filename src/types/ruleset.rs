use std::fmt;

use super::error::RuleError;
use super::rule::{CompiledRule, RuleSpec};
use super::rule_list::RuleList;

/// Builder for constructing a [`RuleSet`] directly from code.
///
/// # Example
///
/// ```
/// use autosort::RuleSetBuilder;
///
/// let ruleset = RuleSetBuilder::new()
///     .rule("core", 0)
///     .rule("irc", 2)
///     .rule("[^.]+", 1)
///     .compile()
///     .into_ruleset();
///
/// assert_eq!(ruleset.score("core"), 0);
/// assert_eq!(ruleset.score("irc.libera"), 3);
/// ```
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: RuleList,
}

impl RuleSetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. Rules are matched in the order they are added.
    #[must_use]
    pub fn rule(mut self, pattern: &str, score: i64) -> Self {
        self.rules.append(RuleSpec::new(pattern, score));
        self
    }

    /// Compile the rules. Invalid patterns are dropped and reported in the
    /// returned [`Compiled`].
    pub fn compile(self) -> Compiled {
        self.rules.compile()
    }
}

/// A compiled, immutable ruleset: anchored matchers in user order plus the
/// fallback score given to prefixes no rule matches.
///
/// Cheap to share behind `Arc`; a configuration reload builds a new value
/// instead of mutating this one.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub(crate) rules: Vec<CompiledRule>,
    pub(crate) fallback: i64,
}

impl RuleSet {
    /// A ruleset with no rules. Every prefix scores `0`.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            fallback: 0,
        }
    }

    /// Score of the first rule whose pattern fully matches `prefix`, or the
    /// fallback if none does.
    #[must_use]
    pub fn score(&self, prefix: &str) -> i64 {
        crate::order::score(prefix, self)
    }

    /// One more than the highest rule score, or `0` without rules.
    #[must_use]
    pub fn fallback(&self) -> i64 {
        self.fallback
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The `(pattern, score)` pairs that survived compilation, in match order.
    #[must_use]
    pub fn rules(&self) -> Vec<(&str, i64)> {
        self.rules
            .iter()
            .map(|r| (r.pattern.as_str(), r.score))
            .collect()
    }

    /// Source index of the rule matching `prefix`, if any. Useful when
    /// explaining why an item landed where it did.
    #[must_use]
    pub fn matching_rule(&self, prefix: &str) -> Option<usize> {
        self.rules
            .iter()
            .find(|r| r.matches(prefix))
            .map(|r| r.index)
    }

    /// Parse rules in the `pattern = score` text format and compile them.
    ///
    /// Malformed lines and invalid patterns are both reported in
    /// [`Compiled::errors`].
    pub fn from_text(input: &str) -> Compiled {
        let (list, mut errors) = crate::parse::parse_rules(input);
        let mut compiled = list.compile();
        errors.append(&mut compiled.errors);
        compiled.errors = errors;
        compiled
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RuleSet({} rules, fallback {})",
            self.rules.len(),
            self.fallback
        )
    }
}

/// Result of compiling a rule list: the usable [`RuleSet`] plus one
/// diagnostic per rule that had to be dropped.
#[derive(Debug)]
#[must_use]
pub struct Compiled {
    pub(crate) ruleset: RuleSet,
    pub(crate) errors: Vec<RuleError>,
}

impl Compiled {
    #[must_use]
    pub fn ruleset(&self) -> &RuleSet {
        &self.ruleset
    }

    #[must_use]
    pub fn errors(&self) -> &[RuleError] {
        &self.errors
    }

    /// Whether every rule compiled.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn into_ruleset(self) -> RuleSet {
        self.ruleset
    }

    #[must_use]
    pub fn into_parts(self) -> (RuleSet, Vec<RuleError>) {
        (self.ruleset, self.errors)
    }
}
