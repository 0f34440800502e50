use regex_automata::meta::Regex;
use regex_syntax::hir::{Hir, Look};
use tracing::warn;

use crate::{Compiled, CompiledRule, MAX_SCORE, PatternError, RuleError, RuleSet, RuleSpec};

/// Compile rule specs into a [`RuleSet`].
///
/// A pattern that fails to compile, or a score above [`MAX_SCORE`], drops
/// that rule and reports it; it never takes the rest of the list down with
/// it. The fallback is derived from the rules that survived.
pub(crate) fn compile(specs: &[RuleSpec]) -> Compiled {
    let mut rules = Vec::with_capacity(specs.len());
    let mut errors = Vec::new();

    for (index, spec) in specs.iter().enumerate() {
        if spec.score > MAX_SCORE {
            warn!(index, score = spec.score, "dropping rule with out-of-range score");
            errors.push(RuleError::ScoreOutOfRange {
                index,
                score: spec.score,
            });
            continue;
        }
        match anchored(&spec.pattern) {
            Ok(matcher) => rules.push(CompiledRule {
                pattern: spec.pattern.clone(),
                matcher,
                score: spec.score,
                index,
            }),
            Err(source) => {
                warn!(
                    index,
                    pattern = %spec.pattern,
                    %source,
                    "dropping rule with invalid pattern"
                );
                errors.push(RuleError::Compile {
                    index,
                    pattern: spec.pattern.clone(),
                    source,
                });
            }
        }
    }

    let fallback = fallback_score(&rules);

    Compiled {
        ruleset: RuleSet { rules, fallback },
        errors,
    }
}

/// Parse `pattern` on its own, then pin the parsed expression between
/// start-of-text and end-of-text so it must match the whole candidate.
fn anchored(pattern: &str) -> Result<Regex, PatternError> {
    let hir = regex_syntax::Parser::new().parse(pattern)?;
    let whole = Hir::concat(vec![Hir::look(Look::Start), hir, Hir::look(Look::End)]);
    Ok(Regex::builder().build_from_hir(&whole)?)
}

fn fallback_score(rules: &[CompiledRule]) -> i64 {
    // every surviving score is at most MAX_SCORE
    rules.iter().map(|r| r.score).max().map_or(0, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use crate::{MAX_SCORE, RuleError, RuleList, RuleSetBuilder, RuleSpec};

    #[test]
    fn compile_simple_ruleset() {
        let compiled = RuleSetBuilder::new().rule("core", 0).compile();
        assert!(compiled.is_clean());
        let ruleset = compiled.into_ruleset();
        assert_eq!(ruleset.len(), 1);
        assert_eq!(ruleset.fallback(), 1);
    }

    #[test]
    fn empty_list_has_zero_fallback() {
        let ruleset = RuleList::new().compile().into_ruleset();
        assert!(ruleset.is_empty());
        assert_eq!(ruleset.fallback(), 0);
    }

    #[test]
    fn invalid_pattern_is_isolated() {
        let compiled = RuleSetBuilder::new()
            .rule("core", 0)
            .rule("irc[", 9)
            .rule("irc", 2)
            .compile();
        assert_eq!(compiled.errors().len(), 1);
        match &compiled.errors()[0] {
            RuleError::Compile { index, pattern, .. } => {
                assert_eq!(*index, 1);
                assert_eq!(pattern, "irc[");
            }
            other => panic!("expected Compile, got {other:?}"),
        }
        let ruleset = compiled.ruleset();
        assert_eq!(ruleset.rules(), [("core", 0), ("irc", 2)]);
    }

    #[test]
    fn fallback_ignores_dropped_rules() {
        let ruleset = RuleSetBuilder::new()
            .rule("a", 1)
            .rule("(", 100)
            .compile()
            .into_ruleset();
        assert_eq!(ruleset.fallback(), 2);
    }

    #[test]
    fn fallback_with_negative_scores() {
        let ruleset = RuleSetBuilder::new()
            .rule("a", -5)
            .rule("b", -2)
            .compile()
            .into_ruleset();
        assert_eq!(ruleset.fallback(), -1);
    }

    #[test]
    fn patterns_are_fully_anchored() {
        let ruleset = RuleSetBuilder::new().rule("irc", 0).compile().into_ruleset();
        assert_eq!(ruleset.score("irc"), 0);
        assert_eq!(ruleset.score("irc.libera"), 1);
        assert_eq!(ruleset.score("xirc"), 1);
    }

    #[test]
    fn alternation_is_anchored_as_a_whole() {
        // without grouping, `^a|b$` would match "ab..." via the first branch
        let ruleset = RuleSetBuilder::new().rule("a|b", 0).compile().into_ruleset();
        assert_eq!(ruleset.score("a"), 0);
        assert_eq!(ruleset.score("b"), 0);
        assert_eq!(ruleset.score("abc"), 1);
    }

    #[test]
    fn explicit_anchors_are_harmless() {
        let list = RuleList::from(vec![RuleSpec::new("^core$", 0)]);
        let ruleset = list.compile().into_ruleset();
        assert_eq!(ruleset.score("core"), 0);
    }

    #[test]
    fn unbalanced_paren_is_rejected() {
        let compiled = RuleSetBuilder::new().rule("core)|(irc", 0).compile();
        assert!(matches!(
            compiled.errors(),
            [RuleError::Compile { index: 0, .. }]
        ));
        let ruleset = compiled.ruleset();
        assert!(ruleset.is_empty());
        assert_eq!(ruleset.score("corefoo"), 0);
        assert_eq!(ruleset.matching_rule("corefoo"), None);
    }

    #[test]
    fn verbose_pattern_with_trailing_comment() {
        let compiled = RuleSetBuilder::new().rule("(?x)core # c", 0).compile();
        assert!(compiled.is_clean());
        let ruleset = compiled.ruleset();
        assert_eq!(ruleset.score("core"), 0);
        assert_eq!(ruleset.score("corex"), 1);
    }

    #[test]
    fn leftmost_branch_does_not_shadow_full_match() {
        let ruleset = RuleSetBuilder::new().rule("a|ab", 0).compile().into_ruleset();
        assert_eq!(ruleset.score("ab"), 0);
        assert_eq!(ruleset.score("abc"), 1);
    }

    #[test]
    fn maximum_score_keeps_fallback_above() {
        let ruleset = RuleSetBuilder::new()
            .rule("a", MAX_SCORE)
            .compile()
            .into_ruleset();
        assert_eq!(ruleset.fallback(), i64::MAX);
        assert!(ruleset.fallback() > MAX_SCORE);
    }

    #[test]
    fn score_above_maximum_is_rejected() {
        let compiled = RuleSetBuilder::new()
            .rule("a", i64::MAX)
            .rule("b", 4)
            .compile();
        assert!(matches!(
            compiled.errors(),
            [RuleError::ScoreOutOfRange { index: 0, score: i64::MAX }]
        ));
        let ruleset = compiled.ruleset();
        assert_eq!(ruleset.rules(), [("b", 4)]);
        assert_eq!(ruleset.fallback(), 5);
    }
}
