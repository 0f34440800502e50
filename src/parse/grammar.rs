use thiserror::Error;
use winnow::ascii::{dec_int, dec_uint, space0, space1};
use winnow::combinator::{cut_err, delimited, dispatch, empty, eof, fail, preceded, terminated};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{rest, take_while};

use crate::{Command, MAX_SCORE, RuleEdit, RuleSpec};

/// Why a `pattern = score` line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleSyntaxError {
    #[error("expected 'pattern = score'")]
    MissingSeparator,

    #[error("pattern is empty")]
    EmptyPattern,

    #[error("score is not an integer")]
    InvalidScore,

    #[error("score exceeds the maximum of {max}", max = MAX_SCORE)]
    ScoreOutOfRange,
}

// -- Rule lines -------------------------------------------------------------

fn score_value(input: &mut &str) -> ModalResult<i64> {
    delimited(space0, dec_int::<_, i64, _>, space0).parse_next(input)
}

/// Split at the last `=`, so patterns may themselves contain `=`.
pub(crate) fn rule_spec(line: &str) -> Result<RuleSpec, RuleSyntaxError> {
    let (pattern, score_text) = line
        .rsplit_once('=')
        .ok_or(RuleSyntaxError::MissingSeparator)?;
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return Err(RuleSyntaxError::EmptyPattern);
    }
    let score = score_value
        .parse(score_text)
        .map_err(|_| RuleSyntaxError::InvalidScore)?;
    if score > MAX_SCORE {
        return Err(RuleSyntaxError::ScoreOutOfRange);
    }
    Ok(RuleSpec::new(pattern, score))
}

// -- Commands ---------------------------------------------------------------

fn keyword<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphabetic()).parse_next(input)
}

fn index(input: &mut &str) -> ModalResult<usize> {
    preceded(space1, dec_uint::<_, usize, _>)
        .context(StrContext::Expected(StrContextValue::Description("index")))
        .parse_next(input)
}

fn rule_arg(input: &mut &str) -> ModalResult<RuleSpec> {
    preceded(space1, rest.try_map(rule_spec))
        .context(StrContext::Expected(StrContextValue::Description(
            "pattern = score",
        )))
        .parse_next(input)
}

fn rules_command(input: &mut &str) -> ModalResult<Command> {
    dispatch! {keyword;
        "list" => empty.value(Command::List),
        "add" => cut_err(rule_arg).map(|r| Command::Edit(RuleEdit::Append(r))),
        "insert" => cut_err((index, rule_arg))
            .map(|(i, r)| Command::Edit(RuleEdit::Insert(i, r))),
        "update" => cut_err((index, rule_arg))
            .map(|(i, r)| Command::Edit(RuleEdit::Replace(i, r))),
        "delete" => cut_err(index).map(|i| Command::Edit(RuleEdit::Delete(i))),
        "move" => cut_err((index, index))
            .map(|(from, to)| Command::Edit(RuleEdit::Move { from, to })),
        "swap" => cut_err((index, index)).map(|(a, b)| Command::Edit(RuleEdit::Swap(a, b))),
        _ => fail::<_, Command, _>,
    }
    .context(StrContext::Label("rules subcommand"))
    .parse_next(input)
}

pub(crate) fn command(input: &mut &str) -> ModalResult<Command> {
    let cmd = preceded(
        space0,
        dispatch! {keyword;
            "sort" => empty.value(Command::Sort),
            "rules" => preceded(space1, cut_err(rules_command)),
            _ => fail::<_, Command, _>,
        },
    )
    .context(StrContext::Label("command"))
    .parse_next(input)?;
    terminated(space0, eof).parse_next(input)?;
    Ok(cmd)
}
