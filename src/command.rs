use crate::{EditError, RuleEdit, RuleList};

/// A user command, as parsed by [`parse_command()`](crate::parse_command).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run an ordering pass now.
    Sort,
    /// Show the numbered rule list.
    List,
    /// Change the rule list.
    Edit(RuleEdit),
}

/// What applying a [`Command`] to a rule list produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The caller should run a pass.
    SortRequested,
    /// Text to show the user.
    Listing(String),
    /// The list changed; it must be saved and recompiled before the next pass.
    RulesChanged,
}

impl Command {
    /// Apply this command to `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError`] if an edit index is out of range; `rules` is
    /// unchanged in that case.
    pub fn apply(self, rules: &mut RuleList) -> Result<Outcome, EditError> {
        match self {
            Command::Sort => Ok(Outcome::SortRequested),
            Command::List => Ok(Outcome::Listing(rules.to_string())),
            Command::Edit(edit) => {
                rules.apply(edit)?;
                Ok(Outcome::RulesChanged)
            }
        }
    }
}
