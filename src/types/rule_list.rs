use std::fmt;

use super::error::EditError;
use super::rule::RuleSpec;

/// The user-controlled, ordered list of rules.
///
/// Order is significant: the first rule whose pattern matches a prefix wins.
/// Every edit is bounds-checked and leaves the list untouched on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleList {
    rules: Vec<RuleSpec>,
}

/// A single edit against a [`RuleList`]. All indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleEdit {
    Append(RuleSpec),
    /// Insert before `index`; `index == len` appends.
    Insert(usize, RuleSpec),
    Replace(usize, RuleSpec),
    Delete(usize),
    Move { from: usize, to: usize },
    Swap(usize, usize),
}

impl RuleList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The list installed when nothing has been stored yet.
    #[must_use]
    pub fn defaults() -> Self {
        Self::from(vec![
            RuleSpec::new("core", 0),
            RuleSpec::new("irc", 2),
            RuleSpec::new("[^.]+", 1),
            RuleSpec::new("irc[.]irc_raw", 0),
            RuleSpec::new("irc[.]server", 1),
        ])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RuleSpec> {
        self.rules.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleSpec> {
        self.rules.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[RuleSpec] {
        &self.rules
    }

    pub fn append(&mut self, rule: RuleSpec) {
        self.rules.push(rule);
    }

    /// Insert `rule` before `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] if `index > len`.
    pub fn insert(&mut self, index: usize, rule: RuleSpec) -> Result<(), EditError> {
        if index > self.rules.len() {
            return Err(self.out_of_range(index));
        }
        self.rules.insert(index, rule);
        Ok(())
    }

    /// Replace the rule at `index`, returning the old one.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] if `index >= len`.
    pub fn replace(&mut self, index: usize, rule: RuleSpec) -> Result<RuleSpec, EditError> {
        self.check(index)?;
        Ok(std::mem::replace(&mut self.rules[index], rule))
    }

    /// Remove and return the rule at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<RuleSpec, EditError> {
        self.check(index)?;
        Ok(self.rules.remove(index))
    }

    /// Move the rule at `from` so that it ends up at `to`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] if either index is `>= len`.
    pub fn move_rule(&mut self, from: usize, to: usize) -> Result<(), EditError> {
        self.check(from)?;
        self.check(to)?;
        let rule = self.rules.remove(from);
        self.rules.insert(to, rule);
        Ok(())
    }

    /// Swap the rules at `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] if either index is `>= len`.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), EditError> {
        self.check(a)?;
        self.check(b)?;
        self.rules.swap(a, b);
        Ok(())
    }

    /// Apply a single [`RuleEdit`] in place.
    ///
    /// # Errors
    ///
    /// Returns [`EditError`] if any index is out of range; the list is
    /// unchanged in that case.
    pub fn apply(&mut self, edit: RuleEdit) -> Result<(), EditError> {
        match edit {
            RuleEdit::Append(rule) => {
                self.append(rule);
                Ok(())
            }
            RuleEdit::Insert(index, rule) => self.insert(index, rule),
            RuleEdit::Replace(index, rule) => self.replace(index, rule).map(|_| ()),
            RuleEdit::Delete(index) => self.remove(index).map(|_| ()),
            RuleEdit::Move { from, to } => self.move_rule(from, to),
            RuleEdit::Swap(a, b) => self.swap(a, b),
        }
    }

    /// Compile this list into a [`RuleSet`](super::RuleSet), reporting
    /// invalid patterns alongside.
    pub fn compile(&self) -> super::Compiled {
        crate::compile::compile(&self.rules)
    }

    fn check(&self, index: usize) -> Result<(), EditError> {
        if index < self.rules.len() {
            Ok(())
        } else {
            Err(self.out_of_range(index))
        }
    }

    fn out_of_range(&self, index: usize) -> EditError {
        EditError::IndexOutOfRange {
            index,
            len: self.rules.len(),
        }
    }
}

/// Return a copy of `rules` with `edit` applied.
///
/// # Errors
///
/// Returns [`EditError`] if the edit is out of range.
pub fn edit_rules(rules: &RuleList, edit: RuleEdit) -> Result<RuleList, EditError> {
    let mut edited = rules.clone();
    edited.apply(edit)?;
    Ok(edited)
}

impl FromIterator<RuleSpec> for RuleList {
    fn from_iter<T: IntoIterator<Item = RuleSpec>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<RuleSpec>> for RuleList {
    fn from(rules: Vec<RuleSpec>) -> Self {
        Self { rules }
    }
}

impl<'a> IntoIterator for &'a RuleList {
    type Item = &'a RuleSpec;
    type IntoIter = std::slice::Iter<'a, RuleSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Renders the numbered listing shown by the `rules list` command.
impl fmt::Display for RuleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rules.is_empty() {
            return write!(f, "no rules");
        }
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{i}: {rule}")?;
        }
        Ok(())
    }
}
