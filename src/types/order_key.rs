use std::fmt;

/// The composite sort key of one item: one `(score, token)` pair per
/// segment of its (possibly rewritten) name.
///
/// Keys compare lexicographically pair by pair, each pair by score and then
/// by token. A key that is a strict prefix of another sorts first.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderKey {
    parts: Vec<(i64, String)>,
}

impl OrderKey {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            parts: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, score: i64, token: String) {
        self.parts.push((score, token));
    }

    #[must_use]
    pub fn parts(&self) -> &[(i64, String)] {
        &self.parts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(i64, S)> for OrderKey {
    fn from_iter<T: IntoIterator<Item = (i64, S)>>(iter: T) -> Self {
        Self {
            parts: iter.into_iter().map(|(s, t)| (s, t.into())).collect(),
        }
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (score, token)) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({score}, {token:?})")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_dominates_token() {
        let a: OrderKey = [(0, "zzz")].into_iter().collect();
        let b: OrderKey = [(1, "aaa")].into_iter().collect();
        assert!(a < b);
    }

    #[test]
    fn token_breaks_score_ties() {
        let a: OrderKey = [(1, "alpha")].into_iter().collect();
        let b: OrderKey = [(1, "beta")].into_iter().collect();
        assert!(a < b);
    }

    #[test]
    fn prefix_sorts_first() {
        let parent: OrderKey = [(2, "irc"), (1, "server")].into_iter().collect();
        let child: OrderKey = [(2, "irc"), (1, "server"), (0, "libera")]
            .into_iter()
            .collect();
        assert!(parent < child);
    }

    #[test]
    fn earlier_pair_decides_before_length() {
        let short: OrderKey = [(3, "x")].into_iter().collect();
        let long: OrderKey = [(2, "x"), (9, "y")].into_iter().collect();
        assert!(long < short);
    }

    #[test]
    fn display() {
        let key: OrderKey = [(0, "core"), (4, "weechat")].into_iter().collect();
        assert_eq!(key.to_string(), r#"[(0, "core"), (4, "weechat")]"#);
    }
}
