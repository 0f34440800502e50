use std::fmt;

/// A host entity to be ordered: an opaque identifier plus a dotted name.
///
/// For most hosts the identifier and the full name coincide, which is what
/// [`Item::new`] assumes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    id: String,
    name: String,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
        }
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The dot-separated segments of the name, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.name.split('.')
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
