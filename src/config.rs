use crate::{Flags, RuleError, RuleList};

/// Everything a pass depends on besides the items: the flags and the raw
/// rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub flags: Flags,
    pub rules: RuleList,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flags: Flags::default(),
            rules: RuleList::defaults(),
        }
    }
}

/// A loaded [`Config`] together with the rules that had to be dropped
/// while reading it.
#[derive(Debug, Default)]
pub struct Loaded {
    pub config: Config,
    pub errors: Vec<RuleError>,
}

#[cfg(feature = "json")]
impl Config {
    /// Decode a JSON configuration document. Missing fields take their
    /// defaults; malformed rule entries are skipped and reported.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if the document itself is malformed.
    pub fn from_json(input: &str) -> Result<Loaded, serde_json::Error> {
        let (config, errors) = crate::serial::config_from_json(input)?;
        Ok(Loaded { config, errors })
    }

    /// Encode as a pretty-printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if encoding fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        crate::serial::config_to_json(self)
    }
}
