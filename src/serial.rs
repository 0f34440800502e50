//! JSON storage of rules and configuration.
//!
//! Rules are stored as an array of `[pattern, score]` pairs:
//!
//! ```json
//! [["core", 0], ["irc", 2], ["[^.]+", 1]]
//! ```
//!
//! A configuration document adds the flags next to the rules:
//!
//! ```json
//! { "group_irc": true, "case_sensitive": false, "rules": [["core", 0]] }
//! ```
//!
//! Entries are validated one at a time. A malformed entry becomes a
//! [`RuleError::Parse`] and is skipped; only a document that is not JSON at
//! all, or has the wrong top-level shape, is an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Config, Flags, MAX_SCORE, RuleError, RuleList, RuleSpec};

#[derive(Debug, Deserialize)]
struct ConfigDocument {
    #[serde(flatten)]
    flags: Flags,
    rules: Option<Vec<Value>>,
}

#[derive(Debug, Serialize)]
struct ConfigDocumentRef<'a> {
    #[serde(flatten)]
    flags: Flags,
    rules: Vec<(&'a str, i64)>,
}

/// Decode a JSON array of `[pattern, score]` pairs.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if `input` is not a JSON array.
pub fn rules_from_json(input: &str) -> Result<(RuleList, Vec<RuleError>), serde_json::Error> {
    let entries: Vec<Value> = serde_json::from_str(input)?;
    Ok(decode_entries(&entries))
}

/// Encode rules as a JSON array of `[pattern, score]` pairs.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if encoding fails.
pub fn rules_to_json(rules: &RuleList) -> Result<String, serde_json::Error> {
    serde_json::to_string(&pairs(rules))
}

pub(crate) fn config_from_json(input: &str) -> Result<(Config, Vec<RuleError>), serde_json::Error> {
    let doc: ConfigDocument = serde_json::from_str(input)?;
    let (rules, errors) = match doc.rules {
        Some(entries) => decode_entries(&entries),
        None => (RuleList::defaults(), Vec::new()),
    };
    Ok((
        Config {
            flags: doc.flags,
            rules,
        },
        errors,
    ))
}

pub(crate) fn config_to_json(config: &Config) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ConfigDocumentRef {
        flags: config.flags,
        rules: pairs(&config.rules),
    })
}

fn pairs(rules: &RuleList) -> Vec<(&str, i64)> {
    rules
        .iter()
        .map(|r| (r.pattern.as_str(), r.score))
        .collect()
}

fn decode_entries(entries: &[Value]) -> (RuleList, Vec<RuleError>) {
    let mut rules = RuleList::new();
    let mut errors = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        match decode_entry(entry) {
            Ok(rule) => rules.append(rule),
            Err(reason) => errors.push(RuleError::parse_at_entry(i, &entry.to_string(), reason)),
        }
    }
    (rules, errors)
}

fn decode_entry(entry: &Value) -> Result<RuleSpec, &'static str> {
    let [pattern, score] = entry
        .as_array()
        .map(Vec::as_slice)
        .and_then(|pair| <&[Value; 2]>::try_from(pair).ok())
        .ok_or("expected a [pattern, score] pair")?;
    let pattern = pattern.as_str().ok_or("pattern is not a string")?;
    let score = score.as_i64().ok_or("score is not an integer")?;
    if score > MAX_SCORE {
        return Err("score exceeds the maximum");
    }
    Ok(RuleSpec::new(pattern, score))
}
