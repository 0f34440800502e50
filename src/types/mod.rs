mod error;
mod flags;
mod item;
mod order_key;
mod pass_report;
mod rule;
mod rule_list;
mod ruleset;

pub use error::{EditError, PatternError, RuleError};
pub use flags::Flags;
pub use item::Item;
pub use order_key::OrderKey;
pub use pass_report::{PassReport, Swap};
pub(crate) use rule::CompiledRule;
pub use rule::{MAX_SCORE, RuleSpec};
pub use rule_list::{RuleEdit, RuleList, edit_rules};
pub use ruleset::{Compiled, RuleSet, RuleSetBuilder};
