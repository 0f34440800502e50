mod command;
mod compile;
mod config;
mod engine;
mod error;
pub mod host;
mod order;
pub mod parse;
mod plan;
#[cfg(feature = "json")]
pub mod serial;
pub mod store;
mod types;

pub use command::{Command, Outcome};
pub use config::{Config, Loaded};
pub use engine::{Engine, PassError, plan_pass, run_pass};
pub use error::AutosortError;
pub use host::{BufferHost, HostError, MemoryHost};
pub use order::{build_key, group_irc_segments, order, segments};
pub use parse::{ParseError, parse_command, parse_rules};
pub use plan::{apply_plan, plan};
pub use store::{RuleStore, StoreError};
pub use types::{
    Compiled, EditError, Flags, Item, MAX_SCORE, OrderKey, PassReport, PatternError, RuleEdit,
    RuleError, RuleList, RuleSet, RuleSetBuilder, RuleSpec, Swap, edit_rules,
};
pub(crate) use types::CompiledRule;
