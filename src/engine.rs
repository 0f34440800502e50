use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{info, warn};

use crate::host::BufferHost;
use crate::store::{RuleStore, StoreError};
use crate::{
    AutosortError, Command, Config, Flags, Item, OrderKey, Outcome, PassReport, RuleError,
    RuleSet,
};

/// A pass that could not complete because the host failed.
#[derive(Debug, Error)]
pub enum PassError<E: std::error::Error + 'static> {
    #[error("failed to list items: {0}")]
    List(#[source] E),

    #[error("swap {completed} of {total} failed: {source}")]
    Swap {
        completed: usize,
        total: usize,
        #[source]
        source: E,
    },
}

/// Compute the target order for `items` and the swaps that realise it,
/// without touching any host.
#[must_use]
pub fn plan_pass(
    items: Vec<Item>,
    rules: &RuleSet,
    flags: Flags,
) -> (Vec<Item>, Vec<crate::Swap>) {
    let target = crate::order::order(items, rules, flags);
    let swaps = crate::plan::plan(&target);
    (target, swaps)
}

/// Run one ordering pass against `host`: snapshot its items, order them,
/// and issue one swap per position.
///
/// The same snapshot is used for ordering and for planning. The host must
/// not add, remove or rename items until the pass returns.
///
/// # Errors
///
/// Returns [`PassError`] if the host fails to list items or rejects a swap.
pub fn run_pass<H: BufferHost + ?Sized>(
    host: &mut H,
    rules: &RuleSet,
    flags: Flags,
) -> Result<PassReport, PassError<H::Error>> {
    let start = Instant::now();
    let items = host.list_items().map_err(PassError::List)?;
    let (target, swaps) = plan_pass(items, rules, flags);

    crate::plan::apply_plan(host, &swaps).map_err(|(completed, source)| PassError::Swap {
        completed,
        total: swaps.len(),
        source,
    })?;

    let order = target.into_iter().map(|item| item.name().to_owned()).collect();
    let report = PassReport::new(order, swaps, start.elapsed());
    info!(
        items = report.order().len(),
        swaps = report.swaps().len(),
        elapsed = ?report.duration(),
        "sorted items"
    );
    Ok(report)
}

/// The event-driven front of the crate.
///
/// Holds one consistent snapshot of flags and compiled rules. Collaborators
/// call [`on_config_changed`](Self::on_config_changed) when stored
/// configuration may have changed and
/// [`on_items_changed`](Self::on_items_changed) when the item list did; the
/// engine never registers for anything itself.
#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
    ruleset: Arc<RuleSet>,
}

impl Engine {
    /// Build an engine from `config`. Rules with invalid patterns are
    /// dropped and logged.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let ruleset = Arc::new(config.rules.compile().into_ruleset());
        Self { config, ruleset }
    }

    /// Build an engine from whatever `store` holds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    pub fn load<S: RuleStore + ?Sized>(store: &S) -> Result<(Self, Vec<RuleError>), StoreError> {
        let mut engine = Self::new(Config {
            flags: Flags::default(),
            rules: crate::RuleList::new(),
        });
        let errors = engine.on_config_changed(store)?;
        Ok((engine, errors))
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn flags(&self) -> Flags {
        self.config.flags
    }

    /// The compiled rules used by the next pass.
    #[must_use]
    pub fn ruleset(&self) -> Arc<RuleSet> {
        Arc::clone(&self.ruleset)
    }

    /// Replace the configuration and recompile.
    ///
    /// Returns the rules dropped for having invalid patterns.
    pub fn set_config(&mut self, config: Config) -> Vec<RuleError> {
        let (ruleset, errors) = config.rules.compile().into_parts();
        self.ruleset = Arc::new(ruleset);
        self.config = config;
        errors
    }

    /// Reload configuration from `store`.
    ///
    /// Returns every per-rule diagnostic, both from reading and from
    /// compiling.
    ///
    /// # Errors
    ///
    /// If the store cannot be read, the previous configuration and rules
    /// stay in effect and the [`StoreError`] is returned.
    pub fn on_config_changed<S: RuleStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> Result<Vec<RuleError>, StoreError> {
        let loaded = match store.load() {
            Ok(loaded) => loaded,
            Err(err) => {
                warn!(
                    %err,
                    rules = self.ruleset.len(),
                    "configuration load failed; keeping previous rules"
                );
                return Err(err);
            }
        };

        // compile errors are logged where they are found
        let mut errors = loaded.errors;
        for err in &errors {
            warn!(%err, "ignoring malformed stored rule");
        }
        errors.extend(self.set_config(loaded.config));
        Ok(errors)
    }

    /// Run one pass over `host` with the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`PassError`] if the host fails.
    pub fn on_items_changed<H: BufferHost + ?Sized>(
        &self,
        host: &mut H,
    ) -> Result<PassReport, PassError<H::Error>> {
        run_pass(host, &self.ruleset, self.config.flags)
    }

    /// The key a name would be sorted by right now.
    #[must_use]
    pub fn explain(&self, name: &str) -> OrderKey {
        crate::order::build_key(name, &self.ruleset, self.config.flags)
    }

    /// Execute a command.
    ///
    /// Rule edits are saved to `store` and take effect, followed by a pass
    /// over `host`. `sort` runs a pass directly.
    ///
    /// # Errors
    ///
    /// Returns [`AutosortError`] if an edit is out of range, the store
    /// rejects the new configuration, or the pass fails. A failed edit or
    /// save leaves the engine unchanged.
    pub fn execute<S, H>(
        &mut self,
        command: Command,
        store: &mut S,
        host: &mut H,
    ) -> Result<Outcome, AutosortError>
    where
        S: RuleStore + ?Sized,
        H: BufferHost + ?Sized,
    {
        let mut rules = self.config.rules.clone();
        let outcome = command.apply(&mut rules)?;

        match outcome {
            Outcome::SortRequested => {
                self.on_items_changed(host)?;
            }
            Outcome::RulesChanged => {
                let config = Config {
                    flags: self.config.flags,
                    rules,
                };
                store.save(&config)?;
                self.set_config(config);
                self.on_items_changed(host)?;
            }
            Outcome::Listing(_) => {}
        }

        Ok(outcome)
    }

    /// Parse and execute a command line such as `rules delete 2`.
    ///
    /// # Errors
    ///
    /// Returns [`AutosortError::Parse`] for malformed input, otherwise as
    /// [`execute`](Self::execute).
    pub fn run_command<S, H>(
        &mut self,
        line: &str,
        store: &mut S,
        host: &mut H,
    ) -> Result<Outcome, AutosortError>
    where
        S: RuleStore + ?Sized,
        H: BufferHost + ?Sized,
    {
        let command = crate::parse::parse_command(line)?;
        self.execute(command, store, host)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::store::MemoryStore;
    use crate::{RuleList, RuleSpec, Swap};

    struct BrokenStore;

    impl RuleStore for BrokenStore {
        fn load(&self) -> Result<crate::Loaded, StoreError> {
            Err(StoreError::Unavailable("disk on fire".into()))
        }

        fn save(&mut self, _config: &Config) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disk on fire".into()))
        }
    }

    #[test]
    fn run_pass_reports_swaps() {
        let mut host = MemoryHost::from_names(["irc.server.libera", "core.weechat"]);
        let rules = RuleList::defaults().compile().into_ruleset();
        let report = run_pass(&mut host, &rules, Flags::default()).unwrap();
        assert_eq!(
            report.swaps(),
            [
                Swap::new("core.weechat", 1),
                Swap::new("irc.server.libera", 2)
            ]
        );
        assert_eq!(host.names(), ["core.weechat", "irc.server.libera"]);
    }

    #[test]
    fn failed_reload_keeps_previous_rules() {
        let mut engine = Engine::default();
        let before = engine.ruleset();
        assert!(engine.on_config_changed(&BrokenStore).is_err());
        assert!(Arc::ptr_eq(&before, &engine.ruleset()));
        assert_eq!(engine.config(), &Config::default());
    }

    #[test]
    fn reload_replaces_snapshot() {
        let mut engine = Engine::default();
        let store = MemoryStore::new(Config {
            flags: Flags {
                group_irc: false,
                case_sensitive: true,
            },
            rules: RuleList::from(vec![RuleSpec::new("core", 0), RuleSpec::new("(", 1)]),
        });
        let errors = engine.on_config_changed(&store).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(engine.ruleset().rules(), [("core", 0)]);
        assert!(!engine.flags().group_irc);
    }

    struct LossyStore;

    impl RuleStore for LossyStore {
        fn load(&self) -> Result<crate::Loaded, StoreError> {
            Ok(crate::Loaded {
                config: Config {
                    flags: Flags::default(),
                    rules: RuleList::from(vec![RuleSpec::new("core", 0), RuleSpec::new("irc[", 1)]),
                },
                errors: vec![RuleError::Parse {
                    location: "entry 2".into(),
                    input: "7".into(),
                    reason: "expected a [pattern, score] pair".into(),
                }],
            })
        }

        fn save(&mut self, _config: &Config) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn reload_reports_each_dropped_rule_once() {
        let mut engine = Engine::default();
        let errors = engine.on_config_changed(&LossyStore).unwrap();
        assert!(matches!(
            &errors[..],
            [RuleError::Parse { .. }, RuleError::Compile { index: 1, .. }]
        ));
        assert_eq!(engine.ruleset().rules(), [("core", 0)]);
    }

    #[test]
    fn failed_save_leaves_engine_unchanged() {
        let mut engine = Engine::default();
        let mut host = MemoryHost::default();
        let err = engine
            .run_command("rules delete 0", &mut BrokenStore, &mut host)
            .unwrap_err();
        assert!(matches!(err, AutosortError::Store(_)));
        assert_eq!(engine.config().rules, RuleList::defaults());
    }

    #[test]
    fn explain_shows_key() {
        let engine = Engine::default();
        let key = engine.explain("irc.libera.#rust");
        let scores: Vec<i64> = key.parts().iter().map(|(s, _)| *s).collect();
        assert_eq!(scores, [2, 1, 3, 3]);
    }
}
