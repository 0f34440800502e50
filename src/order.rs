use crate::{Flags, Item, OrderKey, RuleSet};

const IRC: &str = "irc";
const SERVER: &str = "server";
const IRC_RAW: &str = "irc_raw";

/// Split `name` into segments, applying the IRC grouping rewrite when
/// `group_irc` is set.
///
/// The rewrite turns `irc.<network>.<channel>` into
/// `irc.server.<network>.<channel>` so channels sort under their server
/// buffer. `irc.server.*` and `irc.irc_raw` are left alone, as is any
/// single-segment name. The item's own name is never touched.
#[must_use]
pub fn segments(name: &str, group_irc: bool) -> Vec<&str> {
    let mut segments: Vec<&str> = name.split('.').collect();
    if group_irc {
        group_irc_segments(&mut segments);
    }
    segments
}

/// The grouping rewrite on its own. Idempotent: a rewritten sequence has
/// `server` at index 1 and is therefore never rewritten again.
pub fn group_irc_segments(segments: &mut Vec<&str>) {
    let rewrite = matches!(
        segments.as_slice(),
        [first, second, ..] if *first == IRC && *second != SERVER && *second != IRC_RAW
    );
    if rewrite {
        segments.insert(1, SERVER);
    }
}

pub(crate) fn score(prefix: &str, rules: &RuleSet) -> i64 {
    rules
        .rules
        .iter()
        .find(|rule| rule.matches(prefix))
        .map_or(rules.fallback, |rule| rule.score)
}

/// Build the composite key for a dotted name.
///
/// Each segment is scored by the dotted prefix that ends with it, so
/// `irc.server.libera` is scored as `irc`, `irc.server`, `irc.server.libera`.
#[must_use]
pub fn build_key(name: &str, rules: &RuleSet, flags: Flags) -> OrderKey {
    let segments = segments(name, flags.group_irc);
    let mut key = OrderKey::with_capacity(segments.len());
    let mut prefix = String::with_capacity(name.len() + SERVER.len() + 1);

    for segment in segments {
        if !prefix.is_empty() {
            prefix.push('.');
        }
        prefix.push_str(segment);

        let token = if flags.case_sensitive {
            segment.to_owned()
        } else {
            segment.to_lowercase()
        };
        key.push(score(&prefix, rules), token);
    }

    key
}

/// Stable-sort `items` by their keys and return the target order.
///
/// Items whose keys compare equal keep their input order, so sorting an
/// already sorted list is a no-op.
#[must_use]
pub fn order(items: Vec<Item>, rules: &RuleSet, flags: Flags) -> Vec<Item> {
    let mut keyed: Vec<(OrderKey, Item)> = items
        .into_iter()
        .map(|item| (build_key(item.name(), rules, flags), item))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, item)| item).collect()
}
