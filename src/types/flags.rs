/// Per-pass switches read from configuration.
///
/// A pass copies these once and never observes a change mid-pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default))]
pub struct Flags {
    /// Order `irc.<network>.<channel>` as if it were `irc.server.<network>.<channel>`.
    pub group_irc: bool,
    /// Compare segment tokens without case folding.
    pub case_sensitive: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            group_irc: true,
            case_sensitive: false,
        }
    }
}
