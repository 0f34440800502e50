use std::fmt;
use std::time::Duration;

/// One host call: move the item identified by `id` to 1-based `position`
/// by exchanging it with whatever sits there now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swap {
    pub id: String,
    pub position: usize,
}

impl Swap {
    pub fn new(id: impl Into<String>, position: usize) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "swap {} {}", self.id, self.position)
    }
}

/// What one ordering pass did, returned by
/// [`run_pass()`](crate::run_pass) for logging.
#[derive(Debug, Clone)]
#[must_use]
pub struct PassReport {
    order: Vec<String>,
    swaps: Vec<Swap>,
    duration: Duration,
}

impl PassReport {
    pub(crate) fn new(order: Vec<String>, swaps: Vec<Swap>, duration: Duration) -> Self {
        Self {
            order,
            swaps,
            duration,
        }
    }

    /// Item names in the target order.
    #[must_use]
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// The swap calls actually issued to the host, in issue order.
    #[must_use]
    pub fn swaps(&self) -> &[Swap] {
        &self.swaps
    }

    /// Wall-clock duration of the pass, host calls included.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sorted {} items with {} swaps in {:?}",
            self.order.len(),
            self.swaps.len(),
            self.duration
        )
    }
}
