use tracing::debug;

use crate::host::BufferHost;
use crate::{Item, Swap};

/// Turn a target order into position swaps, one per position.
///
/// Issued in order, `swap(target[k], k + 1)` leaves positions `1..=k+1`
/// holding `target[..=k]`: everything before `k` is already final, so the
/// target item can only be at `k + 1` or after it. The plan always has
/// exactly `target.len()` entries, including no-op swaps.
#[must_use]
pub fn plan(target: &[Item]) -> Vec<Swap> {
    target
        .iter()
        .enumerate()
        .map(|(i, item)| Swap::new(item.id(), i + 1))
        .collect()
}

/// Issue every swap in `plan` to `host`, in order.
///
/// Stops at the first host error. Returns how many swaps were issued
/// successfully before that.
///
/// # Errors
///
/// Propagates the host's error together with the count of completed swaps.
pub fn apply_plan<H: BufferHost + ?Sized>(
    host: &mut H,
    plan: &[Swap],
) -> Result<usize, (usize, H::Error)> {
    for (done, swap) in plan.iter().enumerate() {
        debug!(id = %swap.id, position = swap.position, "swap");
        host.swap_to_position(&swap.id, swap.position)
            .map_err(|e| (done, e))?;
    }
    Ok(plan.len())
}
