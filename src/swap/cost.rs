//! Context-switch cost of displacing a committed item.

use crate::sprint::{ActiveItem, ItemStatus};

/// Days lost when an in-progress item is pulled out of the sprint.
pub const IN_PROGRESS_SWITCH_DAYS: f64 = 2.5;

/// Days lost for any other item.
pub const DEFAULT_SWITCH_DAYS: f64 = 0.5;

/// Estimated team-days lost by removing `item` from the sprint.
///
/// Informational only: the value is reported in a recommendation's impact
/// facts and never influences which action is chosen.
pub fn switch_cost(item: &ActiveItem) -> f64 {
    match item.status {
        ItemStatus::InProgress => IN_PROGRESS_SWITCH_DAYS,
        _ => DEFAULT_SWITCH_DAYS,
    }
}
