//! Standard and emergency swap-target selection.

use super::engine::{SelectionEngine, SelectionRule};
use crate::sprint::{ActiveItem, Priority};

/// Score added to any item that is not "To Do", so started work is only
/// displaced when nothing untouched fits.
pub const STATUS_PENALTY: f64 = 100.0;

/// What the swap rules need to know about the incoming ticket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapContext {
    /// Story points the incoming ticket needs.
    pub needed_sp: f64,
    /// Priority rank of the incoming ticket.
    pub candidate_rank: u8,
}

impl SwapContext {
    pub fn new(needed_sp: f64, candidate_priority: &Priority) -> Self {
        Self {
            needed_sp,
            candidate_rank: candidate_priority.rank(),
        }
    }
}

/// `|story_points - needed| + status penalty`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FitScore;

impl SelectionRule<ActiveItem, SwapContext> for FitScore {
    fn score(&self, item: &ActiveItem, ctx: &SwapContext) -> f64 {
        let penalty = if item.status.is_to_do() {
            0.0
        } else {
            STATUS_PENALTY
        };
        (item.story_points - ctx.needed_sp).abs() + penalty
    }
}

/// Least valuable first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByPriorityRank;

impl SelectionRule<ActiveItem, SwapContext> for ByPriorityRank {
    fn score(&self, item: &ActiveItem, _ctx: &SwapContext) -> f64 {
        f64::from(item.priority.rank())
    }
}

/// Smallest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct BySize;

impl SelectionRule<ActiveItem, SwapContext> for BySize {
    fn score(&self, item: &ActiveItem, _ctx: &SwapContext) -> f64 {
        item.story_points
    }
}

/// Picks which committed item to remove so a new ticket can enter.
///
/// Two modes share one engine type:
///
/// - **standard**: open items whose priority does not outrank the
///   candidate, scored by [`FitScore`].
/// - **emergency**: "To Do" items only, least valuable then smallest.
///
/// In both modes ties go to the item that appears first in the input.
///
/// # Examples
///
/// ```
/// use u_replan::sprint::{ActiveItem, ItemStatus, Priority};
/// use u_replan::swap::SwapSelector;
///
/// let items = vec![
///     ActiveItem::new("1", "Refactor", 5.0, Priority::Low, ItemStatus::ToDo),
///     ActiveItem::new("2", "Checkout", 5.0, Priority::High, ItemStatus::ToDo),
/// ];
/// let selector = SwapSelector::new();
/// let target = selector.standard(5.0, &Priority::Medium, &items).unwrap();
/// assert_eq!(target.id, "1");
/// ```
pub struct SwapSelector {
    standard: SelectionEngine<ActiveItem, SwapContext>,
    emergency: SelectionEngine<ActiveItem, SwapContext>,
}

impl SwapSelector {
    pub fn new() -> Self {
        Self {
            standard: SelectionEngine::new().with_rule(FitScore),
            emergency: SelectionEngine::new()
                .with_rule(ByPriorityRank)
                .with_rule(BySize),
        }
    }

    /// Best item to trade for a ticket of `needed_sp` points at
    /// `candidate_priority`, or `None` when nothing is eligible.
    ///
    /// Closed items are never candidates, and neither is anything ranked
    /// above the incoming ticket.
    pub fn standard<'a>(
        &self,
        needed_sp: f64,
        candidate_priority: &Priority,
        items: &'a [ActiveItem],
    ) -> Option<&'a ActiveItem> {
        let ctx = SwapContext::new(needed_sp, candidate_priority);
        self.standard
            .select_best_where(items, &ctx, |item| {
                !item.status.is_closed() && item.priority.rank() <= ctx.candidate_rank
            })
            .map(|idx| &items[idx])
    }

    /// Item to drop for an emergency ticket, or `None` when no "To Do"
    /// item exists. In-progress work is never interrupted here.
    pub fn emergency<'a>(&self, items: &'a [ActiveItem]) -> Option<&'a ActiveItem> {
        let ctx = SwapContext {
            needed_sp: 0.0,
            candidate_rank: 0,
        };
        self.emergency
            .select_best_where(items, &ctx, |item| item.status.is_to_do())
            .map(|idx| &items[idx])
    }
}

impl Default for SwapSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard selection with a default [`SwapSelector`].
pub fn find_swap_candidate<'a>(
    needed_sp: f64,
    candidate_priority: &Priority,
    items: &'a [ActiveItem],
) -> Option<&'a ActiveItem> {
    SwapSelector::new().standard(needed_sp, candidate_priority, items)
}

/// Emergency selection with a default [`SwapSelector`].
pub fn find_emergency_swap(items: &[ActiveItem]) -> Option<&ActiveItem> {
    SwapSelector::new().emergency(items)
}
