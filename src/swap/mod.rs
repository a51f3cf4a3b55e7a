//! Swap-target selection.
//!
//! When a sprint is full, admitting a new ticket means removing something.
//! This module decides what. Selection is built on a small lexicographic
//! rule engine ([`SelectionEngine`]): rules are applied in order, later
//! rules only break ties, and items still tied keep their input order.
//!
//! The switch-cost estimate lives here too; it describes the price of a
//! swap but never chooses one.

mod cost;
mod engine;
mod selector;

pub use cost::{switch_cost, DEFAULT_SWITCH_DAYS, IN_PROGRESS_SWITCH_DAYS};
pub use engine::{SelectionEngine, SelectionRule};
pub use selector::{
    find_emergency_swap, find_swap_candidate, ByPriorityRank, BySize, FitScore, SwapContext,
    SwapSelector, STATUS_PENALTY,
};
