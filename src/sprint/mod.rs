//! Sprint domain model.
//!
//! The read-only inputs of an admission decision: the candidate ticket,
//! the items already committed, and the capacity snapshot. Priority ranking
//! lives here because every selection rule shares it.

mod item;
mod types;

pub use item::{ActiveItem, SprintState, WorkItemCandidate};
pub use types::{ItemStatus, Priority};
