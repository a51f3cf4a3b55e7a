//! Risk signals.
//!
//! The decision core does not compute risk; it receives four numbers from an
//! external scoring collaborator and trusts them. This module defines that
//! bundle, the numeric bands used to label it, an advisory composite score,
//! and the [`RiskProvider`] seam with a deterministic heuristic fallback.

mod provider;
mod summary;
mod types;

pub use provider::{normalize_velocity_change, HeuristicRiskProvider, RiskProvider};
pub use summary::{OverallRisk, RiskSummary};
pub use types::{RiskLevel, RiskSignals};
