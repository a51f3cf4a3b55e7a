//! Boundary with the external risk-scoring collaborator.

use super::types::{round1, RiskSignals};
use crate::sprint::{SprintState, WorkItemCandidate};

/// Supplies the risk bundle for a candidate in a given sprint.
///
/// Implementations typically wrap trained models. The decision core only
/// ever sees the returned numbers; it never reaches back into the provider
/// mid-evaluation.
///
/// # Examples
///
/// ```
/// use u_replan::risk::{RiskProvider, RiskSignals};
/// use u_replan::sprint::{SprintState, WorkItemCandidate};
///
/// struct Fixed(RiskSignals);
///
/// impl RiskProvider for Fixed {
///     fn assess(&self, _c: &WorkItemCandidate, _s: &SprintState) -> RiskSignals {
///         self.0
///     }
/// }
/// ```
pub trait RiskProvider: Send + Sync {
    fn assess(&self, candidate: &WorkItemCandidate, sprint: &SprintState) -> RiskSignals;
}

impl<F> RiskProvider for F
where
    F: Fn(&WorkItemCandidate, &SprintState) -> RiskSignals + Send + Sync,
{
    fn assess(&self, candidate: &WorkItemCandidate, sprint: &SprintState) -> RiskSignals {
        self(candidate, sprint)
    }
}

/// Deterministic stand-in used when no trained model is available.
///
/// - schedule: `min(100, story_points / max(1, days_remaining) * 50)`
/// - quality: a flat 40% defect estimate
/// - velocity: a flat 10% drag
/// - free capacity: left to the sprint snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicRiskProvider;

impl HeuristicRiskProvider {
    pub const QUALITY_ESTIMATE: f64 = 40.0;
    pub const VELOCITY_ESTIMATE: f64 = -10.0;
}

impl RiskProvider for HeuristicRiskProvider {
    fn assess(&self, candidate: &WorkItemCandidate, sprint: &SprintState) -> RiskSignals {
        let days = sprint.days_remaining.max(1.0);
        let schedule = (candidate.story_points as f64 / days * 50.0).min(100.0);
        RiskSignals::new(
            round1(schedule),
            Self::QUALITY_ESTIMATE,
            Self::VELOCITY_ESTIMATE,
        )
    }
}

/// Sign-corrects a raw productivity-model output into `velocity_change`.
///
/// Adding work mid-sprint never speeds a team up, so a positive raw value is
/// a calibration artifact: the magnitude is kept and the sign forced
/// negative. Raw values are clamped to `[-1, 1]`, scaled to percent and
/// rounded to one decimal.
pub fn normalize_velocity_change(raw: f64) -> f64 {
    let clamped = raw.clamp(-1.0, 1.0);
    // avoid -0.0 leaking into display strings
    let pct = round1(-clamped.abs() * 100.0);
    if pct == 0.0 {
        0.0
    } else {
        pct
    }
}
