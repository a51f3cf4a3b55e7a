//! Presentation layer for recommendations.
//!
//! Turns a [`RecommendationResult`] and the risk bundle into a card the user
//! reads: headline, paragraph, call-to-action verb, icon and a one-line risk
//! summary. The confidence colour is computed from the numbers alone.
//!
//! Builders are grouped by action family:
//!
//! | Family | Actions |
//! |---|---|
//! | add | ADD, OVERLOAD |
//! | swap | SWAP, FORCE_SWAP |
//! | defer | DEFER |
//! | split | SPLIT |

mod builders;
mod cards;
mod types;

pub use cards::{risk_cards, MetricCard, RiskCards, WORK_HOURS_PER_DAY};
pub use types::{ConfidenceColor, ExplanationResult};

use crate::cascade::{Action, Impact, RecommendationResult};
use crate::risk::RiskSignals;
use crate::sprint::{ActiveItem, WorkItemCandidate};
use builders::Narrative;

/// Explains a cascade result.
///
/// # Examples
///
/// ```
/// use u_replan::cascade::{Action, DecisionCascade};
/// use u_replan::explain::{explain, ConfidenceColor};
/// use u_replan::risk::RiskSignals;
/// use u_replan::sprint::{Priority, SprintState, WorkItemCandidate};
///
/// let ticket = WorkItemCandidate::new("Add CSV export", 3, Priority::Medium);
/// let risk = RiskSignals::new(10.0, 10.0, -2.0);
/// let result = DecisionCascade::default()
///     .evaluate(&ticket, &SprintState::new(8.0, 20.0, 30.0), &[], &risk);
///
/// let card = explain(&result, &risk, &ticket);
/// assert_eq!(card.action_verb, "Add to Sprint");
/// assert_eq!(card.confidence_color, ConfidenceColor::Green);
/// ```
pub fn explain(
    result: &RecommendationResult,
    risk: &RiskSignals,
    candidate: &WorkItemCandidate,
) -> ExplanationResult {
    let n = Narrative {
        reasoning: result.reasoning(),
        target: result.target_item(),
        impact: result.impact(),
        risk,
        candidate,
        color: ConfidenceColor::from_signals(risk),
    };
    explain_action(result.action(), &n)
}

/// Explains a recommendation known only by its raw action label, for
/// example one read back from a decision log.
///
/// A label that names no known action gets a generic "Review" card built
/// from `reasoning`. This never fails.
pub fn explain_label(
    label: &str,
    reasoning: &str,
    target: Option<&ActiveItem>,
    impact: &Impact,
    risk: &RiskSignals,
    candidate: &WorkItemCandidate,
) -> ExplanationResult {
    let n = Narrative {
        reasoning,
        target,
        impact,
        risk,
        candidate,
        color: ConfidenceColor::from_signals(risk),
    };
    match label.parse::<Action>() {
        Ok(action) => explain_action(action, &n),
        Err(err) => {
            tracing::debug!(%err, "falling back to review card");
            builders::explain_review(&n, label.trim())
        }
    }
}

fn explain_action(action: Action, n: &Narrative<'_>) -> ExplanationResult {
    match action {
        Action::Add => builders::explain_add(n),
        Action::Overload => builders::explain_overload(n),
        Action::Swap => builders::explain_swap(n, false),
        Action::ForceSwap => builders::explain_swap(n, true),
        Action::Defer => builders::explain_defer(n),
        Action::Split => builders::explain_split(n),
    }
}
