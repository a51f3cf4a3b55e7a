//! Backlog triage.
//!
//! Evaluates many candidates against one sprint snapshot. Each candidate is
//! judged on its own, as if it were the only one proposed; admitting one
//! does not change the snapshot seen by the next.

use crate::cascade::{DecisionCascade, RecommendationResult};
use crate::risk::RiskProvider;
use crate::sprint::{ActiveItem, SprintState, WorkItemCandidate};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scores every candidate with `provider` and runs it through `cascade`.
///
/// Results are returned in input order. With the `parallel` feature the
/// candidates are evaluated on the rayon pool; the output is identical
/// either way because evaluation is pure.
pub fn triage<P: RiskProvider>(
    cascade: &DecisionCascade,
    candidates: &[WorkItemCandidate],
    sprint: &SprintState,
    active_items: &[ActiveItem],
    provider: &P,
) -> Vec<RecommendationResult> {
    let judge = |candidate: &WorkItemCandidate| {
        let risk = provider.assess(candidate, sprint);
        cascade.evaluate(candidate, sprint, active_items, &risk)
    };

    tracing::debug!(candidates = candidates.len(), "triaging backlog");
    judge_all(candidates, judge)
}

#[cfg(feature = "parallel")]
fn judge_all<F>(candidates: &[WorkItemCandidate], judge: F) -> Vec<RecommendationResult>
where
    F: Fn(&WorkItemCandidate) -> RecommendationResult + Send + Sync,
{
    candidates.par_iter().map(judge).collect()
}

#[cfg(not(feature = "parallel"))]
fn judge_all<F>(candidates: &[WorkItemCandidate], judge: F) -> Vec<RecommendationResult>
where
    F: Fn(&WorkItemCandidate) -> RecommendationResult,
{
    candidates.iter().map(judge).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::Action;
    use crate::risk::{HeuristicRiskProvider, RiskSignals};
    use crate::sprint::{ItemStatus, Priority};

    #[test]
    fn test_triage_preserves_order() {
        let cascade = DecisionCascade::default();
        let sprint = SprintState::new(8.0, 20.0, 30.0);
        let candidates = vec![
            WorkItemCandidate::new("small", 2, Priority::Medium),
            WorkItemCandidate::new("huge", 21, Priority::Medium),
            WorkItemCandidate::new("urgent", 3, Priority::Critical),
        ];
        let items = vec![ActiveItem::new("1", "X", 3.0, Priority::Low, ItemStatus::ToDo)];
        let provider = |_c: &WorkItemCandidate, _s: &SprintState| RiskSignals::new(10.0, 10.0, -2.0);

        let results = triage(&cascade, &candidates, &sprint, &items, &provider);
        let actions: Vec<Action> = results.iter().map(|r| r.action()).collect();
        assert_eq!(actions, vec![Action::Add, Action::Split, Action::ForceSwap]);
    }

    #[test]
    fn test_triage_with_heuristic_provider() {
        let cascade = DecisionCascade::default();
        // 5 SP over 3 days scores 83% spillover under the heuristic
        let sprint = SprintState::new(3.0, 0.0, 30.0);
        let candidates = vec![WorkItemCandidate::new("T", 5, Priority::Medium)];
        let results = triage(&cascade, &candidates, &sprint, &[], &HeuristicRiskProvider);
        assert_eq!(results[0].action(), Action::Defer);
        assert!(results[0].reasoning().contains("schedule risk 83%"));
    }

    #[test]
    fn test_triage_empty() {
        let cascade = DecisionCascade::default();
        let sprint = SprintState::new(8.0, 0.0, 30.0);
        assert!(triage(&cascade, &[], &sprint, &[], &HeuristicRiskProvider).is_empty());
    }
}
