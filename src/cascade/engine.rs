//! Cascade runner.

use super::config::CascadeConfig;
use super::rules::{standard_rules, CascadeRule, Evaluation, NoOptionLeft};
use super::types::{RecommendationResult, RuleId};
use crate::risk::RiskSignals;
use crate::sprint::{ActiveItem, SprintState, WorkItemCandidate};
use crate::swap::SwapSelector;

/// The admission decision cascade.
///
/// Holds the ordered rule list, the swap selector and the thresholds.
/// Evaluation is a pure function of its arguments: nothing is cached between
/// calls, so one cascade can be shared freely across threads.
///
/// # Examples
///
/// ```
/// use u_replan::cascade::{Action, CascadeConfig, DecisionCascade};
/// use u_replan::risk::RiskSignals;
/// use u_replan::sprint::{Priority, SprintState, WorkItemCandidate};
///
/// let cascade = DecisionCascade::new(CascadeConfig::default());
/// let ticket = WorkItemCandidate::new("Add CSV export", 3, Priority::Medium);
/// let sprint = SprintState::new(8.0, 20.0, 30.0);
/// let risk = RiskSignals::new(20.0, 10.0, -5.0);
///
/// let result = cascade.evaluate(&ticket, &sprint, &[], &risk);
/// assert_eq!(result.action(), Action::Add);
/// ```
pub struct DecisionCascade {
    rules: Vec<Box<dyn CascadeRule>>,
    selector: SwapSelector,
    config: CascadeConfig,
}

impl DecisionCascade {
    /// Creates a cascade with the standard rule order.
    pub fn new(config: CascadeConfig) -> Self {
        Self {
            rules: standard_rules(),
            selector: SwapSelector::new(),
            config,
        }
    }

    pub fn config(&self) -> &CascadeConfig {
        &self.config
    }

    /// Rule identities in evaluation order.
    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Runs the rules top-down; the first rule that applies decides.
    pub fn evaluate(
        &self,
        candidate: &WorkItemCandidate,
        sprint: &SprintState,
        active_items: &[ActiveItem],
        risk: &RiskSignals,
    ) -> RecommendationResult {
        let ev = Evaluation::new(
            candidate,
            sprint,
            active_items,
            risk,
            &self.config,
            &self.selector,
        );

        for rule in &self.rules {
            if rule.applies(&ev) {
                let result = rule.decide(&ev);
                tracing::debug!(
                    rule = %rule.id(),
                    action = %result.action(),
                    title = %candidate.title,
                    story_points = candidate.story_points,
                    "cascade rule fired"
                );
                return result;
            }
            tracing::trace!(rule = %rule.id(), "cascade rule passed");
        }

        NoOptionLeft.decide(&ev)
    }
}

impl Default for DecisionCascade {
    fn default() -> Self {
        Self::new(CascadeConfig::default())
    }
}

/// One-shot evaluation with the given thresholds.
///
/// Equivalent to `DecisionCascade::new(config.clone()).evaluate(..)`.
pub fn evaluate(
    candidate: &WorkItemCandidate,
    sprint: &SprintState,
    active_items: &[ActiveItem],
    risk: &RiskSignals,
    config: &CascadeConfig,
) -> RecommendationResult {
    DecisionCascade::new(config.clone()).evaluate(candidate, sprint, active_items, risk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::Action;
    use crate::sprint::{ItemStatus, Priority};

    fn sprint(days: f64, load: f64, velocity: f64) -> SprintState {
        SprintState::new(days, load, velocity)
    }

    fn todo(id: &str, sp: f64, priority: Priority) -> ActiveItem {
        ActiveItem::new(id, format!("item-{id}"), sp, priority, ItemStatus::ToDo)
    }

    fn calm() -> RiskSignals {
        RiskSignals::new(20.0, 10.0, -5.0)
    }

    #[test]
    fn test_runway_exhausted_defers() {
        let c = WorkItemCandidate::new("T", 1, Priority::High);
        let r = DecisionCascade::default().evaluate(&c, &sprint(1.5, 0.0, 30.0), &[], &calm());
        assert_eq!(r.action(), Action::Defer);
        assert_eq!(r.rule(), RuleId::RunwayExhausted);
        assert!(r.reasoning().contains("1.5 days"));
    }

    #[test]
    fn test_runway_boundary_is_exclusive() {
        let c = WorkItemCandidate::new("T", 1, Priority::High);
        let r = DecisionCascade::default().evaluate(&c, &sprint(2.0, 0.0, 30.0), &[], &calm());
        assert_eq!(r.action(), Action::Add);
    }

    #[test]
    fn test_emergency_force_swap() {
        let c = WorkItemCandidate::new("Outage", 3, Priority::Critical);
        let items = vec![
            ActiveItem::new("1", "Started", 1.0, Priority::Lowest, ItemStatus::InProgress),
            todo("2", 5.0, Priority::Medium),
            todo("3", 2.0, Priority::Low),
        ];
        let risk = RiskSignals::new(95.0, 95.0, -80.0);
        let r = DecisionCascade::default().evaluate(&c, &sprint(1.0, 30.0, 30.0), &items, &risk);
        assert_eq!(r.action(), Action::ForceSwap);
        assert_eq!(r.rule(), RuleId::EmergencyBypass);
        assert_eq!(r.target_item().unwrap().id, "3");
        assert_eq!(r.impact()["emergency"].as_flag(), Some(true));
    }

    #[test]
    fn test_emergency_overload() {
        let c = WorkItemCandidate::new("Outage", 5, Priority::Highest);
        let items = vec![ActiveItem::new(
            "1",
            "Started",
            8.0,
            Priority::Low,
            ItemStatus::InProgress,
        )];
        let r = DecisionCascade::default().evaluate(&c, &sprint(6.0, 28.0, 30.0), &items, &calm());
        assert_eq!(r.action(), Action::Overload);
        assert!(r.target_item().is_none());
        assert_eq!(r.impact()["overload"].as_flag(), Some(true));
        assert_eq!(r.impact_number("over_capacity_sp"), Some(3.0));
        assert!(r
            .action_plan()
            .iter()
            .any(|s| s.contains("Notify stakeholders")));
    }

    #[test]
    fn test_emergency_ignores_capacity_and_size() {
        // Rule 0.5 runs before Rule 1 and Rule 3
        let c = WorkItemCandidate::new("Big outage", 21, Priority::Critical);
        let r = DecisionCascade::default().evaluate(&c, &sprint(3.0, 0.0, 60.0), &[], &calm());
        assert_eq!(r.action(), Action::Overload);
        assert_eq!(r.impact_number("over_capacity_sp"), Some(0.0));
    }

    #[test]
    fn test_overload_uses_provider_free_capacity() {
        let c = WorkItemCandidate::new("Outage", 3, Priority::Critical);
        let risk = calm().with_free_capacity(0.0);
        let r = DecisionCascade::default().evaluate(&c, &sprint(8.0, 0.0, 60.0), &[], &risk);
        assert_eq!(r.action(), Action::Overload);
        assert_eq!(r.impact_number("over_capacity_sp"), Some(3.0));
        assert!(r.reasoning().contains("3.0 SP over capacity"));
    }

    #[test]
    fn test_overload_within_capacity_still_notifies() {
        let c = WorkItemCandidate::new("Outage", 3, Priority::Critical);
        let r = DecisionCascade::default().evaluate(&c, &sprint(8.0, 0.0, 60.0), &[], &calm());
        assert_eq!(r.action(), Action::Overload);
        assert_eq!(r.impact()["overload"].as_flag(), Some(true));
        assert_eq!(r.impact_number("over_capacity_sp"), Some(0.0));
        assert!(!r.reasoning().contains("over capacity"));
        assert!(r.action_plan().iter().all(|s| !s.contains("over capacity")));
        assert!(r
            .action_plan()
            .iter()
            .any(|s| s.contains("Notify stakeholders of the emergency insertion")));
    }

    #[test]
    fn test_emergency_skips_in_review_item() {
        let c = WorkItemCandidate::new("Outage", 3, Priority::Critical);
        let items = vec![
            ActiveItem::new("1", "Reviewing", 1.0, Priority::Lowest, ItemStatus::InReview),
            todo("2", 5.0, Priority::High),
        ];
        let r = DecisionCascade::default().evaluate(&c, &sprint(8.0, 30.0, 30.0), &items, &calm());
        assert_eq!(r.action(), Action::ForceSwap);
        assert_eq!(r.target_item().unwrap().id, "2");
    }

    #[test]
    fn test_capacity_exactly_covering_ticket_adds() {
        let c = WorkItemCandidate::new("T", 3, Priority::Medium);
        let r = DecisionCascade::default().evaluate(&c, &sprint(8.0, 27.0, 30.0), &[], &calm());
        assert_eq!(r.impact_number("free_capacity"), Some(3.0));
        assert_eq!(r.action(), Action::Add);
        assert_eq!(r.rule(), RuleId::CapacityAvailable);
    }

    #[test]
    fn test_caution_threshold_is_exclusive() {
        let c = WorkItemCandidate::new("T", 3, Priority::Medium);
        let risk = RiskSignals::new(10.0, 50.0, -5.0);
        let r = DecisionCascade::default().evaluate(&c, &sprint(8.0, 10.0, 30.0), &[], &risk);
        assert_eq!(r.action(), Action::Add);
        assert!(!r.reasoning().contains("Caution"));
        assert_eq!(r.impact()["quality_caution"].as_flag(), Some(false));
    }

    #[test]
    fn test_ticket_below_split_size_is_not_split() {
        let c = WorkItemCandidate::new("Almost epic", 12, Priority::Medium);
        let r = DecisionCascade::default().evaluate(&c, &sprint(3.0, 0.0, 30.0), &[], &calm());
        assert_ne!(r.action(), Action::Split);
        assert_eq!(r.action(), Action::Add);
    }

    #[test]
    fn test_split_beats_risk() {
        let c = WorkItemCandidate::new("Epic", 15, Priority::Medium);
        let risk = RiskSignals::new(99.0, 99.0, -99.0);
        let r = DecisionCascade::default().evaluate(&c, &sprint(3.0, 0.0, 30.0), &[], &risk);
        assert_eq!(r.action(), Action::Split);
        assert_eq!(r.impact_number("analysis_sp"), Some(5.0));
        assert_eq!(r.impact_number("implementation_sp"), Some(10.0));
        assert!(r.action_plan()[0].contains("Epic: Analysis & Design"));
    }

    #[test]
    fn test_large_ticket_with_long_runway_is_not_split() {
        let c = WorkItemCandidate::new("Epic", 13, Priority::Medium);
        let r = DecisionCascade::default().evaluate(&c, &sprint(10.0, 0.0, 30.0), &[], &calm());
        assert_eq!(r.action(), Action::Add);
    }

    #[test]
    fn test_risk_net_lists_all_causes() {
        let c = WorkItemCandidate::new("T", 3, Priority::Medium);
        let risk = RiskSignals::new(60.0, 75.0, -35.0);
        let r = DecisionCascade::default().evaluate(&c, &sprint(8.0, 0.0, 30.0), &[], &risk);
        assert_eq!(r.action(), Action::Defer);
        assert_eq!(r.rule(), RuleId::RiskSafetyNet);
        assert!(r.reasoning().contains("schedule risk 60%"));
        assert!(r.reasoning().contains("velocity drag -35.0%"));
        assert!(r.reasoning().contains("defect risk 75%"));
        assert_eq!(r.impact_number("triggered_conditions"), Some(3.0));
    }

    #[test]
    fn test_add_with_quality_caution() {
        let c = WorkItemCandidate::new("T", 3, Priority::Medium);
        let risk = RiskSignals::new(10.0, 55.0, -5.0);
        let r = DecisionCascade::default().evaluate(&c, &sprint(8.0, 10.0, 30.0), &[], &risk);
        assert_eq!(r.action(), Action::Add);
        assert!(r.reasoning().contains("Caution"));
        assert!(r.action_plan().is_empty());
    }

    #[test]
    fn test_add_without_caution() {
        let c = WorkItemCandidate::new("T", 3, Priority::Medium);
        let r = DecisionCascade::default().evaluate(&c, &sprint(8.0, 10.0, 30.0), &[], &calm());
        assert!(!r.reasoning().contains("Caution"));
        assert_eq!(r.impact()["quality_caution"].as_flag(), Some(false));
    }

    #[test]
    fn test_provider_free_capacity_wins() {
        let c = WorkItemCandidate::new("T", 3, Priority::Medium);
        // the snapshot has room, the provider says otherwise
        let risk = calm().with_free_capacity(1.0);
        let r = DecisionCascade::default().evaluate(&c, &sprint(8.0, 0.0, 30.0), &[], &risk);
        assert_eq!(r.action(), Action::Defer);
        assert_eq!(r.rule(), RuleId::NoOptionLeft);
    }

    #[test]
    fn test_swap_records_switch_cost() {
        let c = WorkItemCandidate::new("New", 5, Priority::High);
        let items = vec![ActiveItem::new(
            "9",
            "Old",
            5.0,
            Priority::Medium,
            ItemStatus::InProgress,
        )];
        let risk = calm().with_free_capacity(0.0);
        let r = DecisionCascade::default().evaluate(&c, &sprint(8.0, 30.0, 30.0), &items, &risk);
        assert_eq!(r.action(), Action::Swap);
        assert_eq!(r.impact_number("switch_cost_days"), Some(2.5));
        assert_eq!(r.impact_number("net_load_change_sp"), Some(0.0));
        assert_eq!(r.action_plan().len(), 2);
    }

    #[test]
    fn test_injected_thresholds() {
        let c = WorkItemCandidate::new("T", 3, Priority::Medium);
        let risk = RiskSignals::new(45.0, 10.0, -5.0);
        let strict = CascadeConfig::default().with_schedule_risk_threshold(40.0);
        let r = evaluate(&c, &sprint(8.0, 0.0, 30.0), &[], &risk, &strict);
        assert_eq!(r.action(), Action::Defer);
        let r = evaluate(&c, &sprint(8.0, 0.0, 30.0), &[], &risk, &CascadeConfig::default());
        assert_eq!(r.action(), Action::Add);
    }

    #[test]
    fn test_every_result_carries_base_facts() {
        let c = WorkItemCandidate::new("T", 3, Priority::Medium);
        let r = DecisionCascade::default().evaluate(&c, &sprint(8.0, 26.0, 30.0), &[], &calm());
        assert_eq!(r.impact_number("days_remaining"), Some(8.0));
        assert_eq!(r.impact_number("free_capacity"), Some(4.0));
    }

    #[test]
    fn test_rule_ids_exposed() {
        let cascade = DecisionCascade::default();
        assert_eq!(cascade.rule_ids().len(), 7);
        assert_eq!(cascade.rule_ids()[0], RuleId::RunwayExhausted);
        assert_eq!(cascade.rule_ids()[6], RuleId::NoOptionLeft);
    }
}
