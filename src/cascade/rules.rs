//! The ordered admission rules.
//!
//! Each rule is a predicate ([`CascadeRule::applies`]) paired with a handler
//! ([`CascadeRule::decide`]). The cascade walks the list top-down and the
//! first rule whose predicate holds produces the result.

use super::config::CascadeConfig;
use super::split::SplitPlan;
use super::types::{Action, RecommendationResult, RuleId};
use crate::risk::RiskSignals;
use crate::sprint::{ActiveItem, SprintState, WorkItemCandidate};
use crate::swap::{switch_cost, SwapSelector};
use crate::text::{fmt_pct, fmt_sp};

/// Everything a rule may look at during one evaluation.
pub struct Evaluation<'a> {
    pub candidate: &'a WorkItemCandidate,
    pub sprint: &'a SprintState,
    pub active_items: &'a [ActiveItem],
    pub risk: &'a RiskSignals,
    pub config: &'a CascadeConfig,
    pub selector: &'a SwapSelector,
    /// Free capacity resolved once from the risk bundle or the snapshot.
    pub free_capacity: f64,
}

impl<'a> Evaluation<'a> {
    pub fn new(
        candidate: &'a WorkItemCandidate,
        sprint: &'a SprintState,
        active_items: &'a [ActiveItem],
        risk: &'a RiskSignals,
        config: &'a CascadeConfig,
        selector: &'a SwapSelector,
    ) -> Self {
        Self {
            candidate,
            sprint,
            active_items,
            risk,
            config,
            selector,
            free_capacity: risk.resolved_free_capacity(sprint),
        }
    }

    fn story_points(&self) -> f64 {
        f64::from(self.candidate.story_points)
    }

    /// Facts every result carries, whatever rule fired.
    fn base(&self, result: RecommendationResult) -> RecommendationResult {
        result
            .fact("days_remaining", self.sprint.days_remaining)
            .fact("free_capacity", self.free_capacity)
    }

    fn plain(&self, action: Action, rule: RuleId, reasoning: String) -> RecommendationResult {
        self.base(RecommendationResult::new(action, rule, reasoning))
    }

    fn removing(
        &self,
        emergency: bool,
        rule: RuleId,
        target: &ActiveItem,
        reasoning: String,
    ) -> RecommendationResult {
        self.base(RecommendationResult::with_target(
            emergency,
            rule,
            target.clone(),
            reasoning,
        ))
        .fact("switch_cost_days", switch_cost(target))
        .fact("freed_sp", target.story_points)
    }
}

/// One step of the cascade.
pub trait CascadeRule: Send + Sync {
    fn id(&self) -> RuleId;

    /// Whether this rule claims the evaluation.
    fn applies(&self, ev: &Evaluation<'_>) -> bool;

    /// Builds the result. Only called after `applies` returned true.
    fn decide(&self, ev: &Evaluation<'_>) -> RecommendationResult;
}

/// Rule 0: too little runway for anything but an emergency.
pub struct RunwayExhausted;

impl CascadeRule for RunwayExhausted {
    fn id(&self) -> RuleId {
        RuleId::RunwayExhausted
    }

    fn applies(&self, ev: &Evaluation<'_>) -> bool {
        ev.sprint.days_remaining < ev.config.min_days_for_new_work
            && !ev.candidate.priority.is_emergency()
    }

    fn decide(&self, ev: &Evaluation<'_>) -> RecommendationResult {
        let title = &ev.candidate.title;
        ev.plain(
            Action::Defer,
            self.id(),
            format!(
                "Sprint ends in {:.1} days. Too risky to add non-critical work.",
                ev.sprint.days_remaining
            ),
        )
        .fact("min_days_for_new_work", ev.config.min_days_for_new_work)
        .step(format!("Move '{title}' to the top of the next sprint's backlog"))
        .step("Re-estimate it during next sprint planning")
    }
}

/// Rule 0.5: Critical and Highest tickets always get in.
///
/// An un-started item is removed when one exists; otherwise the sprint is
/// knowingly overloaded. No risk signal is consulted on this path.
pub struct EmergencyBypass;

impl CascadeRule for EmergencyBypass {
    fn id(&self) -> RuleId {
        RuleId::EmergencyBypass
    }

    fn applies(&self, ev: &Evaluation<'_>) -> bool {
        ev.candidate.priority.is_emergency()
    }

    fn decide(&self, ev: &Evaluation<'_>) -> RecommendationResult {
        let c = ev.candidate;
        match ev.selector.emergency(ev.active_items) {
            Some(target) => ev
                .removing(
                    true,
                    self.id(),
                    target,
                    format!(
                        "Emergency protocol: '{}' is {} priority. Removing '{}' ({}, not started) \
                         to make room; risk gates are bypassed.",
                        c.title,
                        c.priority,
                        target.title,
                        fmt_sp(target.story_points),
                    ),
                )
                .fact("emergency", true)
                .step(format!("Move '{}' to Backlog", target.title))
                .step(format!("Add '{}' to Active Sprint", c.title))
                .step(format!(
                    "Tell the owner of '{}' it was displaced by an emergency",
                    target.title
                )),
            None => {
                let projected = ev.sprint.sprint_load_7d + ev.story_points();
                let over = (ev.story_points() - ev.free_capacity).max(0.0);
                tracing::warn!(
                    title = %c.title,
                    over_capacity_sp = over,
                    "no un-started item to remove; admitting emergency ticket"
                );
                let (consequence, notice) = if over > 0.0 {
                    (
                        format!(
                            "the sprint will run {over:.1} SP over capacity ({:.1} SP free)",
                            ev.free_capacity
                        ),
                        "Notify stakeholders that the sprint is over capacity",
                    )
                } else {
                    (
                        format!(
                            "it fits within the {:.1} SP still free",
                            ev.free_capacity
                        ),
                        "Notify stakeholders of the emergency insertion",
                    )
                };
                ev.plain(
                    Action::Overload,
                    self.id(),
                    format!(
                        "Emergency protocol: '{}' is {} priority but every committed item is \
                         already under way. Admitting it anyway; {consequence}.",
                        c.title, c.priority,
                    ),
                )
                .fact("emergency", true)
                .fact("overload", true)
                .fact("projected_load_sp", projected)
                .fact("over_capacity_sp", over)
                .step(format!("Add '{}' to Active Sprint", c.title))
                .step(notice)
                .step("Re-plan remaining scope at the next stand-up")
            }
        }
    }
}

/// Rule 1: large tickets are split when the runway is short.
pub struct OversizedTicket;

impl CascadeRule for OversizedTicket {
    fn id(&self) -> RuleId {
        RuleId::OversizedTicket
    }

    fn applies(&self, ev: &Evaluation<'_>) -> bool {
        ev.candidate.story_points >= ev.config.large_ticket_sp
            && ev.sprint.days_remaining < ev.config.large_ticket_days
    }

    fn decide(&self, ev: &Evaluation<'_>) -> RecommendationResult {
        let c = ev.candidate;
        let plan = SplitPlan::for_points(c.story_points);
        ev.plain(
            Action::Split,
            self.id(),
            format!(
                "Ticket size ({} SP) is too large for mid-sprint with {:.1} days left. Split required.",
                c.story_points, ev.sprint.days_remaining
            ),
        )
        .fact("original_sp", plan.total_sp)
        .fact("analysis_sp", plan.analysis_sp)
        .fact("implementation_sp", plan.implementation_sp)
        .step(format!(
            "Create '{}' ({} SP) for this sprint",
            SplitPlan::analysis_title(&c.title),
            plan.analysis_sp
        ))
        .step(format!(
            "Create '{}' ({} SP) for the next sprint",
            SplitPlan::implementation_title(&c.title),
            plan.implementation_sp
        ))
        .step(format!("Close '{}' once both slices exist", c.title))
    }
}

/// Rule 2: defer when any risk signal is over its threshold.
///
/// All three signals are checked independently and every one that trips is
/// reported.
pub struct RiskSafetyNet;

impl RiskSafetyNet {
    /// Human-readable description of each tripped condition, in a fixed
    /// order: schedule, velocity, quality.
    pub fn triggered(risk: &RiskSignals, config: &CascadeConfig) -> Vec<String> {
        let mut reasons = Vec::new();
        if risk.schedule_risk > config.schedule_risk_threshold {
            reasons.push(format!(
                "schedule risk {} exceeds {}",
                fmt_pct(risk.schedule_risk),
                fmt_pct(config.schedule_risk_threshold)
            ));
        }
        if risk.velocity_change < -config.velocity_drag_threshold {
            reasons.push(format!(
                "velocity drag {:.1}% is beyond -{}",
                risk.velocity_change,
                fmt_pct(config.velocity_drag_threshold)
            ));
        }
        if risk.quality_risk > config.quality_risk_threshold {
            reasons.push(format!(
                "defect risk {} exceeds {}",
                fmt_pct(risk.quality_risk),
                fmt_pct(config.quality_risk_threshold)
            ));
        }
        reasons
    }
}

impl CascadeRule for RiskSafetyNet {
    fn id(&self) -> RuleId {
        RuleId::RiskSafetyNet
    }

    fn applies(&self, ev: &Evaluation<'_>) -> bool {
        !Self::triggered(ev.risk, ev.config).is_empty()
    }

    fn decide(&self, ev: &Evaluation<'_>) -> RecommendationResult {
        let reasons = Self::triggered(ev.risk, ev.config);
        ev.plain(
            Action::Defer,
            self.id(),
            format!(
                "Risk safety net triggered: {}. Adding this work now endangers the sprint goal.",
                reasons.join("; ")
            ),
        )
        .fact("triggered_conditions", reasons.len() as u32)
        .fact("schedule_risk", ev.risk.schedule_risk)
        .fact("quality_risk", ev.risk.quality_risk)
        .fact("velocity_change", ev.risk.velocity_change)
        .step(format!("Move '{}' to the next sprint's backlog", ev.candidate.title))
        .step("Re-assess once the flagged risks are back under their thresholds")
    }
}

/// Rule 3: admit when free capacity covers the ticket.
pub struct CapacityAvailable;

impl CascadeRule for CapacityAvailable {
    fn id(&self) -> RuleId {
        RuleId::CapacityAvailable
    }

    fn applies(&self, ev: &Evaluation<'_>) -> bool {
        ev.free_capacity >= ev.story_points()
    }

    fn decide(&self, ev: &Evaluation<'_>) -> RecommendationResult {
        let mut reasoning = format!(
            "Sprint has capacity (Free: {:.1} SP). Safe to add.",
            ev.free_capacity
        );
        let caution = ev.risk.quality_risk > ev.config.quality_caution_threshold;
        if caution {
            reasoning.push_str(&format!(
                " Caution: defect risk is {}; plan an extra review cycle.",
                fmt_pct(ev.risk.quality_risk)
            ));
        }
        ev.plain(Action::Add, self.id(), reasoning)
            .fact("quality_caution", caution)
            .fact("days_lost", ev.risk.days_lost(ev.sprint.days_remaining))
    }
}

/// Rule 4: trade a committed item of similar size for the ticket.
pub struct Swap;

impl Swap {
    fn select<'a>(ev: &Evaluation<'a>) -> Option<&'a ActiveItem> {
        ev.selector.standard(
            ev.story_points(),
            &ev.candidate.priority,
            ev.active_items,
        )
    }
}

impl CascadeRule for Swap {
    fn id(&self) -> RuleId {
        RuleId::Swap
    }

    fn applies(&self, ev: &Evaluation<'_>) -> bool {
        Self::select(ev).is_some()
    }

    fn decide(&self, ev: &Evaluation<'_>) -> RecommendationResult {
        let Some(target) = Self::select(ev) else {
            return NoOptionLeft.decide(ev);
        };
        let c = ev.candidate;
        ev.removing(
            false,
            self.id(),
            target,
            format!(
                "Sprint full. Swapping '{}' ({}) keeps capacity neutral.",
                target.title,
                fmt_sp(target.story_points)
            ),
        )
        .fact("net_load_change_sp", ev.story_points() - target.story_points)
        .step(format!("Move '{}' to Backlog", target.title))
        .step(format!("Add '{}' to Active Sprint", c.title))
    }
}

/// Rule 5: nothing else worked.
pub struct NoOptionLeft;

impl CascadeRule for NoOptionLeft {
    fn id(&self) -> RuleId {
        RuleId::NoOptionLeft
    }

    fn applies(&self, _ev: &Evaluation<'_>) -> bool {
        true
    }

    fn decide(&self, ev: &Evaluation<'_>) -> RecommendationResult {
        ev.plain(
            Action::Defer,
            self.id(),
            format!(
                "Sprint is full ({}/{} SP) and no suitable low-priority items found to swap.",
                ev.sprint.sprint_load_7d,
                ev.sprint.real_capacity()
            ),
        )
        .step(format!("Move '{}' to the next sprint's backlog", ev.candidate.title))
    }
}

/// The rules in their mandatory order.
pub fn standard_rules() -> Vec<Box<dyn CascadeRule>> {
    vec![
        Box::new(RunwayExhausted),
        Box::new(EmergencyBypass),
        Box::new(OversizedTicket),
        Box::new(RiskSafetyNet),
        Box::new(CapacityAvailable),
        Box::new(Swap),
        Box::new(NoOptionLeft),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprint::Priority;

    #[test]
    fn test_triggered_lists_every_condition() {
        let config = CascadeConfig::default();
        let risk = RiskSignals::new(80.0, 90.0, -45.0);
        let reasons = RiskSafetyNet::triggered(&risk, &config);
        assert_eq!(reasons.len(), 3);
        assert!(reasons[0].starts_with("schedule risk 80%"));
        assert!(reasons[1].starts_with("velocity drag -45.0%"));
        assert!(reasons[2].starts_with("defect risk 90%"));
    }

    #[test]
    fn test_triggered_thresholds_are_strict() {
        let config = CascadeConfig::default();
        let risk = RiskSignals::new(50.0, 70.0, -30.0);
        assert!(RiskSafetyNet::triggered(&risk, &config).is_empty());
    }

    #[test]
    fn test_runway_rule_ignores_emergencies() {
        let config = CascadeConfig::default();
        let selector = SwapSelector::new();
        let sprint = SprintState::new(1.0, 0.0, 30.0);
        let risk = RiskSignals::default();

        let normal = WorkItemCandidate::new("n", 1, Priority::High);
        let ev = Evaluation::new(&normal, &sprint, &[], &risk, &config, &selector);
        assert!(RunwayExhausted.applies(&ev));

        let urgent = WorkItemCandidate::new("u", 1, Priority::Highest);
        let ev = Evaluation::new(&urgent, &sprint, &[], &risk, &config, &selector);
        assert!(!RunwayExhausted.applies(&ev));
        assert!(EmergencyBypass.applies(&ev));
    }

    #[test]
    fn test_standard_rule_order() {
        let ids: Vec<RuleId> = standard_rules().iter().map(|r| r.id()).collect();
        assert_eq!(
            ids,
            vec![
                RuleId::RunwayExhausted,
                RuleId::EmergencyBypass,
                RuleId::OversizedTicket,
                RuleId::RiskSafetyNet,
                RuleId::CapacityAvailable,
                RuleId::Swap,
                RuleId::NoOptionLeft,
            ]
        );
    }
}
