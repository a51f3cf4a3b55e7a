//! One narrative builder per action family.
//!
//! Builders are plain formatting functions: same inputs, same card.

use super::types::{ConfidenceColor, ExplanationResult};
use crate::cascade::{Impact, ImpactValue, SplitPlan};
use crate::risk::{RiskLevel, RiskSignals};
use crate::sprint::{ActiveItem, WorkItemCandidate};
use crate::text::{fmt_pct, fmt_signed_pct, fmt_sp};

/// Inputs shared by every builder.
pub(crate) struct Narrative<'a> {
    pub reasoning: &'a str,
    pub target: Option<&'a ActiveItem>,
    pub impact: &'a Impact,
    pub risk: &'a RiskSignals,
    pub candidate: &'a WorkItemCandidate,
    pub color: ConfidenceColor,
}

impl Narrative<'_> {
    fn number(&self, key: &str) -> Option<f64> {
        self.impact.get(key).and_then(ImpactValue::as_number)
    }

    fn days_left(&self) -> String {
        self.number("days_remaining")
            .map_or_else(|| "?".to_string(), |d| format!("{d:.1}"))
    }

    fn free_capacity(&self) -> String {
        self.number("free_capacity")
            .or(self.risk.free_capacity)
            .map_or_else(|| "?".to_string(), |f| format!("{f:.1}"))
    }

    fn risk_line(&self) -> String {
        format!(
            "Schedule: {} · Quality: {} · Velocity: {}",
            fmt_pct(self.risk.schedule_risk),
            fmt_pct(self.risk.quality_risk),
            fmt_signed_pct(self.risk.velocity_change)
        )
    }

    fn card(
        &self,
        title: String,
        body: String,
        verb: &str,
        icon: &str,
        summary: String,
    ) -> ExplanationResult {
        ExplanationResult {
            short_title: title,
            detailed_explanation: body,
            confidence_color: self.color,
            action_verb: verb.to_string(),
            icon: icon.to_string(),
            risk_summary: summary,
        }
    }
}

fn target_parts(target: Option<&ActiveItem>) -> (String, String, String) {
    match target {
        Some(t) => (
            t.title.clone(),
            fmt_sp(t.story_points),
            t.priority.label().to_string(),
        ),
        None => (
            "a lower-priority ticket".to_string(),
            "? SP".to_string(),
            "lower".to_string(),
        ),
    }
}

pub(crate) fn explain_add(n: &Narrative<'_>) -> ExplanationResult {
    let c = n.candidate;
    let (title, icon, closing) = match n.color {
        ConfidenceColor::Green => ("Safe to Add to Sprint", "✅", "Proceed with confidence."),
        ConfidenceColor::Yellow => (
            "Add to Sprint with Caution",
            "⚠️",
            "Proceed, but keep an eye on the flagged risk.",
        ),
        ConfidenceColor::Red => (
            "Add to Sprint: Elevated Risk",
            "🛑",
            "Proceed only with an extra review cycle; risk is elevated.",
        ),
    };
    let body = format!(
        "The sprint has enough capacity ({} SP free) to absorb this {} ticket without \
         reshuffling committed work. Schedule risk is {}, defect probability is {} and \
         the expected velocity change is {}. {closing}",
        n.free_capacity(),
        fmt_sp(f64::from(c.story_points)),
        fmt_pct(n.risk.schedule_risk),
        fmt_pct(n.risk.quality_risk),
        fmt_signed_pct(n.risk.velocity_change),
    );
    n.card(title.to_string(), body, "Add to Sprint", icon, n.risk_line())
}

pub(crate) fn explain_overload(n: &Narrative<'_>) -> ExplanationResult {
    let c = n.candidate;
    let over = n.number("over_capacity_sp").unwrap_or(0.0);
    let (title, consequence) = if over > 0.0 {
        (
            "Emergency Add: Sprint Over Capacity",
            format!(
                "The sprint will run {over:.1} SP over capacity. Notify stakeholders now so \
                 lower-priority commitments can be renegotiated before they slip."
            ),
        )
    } else {
        (
            "Emergency Add: Within Capacity",
            format!(
                "It still fits within the {} SP free, but it was not planned. Notify \
                 stakeholders of the emergency insertion.",
                n.free_capacity()
            ),
        )
    };
    let body = format!(
        "'{}' is {} priority, so it enters the sprint under the emergency protocol even \
         though no un-started item can be removed to make room. {consequence}",
        c.title, c.priority,
    );
    n.card(
        title.to_string(),
        body,
        "Add & Notify Stakeholders",
        "⚠️",
        format!("Over capacity: {over:.1} SP · {}", n.risk_line()),
    )
}

pub(crate) fn explain_swap(n: &Narrative<'_>, emergency: bool) -> ExplanationResult {
    let c = n.candidate;
    let (t_title, t_sp, t_prio) = target_parts(n.target);
    let net = n
        .number("net_load_change_sp")
        .or_else(|| n.target.map(|t| f64::from(c.story_points) - t.story_points))
        .unwrap_or(0.0);

    let (title, verb, icon, lead) = if emergency {
        (
            format!("Emergency Swap with '{t_title}'"),
            "Execute Emergency Swap",
            "🚨",
            format!(
                "'{}' is {} priority and bypasses the usual risk gates.",
                c.title, c.priority
            ),
        )
    } else {
        (
            format!("Swap with '{t_title}'"),
            "Execute Swap",
            "🔄",
            "The sprint is at or near capacity.".to_string(),
        )
    };

    let body = format!(
        "{lead} To make room for '{}' ({}), move '{t_title}' ({t_sp}, priority: {t_prio}) \
         back to the backlog; it will be re-planned next sprint. Committed load changes by \
         {}. Expected schedule risk after the swap: {}.",
        c.title,
        fmt_sp(f64::from(c.story_points)),
        fmt_sp(net),
        fmt_pct(n.risk.schedule_risk),
    );
    n.card(
        title,
        body,
        verb,
        icon,
        format!(
            "Capacity freed by swap: {t_sp} · Net load change: {} · Velocity impact: {}",
            fmt_sp(net),
            fmt_signed_pct(n.risk.velocity_change)
        ),
    )
}

/// The signal that best explains a deferral, described at its own band so
/// the wording always matches the number.
///
/// The most severe band wins; magnitude breaks ties, then the order
/// schedule, quality, velocity.
fn primary_driver(n: &Narrative<'_>) -> Option<String> {
    let r = n.risk;
    let drivers = [
        (r.schedule_level(), r.schedule_risk, "schedule risk", fmt_pct(r.schedule_risk)),
        (r.quality_level(), r.quality_risk, "defect probability", fmt_pct(r.quality_risk)),
        (
            r.velocity_level(),
            r.velocity_drag(),
            "velocity drag",
            fmt_signed_pct(r.velocity_change),
        ),
    ];
    let mut best = &drivers[0];
    for d in &drivers[1..] {
        if d.0 > best.0 || (d.0 == best.0 && d.1 > best.1) {
            best = d;
        }
    }
    let (level, _, subject, value) = best;
    let adjective = match level {
        RiskLevel::Critical => "critically high",
        RiskLevel::Warning => "elevated",
        RiskLevel::Safe => return None,
    };
    Some(format!("{subject} is {adjective} ({value})"))
}

pub(crate) fn explain_defer(n: &Narrative<'_>) -> ExplanationResult {
    let c = n.candidate;
    let cause = primary_driver(n).unwrap_or_else(|| {
        format!(
            "the sprint cannot absorb it right now: {}",
            n.reasoning.trim_end_matches('.')
        )
    });
    let days = n.days_left();
    let body = format!(
        "Adding '{}' to the current sprint is not recommended because {cause}. With {days} \
         day(s) remaining, new scope now puts the sprint goal at risk. Deferring lets the \
         team plan it properly and deliver it with full capacity next sprint. Schedule \
         risk: {} · Quality risk: {}.",
        c.title,
        fmt_pct(n.risk.schedule_risk),
        fmt_pct(n.risk.quality_risk),
    );
    n.card(
        "Defer to Next Sprint".to_string(),
        body,
        "Defer to Backlog",
        "⏸",
        format!(
            "Schedule risk: {} · Quality risk: {} · Days remaining: {days}",
            fmt_pct(n.risk.schedule_risk),
            fmt_pct(n.risk.quality_risk),
        ),
    )
}

pub(crate) fn explain_split(n: &Narrative<'_>) -> ExplanationResult {
    let c = n.candidate;
    let plan = SplitPlan::for_points(c.story_points);
    let body = format!(
        "'{}' is too large ({} SP) to fit safely into the remaining runway. Taken whole it \
         risks spillover ({}) and defects ({}), because large tickets are harder to test \
         under time pressure. Split it: (1) '{}' ({} SP): research, spike and acceptance \
         criteria, completable this sprint; (2) '{}' ({} SP): development and QA, planned \
         for the next sprint.",
        c.title,
        plan.total_sp,
        fmt_pct(n.risk.schedule_risk),
        fmt_pct(n.risk.quality_risk),
        SplitPlan::analysis_title(&c.title),
        plan.analysis_sp,
        SplitPlan::implementation_title(&c.title),
        plan.implementation_sp,
    );
    n.card(
        "Split Required".to_string(),
        body,
        "Split Ticket",
        "✂️",
        format!(
            "Original size: {} SP · Analysis slice: {} SP · Implementation slice: {} SP",
            plan.total_sp, plan.analysis_sp, plan.implementation_sp
        ),
    )
}

/// Card for an action label nothing else recognizes.
pub(crate) fn explain_review(n: &Narrative<'_>, label: &str) -> ExplanationResult {
    let body = if n.reasoning.trim().is_empty() {
        "No details available.".to_string()
    } else {
        n.reasoning.to_string()
    };
    n.card(
        format!("Recommendation: {label}"),
        body,
        "Review",
        "ℹ️",
        n.risk_line(),
    )
}
