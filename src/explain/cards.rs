//! Per-dimension risk metric cards for the impact dashboard.
//!
//! Status, label and sub-text all come from numeric thresholds, never from
//! a model's class label.

use crate::risk::{RiskLevel, RiskSignals};
use crate::text::cap_pct;

/// Working hours assumed per remaining sprint day.
pub const WORK_HOURS_PER_DAY: f64 = 6.0;

/// One dashboard tile.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricCard {
    pub value: String,
    pub label: String,
    pub status: RiskLevel,
    pub sub_text: String,
}

/// The full set of tiles for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskCards {
    /// Present only when an effort estimate was supplied.
    pub effort: Option<MetricCard>,
    pub schedule: MetricCard,
    pub productivity: MetricCard,
    pub quality: MetricCard,
}

/// Builds the dashboard tiles.
///
/// `predicted_hours` is the median effort estimate, when one exists.
/// Remaining days are floored at one.
pub fn risk_cards(
    risk: &RiskSignals,
    days_remaining: f64,
    predicted_hours: Option<f64>,
) -> RiskCards {
    let days = days_remaining.max(1.0);
    RiskCards {
        effort: predicted_hours.map(|h| effort_card(h, days * WORK_HOURS_PER_DAY)),
        schedule: schedule_card(risk.schedule_risk),
        productivity: productivity_card(risk, days),
        quality: quality_card(risk.quality_risk),
    }
}

fn effort_card(hours: f64, hours_remaining: f64) -> MetricCard {
    let status = RiskLevel::for_effort(hours, hours_remaining);
    let (label, tail) = match status {
        RiskLevel::Critical => (
            "Sprint Overload",
            "This ticket cannot finish in the current sprint.",
        ),
        RiskLevel::Warning => ("Tight Fit", "Very little buffer for unexpected blockers."),
        RiskLevel::Safe => ("Fits in Sprint", "Effort fits comfortably."),
    };
    MetricCard {
        value: format!(
            "{}h / {}h Remaining",
            (hours.round() as i64).max(1),
            (hours_remaining.round() as i64).max(1)
        ),
        label: label.to_string(),
        status,
        sub_text: format!(
            "Needs {:.0}h with {:.0}h remaining. {tail}",
            hours, hours_remaining
        ),
    }
}

fn schedule_card(probability: f64) -> MetricCard {
    let status = RiskLevel::for_schedule(probability);
    let pct = cap_pct(probability, 1);
    let (label, tail) = match status {
        RiskLevel::Critical => (
            "Delay Imminent",
            "Sprint goal is in danger. Consider deferring or swapping.",
        ),
        RiskLevel::Warning => ("Moderate Risk", "Monitor closely and flag blockers early."),
        RiskLevel::Safe => ("On Track", "Likely to finish on time."),
    };
    MetricCard {
        value: format!("{pct}% Probability of Spillover"),
        label: label.to_string(),
        status,
        sub_text: format!("{pct}% chance of spillover. {tail}"),
    }
}

fn productivity_card(risk: &RiskSignals, days: f64) -> MetricCard {
    let status = risk.velocity_level();
    let days_lost = risk.days_lost(days);
    let (label, tail) = match status {
        RiskLevel::Critical => (
            "High Drag",
            "Team workflow seriously disrupted; avoid adding mid-sprint.",
        ),
        RiskLevel::Warning => ("Noticeable Slowdown", "Noticeable slowdown expected for the team."),
        RiskLevel::Safe => ("Minimal Distraction", "Minimal distraction to team velocity."),
    };
    MetricCard {
        value: format!("-{}% Velocity", cap_pct(risk.velocity_drag(), 1)),
        label: label.to_string(),
        status,
        sub_text: format!("{days_lost:.1} days lost to context switching. {tail}"),
    }
}

fn quality_card(probability: f64) -> MetricCard {
    let status = RiskLevel::for_quality(probability);
    let pct = cap_pct(probability, 1);
    let (label, tail) = match status {
        RiskLevel::Critical => (
            "High Bug Risk",
            "Complex or rushed work; double QA time recommended.",
        ),
        RiskLevel::Warning => ("Elevated Risk", "Additional review cycle advised."),
        RiskLevel::Safe => ("Standard Risk", "Standard testing required."),
    };
    MetricCard {
        value: format!("{pct}% Defect Risk"),
        label: label.to_string(),
        status,
        sub_text: format!("{pct}% defect likelihood. {tail}"),
    }
}
