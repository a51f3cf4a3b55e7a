//! Risk score bundle and numeric banding.

use crate::sprint::SprintState;
use std::fmt;

/// The four numbers handed in by the external risk-scoring collaborator.
///
/// Values are trusted as-is. In particular `velocity_change` is expected to
/// be already sign-corrected (`<= 0`); see
/// [`normalize_velocity_change`](super::normalize_velocity_change) for the
/// provider-side correction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskSignals {
    /// Spillover probability, 0–100.
    pub schedule_risk: f64,
    /// Defect probability, 0–100.
    pub quality_risk: f64,
    /// Velocity drag in percent, never positive.
    pub velocity_change: f64,
    /// Free capacity in story points, if the provider computed it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub free_capacity: Option<f64>,
}

impl RiskSignals {
    pub fn new(schedule_risk: f64, quality_risk: f64, velocity_change: f64) -> Self {
        Self {
            schedule_risk,
            quality_risk,
            velocity_change,
            free_capacity: None,
        }
    }

    pub fn with_free_capacity(mut self, free_capacity: f64) -> Self {
        self.free_capacity = Some(free_capacity);
        self
    }

    /// Provider value when present, otherwise the sprint's own formula.
    pub fn resolved_free_capacity(&self, sprint: &SprintState) -> f64 {
        self.free_capacity.unwrap_or_else(|| sprint.free_capacity())
    }

    /// Magnitude of the velocity drag, in percent.
    pub fn velocity_drag(&self) -> f64 {
        self.velocity_change.abs()
    }

    /// Team-days lost to context switching over the remaining runway.
    ///
    /// Days are floored at one so a closing sprint still reports a cost.
    pub fn days_lost(&self, days_remaining: f64) -> f64 {
        let days = days_remaining.max(1.0);
        round1(self.velocity_drag() / 100.0 * days)
    }

    pub fn schedule_level(&self) -> RiskLevel {
        RiskLevel::for_schedule(self.schedule_risk)
    }

    pub fn quality_level(&self) -> RiskLevel {
        RiskLevel::for_quality(self.quality_risk)
    }

    pub fn velocity_level(&self) -> RiskLevel {
        RiskLevel::for_velocity(self.velocity_change)
    }
}

pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Traffic-light status of a single risk dimension.
///
/// Always derived from the numeric value, so a label can never contradict
/// the number it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskLevel {
    Safe,
    Warning,
    Critical,
}

impl RiskLevel {
    /// Spillover bands: `> 50` critical, `> 30` warning.
    pub fn for_schedule(probability: f64) -> Self {
        if probability > 50.0 {
            RiskLevel::Critical
        } else if probability > 30.0 {
            RiskLevel::Warning
        } else {
            RiskLevel::Safe
        }
    }

    /// Defect bands: `> 60` critical, `> 30` warning.
    pub fn for_quality(probability: f64) -> Self {
        if probability > 60.0 {
            RiskLevel::Critical
        } else if probability > 30.0 {
            RiskLevel::Warning
        } else {
            RiskLevel::Safe
        }
    }

    /// Drag bands: `< -30` critical, `< -10` warning.
    pub fn for_velocity(velocity_change: f64) -> Self {
        if velocity_change < -30.0 {
            RiskLevel::Critical
        } else if velocity_change < -10.0 {
            RiskLevel::Warning
        } else {
            RiskLevel::Safe
        }
    }

    /// Effort bands against the hours left in the sprint.
    pub fn for_effort(predicted_hours: f64, hours_remaining: f64) -> Self {
        if predicted_hours > hours_remaining {
            RiskLevel::Critical
        } else if predicted_hours > hours_remaining * 0.8 {
            RiskLevel::Warning
        } else {
            RiskLevel::Safe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "safe",
            RiskLevel::Warning => "warning",
            RiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
