//! Cascade thresholds.
//!
//! [`CascadeConfig`] is injected into every evaluation so tests can probe
//! boundary values without touching globals.

use crate::error::ConfigError;

/// Thresholds consulted by the decision cascade.
///
/// # Defaults
///
/// ```
/// use u_replan::cascade::CascadeConfig;
///
/// let config = CascadeConfig::default();
/// assert_eq!(config.large_ticket_sp, 13);
/// assert!((config.min_days_for_new_work - 2.0).abs() < 1e-10);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_replan::cascade::CascadeConfig;
///
/// let config = CascadeConfig::default()
///     .with_large_ticket_sp(8)
///     .with_schedule_risk_threshold(40.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CascadeConfig {
    /// Below this many days left, only emergency tickets may enter.
    pub min_days_for_new_work: f64,

    /// Tickets at or above this size are split when runway is short.
    pub large_ticket_sp: u32,

    /// Runway (days) under which a large ticket must be split.
    pub large_ticket_days: f64,

    /// Defer when spillover probability is strictly above this (0–100).
    pub schedule_risk_threshold: f64,

    /// Defer when `velocity_change < -velocity_drag_threshold`.
    pub velocity_drag_threshold: f64,

    /// Defer when defect probability is strictly above this (0–100).
    pub quality_risk_threshold: f64,

    /// An admitted ticket gets a caution note when defect probability is
    /// strictly above this (0–100). Never changes the action.
    pub quality_caution_threshold: f64,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            min_days_for_new_work: 2.0,
            large_ticket_sp: 13,
            large_ticket_days: 10.0,
            schedule_risk_threshold: 50.0,
            velocity_drag_threshold: 30.0,
            quality_risk_threshold: 70.0,
            quality_caution_threshold: 50.0,
        }
    }
}

impl CascadeConfig {
    pub fn with_min_days_for_new_work(mut self, days: f64) -> Self {
        self.min_days_for_new_work = days;
        self
    }

    pub fn with_large_ticket_sp(mut self, sp: u32) -> Self {
        self.large_ticket_sp = sp;
        self
    }

    pub fn with_large_ticket_days(mut self, days: f64) -> Self {
        self.large_ticket_days = days;
        self
    }

    pub fn with_schedule_risk_threshold(mut self, pct: f64) -> Self {
        self.schedule_risk_threshold = pct;
        self
    }

    pub fn with_velocity_drag_threshold(mut self, pct: f64) -> Self {
        self.velocity_drag_threshold = pct;
        self
    }

    pub fn with_quality_risk_threshold(mut self, pct: f64) -> Self {
        self.quality_risk_threshold = pct;
        self
    }

    pub fn with_quality_caution_threshold(mut self, pct: f64) -> Self {
        self.quality_caution_threshold = pct;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("min_days_for_new_work", self.min_days_for_new_work)?;
        non_negative("large_ticket_days", self.large_ticket_days)?;
        non_negative("velocity_drag_threshold", self.velocity_drag_threshold)?;
        if self.large_ticket_sp == 0 {
            return Err(ConfigError::ZeroTicketSize);
        }
        percentage("schedule_risk_threshold", self.schedule_risk_threshold)?;
        percentage("quality_risk_threshold", self.quality_risk_threshold)?;
        percentage("quality_caution_threshold", self.quality_caution_threshold)?;
        Ok(())
    }
}

// NaN fails both checks
fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn percentage(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::NotAPercentage { field, value })
    }
}
