//! Composite risk score.
//!
//! An advisory roll-up of the individual bands. The decision cascade never
//! consults it; it exists for dashboards that want one headline number.

use super::types::{RiskLevel, RiskSignals};
use std::fmt;

/// Overall risk classification of a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverallRisk {
    Low,
    Medium,
    High,
    Critical,
}

impl OverallRisk {
    fn from_score(score: u32) -> Self {
        match score {
            s if s >= 7 => OverallRisk::Critical,
            s if s >= 4 => OverallRisk::High,
            s if s >= 2 => OverallRisk::Medium,
            _ => OverallRisk::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OverallRisk::Low => "low",
            OverallRisk::Medium => "medium",
            OverallRisk::High => "high",
            OverallRisk::Critical => "critical",
        }
    }
}

impl fmt::Display for OverallRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weighted count of elevated risk dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskSummary {
    pub score: u32,
    pub overall: OverallRisk,
}

impl RiskSummary {
    /// Scores the bundle. `effort` is the effort band when an effort
    /// estimate exists; it carries the heaviest weight.
    ///
    /// | Dimension | Critical | Warning |
    /// |---|---|---|
    /// | effort | 3 | 2 |
    /// | schedule | 3 | 2 |
    /// | quality | 2 | 1 |
    /// | velocity | 2 | 1 |
    pub fn from_signals(signals: &RiskSignals, effort: Option<RiskLevel>) -> Self {
        let weigh = |level: RiskLevel, critical: u32, warning: u32| match level {
            RiskLevel::Critical => critical,
            RiskLevel::Warning => warning,
            RiskLevel::Safe => 0,
        };

        let score = effort.map_or(0, |e| weigh(e, 3, 2))
            + weigh(signals.schedule_level(), 3, 2)
            + weigh(signals.quality_level(), 2, 1)
            + weigh(signals.velocity_level(), 2, 1);

        Self {
            score,
            overall: OverallRisk::from_score(score),
        }
    }
}
