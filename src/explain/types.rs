//! Explanation card and confidence colour.

use crate::risk::RiskSignals;
use std::fmt;

/// Traffic-light confidence shown next to a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ConfidenceColor {
    Green,
    Yellow,
    Red,
}

impl ConfidenceColor {
    /// Colour from the numeric risk bands alone. The chosen action plays no
    /// part, so the colour cannot contradict the signals.
    ///
    /// - red: schedule > 55, quality > 60 or velocity < -30
    /// - yellow: schedule > 30, quality > 30 or velocity < -10
    /// - green: otherwise
    pub fn from_signals(risk: &RiskSignals) -> Self {
        if risk.schedule_risk > 55.0 || risk.quality_risk > 60.0 || risk.velocity_change < -30.0 {
            ConfidenceColor::Red
        } else if risk.schedule_risk > 30.0
            || risk.quality_risk > 30.0
            || risk.velocity_change < -10.0
        {
            ConfidenceColor::Yellow
        } else {
            ConfidenceColor::Green
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceColor::Green => "green",
            ConfidenceColor::Yellow => "yellow",
            ConfidenceColor::Red => "red",
        }
    }
}

impl fmt::Display for ConfidenceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing card for one recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplanationResult {
    /// Card headline.
    pub short_title: String,
    /// Paragraph for the expanded view.
    pub detailed_explanation: String,
    pub confidence_color: ConfidenceColor,
    /// Imperative label for the call-to-action button.
    pub action_verb: String,
    pub icon: String,
    /// One-line breakdown of the numbers behind the card.
    pub risk_summary: String,
}
