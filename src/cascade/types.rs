//! Actions, rule identities and the recommendation record.

use crate::error::ParseActionError;
use crate::sprint::ActiveItem;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The closed set of outcomes the cascade can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Action {
    /// Admit the ticket; the sprint has room.
    Add,
    /// Admit the ticket and move a committed item back to the backlog.
    Swap,
    /// Emergency admission that removes an un-started item, bypassing risk gates.
    ForceSwap,
    /// Emergency admission with nothing removable; the sprint runs over capacity.
    Overload,
    /// Keep the ticket out of this sprint.
    Defer,
    /// Decompose the ticket before admitting any part of it.
    Split,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Add,
        Action::Swap,
        Action::ForceSwap,
        Action::Overload,
        Action::Defer,
        Action::Split,
    ];

    /// Wire label, e.g. `"FORCE_SWAP"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Add => "ADD",
            Action::Swap => "SWAP",
            Action::ForceSwap => "FORCE_SWAP",
            Action::Overload => "OVERLOAD",
            Action::Defer => "DEFER",
            Action::Split => "SPLIT",
        }
    }

    /// Whether a result with this action names an item to remove.
    pub fn removes_item(&self) -> bool {
        matches!(self, Action::Swap | Action::ForceSwap)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    /// Case-insensitive. `ACCEPT` is an older spelling of `ADD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace(['-', ' '], "_").as_str() {
            "ADD" | "ACCEPT" => Ok(Action::Add),
            "SWAP" => Ok(Action::Swap),
            "FORCE_SWAP" => Ok(Action::ForceSwap),
            "OVERLOAD" => Ok(Action::Overload),
            "DEFER" => Ok(Action::Defer),
            "SPLIT" => Ok(Action::Split),
            _ => Err(ParseActionError(s.to_string())),
        }
    }
}

/// Identity of a cascade rule, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleId {
    RunwayExhausted,
    EmergencyBypass,
    OversizedTicket,
    RiskSafetyNet,
    CapacityAvailable,
    Swap,
    NoOptionLeft,
}

impl RuleId {
    pub fn name(&self) -> &'static str {
        match self {
            RuleId::RunwayExhausted => "runway_exhausted",
            RuleId::EmergencyBypass => "emergency_bypass",
            RuleId::OversizedTicket => "oversized_ticket",
            RuleId::RiskSafetyNet => "risk_safety_net",
            RuleId::CapacityAvailable => "capacity_available",
            RuleId::Swap => "swap",
            RuleId::NoOptionLeft => "no_option_left",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One named fact backing a recommendation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ImpactValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl ImpactValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ImpactValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ImpactValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ImpactValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ImpactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpactValue::Number(n) => write!(f, "{n}"),
            ImpactValue::Text(s) => f.write_str(s),
            ImpactValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl From<f64> for ImpactValue {
    fn from(v: f64) -> Self {
        ImpactValue::Number(v)
    }
}

impl From<u32> for ImpactValue {
    fn from(v: u32) -> Self {
        ImpactValue::Number(f64::from(v))
    }
}

impl From<bool> for ImpactValue {
    fn from(v: bool) -> Self {
        ImpactValue::Flag(v)
    }
}

impl From<String> for ImpactValue {
    fn from(v: String) -> Self {
        ImpactValue::Text(v)
    }
}

impl From<&str> for ImpactValue {
    fn from(v: &str) -> Self {
        ImpactValue::Text(v.to_string())
    }
}

/// Ordered map of impact facts. Ordered so equal inputs render identically.
pub type Impact = BTreeMap<String, ImpactValue>;

/// The cascade's verdict on one candidate.
///
/// Built once per evaluation and read-only afterwards. The target item is
/// present exactly when the action is [`Action::Swap`] or
/// [`Action::ForceSwap`]; the constructors are the only way to build a
/// result, so the pairing cannot drift.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RecommendationResult {
    action: Action,
    rule: RuleId,
    target_item: Option<ActiveItem>,
    reasoning: String,
    impact: Impact,
    action_plan: Vec<String>,
}

impl RecommendationResult {
    /// Result for an action that removes nothing. Swap results are built
    /// with [`with_target`](Self::with_target).
    pub(crate) fn new(action: Action, rule: RuleId, reasoning: impl Into<String>) -> Self {
        debug_assert!(!action.removes_item(), "swap results need a target");
        Self {
            action,
            rule,
            target_item: None,
            reasoning: reasoning.into(),
            impact: Impact::new(),
            action_plan: Vec::new(),
        }
    }

    /// [`Action::ForceSwap`] when `emergency`, otherwise [`Action::Swap`].
    pub(crate) fn with_target(
        emergency: bool,
        rule: RuleId,
        target: ActiveItem,
        reasoning: impl Into<String>,
    ) -> Self {
        let action = if emergency {
            Action::ForceSwap
        } else {
            Action::Swap
        };
        Self {
            action,
            rule,
            target_item: Some(target),
            reasoning: reasoning.into(),
            impact: Impact::new(),
            action_plan: Vec::new(),
        }
    }

    pub(crate) fn fact(mut self, key: &str, value: impl Into<ImpactValue>) -> Self {
        self.impact.insert(key.to_string(), value.into());
        self
    }

    pub(crate) fn step(mut self, step: impl Into<String>) -> Self {
        self.action_plan.push(step.into());
        self
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// The rule that produced this result.
    pub fn rule(&self) -> RuleId {
        self.rule
    }

    pub fn target_item(&self) -> Option<&ActiveItem> {
        self.target_item.as_ref()
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn impact(&self) -> &Impact {
        &self.impact
    }

    /// Shorthand for a numeric impact fact.
    pub fn impact_number(&self, key: &str) -> Option<f64> {
        self.impact.get(key).and_then(ImpactValue::as_number)
    }

    /// Ordered human-readable steps. Empty for [`Action::Add`].
    pub fn action_plan(&self) -> &[String] {
        &self.action_plan
    }
}
