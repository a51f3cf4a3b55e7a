//! Mid-sprint admission decision cascade.
//!
//! Given a candidate ticket, the sprint snapshot, the committed items and
//! the risk bundle, the cascade emits exactly one [`Action`] with its
//! reasoning, impact facts and action plan.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//!
//! | # | Rule | Outcome |
//! |---|---|---|
//! | 0 | runway exhausted (non-emergency) | DEFER |
//! | 0.5 | emergency bypass (Critical/Highest) | FORCE_SWAP or OVERLOAD |
//! | 1 | oversized ticket, short runway | SPLIT |
//! | 2 | any risk signal over threshold | DEFER |
//! | 3 | free capacity covers the ticket | ADD |
//! | 4 | a committed item can be traded | SWAP |
//! | 5 | nothing else applies | DEFER |

mod config;
mod engine;
mod rules;
mod split;
mod types;

pub use config::CascadeConfig;
pub use engine::{evaluate, DecisionCascade};
pub use rules::{
    standard_rules, CapacityAvailable, CascadeRule, EmergencyBypass, Evaluation, NoOptionLeft,
    OversizedTicket, RiskSafetyNet, RunwayExhausted, Swap,
};
pub use split::{SplitPlan, ANALYSIS_SHARE};
pub use types::{Action, Impact, ImpactValue, RecommendationResult, RuleId};
