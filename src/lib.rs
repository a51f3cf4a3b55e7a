//! Mid-sprint admission decision core.
//!
//! Decides whether a ticket proposed during a running sprint should be
//! admitted and, if not, what to do instead:
//!
//! - **Cascade**: a rule-ordered policy producing exactly one of ADD, SWAP,
//!   FORCE_SWAP, OVERLOAD, DEFER or SPLIT, with reasoning, impact facts and
//!   an action plan. Earlier rules always short-circuit later ones.
//! - **Swap selection**: picks the committed item to displace, in a
//!   standard mode and an emergency mode that never interrupts started work.
//! - **Explanation**: turns a result into a user-facing card whose
//!   confidence colour is derived from the risk numbers alone.
//! - **Risk**: the externally supplied score bundle, its numeric bands, and
//!   a provider seam with a heuristic fallback.
//! - **Triage**: evaluates a whole backlog against one snapshot.
//!
//! # Architecture
//!
//! Everything here is synchronous, stateless and free of I/O. Risk scores
//! are handed in per call as plain values; model training, persistence and
//! transport are the caller's concern.
//!
//! ```
//! use u_replan::cascade::{evaluate, Action, CascadeConfig};
//! use u_replan::explain::explain;
//! use u_replan::risk::RiskSignals;
//! use u_replan::sprint::{ActiveItem, ItemStatus, Priority, SprintState, WorkItemCandidate};
//!
//! let ticket = WorkItemCandidate::new("Partner API", 5, Priority::Medium);
//! let sprint = SprintState::new(8.0, 28.0, 30.0);
//! let items = vec![ActiveItem::new("1", "X", 5.0, Priority::Low, ItemStatus::ToDo)];
//! let risk = RiskSignals::new(20.0, 10.0, -5.0).with_free_capacity(2.0);
//!
//! let result = evaluate(&ticket, &sprint, &items, &risk, &CascadeConfig::default());
//! assert_eq!(result.action(), Action::Swap);
//! assert_eq!(result.target_item().unwrap().id, "1");
//!
//! let card = explain(&result, &risk, &ticket);
//! assert_eq!(card.action_verb, "Execute Swap");
//! ```

pub mod cascade;
pub mod error;
pub mod explain;
pub mod risk;
pub mod sprint;
pub mod swap;
pub mod triage;

mod text;

pub use cascade::{evaluate, Action, CascadeConfig, DecisionCascade, RecommendationResult};
pub use error::{ConfigError, ParseActionError};
pub use explain::{explain, ConfidenceColor, ExplanationResult};
pub use risk::RiskSignals;
