//! Work items and the sprint snapshot.

use super::types::{ItemStatus, Priority};

/// A proposed work item asking to enter the running sprint.
///
/// # Examples
///
/// ```
/// use u_replan::sprint::{Priority, WorkItemCandidate};
///
/// let ticket = WorkItemCandidate::new("Fix login timeout", 3, Priority::High)
///     .with_description("Sessions expire after 30s on mobile")
///     .with_item_type("Bug");
/// assert_eq!(ticket.story_points, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkItemCandidate {
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Relative size. Callers guarantee `>= 1`.
    pub story_points: u32,
    pub priority: Priority,
    /// Free-form tracker type (Bug, Story, Task...). Not used by the cascade.
    #[cfg_attr(feature = "serde", serde(default, rename = "type"))]
    pub item_type: String,
}

impl WorkItemCandidate {
    pub fn new(title: impl Into<String>, story_points: u32, priority: Priority) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            story_points,
            priority,
            item_type: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = item_type.into();
        self
    }
}

/// An item already committed to the sprint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveItem {
    pub id: String,
    pub title: String,
    pub story_points: f64,
    pub priority: Priority,
    pub status: ItemStatus,
}

impl ActiveItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        story_points: f64,
        priority: Priority,
        status: ItemStatus,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            story_points,
            priority,
            status,
        }
    }
}

/// Point-in-time capacity and timing snapshot of the running sprint.
///
/// The snapshot is owned by the caller and must be coherent with the
/// active items handed in alongside it; nothing here detects staleness.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SprintState {
    /// Working days left before the sprint boundary.
    pub days_remaining: f64,
    /// Story points currently committed.
    pub sprint_load_7d: f64,
    /// Recent throughput, used as the capacity proxy.
    pub team_velocity_14d: f64,
}

impl SprintState {
    pub fn new(days_remaining: f64, sprint_load_7d: f64, team_velocity_14d: f64) -> Self {
        Self {
            days_remaining,
            sprint_load_7d,
            team_velocity_14d,
        }
    }

    /// Velocity with a floor of one story point.
    pub fn real_capacity(&self) -> f64 {
        self.team_velocity_14d.max(1.0)
    }

    /// Uncommitted capacity, never negative.
    ///
    /// This is the only place the `capacity - load` formula lives; the
    /// risk bundle falls back to it when the provider omits the value.
    pub fn free_capacity(&self) -> f64 {
        (self.real_capacity() - self.sprint_load_7d).max(0.0)
    }
}
