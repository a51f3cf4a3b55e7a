//! Priority and workflow-status labels.
//!
//! Both enums parse leniently: labels coming from an external tracker are
//! matched case-insensitively and without regard to spaces, underscores or
//! hyphens. Unrecognized labels are preserved verbatim rather than rejected.

use std::fmt;

/// Normalizes a tracker label for matching: lowercase, separators removed.
fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Priority label of a work item.
///
/// Ordering between priorities goes through [`Priority::rank`], not through
/// the variant order: `Critical` and `Highest` share the top rank, and an
/// unknown label ranks as `Medium`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum Priority {
    Lowest,
    Low,
    #[default]
    Medium,
    High,
    Critical,
    Highest,
    /// A label the ranking table does not know. Ranks as `Medium`.
    Unknown(String),
}

impl Priority {
    /// Rank used by every selection rule. Higher is more valuable.
    ///
    /// | Priority | Rank |
    /// |---|---|
    /// | Highest, Critical | 5 |
    /// | High | 4 |
    /// | Medium, unknown | 3 |
    /// | Low | 2 |
    /// | Lowest | 1 |
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Highest | Priority::Critical => 5,
            Priority::High => 4,
            Priority::Medium | Priority::Unknown(_) => 3,
            Priority::Low => 2,
            Priority::Lowest => 1,
        }
    }

    /// Whether this priority qualifies for the emergency protocol.
    pub fn is_emergency(&self) -> bool {
        matches!(self, Priority::Critical | Priority::Highest)
    }

    /// Parses a tracker label. Never fails.
    pub fn parse(label: &str) -> Self {
        match normalize(label).as_str() {
            "lowest" => Priority::Lowest,
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            "critical" => Priority::Critical,
            "highest" => Priority::Highest,
            _ => Priority::Unknown(label.to_string()),
        }
    }

    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            Priority::Lowest => "Lowest",
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
            Priority::Highest => "Highest",
            Priority::Unknown(label) => label,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for Priority {
    fn from(label: &str) -> Self {
        Priority::parse(label)
    }
}

impl From<String> for Priority {
    fn from(label: String) -> Self {
        Priority::parse(&label)
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        p.label().to_string()
    }
}

/// Workflow status of a committed item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum ItemStatus {
    #[default]
    ToDo,
    InProgress,
    InReview,
    Done,
    Completed,
    Closed,
    /// A status the tracker reported that is not in the known set.
    ///
    /// Never treated as "To Do" and never treated as closed, so it stays
    /// swappable but always pays the full disruption penalty.
    Other(String),
}

impl ItemStatus {
    /// Parses a tracker label. Never fails.
    pub fn parse(label: &str) -> Self {
        match normalize(label).as_str() {
            "todo" => ItemStatus::ToDo,
            "inprogress" => ItemStatus::InProgress,
            "inreview" => ItemStatus::InReview,
            "done" => ItemStatus::Done,
            "completed" => ItemStatus::Completed,
            "closed" => ItemStatus::Closed,
            _ => ItemStatus::Other(label.to_string()),
        }
    }

    /// True only for work that has not been started.
    pub fn is_to_do(&self) -> bool {
        matches!(self, ItemStatus::ToDo)
    }

    /// True for finished work, which is never a swap candidate.
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            ItemStatus::Done | ItemStatus::Completed | ItemStatus::Closed
        )
    }

    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            ItemStatus::ToDo => "To Do",
            ItemStatus::InProgress => "In Progress",
            ItemStatus::InReview => "In Review",
            ItemStatus::Done => "Done",
            ItemStatus::Completed => "Completed",
            ItemStatus::Closed => "Closed",
            ItemStatus::Other(label) => label,
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for ItemStatus {
    fn from(label: &str) -> Self {
        ItemStatus::parse(label)
    }
}

impl From<String> for ItemStatus {
    fn from(label: String) -> Self {
        ItemStatus::parse(&label)
    }
}

impl From<ItemStatus> for String {
    fn from(s: ItemStatus) -> Self {
        s.label().to_string()
    }
}
