//! Canonical decomposition of an oversized ticket.
//!
//! Both the cascade's action plan and the explanation narrative read the
//! split from here, so the two can never quote different numbers.

/// Share of the original estimate assigned to the analysis slice.
pub const ANALYSIS_SHARE: f64 = 0.3;

/// An oversized ticket broken into an analysis slice (doable this sprint)
/// and an implementation slice (planned for the next).
///
/// # Examples
///
/// ```
/// use u_replan::cascade::SplitPlan;
///
/// let plan = SplitPlan::for_points(13);
/// assert_eq!(plan.analysis_sp, 4);
/// assert_eq!(plan.implementation_sp, 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitPlan {
    pub total_sp: u32,
    pub analysis_sp: u32,
    pub implementation_sp: u32,
}

impl SplitPlan {
    /// 30% analysis (at least one point), the remainder implementation.
    /// The slices always sum to `total_sp`.
    pub fn for_points(total_sp: u32) -> Self {
        let share = (f64::from(total_sp) * ANALYSIS_SHARE).round() as u32;
        let analysis_sp = share.max(1).min(total_sp);
        Self {
            total_sp,
            analysis_sp,
            implementation_sp: total_sp - analysis_sp,
        }
    }

    pub fn analysis_title(title: &str) -> String {
        format!("{title}: Analysis & Design")
    }

    pub fn implementation_title(title: &str) -> String {
        format!("{title}: Implementation")
    }
}
