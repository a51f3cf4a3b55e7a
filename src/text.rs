//! Number formatting shared by reasoning and explanation text.

/// Whole story points, e.g. `"5 SP"`.
pub(crate) fn fmt_sp(sp: f64) -> String {
    format!("{} SP", sp.round() as i64)
}

/// Whole percentage, e.g. `"42%"`.
pub(crate) fn fmt_pct(value: f64) -> String {
    format!("{}%", value.round() as i64)
}

/// Signed whole percentage, e.g. `"-12%"` or `"+0%"`.
pub(crate) fn fmt_signed_pct(value: f64) -> String {
    format!("{:+}%", value.round() as i64)
}

/// Percentage clamped to `[lo, 99]` for display, so a model estimate never
/// reads as certainty.
pub(crate) fn cap_pct(value: f64, lo: i64) -> i64 {
    (value.round() as i64).clamp(lo, 99)
}
