//! Lexicographic selection engine.
//!
//! A domain-agnostic "pick the best item" engine: an ordered list of scoring
//! rules, where a later rule is only consulted when every earlier rule ties.
//! Lower scores win. Items that remain tied after every rule keep their
//! input order, so the first occurrence is selected.

/// Scores closer than this count as tied.
const TIE_EPSILON: f64 = 1e-9;

/// A scoring rule over items of type `T` in context `C`.
///
/// Rules return `f64` scores where **lower is better**.
///
/// # Examples
///
/// ```
/// use u_replan::swap::SelectionRule;
/// use u_replan::sprint::ActiveItem;
///
/// struct SmallestFirst;
///
/// impl SelectionRule<ActiveItem, ()> for SmallestFirst {
///     fn score(&self, item: &ActiveItem, _ctx: &()) -> f64 {
///         item.story_points
///     }
/// }
/// ```
pub trait SelectionRule<T, C>: Send + Sync {
    /// Computes the score for the given item. Lower is better.
    fn score(&self, item: &T, context: &C) -> f64;
}

/// Ordered rule list evaluated lexicographically.
pub struct SelectionEngine<T, C> {
    rules: Vec<Box<dyn SelectionRule<T, C>>>,
}

impl<T, C> SelectionEngine<T, C> {
    /// Creates an engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule. Rules added later only break ties of earlier ones.
    pub fn with_rule<R: SelectionRule<T, C> + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    fn scores(&self, item: &T, context: &C) -> Vec<f64> {
        self.rules.iter().map(|r| r.score(item, context)).collect()
    }

    /// True when `a` is strictly better than `b`.
    fn better(a: &[f64], b: &[f64]) -> bool {
        for (va, vb) in a.iter().zip(b.iter()) {
            if (va - vb).abs() > TIE_EPSILON {
                return va < vb;
            }
        }
        false
    }

    /// Returns the index of the best item among those accepted by `filter`.
    ///
    /// Single pass. A later item only replaces the incumbent when it is
    /// strictly better, so ties resolve to the first occurrence. Returns
    /// `None` when no item passes the filter.
    pub fn select_best_where<F>(&self, items: &[T], context: &C, filter: F) -> Option<usize>
    where
        F: Fn(&T) -> bool,
    {
        let mut best: Option<(usize, Vec<f64>)> = None;

        for (idx, item) in items.iter().enumerate() {
            if !filter(item) {
                continue;
            }
            let scores = self.scores(item, context);
            let replace = match &best {
                Some((_, incumbent)) => Self::better(&scores, incumbent),
                None => true,
            };
            if replace {
                best = Some((idx, scores));
            }
        }

        best.map(|(idx, _)| idx)
    }
}

impl<T, C> Default for SelectionEngine<T, C> {
    fn default() -> Self {
        Self::new()
    }
}
