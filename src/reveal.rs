//! One-shot, visibility-triggered entrance reveals for page sections.

use std::time::Duration;

use crate::foundation::core::Rect;

/// Fraction of a section that must be on screen before it reveals.
pub const DEFAULT_THRESHOLD: f64 = 0.1;
/// Delay between consecutive children of a revealing section.
pub const DEFAULT_STAGGER: Duration = Duration::from_millis(100);
/// Delay between consecutive items inside one child (the tech chips on a project card).
pub const ITEM_STAGGER: Duration = Duration::from_millis(50);

/// Share of `section` covered by `viewport`, in `[0, 1]`. Empty sections are never visible.
pub fn visible_fraction(section: Rect, viewport: Rect) -> f64 {
    let section = section.abs();
    let area = section.area();
    if area <= 0.0 {
        return 0.0;
    }
    let overlap = section.intersect(viewport.abs());
    (overlap.area() / area).clamp(0.0, 1.0)
}

/// Entrance schedule produced the one time a section reveals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealPlan {
    /// Start delay for each child, in document order.
    pub delays: Vec<Duration>,
    /// For each child, the delays of its own items relative to the child's start.
    pub items: Vec<Vec<Duration>>,
}

impl RevealPlan {
    /// Time from the reveal until item `item` of child `child` starts.
    pub fn item_start(&self, child: usize, item: usize) -> Option<Duration> {
        let own = self.items.get(child)?.get(item)?;
        Some(self.delays[child] + *own)
    }
}

/// Per-section reveal state. No state is shared between sections.
#[derive(Clone, Debug)]
pub struct RevealTracker {
    threshold: f64,
    stagger: Duration,
    children: usize,
    items: Vec<usize>,
    item_stagger: Duration,
    revealed: bool,
}

impl RevealTracker {
    pub fn new(children: usize) -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            stagger: DEFAULT_STAGGER,
            children,
            items: Vec::new(),
            item_stagger: ITEM_STAGGER,
            revealed: false,
        }
    }

    /// One child per entry of `counts`, each staggering in that many items.
    pub fn with_items(mut self, counts: Vec<usize>, stagger: Duration) -> Self {
        self.children = counts.len();
        self.items = counts;
        self.item_stagger = stagger;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn children(&self) -> usize {
        self.children
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Feed the current visible fraction. Returns the plan on the first crossing only.
    pub fn observe(&mut self, fraction: f64) -> Option<RevealPlan> {
        if self.revealed || fraction.is_nan() || fraction < self.threshold {
            return None;
        }
        self.revealed = true;
        let stagger =
            |step: Duration, n: usize| -> Vec<Duration> { (0..n).map(|i| step * i as u32).collect() };
        Some(RevealPlan {
            delays: stagger(self.stagger, self.children),
            items: (0..self.children)
                .map(|c| stagger(self.item_stagger, self.items.get(c).copied().unwrap_or(0)))
                .collect(),
        })
    }

    pub fn observe_rects(&mut self, section: Rect, viewport: Rect) -> Option<RevealPlan> {
        self.observe(visible_fraction(section, viewport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_of_partial_overlap() {
        let section = Rect::new(0.0, 900.0, 1000.0, 1900.0);
        let viewport = Rect::new(0.0, 0.0, 1000.0, 1000.0);
        assert!((visible_fraction(section, viewport) - 0.1).abs() < 1e-12);
        assert_eq!(visible_fraction(section, Rect::new(0.0, 2000.0, 10.0, 10.0)), 0.0);
        assert_eq!(visible_fraction(Rect::ZERO, viewport), 0.0);
    }

    #[test]
    fn reveals_once_at_threshold() {
        let mut t = RevealTracker::new(3);
        assert_eq!(t.observe(0.05), None);
        assert!(!t.is_revealed());

        let plan = t.observe(0.1).unwrap();
        assert_eq!(
            plan.delays,
            vec![
                Duration::ZERO,
                Duration::from_millis(100),
                Duration::from_millis(200)
            ]
        );
        assert!(t.is_revealed());

        assert_eq!(t.observe(1.0), None);
        assert_eq!(t.observe(0.0), None);
        assert!(t.is_revealed());
    }

    #[test]
    fn custom_stagger_and_threshold() {
        let mut t = RevealTracker::new(2)
            .with_stagger(Duration::from_millis(50))
            .with_threshold(0.5);
        assert_eq!(t.observe(0.4), None);
        assert_eq!(
            t.observe(0.5).unwrap().delays,
            vec![Duration::ZERO, Duration::from_millis(50)]
        );
    }

    #[test]
    fn nested_items_stagger_inside_each_child() {
        let mut t = RevealTracker::new(0).with_items(vec![3, 0, 2], ITEM_STAGGER);
        assert_eq!(t.children(), 3);
        let plan = t.observe(1.0).unwrap();
        assert_eq!(plan.delays.len(), 3);
        assert_eq!(
            plan.items[0],
            vec![
                Duration::ZERO,
                Duration::from_millis(50),
                Duration::from_millis(100)
            ]
        );
        assert!(plan.items[1].is_empty());
        assert_eq!(plan.item_start(2, 1), Some(Duration::from_millis(250)));
        assert_eq!(plan.item_start(1, 0), None);
    }

    #[test]
    fn nan_fraction_never_reveals() {
        let mut t = RevealTracker::new(1);
        assert_eq!(t.observe(f64::NAN), None);
    }
}
