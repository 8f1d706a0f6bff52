//! Single shared visibility watcher.

use std::collections::BTreeMap;

use super::document::{Document, ElementId};
use super::geometry::{intersection_ratio, Viewport};

/// Notification that an element crossed the visibility threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    /// Whether at least `threshold` of the element is inside the root.
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Tracks observed elements and reports threshold crossings.
///
/// The first check after an element is observed always yields an entry for
/// it; after that, entries are only produced when its intersecting state
/// flips. Elements no longer in the document are skipped.
#[derive(Debug, Clone)]
pub struct VisibilityWatcher {
    threshold: f64,
    root_margin_bottom: f64,
    /// Last reported state; `None` until first checked.
    observed: BTreeMap<ElementId, Option<bool>>,
}

impl VisibilityWatcher {
    /// Create a watcher. `threshold` is clamped to `[0, 1]`.
    pub fn new(threshold: f64, root_margin_bottom: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            root_margin_bottom,
            observed: BTreeMap::new(),
        }
    }

    /// Start observing `id`. Returns `false` if it was already observed.
    pub fn observe(&mut self, id: ElementId) -> bool {
        if self.observed.contains_key(&id) {
            return false;
        }
        self.observed.insert(id, None);
        true
    }

    pub fn unobserve(&mut self, id: ElementId) -> bool {
        self.observed.remove(&id).is_some()
    }

    pub fn is_observing(&self, id: ElementId) -> bool {
        self.observed.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn root_margin_bottom(&self) -> f64 {
        self.root_margin_bottom
    }

    /// Measure every observed element against `viewport` and collect the
    /// entries whose state changed since the last check.
    pub fn take_records(&mut self, root: &Document, viewport: &Viewport) -> Vec<IntersectionEntry> {
        let (threshold, margin) = (self.threshold, self.root_margin_bottom);
        let mut entries = Vec::new();

        for (&id, last) in self.observed.iter_mut() {
            let Some(element) = root.get(id) else {
                continue;
            };

            let ratio = intersection_ratio(&element.rect, viewport, margin);
            let is_intersecting = crosses(ratio, threshold);

            if *last != Some(is_intersecting) {
                *last = Some(is_intersecting);
                entries.push(IntersectionEntry {
                    target: id,
                    is_intersecting,
                    ratio,
                });
            }
        }

        entries
    }

    /// Whether `ratio` would count as intersecting for this watcher.
    pub fn is_sufficiently_visible(&self, ratio: f64) -> bool {
        crosses(ratio, self.threshold)
    }
}

fn crosses(ratio: f64, threshold: f64) -> bool {
    ratio > 0.0 && ratio >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::document::Element;
    use crate::reveal::geometry::Rect;

    fn doc_with(rect: Rect) -> (Document, ElementId) {
        let mut doc = Document::new();
        let id = doc.insert(Element::new(rect).tracked());
        (doc, id)
    }

    #[test]
    fn observe_is_idempotent() {
        let mut watcher = VisibilityWatcher::new(0.1, 50.0);
        let (_, id) = doc_with(Rect::default());

        assert!(watcher.observe(id));
        assert!(!watcher.observe(id));
        assert_eq!(watcher.len(), 1);
    }

    #[test]
    fn reports_only_on_change() {
        let mut watcher = VisibilityWatcher::new(0.1, 50.0);
        let (doc, id) = doc_with(Rect::new(0.0, 100.0, 100.0, 100.0));
        watcher.observe(id);
        let view = Viewport::new(1000.0, 800.0);

        let first = watcher.take_records(&doc, &view);
        assert_eq!(first.len(), 1);
        assert!(first[0].is_intersecting);

        assert!(watcher.take_records(&doc, &view).is_empty());

        let away = watcher.take_records(&doc, &view.scrolled_to(2000.0));
        assert_eq!(away.len(), 1);
        assert!(!away[0].is_intersecting);
    }

    #[test]
    fn below_threshold_is_not_intersecting() {
        let mut watcher = VisibilityWatcher::new(0.5, 0.0);
        // 30 of 100 rows visible.
        let (doc, id) = doc_with(Rect::new(0.0, 770.0, 100.0, 100.0));
        watcher.observe(id);

        let entries = watcher.take_records(&doc, &Viewport::new(1000.0, 800.0));
        assert!(!entries[0].is_intersecting);
        assert!((entries[0].ratio - 0.3).abs() < 1e-9);
    }

    #[test]
    fn removed_elements_are_skipped() {
        let mut watcher = VisibilityWatcher::new(0.1, 50.0);
        let (mut doc, id) = doc_with(Rect::new(0.0, 0.0, 10.0, 10.0));
        watcher.observe(id);
        doc.remove(id);

        assert!(watcher
            .take_records(&doc, &Viewport::new(100.0, 100.0))
            .is_empty());
    }
}
