//! Reveal controller: one-shot reveals and count-ups driven by visibility.

use std::collections::BTreeMap;

use strum::Display;
use tracing::{debug, info, warn};

use super::count_up::{CountUpAnimation, DEFAULT_DURATION_MS, DEFAULT_TICK_MS};
use super::document::{Document, ElementId, COUNT_ATTR, VISIBLE_CLASS};
use super::format::format_grouped;
use super::geometry::Viewport;
use super::watcher::{IntersectionEntry, VisibilityWatcher};
use crate::metrics;

/// Tuning for the watcher and the count-up animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    /// Fraction of an element that must be visible to reveal it.
    pub threshold: f64,
    /// Pixels the viewport's bottom edge is pulled in by.
    pub root_margin_bottom: f64,
    pub duration_ms: u64,
    pub tick_ms: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin_bottom: 50.0,
            duration_ms: DEFAULT_DURATION_MS,
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

/// Count-up progress of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AnimationPhase {
    #[strum(serialize = "not-animating")]
    NotAnimating,
    #[strum(serialize = "animating")]
    Animating,
    #[strum(serialize = "completed")]
    Completed,
}

/// Per-element reveal record.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedElement {
    pub id: ElementId,
    /// Set once, on the first sufficient intersection.
    pub revealed: bool,
    /// Count target; only stat widgets have one.
    pub target_count: Option<i64>,
    pub current_display_value: i64,
    animation: Option<CountUpAnimation>,
}

impl ObservedElement {
    fn new(id: ElementId) -> Self {
        Self {
            id,
            revealed: false,
            target_count: None,
            current_display_value: 0,
            animation: None,
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        match &self.animation {
            None => AnimationPhase::NotAnimating,
            Some(anim) if anim.is_complete() => AnimationPhase::Completed,
            Some(_) => AnimationPhase::Animating,
        }
    }

    pub fn animation(&self) -> Option<&CountUpAnimation> {
        self.animation.as_ref()
    }
}

/// Parse a count attribute the way a lenient integer parse would: optional
/// sign, then leading digits, ignoring anything after (`"1500+"` -> 1500).
///
/// Anything unparseable or non-positive yields 0. Digit runs too large for
/// an `i64` saturate at `i64::MAX`.
pub fn parse_count(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return 0;
    };

    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    let digits = &rest[..digits_end];
    match digits.parse::<i64>() {
        Ok(value) if !negative => value,
        Ok(_) => 0,
        Err(_) if !digits.is_empty() => {
            if negative {
                0
            } else {
                warn!(raw, "Count target out of range, saturating");
                i64::MAX
            }
        }
        Err(_) => {
            warn!(raw, "Unparseable count target, using 0");
            0
        }
    }
}

/// Reveals tracked elements and runs stat count-ups, each at most once.
#[derive(Debug, Clone)]
pub struct ViewportRevealController {
    config: ControllerConfig,
    watcher: VisibilityWatcher,
    records: BTreeMap<ElementId, ObservedElement>,
}

impl ViewportRevealController {
    /// Register `elements` and `stat_widgets` with one shared watcher.
    ///
    /// The two sets may overlap; each element is registered once. Stat
    /// widgets take their target from the `data-count` attribute in `root`.
    pub fn initialize(
        root: &Document,
        elements: &[ElementId],
        stat_widgets: &[ElementId],
        config: ControllerConfig,
    ) -> Self {
        let mut controller = Self {
            config,
            watcher: VisibilityWatcher::new(config.threshold, config.root_margin_bottom),
            records: BTreeMap::new(),
        };

        for &id in elements {
            controller.register(id);
        }

        for &id in stat_widgets {
            controller.register(id);
            let target = parse_count(root.get(id).and_then(|e| e.attr(COUNT_ATTR)));
            if let Some(record) = controller.records.get_mut(&id) {
                record.target_count.get_or_insert(target);
            }
        }

        debug!(
            observed = controller.watcher.len(),
            threshold = config.threshold,
            "Reveal controller initialized"
        );

        controller
    }

    /// Initialize from the document's own markup: every `data-scroll`
    /// element plus every `stat-number` widget.
    pub fn initialize_document(root: &Document, config: ControllerConfig) -> Self {
        Self::initialize(root, &root.scroll_tracked(), &root.stat_widgets(), config)
    }

    fn register(&mut self, id: ElementId) {
        if self.watcher.observe(id) {
            self.records.insert(id, ObservedElement::new(id));
            debug!(element = %id, "Observing element");
        }
    }

    /// Re-measure against `viewport` and dispatch any threshold crossings.
    ///
    /// Returns how many elements were newly revealed.
    pub fn scroll_to(&mut self, root: &mut Document, viewport: &Viewport) -> usize {
        let entries = self.watcher.take_records(root, viewport);
        self.handle_entries(root, &entries)
    }

    /// Dispatch watcher entries. Never fails; entries for unknown or
    /// detached elements are ignored.
    pub fn handle_entries(&mut self, root: &mut Document, entries: &[IntersectionEntry]) -> usize {
        let mut revealed = 0;

        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let Some(record) = self.records.get_mut(&entry.target) else {
                continue;
            };
            let Some(element) = root.get_mut(entry.target) else {
                continue;
            };
            if record.revealed {
                continue;
            }

            record.revealed = true;
            element.add_class(VISIBLE_CLASS);
            revealed += 1;
            metrics::inc_elements_revealed();
            debug!(element = %entry.target, ratio = entry.ratio, "Element revealed");

            if let Some(target) = record.target_count {
                Self::start(record, target, self.config.duration_ms, self.config.tick_ms);
            }
        }

        revealed
    }

    /// Start a count-up on a revealed element. Returns `false` if the
    /// element is unknown, not yet revealed, or already has one.
    pub fn run_count_up(
        &mut self,
        id: ElementId,
        target: i64,
        duration_ms: u64,
        tick_ms: u64,
    ) -> bool {
        let Some(record) = self.records.get_mut(&id) else {
            return false;
        };
        if !record.revealed {
            debug!(element = %id, "Count-up refused before reveal");
            return false;
        }

        let started = Self::start(record, target, duration_ms, tick_ms);
        if started {
            record.target_count = Some(target.max(0));
        }
        started
    }

    fn start(record: &mut ObservedElement, target: i64, duration_ms: u64, tick_ms: u64) -> bool {
        if record.animation.is_some() {
            return false;
        }

        record.animation = Some(CountUpAnimation::new(target, duration_ms, tick_ms));
        record.current_display_value = 0;
        debug!(element = %record.id, target, "Count-up started");
        true
    }

    /// Advance every running count-up by one tick and write the grouped
    /// value into the element's text. Returns how many are still running.
    pub fn tick(&mut self, root: &mut Document) -> usize {
        let mut running = 0;

        for record in self.records.values_mut() {
            let Some(anim) = record.animation.as_mut() else {
                continue;
            };
            if anim.is_complete() {
                continue;
            }

            let value = anim.tick();
            record.current_display_value = value;
            if let Some(element) = root.get_mut(record.id) {
                element.text = format_grouped(value);
            }

            if anim.is_complete() {
                metrics::inc_count_ups_completed();
                info!(element = %record.id, value, "Count-up completed");
            } else {
                running += 1;
            }
        }

        running
    }

    /// True when no count-up is running.
    pub fn is_idle(&self) -> bool {
        self.records
            .values()
            .all(|r| r.phase() != AnimationPhase::Animating)
    }

    pub fn record(&self, id: ElementId) -> Option<&ObservedElement> {
        self.records.get(&id)
    }

    pub fn records(&self) -> impl Iterator<Item = &ObservedElement> {
        self.records.values()
    }

    pub fn watcher(&self) -> &VisibilityWatcher {
        &self.watcher
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::document::Element;
    use crate::reveal::geometry::Rect;

    const VIEW: Viewport = Viewport {
        width: 1200.0,
        height: 800.0,
        scroll_y: 0.0,
    };

    #[test]
    fn parse_count_is_lenient() {
        assert_eq!(parse_count(Some("1500")), 1500);
        assert_eq!(parse_count(Some(" 98%")), 98);
        assert_eq!(parse_count(Some("15000+")), 15000);
        assert_eq!(parse_count(Some("+7")), 7);
        assert_eq!(parse_count(Some("-5")), 0);
        assert_eq!(parse_count(Some("many")), 0);
        assert_eq!(parse_count(Some("")), 0);
        assert_eq!(parse_count(None), 0);
        assert_eq!(parse_count(Some("99999999999999999999")), i64::MAX);
        assert_eq!(parse_count(Some("-99999999999999999999")), 0);
    }

    #[test]
    fn overlapping_sets_register_once() {
        let mut doc = Document::new();
        let stat = doc.insert(Element::new(Rect::new(0.0, 0.0, 10.0, 10.0)).tracked().stat("3"));
        let plain = doc.insert(Element::new(Rect::new(0.0, 0.0, 10.0, 10.0)).tracked());

        let ctl = ViewportRevealController::initialize(
            &doc,
            &[stat, plain, plain],
            &[stat],
            ControllerConfig::default(),
        );

        assert_eq!(ctl.watcher().len(), 2);
        assert_eq!(ctl.record(stat).and_then(|r| r.target_count), Some(3));
        assert_eq!(ctl.record(plain).and_then(|r| r.target_count), None);
    }

    #[test]
    fn reveal_fires_once_across_crossings() {
        let mut doc = Document::new();
        let id = doc.insert(Element::new(Rect::new(0.0, 1000.0, 100.0, 100.0)).tracked());
        let mut ctl = ViewportRevealController::initialize_document(&doc, ControllerConfig::default());

        assert_eq!(ctl.scroll_to(&mut doc, &VIEW), 0);
        assert_eq!(ctl.scroll_to(&mut doc, &VIEW.scrolled_to(600.0)), 1);
        assert_eq!(ctl.scroll_to(&mut doc, &VIEW), 0);
        assert_eq!(ctl.scroll_to(&mut doc, &VIEW.scrolled_to(600.0)), 0);

        assert!(ctl.record(id).is_some_and(|r| r.revealed));
        assert!(doc.get(id).is_some_and(|e| e.has_class(VISIBLE_CLASS)));
    }

    #[test]
    fn stat_animates_once_and_lands_on_target() {
        let mut doc = Document::new();
        let id = doc.insert(Element::new(Rect::new(0.0, 100.0, 100.0, 40.0)).stat("15000"));
        let mut ctl = ViewportRevealController::initialize_document(&doc, ControllerConfig::default());

        ctl.scroll_to(&mut doc, &VIEW);
        assert_eq!(ctl.record(id).map(|r| r.phase()), Some(AnimationPhase::Animating));
        assert!(!ctl.run_count_up(id, 15000, 2000, 16));

        let mut last = 0;
        while ctl.tick(&mut doc) > 0 {
            let now = ctl.record(id).map_or(0, |r| r.current_display_value);
            assert!(now >= last);
            last = now;
        }

        let record = ctl.record(id).unwrap();
        assert_eq!(record.phase(), AnimationPhase::Completed);
        assert_eq!(record.current_display_value, 15000);
        assert_eq!(doc.get(id).unwrap().text, "15,000");
        assert!(ctl.is_idle());
    }

    #[test]
    fn bad_count_shows_zero_after_one_tick() {
        let mut doc = Document::new();
        let id = doc.insert(Element::new(Rect::new(0.0, 0.0, 100.0, 40.0)).stat("n/a"));
        let mut ctl = ViewportRevealController::initialize_document(&doc, ControllerConfig::default());

        ctl.scroll_to(&mut doc, &VIEW);
        assert_eq!(ctl.tick(&mut doc), 0);
        assert_eq!(doc.get(id).unwrap().text, "0");
        assert_eq!(ctl.record(id).map(|r| r.phase()), Some(AnimationPhase::Completed));
    }

    #[test]
    fn detached_element_is_ignored() {
        let mut doc = Document::new();
        let id = doc.insert(Element::new(Rect::new(0.0, 0.0, 100.0, 40.0)).tracked().stat("5"));
        let mut ctl = ViewportRevealController::initialize_document(&doc, ControllerConfig::default());

        let entries = [IntersectionEntry {
            target: id,
            is_intersecting: true,
            ratio: 1.0,
        }];
        doc.remove(id);

        assert_eq!(ctl.handle_entries(&mut doc, &entries), 0);
        assert_eq!(ctl.scroll_to(&mut doc, &VIEW), 0);
        assert!(ctl.record(id).is_some_and(|r| !r.revealed));
    }

    #[test]
    fn plain_elements_never_animate() {
        let mut doc = Document::new();
        let id = doc.insert(Element::new(Rect::new(0.0, 0.0, 100.0, 40.0)).tracked());
        let mut ctl = ViewportRevealController::initialize_document(&doc, ControllerConfig::default());

        ctl.scroll_to(&mut doc, &VIEW);
        assert_eq!(ctl.record(id).map(|r| r.phase()), Some(AnimationPhase::NotAnimating));
        assert!(ctl.is_idle());
    }

    #[test]
    fn count_up_waits_for_reveal() {
        let mut doc = Document::new();
        let id = doc.insert(Element::new(Rect::new(0.0, 5000.0, 100.0, 40.0)).tracked());
        let mut ctl = ViewportRevealController::initialize_document(&doc, ControllerConfig::default());

        assert!(!ctl.run_count_up(id, 250, 2000, 16));
        assert_eq!(ctl.record(id).map(|r| r.phase()), Some(AnimationPhase::NotAnimating));
        assert_eq!(ctl.tick(&mut doc), 0);

        ctl.scroll_to(&mut doc, &VIEW.scrolled_to(4800.0));
        assert!(ctl.run_count_up(id, 250, 2000, 16));
        assert_eq!(ctl.record(id).and_then(|r| r.target_count), Some(250));
        assert!(!ctl.run_count_up(id, 250, 2000, 16));
    }

    #[test]
    fn element_removed_after_measurement_is_ignored() {
        let mut doc = Document::new();
        let id = doc.insert(Element::new(Rect::new(0.0, 2000.0, 100.0, 40.0)).tracked().stat("12"));
        let mut ctl = ViewportRevealController::initialize_document(&doc, ControllerConfig::default());

        assert_eq!(ctl.scroll_to(&mut doc, &VIEW), 0);
        doc.remove(id);

        assert_eq!(ctl.scroll_to(&mut doc, &VIEW.scrolled_to(1800.0)), 0);
        assert_eq!(ctl.tick(&mut doc), 0);
        assert!(ctl.record(id).is_some_and(|r| !r.revealed));
        assert!(ctl.is_idle());
    }

    #[test]
    fn custom_threshold_and_margin_reach_the_watcher() {
        let config = ControllerConfig {
            threshold: 0.5,
            root_margin_bottom: 200.0,
            ..ControllerConfig::default()
        };
        let mut doc = Document::new();
        // Root ends at 600: 40 of 100 px visible.
        let partly = doc.insert(Element::new(Rect::new(0.0, 560.0, 100.0, 100.0)).tracked());
        // 50 of 100 px visible.
        let half = doc.insert(Element::new(Rect::new(0.0, 550.0, 100.0, 100.0)).tracked());
        let mut ctl = ViewportRevealController::initialize_document(&doc, config);

        assert_eq!(ctl.watcher().threshold(), 0.5);
        assert_eq!(ctl.watcher().root_margin_bottom(), 200.0);

        assert_eq!(ctl.scroll_to(&mut doc, &VIEW), 1);
        assert!(ctl.record(half).is_some_and(|r| r.revealed));
        assert!(ctl.record(partly).is_some_and(|r| !r.revealed));

        let mut default_doc = Document::new();
        let same = default_doc.insert(Element::new(Rect::new(0.0, 560.0, 100.0, 100.0)).tracked());
        let mut default_ctl =
            ViewportRevealController::initialize_document(&default_doc, ControllerConfig::default());
        assert_eq!(default_ctl.scroll_to(&mut default_doc, &VIEW), 1);
        assert!(default_ctl.record(same).is_some_and(|r| r.revealed));
    }

    #[test]
    fn completed_stat_keeps_value_when_scrolled_back() {
        let mut doc = Document::new();
        let id = doc.insert(Element::new(Rect::new(0.0, 100.0, 100.0, 40.0)).stat("42"));
        let mut ctl = ViewportRevealController::initialize_document(&doc, ControllerConfig::default());

        ctl.scroll_to(&mut doc, &VIEW);
        while ctl.tick(&mut doc) > 0 {}
        assert_eq!(doc.get(id).unwrap().text, "42");

        assert_eq!(ctl.scroll_to(&mut doc, &VIEW.scrolled_to(3000.0)), 0);
        assert_eq!(ctl.scroll_to(&mut doc, &VIEW), 0);

        assert_eq!(ctl.record(id).map(|r| r.phase()), Some(AnimationPhase::Completed));
        assert_eq!(ctl.tick(&mut doc), 0);
        assert_eq!(doc.get(id).unwrap().text, "42");
        assert_eq!(ctl.record(id).map(|r| r.current_display_value), Some(42));
        assert!(ctl.is_idle());
    }
}
