//! Layout of the clinic landing page as seen by the reveal controller.
//!
//! Mirrors the `data-scroll` sections and stat widgets in
//! `public/index.html` so the effects can be exercised headlessly.

use super::document::{Document, Element};
use super::geometry::Rect;

/// Page width the layout is computed for.
pub const PAGE_WIDTH: f64 = 1200.0;

/// Stat widgets on the page: label and raw `data-count` value.
pub const STATS: [(&str, &str); 4] = [
    ("Happy Patients", "15000"),
    ("Expert Doctors", "50"),
    ("Years of Experience", "25"),
    ("Success Rate %", "98"),
];

/// Build the landing page document.
pub fn landing_page() -> Document {
    let mut doc = Document::new();

    // Hero is always in view and not tracked.
    doc.insert(Element::new(Rect::new(0.0, 0.0, PAGE_WIDTH, 700.0)).with_class("hero"));

    for (i, title) in ["Our Services", "Meet Our Doctors"].into_iter().enumerate() {
        let top = 800.0 + i as f64 * 600.0;
        doc.insert(
            Element::new(Rect::new(0.0, top, PAGE_WIDTH, 80.0))
                .tracked()
                .with_text(title),
        );
        for card in 0..3 {
            doc.insert(
                Element::new(Rect::new(100.0 + card as f64 * 350.0, top + 120.0, 300.0, 360.0))
                    .tracked()
                    .with_class("service-card"),
            );
        }
    }

    let stats_top = 2100.0;
    for (i, (_, count)) in STATS.iter().enumerate() {
        doc.insert(
            Element::new(Rect::new(100.0 + i as f64 * 260.0, stats_top, 220.0, 60.0))
                .tracked()
                .stat(count)
                .with_text("0"),
        );
    }

    doc.insert(
        Element::new(Rect::new(0.0, 2400.0, PAGE_WIDTH, 600.0))
            .tracked()
            .with_class("contact"),
    );

    doc
}

/// Total scrollable height of [`landing_page`].
pub fn page_height(doc: &Document) -> f64 {
    doc.scroll_tracked()
        .into_iter()
        .filter_map(|id| doc.get(id))
        .map(|e| e.rect.bottom())
        .fold(0.0, f64::max)
}
