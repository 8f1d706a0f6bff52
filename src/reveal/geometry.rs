//! Layout rectangles and viewport intersection.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in document coordinates (pixels, y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Overlap with `other`, or `None` when they do not touch.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }

        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

/// The visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Vertical scroll offset of the top edge.
    pub scroll_y: f64,
}

impl Viewport {
    /// Create a viewport scrolled to the top.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    /// Same viewport scrolled to `scroll_y`.
    pub fn scrolled_to(self, scroll_y: f64) -> Self {
        Self {
            scroll_y: scroll_y.max(0.0),
            ..self
        }
    }

    /// Observation root after pulling the bottom edge in by `margin_bottom`.
    ///
    /// A negative margin grows the root instead.
    pub fn root(&self, margin_bottom: f64) -> Rect {
        Rect::new(
            0.0,
            self.scroll_y,
            self.width,
            self.height - margin_bottom,
        )
    }
}

/// Fraction of `rect` inside the viewport root, in `[0, 1]`.
///
/// Zero-area elements count as fully visible when they sit inside the root.
pub fn intersection_ratio(rect: &Rect, viewport: &Viewport, margin_bottom: f64) -> f64 {
    let root = viewport.root(margin_bottom);
    if root.area() <= 0.0 {
        return 0.0;
    }

    let Some(overlap) = rect.intersection(&root) else {
        return 0.0;
    };

    if rect.area() <= 0.0 {
        return 1.0;
    }

    (overlap.area() / rect.area()).clamp(0.0, 1.0)
}
