//! Scroll-triggered page effects.
//!
//! A headless model of the landing page's reveal behaviour. A
//! [`Document`] holds elements with layout; a [`ViewportRevealController`]
//! registers the tracked ones with a single [`VisibilityWatcher`] and, the
//! first time each element is sufficiently visible, marks it revealed and
//! (for stat widgets) starts a one-shot [`CountUpAnimation`].
//!
//! ```text
//! Hidden ──(ratio ≥ threshold)──▶ Revealed
//!                                  │ stat widgets only
//!                                  ▼
//!             NotAnimating ──▶ Animating ──▶ Completed
//! ```
//!
//! Everything runs on one thread through `&mut` access; [`drive`] ticks
//! the animations on a tokio interval.

pub mod controller;
pub mod count_up;
pub mod document;
pub mod format;
pub mod geometry;
pub mod landing;
pub mod runner;
pub mod watcher;

pub use controller::{
    parse_count, AnimationPhase, ControllerConfig, ObservedElement, ViewportRevealController,
};
pub use count_up::{AnimationState, CountUpAnimation};
pub use document::{Document, Element, ElementId};
pub use format::format_grouped;
pub use geometry::{intersection_ratio, Rect, Viewport};
pub use runner::drive;
pub use watcher::{IntersectionEntry, VisibilityWatcher};
