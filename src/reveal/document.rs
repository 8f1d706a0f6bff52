//! Minimal document model: elements with layout, classes, attributes and text.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::geometry::Rect;

/// Attribute marking an element for reveal tracking.
pub const SCROLL_ATTR: &str = "data-scroll";
/// Attribute holding a stat widget's count target.
pub const COUNT_ATTR: &str = "data-count";
/// Class identifying stat widgets.
pub const STAT_CLASS: &str = "stat-number";
/// Class added when an element is revealed.
pub const VISIBLE_CLASS: &str = "is-visible";

/// Stable handle to an element within one [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub rect: Rect,
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
}

impl Element {
    /// Create an element occupying `rect`.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Tag for reveal tracking.
    pub fn tracked(self) -> Self {
        self.with_attr(SCROLL_ATTR, "")
    }

    /// Stat widget counting up to the raw `count` attribute value.
    pub fn stat(self, count: &str) -> Self {
        self.with_class(STAT_CLASS).with_attr(COUNT_ATTR, count)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Container of elements addressed by [`ElementId`].
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: BTreeMap<ElementId, Element>,
    next_id: u32,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element, returning its handle.
    pub fn insert(&mut self, element: Element) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, element);
        id
    }

    /// Detach an element. Handles are never reused.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        self.elements.remove(&id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Move an element, e.g. after a layout change.
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) -> bool {
        match self.elements.get_mut(&id) {
            Some(element) => {
                element.rect = rect;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements carrying [`SCROLL_ATTR`], in document order.
    pub fn scroll_tracked(&self) -> Vec<ElementId> {
        self.select(|e| e.attr(SCROLL_ATTR).is_some())
    }

    /// Elements carrying [`STAT_CLASS`], in document order.
    pub fn stat_widgets(&self) -> Vec<ElementId> {
        self.select(|e| e.has_class(STAT_CLASS))
    }

    fn select(&self, pred: impl Fn(&Element) -> bool) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|(_, e)| pred(e))
            .map(|(id, _)| *id)
            .collect()
    }
}
