//! Session-scoped store for rectangle annotations.
//!
//! The store is the single owner of every rectangle drawn during a session.
//! Overlays never keep their own copy; they ask for the slice matching their
//! page and panel each time they render. Insertion order is preserved and
//! defines what "last" means for undo.

use anyhow::{Result, bail};
use std::fmt;
use tracing::debug;

/// One of the two side-by-side views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Pdf,
    Html,
}

impl Panel {
    pub const ALL: [Panel; 2] = [Panel::Pdf, Panel::Html];

    pub fn other(self) -> Panel {
        match self {
            Panel::Pdf => Panel::Html,
            Panel::Html => Panel::Pdf,
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Panel::Pdf => "pdf",
            Panel::Html => "html",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    Rectangle,
}

/// A finalized rectangle in the content space of its panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub id: String,
    pub kind: AnnotationKind,
    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub end_y: f32,
    pub page: u32,
    pub panel: Panel,
}

impl Annotation {
    pub fn width(&self) -> f32 {
        self.end_x - self.start_x
    }

    pub fn height(&self) -> f32 {
        self.end_y - self.start_y
    }

    fn validate(&self) -> Result<()> {
        let coords = [self.start_x, self.start_y, self.end_x, self.end_y];
        if coords.iter().any(|value| !value.is_finite()) {
            bail!("annotation {} has non-finite coordinates", self.id);
        }
        if self.start_x > self.end_x || self.start_y > self.end_y {
            bail!("annotation {} is not normalized", self.id);
        }
        if self.page == 0 {
            bail!("annotation {} has page 0; pages start at 1", self.id);
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct AnnotationStore {
    items: Vec<Annotation>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rectangle. Size thresholds are the overlay's concern; only the
    /// geometric invariants are checked here.
    pub fn add(&mut self, annotation: Annotation) -> Result<()> {
        annotation.validate()?;
        debug!(
            id = %annotation.id,
            kind = ?annotation.kind,
            page = annotation.page,
            panel = %annotation.panel,
            total = self.items.len() + 1,
            "Stored annotation"
        );
        self.items.push(annotation);
        Ok(())
    }

    /// Remove the most recently added rectangle, whatever its page or panel.
    pub fn undo_last(&mut self) -> Option<Annotation> {
        let removed = self.items.pop();
        if let Some(annotation) = &removed {
            debug!(id = %annotation.id, remaining = self.items.len(), "Undid annotation");
        }
        removed
    }

    pub fn clear_all(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }

    pub fn query(&self, page: u32, panel: Panel) -> impl Iterator<Item = &Annotation> + '_ {
        self.items
            .iter()
            .filter(move |annotation| annotation.page == page && annotation.panel == panel)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(id: &str, page: u32, panel: Panel) -> Annotation {
        Annotation {
            id: id.to_string(),
            kind: AnnotationKind::Rectangle,
            start_x: 1.0,
            start_y: 2.0,
            end_x: 30.0,
            end_y: 40.0,
            page,
            panel,
        }
    }

    #[test]
    fn undo_restores_previous_sequence() {
        let mut store = AnnotationStore::new();
        store.add(rect("a", 1, Panel::Pdf)).expect("valid rect");
        store.add(rect("b", 2, Panel::Html)).expect("valid rect");
        let before: Vec<Annotation> = store.iter().cloned().collect();

        store.add(rect("c", 1, Panel::Html)).expect("valid rect");
        let removed = store.undo_last().expect("something to undo");

        assert_eq!(removed.id, "c");
        assert_eq!(store.iter().cloned().collect::<Vec<_>>(), before);
    }

    #[test]
    fn undo_is_global_across_pages_and_panels() {
        let mut store = AnnotationStore::new();
        store.add(rect("p1", 1, Panel::Pdf)).expect("valid rect");
        store.add(rect("h9", 9, Panel::Html)).expect("valid rect");

        assert_eq!(store.undo_last().map(|a| a.id), Some("h9".to_string()));
        assert_eq!(store.undo_last().map(|a| a.id), Some("p1".to_string()));
        assert!(store.undo_last().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn clear_all_empties_every_query() {
        let mut store = AnnotationStore::new();
        for page in 1..=4 {
            for panel in Panel::ALL {
                store
                    .add(rect(&format!("{panel}-{page}"), page, panel))
                    .expect("valid rect");
            }
        }

        assert_eq!(store.clear_all(), 8);
        for page in 1..=4 {
            for panel in Panel::ALL {
                assert_eq!(store.query(page, panel).count(), 0);
            }
        }
    }

    #[test]
    fn query_filters_on_page_and_panel_in_insertion_order() {
        let mut store = AnnotationStore::new();
        store.add(rect("first", 3, Panel::Pdf)).expect("valid rect");
        store.add(rect("other-panel", 3, Panel::Html)).expect("valid rect");
        store.add(rect("other-page", 4, Panel::Pdf)).expect("valid rect");
        store.add(rect("second", 3, Panel::Pdf)).expect("valid rect");

        let ids: Vec<&str> = store
            .query(3, Panel::Pdf)
            .map(|annotation| annotation.id.as_str())
            .collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn rejects_unnormalized_or_pageless_rectangles() {
        let mut store = AnnotationStore::new();

        let mut flipped = rect("flipped", 1, Panel::Pdf);
        flipped.start_x = 50.0;
        assert!(store.add(flipped).is_err());

        let mut nan = rect("nan", 1, Panel::Pdf);
        nan.end_y = f32::NAN;
        assert!(store.add(nan).is_err());

        assert!(store.add(rect("zero", 0, Panel::Html)).is_err());
        assert!(store.is_empty());
    }
}
