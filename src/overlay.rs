//! Rectangle drawing gestures and the screen/content coordinate mapping.
//!
//! Pointer positions arrive in window coordinates. They are mapped into the
//! panel's content space (the full scrollable content, not the visible
//! viewport) so a rectangle stays attached to what it covers while the user
//! scrolls. Stored rectangles use the pixel space of the render that was
//! active when they were drawn; a later zoom or rotation does not rescale them.

use crate::annotations::{Annotation, AnnotationKind, AnnotationStore, Panel};
use tracing::{debug, trace};

pub const DEFAULT_MIN_SIZE: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in content space, already normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ContentRect {
    fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            width: a.x.max(b.x) - x,
            height: a.y.max(b.y) - y,
        }
    }

    fn from_annotation(annotation: &Annotation) -> Self {
        Self {
            x: annotation.start_x,
            y: annotation.start_y,
            width: annotation.width(),
            height: annotation.height(),
        }
    }
}

/// Screen-to-content transform for one overlay surface.
///
/// `origin` is the on-screen top-left of the surface, `rendered` its on-screen
/// size, `logical` the size of its drawing buffer, and `scroll` the panel's
/// scroll offset at the time the mapping was taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapping {
    origin: Point,
    scale_x: f32,
    scale_y: f32,
    scroll: Point,
}

impl CoordinateMapping {
    pub fn new(origin: Point, rendered: Extent, logical: Extent, scroll: Point) -> Self {
        let ratio = |logical: f32, rendered: f32| {
            let scale = logical / rendered;
            if scale.is_finite() && scale > 0.0 {
                scale
            } else {
                1.0
            }
        };
        Self {
            origin,
            scale_x: ratio(logical.width, rendered.width),
            scale_y: ratio(logical.height, rendered.height),
            scroll,
        }
    }

    pub fn to_content(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.origin.x) * self.scale_x + self.scroll.x,
            y: (screen.y - self.origin.y) * self.scale_y + self.scroll.y,
        }
    }

    /// Inverse of [`to_content`](Self::to_content), relative to the surface
    /// origin rather than the window.
    pub fn to_surface(&self, rect: ContentRect) -> ContentRect {
        ContentRect {
            x: (rect.x - self.scroll.x) / self.scale_x,
            y: (rect.y - self.scroll.y) / self.scale_y,
            width: rect.width / self.scale_x,
            height: rect.height / self.scale_y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPhase {
    Idle,
    Armed,
    Dragging,
}

#[derive(Debug, Clone, Copy)]
struct DragSession {
    anchor: Point,
    current: Point,
    page: u32,
    mapping: CoordinateMapping,
}

/// Gesture state for one panel.
#[derive(Debug)]
pub struct DrawingOverlay {
    panel: Panel,
    enabled: bool,
    min_size: f32,
    next_seq: u64,
    drag: Option<DragSession>,
}

impl DrawingOverlay {
    pub fn new(panel: Panel, min_size: f32) -> Self {
        let min_size = if min_size.is_finite() && min_size >= 0.0 {
            min_size
        } else {
            DEFAULT_MIN_SIZE
        };
        Self {
            panel,
            enabled: false,
            min_size,
            next_seq: 0,
            drag: None,
        }
    }

    pub fn phase(&self) -> OverlayPhase {
        match (self.enabled, self.drag.is_some()) {
            (false, _) => OverlayPhase::Idle,
            (true, false) => OverlayPhase::Armed,
            (true, true) => OverlayPhase::Dragging,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.drag = None;
        }
    }

    /// Drop any gesture in flight, e.g. because zoom, rotation or page changed
    /// and the captured mapping no longer describes the content.
    pub fn cancel(&mut self) {
        if self.drag.take().is_some() {
            debug!(panel = %self.panel, "Cancelled in-progress drawing");
        }
    }

    pub fn pointer_down(&mut self, screen: Point, mapping: CoordinateMapping, page: u32) {
        if self.phase() != OverlayPhase::Armed {
            return;
        }
        let anchor = mapping.to_content(screen);
        trace!(panel = %self.panel, x = anchor.x, y = anchor.y, "Drawing started");
        self.drag = Some(DragSession {
            anchor,
            current: anchor,
            page,
            mapping,
        });
    }

    pub fn pointer_move(&mut self, screen: Point) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        drag.current = drag.mapping.to_content(screen);
        true
    }

    /// Finish the gesture. Returns the rectangle when it is large enough to be
    /// an intentional drawing rather than a click.
    pub fn pointer_up(&mut self, screen: Point) -> Option<Annotation> {
        let drag = self.drag.take()?;
        let end = drag.mapping.to_content(screen);
        let rect = ContentRect::from_corners(drag.anchor, end);

        if rect.width <= self.min_size || rect.height <= self.min_size {
            debug!(
                panel = %self.panel,
                width = rect.width,
                height = rect.height,
                "Discarded drawing below minimum size"
            );
            return None;
        }

        self.next_seq += 1;
        Some(Annotation {
            id: format!("{}-{}-{}", self.panel, drag.page, self.next_seq),
            kind: AnnotationKind::Rectangle,
            start_x: rect.x,
            start_y: rect.y,
            end_x: rect.x + rect.width,
            end_y: rect.y + rect.height,
            page: drag.page,
            panel: self.panel,
        })
    }

    /// The in-progress rectangle, normalized, if a gesture is active.
    #[cfg(test)]
    pub fn live_rect(&self) -> Option<ContentRect> {
        self.drag
            .as_ref()
            .map(|drag| ContentRect::from_corners(drag.anchor, drag.current))
    }

    /// Rectangles to paint for `page`, persisted ones first and the live
    /// preview last.
    pub fn render_rects(&self, store: &AnnotationStore, page: u32) -> Vec<ContentRect> {
        let mut rects: Vec<ContentRect> = store
            .query(page, self.panel)
            .map(ContentRect::from_annotation)
            .collect();
        if let Some(drag) = self.drag.as_ref().filter(|drag| drag.page == page) {
            rects.push(ContentRect::from_corners(drag.anchor, drag.current));
        }
        rects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> CoordinateMapping {
        CoordinateMapping::new(
            Point::ORIGIN,
            Extent::new(800.0, 600.0),
            Extent::new(800.0, 600.0),
            Point::ORIGIN,
        )
    }

    fn armed(panel: Panel) -> DrawingOverlay {
        let mut overlay = DrawingOverlay::new(panel, DEFAULT_MIN_SIZE);
        overlay.set_enabled(true);
        overlay
    }

    #[test]
    fn drag_direction_is_normalized() {
        // A 5x5 drag sits exactly on the default threshold, so lower it here.
        let mut overlay = DrawingOverlay::new(Panel::Pdf, 1.0);
        overlay.set_enabled(true);
        overlay.pointer_down(Point::new(10.0, 10.0), identity(), 2);
        let shape = overlay
            .pointer_up(Point::new(5.0, 5.0))
            .expect("rectangle above threshold");
        assert_eq!(
            (shape.start_x, shape.start_y, shape.end_x, shape.end_y),
            (5.0, 5.0, 10.0, 10.0)
        );
        assert_eq!(shape.page, 2);
        assert_eq!(shape.panel, Panel::Pdf);
    }

    #[test]
    fn minimum_size_threshold() {
        let mut overlay = armed(Panel::Html);
        overlay.pointer_down(Point::new(100.0, 100.0), identity(), 1);
        assert!(overlay.pointer_up(Point::new(103.0, 103.0)).is_none());

        overlay.pointer_down(Point::new(100.0, 100.0), identity(), 1);
        let kept = overlay
            .pointer_up(Point::new(106.0, 106.0))
            .expect("6x6 is kept");
        assert_eq!(kept.width(), 6.0);
        assert_eq!(kept.height(), 6.0);
    }

    #[test]
    fn thin_rectangles_are_discarded() {
        let mut overlay = armed(Panel::Pdf);
        overlay.pointer_down(Point::new(0.0, 0.0), identity(), 1);
        assert!(overlay.pointer_up(Point::new(200.0, 4.0)).is_none());
    }

    #[test]
    fn ids_are_unique_per_session() {
        let mut pdf = armed(Panel::Pdf);
        let mut html = armed(Panel::Html);
        let mut ids = Vec::new();
        for overlay in [&mut pdf, &mut html] {
            for _ in 0..3 {
                overlay.pointer_down(Point::new(0.0, 0.0), identity(), 4);
                ids.push(
                    overlay
                        .pointer_up(Point::new(50.0, 50.0))
                        .expect("large rect")
                        .id,
                );
            }
        }
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
        assert_eq!(ids[0], "pdf-4-1");
        assert_eq!(ids[3], "html-4-1");
    }

    #[test]
    fn stray_events_are_noops() {
        let mut overlay = armed(Panel::Pdf);
        assert!(overlay.pointer_up(Point::new(40.0, 40.0)).is_none());
        assert!(!overlay.pointer_move(Point::new(40.0, 40.0)));
        assert_eq!(overlay.phase(), OverlayPhase::Armed);
    }

    #[test]
    fn idle_overlay_ignores_pointer_down() {
        let mut overlay = DrawingOverlay::new(Panel::Pdf, DEFAULT_MIN_SIZE);
        overlay.pointer_down(Point::new(0.0, 0.0), identity(), 1);
        assert_eq!(overlay.phase(), OverlayPhase::Idle);
        assert!(overlay.pointer_up(Point::new(90.0, 90.0)).is_none());
    }

    #[test]
    fn state_machine_transitions() {
        let mut overlay = DrawingOverlay::new(Panel::Html, DEFAULT_MIN_SIZE);
        assert_eq!(overlay.phase(), OverlayPhase::Idle);
        overlay.set_enabled(true);
        assert_eq!(overlay.phase(), OverlayPhase::Armed);
        overlay.pointer_down(Point::new(1.0, 1.0), identity(), 1);
        assert_eq!(overlay.phase(), OverlayPhase::Dragging);
        overlay.pointer_up(Point::new(50.0, 50.0));
        assert_eq!(overlay.phase(), OverlayPhase::Armed);

        overlay.pointer_down(Point::new(1.0, 1.0), identity(), 1);
        overlay.set_enabled(false);
        assert_eq!(overlay.phase(), OverlayPhase::Idle);
        assert!(overlay.live_rect().is_none());
    }

    #[test]
    fn mapping_accounts_for_origin_scale_and_scroll() {
        let mapping = CoordinateMapping::new(
            Point::new(100.0, 50.0),
            Extent::new(400.0, 300.0),
            Extent::new(800.0, 600.0),
            Point::new(10.0, 1200.0),
        );
        let content = mapping.to_content(Point::new(150.0, 80.0));
        assert_eq!(content, Point::new(110.0, 1260.0));

        let surface = mapping.to_surface(ContentRect {
            x: 110.0,
            y: 1260.0,
            width: 20.0,
            height: 40.0,
        });
        assert_eq!(
            surface,
            ContentRect {
                x: 50.0,
                y: 30.0,
                width: 10.0,
                height: 20.0
            }
        );
    }

    #[test]
    fn rectangle_is_stable_across_scrolling() {
        let mut overlay = armed(Panel::Pdf);
        let scrolled = CoordinateMapping::new(
            Point::ORIGIN,
            Extent::new(800.0, 600.0),
            Extent::new(800.0, 600.0),
            Point::new(0.0, 500.0),
        );
        overlay.pointer_down(Point::new(20.0, 20.0), scrolled, 1);
        let shape = overlay
            .pointer_up(Point::new(60.0, 80.0))
            .expect("large rect");
        assert_eq!((shape.start_y, shape.end_y), (520.0, 580.0));

        let mut store = AnnotationStore::new();
        store.add(shape).expect("valid");
        let rects = overlay.render_rects(&store, 1);
        let at_top = identity().to_surface(rects[0]);
        assert_eq!(at_top.y, 520.0);
        let back = scrolled.to_surface(rects[0]);
        assert_eq!(back.y, 20.0);
    }

    #[test]
    fn drag_keeps_mapping_from_gesture_start() {
        let mut overlay = armed(Panel::Html);
        let start = CoordinateMapping::new(
            Point::ORIGIN,
            Extent::new(800.0, 600.0),
            Extent::new(800.0, 600.0),
            Point::new(0.0, 100.0),
        );
        overlay.pointer_down(Point::new(10.0, 10.0), start, 1);
        overlay.pointer_move(Point::new(30.0, 40.0));
        let live = overlay.live_rect().expect("live rect");
        assert_eq!((live.y, live.height), (110.0, 30.0));
    }

    #[test]
    fn render_order_puts_live_rect_last() {
        let mut overlay = armed(Panel::Pdf);
        let mut store = AnnotationStore::new();
        overlay.pointer_down(Point::new(0.0, 0.0), identity(), 3);
        store
            .add(overlay.pointer_up(Point::new(40.0, 40.0)).expect("rect"))
            .expect("valid");
        overlay.pointer_down(Point::new(100.0, 100.0), identity(), 3);
        overlay.pointer_move(Point::new(120.0, 150.0));

        let rects = overlay.render_rects(&store, 3);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[1].x, 100.0);
        assert!(overlay.render_rects(&store, 4).is_empty());
    }

    #[test]
    fn degenerate_surface_falls_back_to_unit_scale() {
        let mapping = CoordinateMapping::new(
            Point::ORIGIN,
            Extent::new(0.0, 0.0),
            Extent::new(800.0, 600.0),
            Point::ORIGIN,
        );
        assert_eq!(mapping.to_content(Point::new(7.0, 9.0)), Point::new(7.0, 9.0));
    }
}
