use crate::annotations::Panel;
use crate::overlay::{CoordinateMapping, DrawingOverlay, Extent, Point};
use crate::scroll_sync::FeedbackGuard;
use iced::widget::scrollable::{Id as ScrollId, RelativeOffset};
use std::time::Duration;

use super::constants::{HTML_SCROLL_ID, PDF_SCROLL_ID};

/// Last viewport reported by a panel's scrollable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(in crate::app) struct ViewportGeometry {
    pub(in crate::app) offset_x: f32,
    pub(in crate::app) offset_y: f32,
    pub(in crate::app) viewport_width: f32,
    pub(in crate::app) viewport_height: f32,
    pub(in crate::app) content_width: f32,
    pub(in crate::app) content_height: f32,
}

impl ViewportGeometry {
    /// Horizontal position as a fraction of the scrollable range.
    pub(in crate::app) fn relative_x(&self) -> f32 {
        let range = self.content_width - self.viewport_width;
        if range > 0.0 && self.offset_x.is_finite() {
            (self.offset_x / range).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Scroll, feedback and drawing state shared by both viewer panels.
pub(in crate::app) struct PanelFrame {
    pub(in crate::app) panel: Panel,
    pub(in crate::app) viewport: ViewportGeometry,
    pub(in crate::app) guard: FeedbackGuard,
    pub(in crate::app) overlay: DrawingOverlay,
}

impl PanelFrame {
    pub(in crate::app) fn new(panel: Panel, suppress_window: Duration, min_size: f32) -> Self {
        Self {
            panel,
            viewport: ViewportGeometry::default(),
            guard: FeedbackGuard::new(suppress_window),
            overlay: DrawingOverlay::new(panel, min_size),
        }
    }

    pub(in crate::app) fn scroll_id(&self) -> ScrollId {
        match self.panel {
            Panel::Pdf => PDF_SCROLL_ID.clone(),
            Panel::Html => HTML_SCROLL_ID.clone(),
        }
    }

    pub(in crate::app) fn relative_offset(&self, y: f32) -> RelativeOffset {
        RelativeOffset {
            x: self.viewport.relative_x(),
            y: y.clamp(0.0, 1.0),
        }
    }

    /// Mapping from window coordinates over `bounds` into this panel's
    /// content space, using the scroll offset known right now.
    pub(in crate::app) fn mapping(&self, bounds: iced::Rectangle) -> CoordinateMapping {
        let rendered = Extent::new(bounds.width, bounds.height);
        let logical = if self.viewport.viewport_width > 0.0 && self.viewport.viewport_height > 0.0
        {
            Extent::new(self.viewport.viewport_width, self.viewport.viewport_height)
        } else {
            rendered
        };
        CoordinateMapping::new(
            Point::new(bounds.x, bounds.y),
            rendered,
            logical,
            Point::new(self.viewport.offset_x, self.viewport.offset_y),
        )
    }

    /// Forget the scroll position after the content was replaced.
    pub(in crate::app) fn reset_scroll(&mut self) {
        self.viewport.offset_x = 0.0;
        self.viewport.offset_y = 0.0;
    }
}
