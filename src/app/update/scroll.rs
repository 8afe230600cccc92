use super::super::state::App;
use super::Effect;
use crate::annotations::Panel;
use crate::scroll_sync::{ScrollOrigin, ScrollReport};
use std::time::Instant;
use tracing::{info, trace};

impl App {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn handle_scrolled(
        &mut self,
        panel: Panel,
        offset_x: f32,
        offset_y: f32,
        viewport_width: f32,
        viewport_height: f32,
        content_width: f32,
        content_height: f32,
        effects: &mut Vec<Effect>,
    ) {
        self.handle_scrolled_at(
            panel,
            [
                offset_x,
                offset_y,
                viewport_width,
                viewport_height,
                content_width,
                content_height,
            ],
            Instant::now(),
            effects,
        );
    }

    fn handle_scrolled_at(
        &mut self,
        panel: Panel,
        values: [f32; 6],
        now: Instant,
        effects: &mut Vec<Effect>,
    ) {
        if values.iter().any(|value| !value.is_finite() || *value < 0.0) {
            trace!(%panel, ?values, "Ignoring malformed scroll event");
            return;
        }
        let [offset_x, offset_y, viewport_width, viewport_height, content_width, content_height] =
            values;
        let report = ScrollReport {
            offset: offset_y,
            content_extent: content_height,
            viewport_extent: viewport_height,
        };

        let frame = self.frame_mut(panel);
        frame.viewport.offset_x = offset_x;
        frame.viewport.offset_y = offset_y;
        frame.viewport.viewport_width = viewport_width;
        frame.viewport.viewport_height = viewport_height;
        frame.viewport.content_width = content_width;
        frame.viewport.content_height = content_height;

        match frame.guard.classify(offset_y, now) {
            ScrollOrigin::Programmatic { generation } => {
                trace!(
                    %panel,
                    generation,
                    offset = offset_y,
                    requested = ?self.sync.requested_offset(panel),
                    "Programmatic scroll settled"
                );
                self.sync.record_programmatic(panel, report);
            }
            ScrollOrigin::User => {
                let Some(request) = self.sync.report_scroll(panel, report) else {
                    return;
                };
                self.frame_mut(request.target)
                    .guard
                    .arm(request.offset, now);
                effects.push(Effect::SyncScroll(request));
            }
        }
    }

    pub(super) fn handle_toggle_sync(&mut self) {
        let enabled = self.sync.toggle_sync();
        info!(enabled, "Scroll sync toggled");
    }
}
