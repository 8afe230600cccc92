use super::super::messages::PointerEvent;
use super::super::state::App;
use crate::annotations::Panel;
use crate::overlay::Point;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_toggle_drawing(&mut self) {
        self.drawing_enabled = !self.drawing_enabled;
        let enabled = self.drawing_enabled;
        for panel in Panel::ALL {
            self.frame_mut(panel).overlay.set_enabled(enabled);
        }
        info!(enabled = self.drawing_enabled, "Drawing mode toggled");
    }

    pub(super) fn handle_undo_annotation(&mut self) {
        match self.annotations.undo_last() {
            Some(removed) => info!(id = %removed.id, "Removed last annotation"),
            None => debug!("Nothing to undo"),
        }
    }

    pub(super) fn handle_clear_annotations(&mut self) {
        let removed = self.annotations.clear_all();
        info!(removed, "Cleared all annotations");
    }

    pub(super) fn handle_pointer(&mut self, panel: Panel, event: PointerEvent) {
        if !self.drawing_enabled {
            return;
        }
        let page = self.current_page;
        let frame = self.frame_mut(panel);
        match event {
            PointerEvent::Pressed { position, bounds } => {
                let mapping = frame.mapping(bounds);
                frame
                    .overlay
                    .pointer_down(Point::new(position.x, position.y), mapping, page);
            }
            PointerEvent::Moved(position) => {
                frame.overlay.pointer_move(Point::new(position.x, position.y));
            }
            PointerEvent::Released(position) => {
                let Some(annotation) = frame
                    .overlay
                    .pointer_up(Point::new(position.x, position.y))
                else {
                    return;
                };
                if let Err(err) = self.annotations.add(annotation) {
                    warn!(%panel, "Rejected annotation: {err:#}");
                }
            }
            PointerEvent::Lost => frame.overlay.cancel(),
        }
    }
}
