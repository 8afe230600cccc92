use super::super::state::App;
use super::Effect;
use crate::annotations::Panel;
use crate::pdf_render::{next_rotation, step_zoom};
use tracing::{debug, info};

impl App {
    pub(super) fn handle_next_page(&mut self, effects: &mut Vec<Effect>) {
        if self.last_page().is_some_and(|last| self.current_page >= last) {
            return;
        }
        effects.extend(self.go_to_page(self.current_page.saturating_add(1)));
    }

    pub(super) fn handle_previous_page(&mut self, effects: &mut Vec<Effect>) {
        if self.current_page > 1 {
            effects.extend(self.go_to_page(self.current_page - 1));
        }
    }

    pub(super) fn handle_page_input_changed(&mut self, value: String) {
        self.page_input = value;
    }

    pub(super) fn handle_page_input_submitted(&mut self, effects: &mut Vec<Effect>) {
        match parse_page_input(&self.page_input) {
            Some(requested) => {
                let page = self.clamp_page(requested);
                self.page_input = page.to_string();
                effects.extend(self.go_to_page(page));
            }
            None => {
                debug!(input = %self.page_input, "Ignoring non-numeric page input");
                self.page_input = self.current_page.to_string();
            }
        }
    }

    pub(super) fn handle_zoom(&mut self, steps: i32, effects: &mut Vec<Effect>) {
        let zoom = step_zoom(self.pdf.zoom, steps);
        if (zoom - self.pdf.zoom).abs() < f32::EPSILON {
            return;
        }
        self.pdf.zoom = zoom;
        self.pdf_frame.overlay.cancel();
        info!(zoom, "PDF zoom changed");
        effects.push(Effect::RenderPdfPage);
    }

    pub(super) fn handle_rotate(&mut self, effects: &mut Vec<Effect>) {
        self.pdf.rotation = next_rotation(self.pdf.rotation);
        self.pdf_frame.overlay.cancel();
        info!(rotation = self.pdf.rotation, "PDF rotation changed");
        effects.push(Effect::RenderPdfPage);
    }

    pub(super) fn go_to_page(&mut self, new_page: u32) -> Vec<Effect> {
        let mut effects = Vec::new();
        let new_page = self.clamp_page(new_page);
        self.page_input = new_page.to_string();
        if new_page == self.current_page {
            return effects;
        }

        self.current_page = new_page;
        self.sync.reset_offsets();
        for panel in Panel::ALL {
            let frame = self.frame_mut(panel);
            frame.overlay.cancel();
            frame.reset_scroll();
        }
        info!(page = self.current_page, "Navigated to page");
        effects.push(Effect::RenderPdfPage);
        effects.push(Effect::LoadHtmlPage);
        effects.push(Effect::ResetScroll(Panel::Pdf));
        effects.push(Effect::ResetScroll(Panel::Html));
        effects
    }
}

/// Integer page input; anything else is rejected. Values below 1 clamp to 1.
fn parse_page_input(input: &str) -> Option<u32> {
    let value: i64 = input.trim().parse().ok()?;
    Some(value.clamp(1, i64::from(u32::MAX)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::messages::Message;
    use crate::app::state::test_support::build_test_app;
    use crate::pdf_render::{MAX_ZOOM, MIN_ZOOM};

    #[test]
    fn page_input_is_clamped_to_document() {
        let mut app = build_test_app();
        app.page_count = Some(12);

        app.reduce(Message::PageInputChanged("40".to_string()));
        let effects = app.reduce(Message::PageInputSubmitted);
        assert_eq!(app.current_page, 12);
        assert_eq!(app.page_input, "12");
        assert!(effects.contains(&Effect::LoadHtmlPage));

        app.reduce(Message::PageInputChanged("0".to_string()));
        app.reduce(Message::PageInputSubmitted);
        assert_eq!(app.current_page, 1);
    }

    #[test]
    fn non_numeric_page_input_is_ignored() {
        let mut app = build_test_app();
        app.page_count = Some(12);
        app.reduce(Message::PageInputChanged("abc".to_string()));
        let effects = app.reduce(Message::PageInputSubmitted);
        assert!(effects.is_empty());
        assert_eq!(app.current_page, 1);
        assert_eq!(app.page_input, "1");
    }

    #[test]
    fn next_and_previous_respect_bounds() {
        let mut app = build_test_app();
        app.page_count = Some(2);

        assert!(app.reduce(Message::PreviousPage).is_empty());
        let effects = app.reduce(Message::NextPage);
        assert_eq!(app.current_page, 2);
        assert_eq!(
            effects,
            vec![
                Effect::RenderPdfPage,
                Effect::LoadHtmlPage,
                Effect::ResetScroll(Panel::Pdf),
                Effect::ResetScroll(Panel::Html),
            ]
        );
        assert!(app.reduce(Message::NextPage).is_empty());
        assert_eq!(app.current_page, 2);
    }

    #[test]
    fn unknown_page_count_leaves_next_open() {
        let mut app = build_test_app();
        app.reduce(Message::NextPage);
        app.reduce(Message::NextPage);
        assert_eq!(app.current_page, 3);
    }

    #[test]
    fn zoom_is_bounded_and_rerenders() {
        let mut app = build_test_app();
        assert_eq!(app.pdf.zoom, 1.2);
        let effects = app.reduce(Message::ZoomIn);
        assert_eq!(app.pdf.zoom, 1.4);
        assert_eq!(effects, vec![Effect::RenderPdfPage]);

        for _ in 0..20 {
            app.reduce(Message::ZoomIn);
        }
        assert_eq!(app.pdf.zoom, MAX_ZOOM);
        assert!(app.reduce(Message::ZoomIn).is_empty());

        for _ in 0..20 {
            app.reduce(Message::ZoomOut);
        }
        assert_eq!(app.pdf.zoom, MIN_ZOOM);
    }

    #[test]
    fn rotation_cycles_through_quarter_turns() {
        let mut app = build_test_app();
        let seen: Vec<u16> = (0..4)
            .map(|_| {
                app.reduce(Message::Rotate);
                app.pdf.rotation
            })
            .collect();
        assert_eq!(seen, vec![90, 180, 270, 0]);
    }

    #[test]
    fn parses_page_input() {
        assert_eq!(parse_page_input(" 7 "), Some(7));
        assert_eq!(parse_page_input("-3"), Some(1));
        assert_eq!(parse_page_input("3.5"), None);
        assert_eq!(parse_page_input(""), None);
    }
}
