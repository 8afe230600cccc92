use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use tracing::info;

impl App {
    pub(in crate::app) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::NextPage => self.handle_next_page(&mut effects),
            Message::PreviousPage => self.handle_previous_page(&mut effects),
            Message::PageInputChanged(value) => self.handle_page_input_changed(value),
            Message::PageInputSubmitted => self.handle_page_input_submitted(&mut effects),
            Message::ZoomIn => self.handle_zoom(1, &mut effects),
            Message::ZoomOut => self.handle_zoom(-1, &mut effects),
            Message::Rotate => self.handle_rotate(&mut effects),
            Message::ToggleSync => self.handle_toggle_sync(),
            Message::ToggleDrawing => self.handle_toggle_drawing(),
            Message::ToggleTheme => self.handle_toggle_theme(),
            Message::UndoAnnotation => self.handle_undo_annotation(),
            Message::ClearAnnotations => self.handle_clear_annotations(),
            Message::SafeQuit => effects.push(Effect::QuitSafely),
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::Scrolled {
                panel,
                offset_x,
                offset_y,
                viewport_width,
                viewport_height,
                content_width,
                content_height,
            } => self.handle_scrolled(
                panel,
                offset_x,
                offset_y,
                viewport_width,
                viewport_height,
                content_width,
                content_height,
                &mut effects,
            ),
            Message::Pointer { panel, event } => self.handle_pointer(panel, event),
            Message::PageCountLoaded { ticket, result } => {
                self.handle_page_count_loaded(ticket, result, &mut effects)
            }
            Message::PdfPageRendered {
                ticket,
                page,
                result,
            } => self.handle_pdf_page_rendered(ticket, page, result),
            Message::HtmlPageLoaded {
                ticket,
                page,
                result,
            } => self.handle_html_page_loaded(ticket, page, result),
        }

        effects
    }

    fn handle_toggle_theme(&mut self) {
        self.config.theme = self.config.theme.toggled();
        info!(theme = %self.config.theme, "Switched theme");
    }
}
