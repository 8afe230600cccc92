use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::widget::scrollable::{self, AbsoluteOffset, RelativeOffset};
use iced::window;
use tracing::info;

impl App {
    pub(in crate::app) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::LoadPageCount => self.load_page_count_task(),
            Effect::RenderPdfPage => self.render_pdf_page_task(),
            Effect::LoadHtmlPage => self.load_html_page_task(),
            Effect::SyncScroll(request) => {
                let frame = self.frame(request.target);
                match request.offset {
                    Some(offset) => scrollable::scroll_to(
                        frame.scroll_id(),
                        AbsoluteOffset {
                            x: frame.viewport.offset_x,
                            y: offset,
                        },
                    ),
                    None => scrollable::snap_to(frame.scroll_id(), frame.relative_offset(request.ratio)),
                }
            }
            Effect::ResetScroll(panel) => {
                scrollable::snap_to(self.frame(panel).scroll_id(), RelativeOffset::START)
            }
            Effect::QuitSafely => {
                info!(
                    annotations = self.annotations.len(),
                    "Quitting; annotations are not persisted"
                );
                iced::exit()
            }
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
