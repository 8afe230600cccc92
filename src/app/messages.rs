use super::state::PdfRaster;
use crate::annotations::Panel;
use crate::html_page::HtmlPage;
use iced::keyboard::{Key, Modifiers};
use iced::{Point, Rectangle};

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    NextPage,
    PreviousPage,
    PageInputChanged(String),
    PageInputSubmitted,
    ZoomIn,
    ZoomOut,
    Rotate,
    ToggleSync,
    ToggleDrawing,
    ToggleTheme,
    UndoAnnotation,
    ClearAnnotations,
    SafeQuit,
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    Scrolled {
        panel: Panel,
        offset_x: f32,
        offset_y: f32,
        viewport_width: f32,
        viewport_height: f32,
        content_width: f32,
        content_height: f32,
    },
    Pointer {
        panel: Panel,
        event: PointerEvent,
    },
    PageCountLoaded {
        ticket: u64,
        result: Result<u32, String>,
    },
    PdfPageRendered {
        ticket: u64,
        page: u32,
        result: Result<PdfRaster, String>,
    },
    HtmlPageLoaded {
        ticket: u64,
        page: u32,
        result: Result<HtmlPage, String>,
    },
}

/// Pointer activity on a drawing overlay, in window coordinates.
#[derive(Debug, Clone, Copy)]
pub enum PointerEvent {
    Pressed { position: Point, bounds: Rectangle },
    Moved(Point),
    Released(Point),
    /// The cursor left the window mid-gesture.
    Lost,
}
