use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;

/// Layout constants shared by the panels.
pub(crate) const PANEL_PADDING_PX: u16 = 16;
pub(crate) const PAGE_INPUT_WIDTH_PX: f32 = 64.0;
pub(crate) const TOOLBAR_SPACING_PX: f32 = 8.0;
pub(crate) const SCROLLBAR_WIDTH_PX: f32 = 10.0;
pub(crate) const MAX_LISTED_SUPERSCRIPTS: usize = 12;
pub(crate) const MIN_HTML_FONT_SIZE: u32 = 8;
pub(crate) const MAX_HTML_FONT_SIZE: u32 = 40;
pub(crate) static PDF_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("pdf-scroll"));
pub(crate) static HTML_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("html-scroll"));
