use super::canvas::OverlayCanvas;
use super::messages::Message;
use super::state::{
    App, HtmlStatus, MAX_LISTED_SUPERSCRIPTS, PAGE_INPUT_WIDTH_PX, PANEL_PADDING_PX, PdfStatus,
    SCROLLBAR_WIDTH_PX, TOOLBAR_SPACING_PX,
};
use crate::analysis::badge_label;
use crate::annotations::Panel;
use crate::html_page::HtmlPage;
use crate::overlay::OverlayPhase;
use crate::pdf_render::{MAX_ZOOM, MIN_ZOOM};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::scrollable::{Direction, Scrollbar, Viewport};
use iced::widget::text::{Rich, Span, Wrapping};
use iced::widget::{
    Canvas, Column, button, column, container, horizontal_space, image, row, scrollable, stack,
    text, text_input,
};
use iced::{Background, Color, Element, Length, Padding, Point, Rectangle, Size};

const ERROR_COLOR: Color = Color::from_rgb(0.85, 0.25, 0.25);

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let panels = row![self.pdf_panel(), self.html_panel()]
            .spacing(16)
            .height(Length::Fill);

        column![self.header_bar(), panels, self.analysis_footer()]
            .padding(16)
            .spacing(12)
            .into()
    }
}

impl App {
    fn header_bar(&self) -> Element<'_, Message> {
        let sync_label = if self.sync.is_enabled() {
            "Scroll Sync: On"
        } else {
            "Scroll Sync: Off"
        };
        let drawing_label = if self.drawing_enabled {
            "Drawing: On"
        } else {
            "Drawing: Off"
        };
        let theme_label = if matches!(self.config.theme, crate::config::ThemeMode::Night) {
            "Day Mode"
        } else {
            "Night Mode"
        };
        let has_annotations = !self.annotations.is_empty();

        row![
            column![
                text("PDF vs HTML Validator").size(22),
                text("Superscript Analysis").size(14),
            ]
            .spacing(2),
            horizontal_space(),
            button(sync_label).on_press(Message::ToggleSync),
            button(drawing_label).on_press(Message::ToggleDrawing),
            button("Undo").on_press_maybe(has_annotations.then_some(Message::UndoAnnotation)),
            button("Clear").on_press_maybe(has_annotations.then_some(Message::ClearAnnotations)),
            text(format!("Annotations: {}", self.annotations.len())),
            button(theme_label).on_press(Message::ToggleTheme),
        ]
        .spacing(10)
        .align_y(Vertical::Center)
        .width(Length::Fill)
        .into()
    }

    fn pdf_panel(&self) -> Element<'_, Message> {
        let can_go_back = self.current_page > 1;
        let can_go_forward = self
            .last_page()
            .is_none_or(|last| self.current_page < last);
        let total = self
            .page_count
            .map_or_else(|| "/ ?".to_string(), |count| format!("/ {count}"));

        let mut toolbar = row![
            button("Prev").on_press_maybe(can_go_back.then_some(Message::PreviousPage)),
            text_input("Page", &self.page_input)
                .on_input(Message::PageInputChanged)
                .on_submit(Message::PageInputSubmitted)
                .width(Length::Fixed(PAGE_INPUT_WIDTH_PX)),
            text(total),
            button("Next").on_press_maybe(can_go_forward.then_some(Message::NextPage)),
            horizontal_space(),
            button("-").on_press_maybe((self.pdf.zoom > MIN_ZOOM).then_some(Message::ZoomOut)),
            text(format!("{:.0}%", self.pdf.zoom * 100.0)),
            button("+").on_press_maybe((self.pdf.zoom < MAX_ZOOM).then_some(Message::ZoomIn)),
            button(text(format!("Rotate ({}°)", self.pdf.rotation))).on_press(Message::Rotate),
        ]
        .spacing(TOOLBAR_SPACING_PX)
        .align_y(Vertical::Center);

        if let Some(err) = &self.pdf.count_error {
            toolbar = toolbar.push(text(err).size(12).color(ERROR_COLOR));
        }

        let body: Element<'_, Message> = match &self.pdf.status {
            PdfStatus::Loading => text("Loading PDF...").into(),
            PdfStatus::Failed(err) => text(err).color(ERROR_COLOR).into(),
            PdfStatus::Ready(raster) => image(raster.handle.clone())
                .width(Length::Fixed(raster.width as f32))
                .height(Length::Fixed(raster.height as f32))
                .into(),
        };

        let scroll = scrollable(container(body).padding(PANEL_PADDING_PX))
            .direction(Direction::Both {
                vertical: panel_scrollbar(),
                horizontal: panel_scrollbar(),
            })
            .id(self.pdf_frame.scroll_id())
            .on_scroll(|viewport| scrolled(Panel::Pdf, viewport))
            .width(Length::Fill)
            .height(Length::Fill);

        let content = column![toolbar, stack![scroll, self.overlay_layer(Panel::Pdf)]]
            .spacing(TOOLBAR_SPACING_PX)
            .height(Length::Fill);

        container(content)
            .width(Length::FillPortion(1))
            .height(Length::Fill)
            .into()
    }

    fn html_panel(&self) -> Element<'_, Message> {
        let count = self.html.superscript_count();
        let mut toolbar: Column<'_, Message> = column![
            row![
                text("HTML Output").size(16),
                text(format!("Page {}", self.current_page)),
                horizontal_space(),
                text(badge_label(count)),
            ]
            .spacing(TOOLBAR_SPACING_PX)
            .align_y(Vertical::Center)
        ]
        .spacing(4);

        if let HtmlStatus::Ready(page) = &self.html.status {
            if let Some(summary) = superscript_summary(&page.superscripts) {
                toolbar = toolbar.push(text(summary).size(12));
            }
        }

        let body: Element<'_, Message> = match &self.html.status {
            HtmlStatus::Loading => text("Loading HTML...").into(),
            HtmlStatus::Failed(err) => column![
                text("HTML File Not Found").size(18).color(ERROR_COLOR),
                text(err),
                text(format!(
                    "Expected at {}",
                    self.html.source.page_location(self.current_page)
                ))
                .size(12),
            ]
            .spacing(6)
            .into(),
            HtmlStatus::Ready(page) if page.is_blank() => {
                text("This page has no text content.").into()
            }
            HtmlStatus::Ready(page) => self.html_text(page),
        };

        let scroll = scrollable(
            container(body)
                .width(Length::Fill)
                .padding(PANEL_PADDING_PX),
        )
        .direction(Direction::Vertical(panel_scrollbar()))
        .id(self.html_frame.scroll_id())
        .on_scroll(|viewport| scrolled(Panel::Html, viewport))
        .width(Length::Fill)
        .height(Length::Fill);

        let content = column![toolbar, stack![scroll, self.overlay_layer(Panel::Html)]]
            .spacing(TOOLBAR_SPACING_PX)
            .height(Length::Fill);

        container(content)
            .width(Length::FillPortion(1))
            .height(Length::Fill)
            .into()
    }

    fn html_text<'a>(&'a self, page: &'a HtmlPage) -> Element<'a, Message> {
        let size = self.config.html_font_size as f32;
        let highlight: Color = self.config.superscript_highlight.into();

        let mut spans: Vec<Span<'a, Message>> = Vec::new();
        for (idx, line) in page.lines.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::new("\n").size(size));
            }
            for segment in line {
                let mut span: Span<'a, Message> = Span::new(segment.text.as_str()).size(size);
                if segment.superscript {
                    span = span
                        .size(size * 0.75)
                        .background(Background::Color(highlight))
                        .padding(Padding::from(2u16));
                }
                spans.push(span);
            }
        }

        let rich: Rich<'a, Message> = Rich::with_spans(spans);
        rich.width(Length::Fill)
            .wrapping(Wrapping::WordOrGlyph)
            .align_x(Horizontal::Left)
            .into()
    }

    fn overlay_layer(&self, panel: Panel) -> Element<'_, Message> {
        let frame = self.frame(panel);
        let surface = Rectangle::new(
            Point::ORIGIN,
            Size::new(
                frame.viewport.viewport_width,
                frame.viewport.viewport_height,
            ),
        );
        let mapping = frame.mapping(surface);
        let rects = frame
            .overlay
            .render_rects(&self.annotations, self.current_page)
            .into_iter()
            .map(|rect| mapping.to_surface(rect))
            .collect();

        Canvas::new(OverlayCanvas {
            panel,
            rects,
            scrollbar_strip: SCROLLBAR_WIDTH_PX,
            horizontal_scrollbar: panel == Panel::Pdf,
            drawing: self.drawing_enabled,
            dragging: frame.overlay.phase() == OverlayPhase::Dragging,
            fill: self.config.annotation_fill.into(),
            stroke: self.config.annotation_stroke.into(),
            stroke_width: self.config.annotation_stroke_width,
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn analysis_footer(&self) -> Element<'_, Message> {
        let analysis = self.analysis();
        let tier_color = analysis.tier().color();

        let mut footer = column![
            row![
                text(analysis.heading()).size(16),
                text(analysis.message()).color(tier_color),
                horizontal_space(),
                text(analysis.progress()),
            ]
            .spacing(10)
            .align_y(Vertical::Center)
        ]
        .spacing(4);

        if let Some(banner) = analysis.review_banner() {
            footer = footer.push(text(banner).color(tier_color));
        }

        container(footer).width(Length::Fill).into()
    }
}

/// Scrollbar of a fixed width so the overlay knows which strip to leave alone.
fn panel_scrollbar() -> Scrollbar {
    Scrollbar::new()
        .width(SCROLLBAR_WIDTH_PX)
        .scroller_width(SCROLLBAR_WIDTH_PX)
}

fn scrolled(panel: Panel, viewport: Viewport) -> Message {
    let offset = viewport.absolute_offset();
    let bounds = viewport.bounds();
    let content = viewport.content_bounds();
    Message::Scrolled {
        panel,
        offset_x: offset.x,
        offset_y: offset.y,
        viewport_width: bounds.width,
        viewport_height: bounds.height,
        content_width: content.width,
        content_height: content.height,
    }
}

/// Short listing of the detected superscripts for the HTML toolbar.
fn superscript_summary(found: &[String]) -> Option<String> {
    if found.is_empty() {
        return None;
    }
    let shown: Vec<&str> = found
        .iter()
        .take(MAX_LISTED_SUPERSCRIPTS)
        .map(String::as_str)
        .collect();
    let mut summary = format!("Detected: {}", shown.join(", "));
    if found.len() > shown.len() {
        summary.push_str(&format!(" (+{} more)", found.len() - shown.len()));
    }
    Some(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_detected_superscripts() {
        assert_eq!(superscript_summary(&[]), None);
        let found = vec!["1".to_string(), "a".to_string()];
        assert_eq!(superscript_summary(&found).as_deref(), Some("Detected: 1, a"));
    }

    #[test]
    fn summary_truncates_long_lists() {
        let found: Vec<String> = (1..=MAX_LISTED_SUPERSCRIPTS + 3)
            .map(|n| n.to_string())
            .collect();
        let summary = superscript_summary(&found).expect("non-empty");
        assert!(summary.ends_with(" (+3 more)"));
        assert!(!summary.contains(&format!("{}", MAX_LISTED_SUPERSCRIPTS + 1)));
    }
}
