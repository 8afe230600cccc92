use super::messages::{Message, PointerEvent};
use crate::annotations::Panel;
use crate::overlay::ContentRect;
use iced::mouse;
use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke, event};
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

/// Transparent layer stacked over a panel's scrollable.
///
/// `rects` are already in surface coordinates. The layer only reacts to the
/// pointer while drawing mode is on so scrolling and text selection below it
/// keep working otherwise. The scrollbar strips along the right (and, for a
/// horizontally scrolling panel, bottom) edge are never drawn on.
pub(super) struct OverlayCanvas {
    pub(super) panel: Panel,
    pub(super) rects: Vec<ContentRect>,
    pub(super) scrollbar_strip: f32,
    pub(super) horizontal_scrollbar: bool,
    pub(super) drawing: bool,
    pub(super) dragging: bool,
    pub(super) fill: Color,
    pub(super) stroke: Color,
    pub(super) stroke_width: f32,
}

impl OverlayCanvas {
    fn drawable_area(&self, bounds: Rectangle) -> Rectangle {
        let bottom = if self.horizontal_scrollbar {
            self.scrollbar_strip
        } else {
            0.0
        };
        Rectangle {
            width: (bounds.width - self.scrollbar_strip).max(0.0),
            height: (bounds.height - bottom).max(0.0),
            ..bounds
        }
    }
}

impl canvas::Program<Message> for OverlayCanvas {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        if !self.drawing {
            return (event::Status::Ignored, None);
        }
        let canvas::Event::Mouse(mouse_event) = event else {
            return (event::Status::Ignored, None);
        };

        let pointer = match mouse_event {
            mouse::Event::ButtonPressed(mouse::Button::Left) => cursor
                .position_over(self.drawable_area(bounds))
                .map(|position| PointerEvent::Pressed { position, bounds }),
            mouse::Event::CursorMoved { position } if self.dragging => {
                Some(PointerEvent::Moved(position))
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) if self.dragging => {
                Some(match cursor.position() {
                    Some(position) => PointerEvent::Released(position),
                    None => PointerEvent::Lost,
                })
            }
            mouse::Event::CursorLeft if self.dragging => Some(PointerEvent::Lost),
            _ => None,
        };

        match pointer {
            Some(event) => (
                event::Status::Captured,
                Some(Message::Pointer {
                    panel: self.panel,
                    event,
                }),
            ),
            None => (event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        if self.rects.is_empty() {
            return Vec::new();
        }
        let mut frame = Frame::new(renderer, bounds.size());
        let stroke = Stroke::default()
            .with_color(self.stroke)
            .with_width(self.stroke_width);
        for rect in &self.rects {
            let top_left = Point::new(rect.x, rect.y);
            let size = Size::new(rect.width, rect.height);
            frame.fill_rectangle(top_left, size, self.fill);
            frame.stroke(&Path::rectangle(top_left, size), stroke);
        }
        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.drawing && (self.dragging || cursor.is_over(self.drawable_area(bounds))) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::widget::canvas::Program;

    fn overlay(drawing: bool, dragging: bool) -> OverlayCanvas {
        OverlayCanvas {
            panel: Panel::Pdf,
            rects: Vec::new(),
            scrollbar_strip: 10.0,
            horizontal_scrollbar: true,
            drawing,
            dragging,
            fill: Color::TRANSPARENT,
            stroke: Color::BLACK,
            stroke_width: 2.0,
        }
    }

    fn bounds() -> Rectangle {
        Rectangle::new(Point::new(10.0, 10.0), Size::new(200.0, 100.0))
    }

    fn press() -> canvas::Event {
        canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
    }

    #[test]
    fn ignores_input_outside_drawing_mode() {
        let (status, message) = overlay(false, false).update(
            &mut (),
            press(),
            bounds(),
            mouse::Cursor::Available(Point::new(50.0, 50.0)),
        );
        assert_eq!(status, event::Status::Ignored);
        assert!(message.is_none());
    }

    #[test]
    fn press_inside_bounds_starts_gesture() {
        let (status, message) = overlay(true, false).update(
            &mut (),
            press(),
            bounds(),
            mouse::Cursor::Available(Point::new(50.0, 50.0)),
        );
        assert_eq!(status, event::Status::Captured);
        assert!(matches!(
            message,
            Some(Message::Pointer {
                panel: Panel::Pdf,
                event: PointerEvent::Pressed { .. }
            })
        ));

        let (_, outside) = overlay(true, false).update(
            &mut (),
            press(),
            bounds(),
            mouse::Cursor::Available(Point::new(500.0, 500.0)),
        );
        assert!(outside.is_none());
    }

    #[test]
    fn scrollbar_strips_are_left_to_the_scrollable() {
        let canvas = overlay(true, false);
        // Bounds span x 10..210 and y 10..110; strips are the last 10 px.
        for position in [Point::new(205.0, 50.0), Point::new(50.0, 105.0)] {
            let cursor = mouse::Cursor::Available(position);
            let (status, message) = canvas.update(&mut (), press(), bounds(), cursor);
            assert_eq!(status, event::Status::Ignored);
            assert!(message.is_none());
            assert_eq!(
                canvas.mouse_interaction(&(), bounds(), cursor),
                mouse::Interaction::None
            );
        }

        let inside = mouse::Cursor::Available(Point::new(195.0, 95.0));
        assert_eq!(
            canvas.mouse_interaction(&(), bounds(), inside),
            mouse::Interaction::Crosshair
        );
        let (status, _) = canvas.update(&mut (), press(), bounds(), inside);
        assert_eq!(status, event::Status::Captured);
    }

    #[test]
    fn release_without_cursor_is_lost() {
        let release = canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left));
        let (_, message) =
            overlay(true, true).update(&mut (), release, bounds(), mouse::Cursor::Unavailable);
        assert!(matches!(
            message,
            Some(Message::Pointer {
                event: PointerEvent::Lost,
                ..
            })
        ));
    }

    #[test]
    fn moves_only_matter_while_dragging() {
        let moved = canvas::Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(60.0, 60.0),
        });
        let cursor = mouse::Cursor::Available(Point::new(60.0, 60.0));
        let (_, idle) = overlay(true, false).update(&mut (), moved.clone(), bounds(), cursor);
        assert!(idle.is_none());
        let (_, dragging) = overlay(true, true).update(&mut (), moved, bounds(), cursor);
        assert!(matches!(
            dragging,
            Some(Message::Pointer {
                event: PointerEvent::Moved(_),
                ..
            })
        ));
    }
}
