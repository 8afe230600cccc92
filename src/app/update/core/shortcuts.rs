use super::super::super::messages::Message;
use super::super::super::state::App;
use iced::keyboard::{Key, Modifiers, key};

impl App {
    pub(super) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        let pressed = match key.as_ref() {
            Key::Named(key::Named::Space) => "space".to_string(),
            Key::Named(key::Named::ArrowRight) => "right".to_string(),
            Key::Named(key::Named::ArrowLeft) => "left".to_string(),
            Key::Named(key::Named::ArrowUp) => "up".to_string(),
            Key::Named(key::Named::ArrowDown) => "down".to_string(),
            Key::Named(key::Named::PageDown) => "pagedown".to_string(),
            Key::Named(key::Named::PageUp) => "pageup".to_string(),
            Key::Character(ch) => ch.to_ascii_lowercase(),
            _ => return None,
        };

        let bindings: [(&str, &str, Message); 10] = [
            (self.config.key_safe_quit.as_str(), "q", Message::SafeQuit),
            (self.config.key_next_page.as_str(), "right", Message::NextPage),
            (self.config.key_prev_page.as_str(), "left", Message::PreviousPage),
            (self.config.key_toggle_sync.as_str(), "s", Message::ToggleSync),
            (self.config.key_toggle_drawing.as_str(), "d", Message::ToggleDrawing),
            (self.config.key_undo.as_str(), "ctrl+z", Message::UndoAnnotation),
            (self.config.key_clear.as_str(), "ctrl+l", Message::ClearAnnotations),
            (self.config.key_zoom_in.as_str(), "=", Message::ZoomIn),
            (self.config.key_zoom_out.as_str(), "-", Message::ZoomOut),
            (self.config.key_rotate.as_str(), "r", Message::Rotate),
        ];

        bindings
            .into_iter()
            .find(|(raw, fallback, _)| Self::shortcut_matches(raw, fallback, &pressed, modifiers))
            .map(|(_, _, message)| message)
    }

    pub(super) fn shortcut_matches(
        raw: &str,
        fallback: &str,
        pressed: &str,
        modifiers: Modifiers,
    ) -> bool {
        let normalized = Self::normalize_shortcut_token(raw, fallback);

        let mut required_ctrl = false;
        let mut required_alt = false;
        let mut required_logo = false;
        let mut required_shift = false;
        let mut required_key: Option<&str> = None;

        for token in normalized
            .split('+')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            match token {
                "ctrl" | "control" => required_ctrl = true,
                "alt" => required_alt = true,
                "logo" | "meta" | "super" | "cmd" | "command" => required_logo = true,
                "shift" => required_shift = true,
                key => required_key = Some(key),
            }
        }

        let required_key = required_key.unwrap_or(fallback);
        if pressed != required_key {
            return false;
        }

        modifiers.control() == required_ctrl
            && modifiers.alt() == required_alt
            && modifiers.logo() == required_logo
            && modifiers.shift() == required_shift
    }

    pub(super) fn normalize_shortcut_token(raw: &str, fallback: &str) -> String {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            fallback.to_string()
        } else {
            normalized
                .replace("spacebar", "space")
                .replace("arrowright", "right")
                .replace("arrowleft", "left")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::test_support::build_test_app;
    use iced::keyboard::Modifiers;

    #[test]
    fn normalizes_arrow_aliases() {
        assert_eq!(App::normalize_shortcut_token(" ArrowRight ", "x"), "right");
        assert_eq!(App::normalize_shortcut_token("", "left"), "left");
    }

    #[test]
    fn matches_ctrl_z_shortcut() {
        assert!(App::shortcut_matches("ctrl+z", "x", "z", Modifiers::CTRL));
    }

    #[test]
    fn rejects_unexpected_extra_modifier() {
        assert!(!App::shortcut_matches(
            "ctrl+z",
            "x",
            "z",
            Modifiers::CTRL | Modifiers::SHIFT,
        ));
        assert!(!App::shortcut_matches("s", "x", "s", Modifiers::CTRL));
    }

    #[test]
    fn default_bindings_map_to_actions() {
        let app = build_test_app();
        let message = app.shortcut_message_for_key(
            Key::Named(key::Named::ArrowRight),
            Modifiers::default(),
        );
        assert!(matches!(message, Some(Message::NextPage)));

        let message =
            app.shortcut_message_for_key(Key::Character("z".into()), Modifiers::CTRL);
        assert!(matches!(message, Some(Message::UndoAnnotation)));

        let message =
            app.shortcut_message_for_key(Key::Character("z".into()), Modifiers::default());
        assert!(message.is_none());

        let message =
            app.shortcut_message_for_key(Key::Character("=".into()), Modifiers::default());
        assert!(matches!(message, Some(Message::ZoomIn)));
    }
}
