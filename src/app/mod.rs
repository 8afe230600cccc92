mod canvas;
mod messages;
mod state;
mod update;
mod view;

use state::App;

use crate::config::AppConfig;
use iced::{Size, Theme, window};

/// Helper to launch the app with the resolved configuration.
pub fn run_app(config: AppConfig) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        ..window::Settings::default()
    };

    iced::application("PDF vs HTML Validator", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| {
            if matches!(app.config.theme, crate::config::ThemeMode::Night) {
                Theme::Dark
            } else {
                Theme::Light
            }
        })
        .run_with(move || App::bootstrap(config))
}
