use serde::Deserialize;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default = "crate::config::defaults::default_pdf_path")]
    pub pdf_path: String,
    #[serde(default = "crate::config::defaults::default_html_base")]
    pub html_base: String,
    #[serde(default = "crate::config::defaults::default_document_id")]
    pub document_id: String,
    #[serde(default = "crate::config::defaults::default_initial_page")]
    pub initial_page: u32,
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default = "crate::config::defaults::default_zoom")]
    pub default_zoom: f32,
    #[serde(default = "crate::config::defaults::default_html_font_size")]
    pub html_font_size: u32,
    #[serde(default = "crate::config::defaults::default_superscript_highlight")]
    pub superscript_highlight: HighlightColor,
    #[serde(default = "crate::config::defaults::default_sync_enabled")]
    pub sync_enabled: bool,
    #[serde(default = "crate::config::defaults::default_sync_deadband")]
    pub sync_deadband: f32,
    #[serde(default = "crate::config::defaults::default_sync_suppress_ms")]
    pub sync_suppress_ms: u64,
    #[serde(default = "crate::config::defaults::default_min_annotation_size")]
    pub min_annotation_size: f32,
    #[serde(default = "crate::config::defaults::default_annotation_fill")]
    pub annotation_fill: HighlightColor,
    #[serde(default = "crate::config::defaults::default_annotation_stroke")]
    pub annotation_stroke: HighlightColor,
    #[serde(default = "crate::config::defaults::default_annotation_stroke_width")]
    pub annotation_stroke_width: f32,
    #[serde(default = "crate::config::defaults::default_pdfinfo_bin")]
    pub pdfinfo_bin: String,
    #[serde(default = "crate::config::defaults::default_pdftoppm_bin")]
    pub pdftoppm_bin: String,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_key_next_page")]
    pub key_next_page: String,
    #[serde(default = "crate::config::defaults::default_key_prev_page")]
    pub key_prev_page: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_sync")]
    pub key_toggle_sync: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_drawing")]
    pub key_toggle_drawing: String,
    #[serde(default = "crate::config::defaults::default_key_undo")]
    pub key_undo: String,
    #[serde(default = "crate::config::defaults::default_key_clear")]
    pub key_clear: String,
    #[serde(default = "crate::config::defaults::default_key_zoom_in")]
    pub key_zoom_in: String,
    #[serde(default = "crate::config::defaults::default_key_zoom_out")]
    pub key_zoom_out: String,
    #[serde(default = "crate::config::defaults::default_key_rotate")]
    pub key_rotate: String,
    #[serde(default = "crate::config::defaults::default_key_safe_quit")]
    pub key_safe_quit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            pdf_path: crate::config::defaults::default_pdf_path(),
            html_base: crate::config::defaults::default_html_base(),
            document_id: crate::config::defaults::default_document_id(),
            initial_page: crate::config::defaults::default_initial_page(),
            theme: ThemeMode::Day,
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            default_zoom: crate::config::defaults::default_zoom(),
            html_font_size: crate::config::defaults::default_html_font_size(),
            superscript_highlight: crate::config::defaults::default_superscript_highlight(),
            sync_enabled: crate::config::defaults::default_sync_enabled(),
            sync_deadband: crate::config::defaults::default_sync_deadband(),
            sync_suppress_ms: crate::config::defaults::default_sync_suppress_ms(),
            min_annotation_size: crate::config::defaults::default_min_annotation_size(),
            annotation_fill: crate::config::defaults::default_annotation_fill(),
            annotation_stroke: crate::config::defaults::default_annotation_stroke(),
            annotation_stroke_width: crate::config::defaults::default_annotation_stroke_width(),
            pdfinfo_bin: crate::config::defaults::default_pdfinfo_bin(),
            pdftoppm_bin: crate::config::defaults::default_pdftoppm_bin(),
            log_level: crate::config::defaults::default_log_level(),
            key_next_page: crate::config::defaults::default_key_next_page(),
            key_prev_page: crate::config::defaults::default_key_prev_page(),
            key_toggle_sync: crate::config::defaults::default_key_toggle_sync(),
            key_toggle_drawing: crate::config::defaults::default_key_toggle_drawing(),
            key_undo: crate::config::defaults::default_key_undo(),
            key_clear: crate::config::defaults::default_key_clear(),
            key_zoom_in: crate::config::defaults::default_key_zoom_in(),
            key_zoom_out: crate::config::defaults::default_key_zoom_out(),
            key_rotate: crate::config::defaults::default_key_rotate(),
            key_safe_quit: crate::config::defaults::default_key_safe_quit(),
        }
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Day,
    Night,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Day
    }
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Day => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct HighlightColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl From<HighlightColor> for iced::Color {
    fn from(color: HighlightColor) -> Self {
        iced::Color::from_rgba(color.r, color.g, color.b, color.a)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Debug
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
