use super::models::HighlightColor;

pub(crate) fn default_pdf_path() -> String {
    "complex_tables_all.pdf".to_string()
}

pub(crate) fn default_html_base() -> String {
    "html_output".to_string()
}

pub(crate) fn default_document_id() -> String {
    "complex_tables_all".to_string()
}

pub(crate) fn default_initial_page() -> u32 {
    1
}

pub(crate) fn default_window_width() -> f32 {
    1400.0
}

pub(crate) fn default_window_height() -> f32 {
    900.0
}

pub(crate) fn default_zoom() -> f32 {
    1.2
}

pub(crate) fn default_html_font_size() -> u32 {
    15
}

pub(crate) fn default_superscript_highlight() -> HighlightColor {
    HighlightColor {
        r: 1.0,
        g: 0.92,
        b: 0.23,
        a: 0.6,
    }
}

pub(crate) fn default_sync_enabled() -> bool {
    true
}

pub(crate) fn default_sync_deadband() -> f32 {
    crate::scroll_sync::DEFAULT_DEADBAND
}

pub(crate) fn default_sync_suppress_ms() -> u64 {
    crate::scroll_sync::DEFAULT_SUPPRESS_WINDOW.as_millis() as u64
}

pub(crate) fn default_min_annotation_size() -> f32 {
    crate::overlay::DEFAULT_MIN_SIZE
}

pub(crate) fn default_annotation_fill() -> HighlightColor {
    HighlightColor {
        r: 1.0,
        g: 0.0,
        b: 0.0,
        a: 0.2,
    }
}

pub(crate) fn default_annotation_stroke() -> HighlightColor {
    HighlightColor {
        r: 1.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    }
}

pub(crate) fn default_annotation_stroke_width() -> f32 {
    2.0
}

pub(crate) fn default_pdfinfo_bin() -> String {
    "pdfinfo".to_string()
}

pub(crate) fn default_pdftoppm_bin() -> String {
    "pdftoppm".to_string()
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Debug
}

pub(crate) fn default_key_next_page() -> String {
    "right".to_string()
}

pub(crate) fn default_key_prev_page() -> String {
    "left".to_string()
}

pub(crate) fn default_key_toggle_sync() -> String {
    "s".to_string()
}

pub(crate) fn default_key_toggle_drawing() -> String {
    "d".to_string()
}

pub(crate) fn default_key_undo() -> String {
    "ctrl+z".to_string()
}

pub(crate) fn default_key_clear() -> String {
    "ctrl+l".to_string()
}

pub(crate) fn default_key_zoom_in() -> String {
    "=".to_string()
}

pub(crate) fn default_key_zoom_out() -> String {
    "-".to_string()
}

pub(crate) fn default_key_rotate() -> String {
    "r".to_string()
}

pub(crate) fn default_key_safe_quit() -> String {
    "q".to_string()
}
