use super::defaults;
use super::models::{AppConfig, HighlightColor, LogLevel, ThemeMode};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    documents: DocumentsConfig,
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    sync: SyncConfig,
    #[serde(default)]
    drawing: DrawingConfig,
    #[serde(default)]
    renderer: RendererConfig,
    #[serde(default)]
    keys: KeysConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            pdf_path: tables.documents.pdf_path,
            html_base: tables.documents.html_base,
            document_id: tables.documents.document_id,
            initial_page: tables.documents.initial_page,
            theme: tables.appearance.theme,
            window_width: tables.appearance.window_width,
            window_height: tables.appearance.window_height,
            default_zoom: tables.appearance.default_zoom,
            html_font_size: tables.appearance.html_font_size,
            superscript_highlight: tables.appearance.superscript_highlight,
            sync_enabled: tables.sync.sync_enabled,
            sync_deadband: tables.sync.sync_deadband,
            sync_suppress_ms: tables.sync.sync_suppress_ms,
            min_annotation_size: tables.drawing.min_annotation_size,
            annotation_fill: tables.drawing.annotation_fill,
            annotation_stroke: tables.drawing.annotation_stroke,
            annotation_stroke_width: tables.drawing.annotation_stroke_width,
            pdfinfo_bin: tables.renderer.pdfinfo_bin,
            pdftoppm_bin: tables.renderer.pdftoppm_bin,
            log_level: tables.logging.log_level,
            key_next_page: tables.keys.next_page,
            key_prev_page: tables.keys.prev_page,
            key_toggle_sync: tables.keys.toggle_sync,
            key_toggle_drawing: tables.keys.toggle_drawing,
            key_undo: tables.keys.undo,
            key_clear: tables.keys.clear,
            key_zoom_in: tables.keys.zoom_in,
            key_zoom_out: tables.keys.zoom_out,
            key_rotate: tables.keys.rotate,
            key_safe_quit: tables.keys.safe_quit,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            documents: DocumentsConfig {
                pdf_path: config.pdf_path.clone(),
                html_base: config.html_base.clone(),
                document_id: config.document_id.clone(),
                initial_page: config.initial_page,
            },
            appearance: AppearanceConfig {
                theme: config.theme,
                window_width: config.window_width,
                window_height: config.window_height,
                default_zoom: config.default_zoom,
                html_font_size: config.html_font_size,
                superscript_highlight: config.superscript_highlight,
            },
            sync: SyncConfig {
                sync_enabled: config.sync_enabled,
                sync_deadband: config.sync_deadband,
                sync_suppress_ms: config.sync_suppress_ms,
            },
            drawing: DrawingConfig {
                min_annotation_size: config.min_annotation_size,
                annotation_fill: config.annotation_fill,
                annotation_stroke: config.annotation_stroke,
                annotation_stroke_width: config.annotation_stroke_width,
            },
            renderer: RendererConfig {
                pdfinfo_bin: config.pdfinfo_bin.clone(),
                pdftoppm_bin: config.pdftoppm_bin.clone(),
            },
            keys: KeysConfig {
                next_page: config.key_next_page.clone(),
                prev_page: config.key_prev_page.clone(),
                toggle_sync: config.key_toggle_sync.clone(),
                toggle_drawing: config.key_toggle_drawing.clone(),
                undo: config.key_undo.clone(),
                clear: config.key_clear.clone(),
                zoom_in: config.key_zoom_in.clone(),
                zoom_out: config.key_zoom_out.clone(),
                rotate: config.key_rotate.clone(),
                safe_quit: config.key_safe_quit.clone(),
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct DocumentsConfig {
    #[serde(default = "defaults::default_pdf_path")]
    pdf_path: String,
    #[serde(default = "defaults::default_html_base")]
    html_base: String,
    #[serde(default = "defaults::default_document_id")]
    document_id: String,
    #[serde(default = "defaults::default_initial_page")]
    initial_page: u32,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        DocumentsConfig {
            pdf_path: defaults::default_pdf_path(),
            html_base: defaults::default_html_base(),
            document_id: defaults::default_document_id(),
            initial_page: defaults::default_initial_page(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
    #[serde(default = "defaults::default_zoom")]
    default_zoom: f32,
    #[serde(default = "defaults::default_html_font_size")]
    html_font_size: u32,
    #[serde(default = "defaults::default_superscript_highlight")]
    superscript_highlight: HighlightColor,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            theme: ThemeMode::default(),
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            default_zoom: defaults::default_zoom(),
            html_font_size: defaults::default_html_font_size(),
            superscript_highlight: defaults::default_superscript_highlight(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct SyncConfig {
    #[serde(default = "defaults::default_sync_enabled")]
    sync_enabled: bool,
    #[serde(default = "defaults::default_sync_deadband")]
    sync_deadband: f32,
    #[serde(default = "defaults::default_sync_suppress_ms")]
    sync_suppress_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            sync_enabled: defaults::default_sync_enabled(),
            sync_deadband: defaults::default_sync_deadband(),
            sync_suppress_ms: defaults::default_sync_suppress_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct DrawingConfig {
    #[serde(default = "defaults::default_min_annotation_size")]
    min_annotation_size: f32,
    #[serde(default = "defaults::default_annotation_fill")]
    annotation_fill: HighlightColor,
    #[serde(default = "defaults::default_annotation_stroke")]
    annotation_stroke: HighlightColor,
    #[serde(default = "defaults::default_annotation_stroke_width")]
    annotation_stroke_width: f32,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        DrawingConfig {
            min_annotation_size: defaults::default_min_annotation_size(),
            annotation_fill: defaults::default_annotation_fill(),
            annotation_stroke: defaults::default_annotation_stroke(),
            annotation_stroke_width: defaults::default_annotation_stroke_width(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct RendererConfig {
    #[serde(default = "defaults::default_pdfinfo_bin")]
    pdfinfo_bin: String,
    #[serde(default = "defaults::default_pdftoppm_bin")]
    pdftoppm_bin: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        RendererConfig {
            pdfinfo_bin: defaults::default_pdfinfo_bin(),
            pdftoppm_bin: defaults::default_pdftoppm_bin(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_next_page")]
    next_page: String,
    #[serde(default = "defaults::default_key_prev_page")]
    prev_page: String,
    #[serde(default = "defaults::default_key_toggle_sync")]
    toggle_sync: String,
    #[serde(default = "defaults::default_key_toggle_drawing")]
    toggle_drawing: String,
    #[serde(default = "defaults::default_key_undo")]
    undo: String,
    #[serde(default = "defaults::default_key_clear")]
    clear: String,
    #[serde(default = "defaults::default_key_zoom_in")]
    zoom_in: String,
    #[serde(default = "defaults::default_key_zoom_out")]
    zoom_out: String,
    #[serde(default = "defaults::default_key_rotate")]
    rotate: String,
    #[serde(default = "defaults::default_key_safe_quit")]
    safe_quit: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            next_page: defaults::default_key_next_page(),
            prev_page: defaults::default_key_prev_page(),
            toggle_sync: defaults::default_key_toggle_sync(),
            toggle_drawing: defaults::default_key_toggle_drawing(),
            undo: defaults::default_key_undo(),
            clear: defaults::default_key_clear(),
            zoom_in: defaults::default_key_zoom_in(),
            zoom_out: defaults::default_key_zoom_out(),
            rotate: defaults::default_key_rotate(),
            safe_quit: defaults::default_key_safe_quit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}
