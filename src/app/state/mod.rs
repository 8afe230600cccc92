mod constants;
mod html;
mod panel;
mod pdf;

use crate::analysis::PageAnalysis;
use crate::annotations::{AnnotationStore, Panel};
use crate::config::AppConfig;
use crate::html_page::HtmlSource;
use crate::pdf_render::{PdfRenderer, clamp_zoom};
use crate::scroll_sync::ScrollSync;
use iced::Task;
use std::path::PathBuf;
use std::time::Duration;

use super::messages::Message;
use super::update::Effect;

pub(crate) use constants::*;
pub(in crate::app) use html::{HtmlState, HtmlStatus};
pub(in crate::app) use panel::PanelFrame;
pub(crate) use pdf::PdfRaster;
pub(in crate::app) use pdf::{PdfState, PdfStatus};

/// Core application state composed of sub-models.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) pdf_path: PathBuf,
    pub(super) renderer: PdfRenderer,
    pub(super) current_page: u32,
    pub(super) page_count: Option<u32>,
    pub(super) page_input: String,
    pub(super) pdf: PdfState,
    pub(super) html: HtmlState,
    pub(super) sync: ScrollSync,
    pub(super) annotations: AnnotationStore,
    pub(super) drawing_enabled: bool,
    pub(super) pdf_frame: PanelFrame,
    pub(super) html_frame: PanelFrame,
}

impl App {
    pub(super) fn bootstrap(mut config: AppConfig) -> (App, Task<Message>) {
        clamp_config(&mut config);
        let suppress_window = Duration::from_millis(config.sync_suppress_ms);
        let initial_page = config.initial_page;
        let mut app = App {
            pdf_path: PathBuf::from(&config.pdf_path),
            renderer: PdfRenderer::new(config.pdfinfo_bin.clone(), config.pdftoppm_bin.clone()),
            current_page: initial_page,
            page_count: None,
            page_input: initial_page.to_string(),
            pdf: PdfState::new(config.default_zoom),
            html: HtmlState::new(HtmlSource::new(
                config.html_base.clone(),
                config.document_id.clone(),
            )),
            sync: ScrollSync::new(config.sync_enabled, config.sync_deadband),
            annotations: AnnotationStore::new(),
            drawing_enabled: false,
            pdf_frame: PanelFrame::new(Panel::Pdf, suppress_window, config.min_annotation_size),
            html_frame: PanelFrame::new(Panel::Html, suppress_window, config.min_annotation_size),
            config,
        };

        tracing::info!(
            pdf = %app.pdf_path.display(),
            html = %app.html.source.page_location(app.current_page),
            page = app.current_page,
            "Starting validator session"
        );

        let init = [Effect::LoadPageCount, Effect::RenderPdfPage, Effect::LoadHtmlPage];
        let tasks: Vec<Task<Message>> = init
            .into_iter()
            .map(|effect| app.run_effect(effect))
            .collect();
        (app, Task::batch(tasks))
    }

    pub(super) fn frame(&self, panel: Panel) -> &PanelFrame {
        match panel {
            Panel::Pdf => &self.pdf_frame,
            Panel::Html => &self.html_frame,
        }
    }

    pub(super) fn frame_mut(&mut self, panel: Panel) -> &mut PanelFrame {
        match panel {
            Panel::Pdf => &mut self.pdf_frame,
            Panel::Html => &mut self.html_frame,
        }
    }

    /// Highest page reachable, `None` while the page count is unknown.
    pub(super) fn last_page(&self) -> Option<u32> {
        self.page_count
    }

    pub(super) fn clamp_page(&self, page: u32) -> u32 {
        let page = page.max(1);
        match self.last_page() {
            Some(last) => page.min(last),
            None => page,
        }
    }

    pub(super) fn analysis(&self) -> PageAnalysis {
        PageAnalysis {
            page: self.current_page,
            total_pages: self.page_count,
            superscripts: self.html.superscript_count(),
        }
    }
}

fn clamp_config(config: &mut AppConfig) {
    config.initial_page = config.initial_page.max(1);
    config.default_zoom = clamp_zoom(config.default_zoom);
    config.html_font_size = config
        .html_font_size
        .clamp(MIN_HTML_FONT_SIZE, MAX_HTML_FONT_SIZE);
    if !config.window_width.is_finite() || config.window_width < 320.0 {
        config.window_width = AppConfig::default().window_width;
    }
    if !config.window_height.is_finite() || config.window_height < 240.0 {
        config.window_height = AppConfig::default().window_height;
    }
    if !config.annotation_stroke_width.is_finite() || config.annotation_stroke_width <= 0.0 {
        config.annotation_stroke_width = AppConfig::default().annotation_stroke_width;
    }
}

#[cfg(test)]
pub(super) mod test_support {
    use super::App;
    use crate::config::AppConfig;

    /// App wired to paths that do not exist; the load tasks are built but
    /// never run.
    pub(in crate::app) fn build_test_app() -> App {
        let mut config = AppConfig::default();
        config.pdf_path = format!("/tmp/pdf-html-validator-{}.pdf", std::process::id());
        config.html_base = "/tmp/pdf-html-validator-missing".to_string();
        config.document_id = "doc".to_string();
        let (app, _task) = App::bootstrap(config);
        app
    }
}
