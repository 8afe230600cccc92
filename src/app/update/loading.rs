use super::super::messages::Message;
use super::super::state::{App, HtmlStatus, PdfRaster, PdfStatus};
use super::Effect;
use crate::cancellation::LoadTicket;
use crate::html_page::{HtmlPage, HtmlSource, parse_page};
use crate::pdf_render::PdfRenderer;
use anyhow::Result;
use iced::Task;
use iced::futures::channel::oneshot;
use iced::widget::image::Handle;
use std::path::Path;
use std::thread;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn load_page_count_task(&mut self) -> Task<Message> {
        let ticket = self.pdf.count_tickets.issue();
        let id = ticket.id();
        let renderer = self.renderer.clone();
        let path = self.pdf_path.clone();
        info!(path = %path.display(), ticket = id, "Dispatching page count task");
        Task::perform(
            off_thread(move || {
                renderer
                    .page_count(&path)
                    .and_then(|count| ticket.check_cancelled("count").map(|_| count))
                    .map_err(|err| {
                        warn!(path = %path.display(), "Failed to read page count: {err:#}");
                        format!("Could not read {}: {err}", path.display())
                    })
            }),
            move |result| Message::PageCountLoaded { ticket: id, result },
        )
    }

    pub(super) fn render_pdf_page_task(&mut self) -> Task<Message> {
        let ticket = self.pdf.render_tickets.issue();
        let id = ticket.id();
        let renderer = self.renderer.clone();
        let path = self.pdf_path.clone();
        let page = self.current_page;
        let zoom = self.pdf.zoom;
        let rotation = self.pdf.rotation;
        self.pdf.status = PdfStatus::Loading;
        info!(page, zoom, rotation, ticket = id, "Dispatching PDF render task");
        Task::perform(
            off_thread(move || {
                render_raster(&renderer, &path, page, zoom, rotation, &ticket).map_err(|err| {
                    warn!(page, "Failed to render PDF page: {err:#}");
                    format!("Could not render page {page} of the PDF")
                })
            }),
            move |result| Message::PdfPageRendered {
                ticket: id,
                page,
                result,
            },
        )
    }

    pub(super) fn load_html_page_task(&mut self) -> Task<Message> {
        let ticket = self.html.tickets.issue();
        let id = ticket.id();
        let source = self.html.source.clone();
        let page = self.current_page;
        self.html.status = HtmlStatus::Loading;
        info!(
            page,
            location = %source.page_location(page),
            ticket = id,
            "Dispatching HTML load task"
        );
        Task::perform(
            off_thread(move || {
                fetch_html(&source, page, &ticket).map_err(|err| {
                    warn!(page, "Failed to load HTML page: {err:#}");
                    format!("Could not load HTML content for page {page}")
                })
            }),
            move |result| Message::HtmlPageLoaded {
                ticket: id,
                page,
                result,
            },
        )
    }

    pub(super) fn handle_page_count_loaded(
        &mut self,
        ticket: u64,
        result: Result<u32, String>,
        effects: &mut Vec<Effect>,
    ) {
        if !self.pdf.count_tickets.is_current(ticket) {
            debug!(ticket, "Discarding stale page count");
            return;
        }
        match result {
            Ok(count) => {
                info!(count, "Page count loaded");
                self.page_count = Some(count);
                self.pdf.count_error = None;
                let clamped = self.clamp_page(self.current_page);
                if clamped != self.current_page {
                    effects.extend(self.go_to_page(clamped));
                }
            }
            Err(err) => {
                self.page_count = None;
                self.pdf.count_error = Some(err);
            }
        }
    }

    pub(super) fn handle_pdf_page_rendered(
        &mut self,
        ticket: u64,
        page: u32,
        result: Result<PdfRaster, String>,
    ) {
        if !self.pdf.render_tickets.is_current(ticket) || page != self.current_page {
            debug!(ticket, page, "Discarding stale PDF render");
            return;
        }
        self.pdf.status = match result {
            Ok(raster) => PdfStatus::Ready(raster),
            Err(err) => PdfStatus::Failed(err),
        };
    }

    pub(super) fn handle_html_page_loaded(
        &mut self,
        ticket: u64,
        page: u32,
        result: Result<HtmlPage, String>,
    ) {
        if !self.html.tickets.is_current(ticket) || page != self.current_page {
            debug!(ticket, page, "Discarding stale HTML page");
            return;
        }
        self.html.status = match result {
            Ok(parsed) => {
                info!(
                    page,
                    superscripts = parsed.superscript_count(),
                    "HTML page ready"
                );
                HtmlStatus::Ready(parsed)
            }
            Err(err) => HtmlStatus::Failed(err),
        };
    }
}

/// Runs blocking I/O (subprocesses, the blocking HTTP client) on its own
/// thread so the async executor never blocks on it.
async fn off_thread<T, F>(job: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, String> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    thread::spawn(move || {
        let _ = tx.send(job());
    });
    rx.await
        .unwrap_or_else(|_| Err("Background loader stopped unexpectedly".to_string()))
}

fn render_raster(
    renderer: &PdfRenderer,
    path: &Path,
    page: u32,
    zoom: f32,
    rotation: u16,
    ticket: &LoadTicket,
) -> Result<PdfRaster> {
    ticket.check_cancelled("render")?;
    let rendered = renderer.render_page(path, page, zoom, rotation)?;
    ticket.check_cancelled("decode")?;
    Ok(PdfRaster {
        handle: Handle::from_rgba(rendered.width, rendered.height, rendered.rgba),
        width: rendered.width,
        height: rendered.height,
    })
}

fn fetch_html(source: &HtmlSource, page: u32, ticket: &LoadTicket) -> Result<HtmlPage> {
    ticket.check_cancelled("fetch")?;
    let markup = source.fetch(page)?;
    ticket.check_cancelled("parse")?;
    Ok(parse_page(&markup))
}
