use crate::cancellation::TicketCounter;
use iced::widget::image::Handle;

/// Decoded page ready for the image widget.
#[derive(Debug, Clone)]
pub struct PdfRaster {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub(in crate::app) enum PdfStatus {
    Loading,
    Ready(PdfRaster),
    Failed(String),
}

/// PDF panel model.
pub(in crate::app) struct PdfState {
    pub(in crate::app) zoom: f32,
    pub(in crate::app) rotation: u16,
    pub(in crate::app) status: PdfStatus,
    pub(in crate::app) count_error: Option<String>,
    pub(in crate::app) count_tickets: TicketCounter,
    pub(in crate::app) render_tickets: TicketCounter,
}

impl PdfState {
    pub(in crate::app) fn new(zoom: f32) -> Self {
        Self {
            zoom,
            rotation: 0,
            status: PdfStatus::Loading,
            count_error: None,
            count_tickets: TicketCounter::default(),
            render_tickets: TicketCounter::default(),
        }
    }
}
