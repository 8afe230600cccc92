use crate::cancellation::TicketCounter;
use crate::html_page::{HtmlPage, HtmlSource};

#[derive(Debug, Clone)]
pub(in crate::app) enum HtmlStatus {
    Loading,
    Ready(HtmlPage),
    Failed(String),
}

/// HTML panel model.
pub(in crate::app) struct HtmlState {
    pub(in crate::app) source: HtmlSource,
    pub(in crate::app) status: HtmlStatus,
    pub(in crate::app) tickets: TicketCounter,
}

impl HtmlState {
    pub(in crate::app) fn new(source: HtmlSource) -> Self {
        Self {
            source,
            status: HtmlStatus::Loading,
            tickets: TicketCounter::default(),
        }
    }

    pub(in crate::app) fn superscript_count(&self) -> usize {
        match &self.status {
            HtmlStatus::Ready(page) => page.superscript_count(),
            _ => 0,
        }
    }
}
