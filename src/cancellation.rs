//! Tickets for background content loads.
//!
//! Page navigation can outrun the loaders: the user may be three pages ahead
//! by the time the first fetch returns. Each load channel hands out a
//! [`LoadTicket`]; issuing a new one cancels the previous ticket so the old
//! task can stop early, and the reducer only commits results whose ticket id
//! is still current.

use anyhow::{Result, anyhow};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

#[derive(Clone, Debug)]
pub struct LoadTicket {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl LoadTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn check_cancelled(&self, stage: &'static str) -> Result<()> {
        if self.is_cancelled() {
            return Err(anyhow!("load {} superseded at stage={stage}", self.id));
        }
        Ok(())
    }
}

/// Issues tickets for one load channel (PDF info, PDF raster, HTML page).
#[derive(Debug, Default)]
pub struct TicketCounter {
    last_id: u64,
    current: Option<LoadTicket>,
}

impl TicketCounter {
    pub fn issue(&mut self) -> LoadTicket {
        if let Some(previous) = self.current.take() {
            previous.cancelled.store(true, Ordering::Release);
        }
        self.last_id = self.last_id.wrapping_add(1);
        let ticket = LoadTicket {
            id: self.last_id,
            cancelled: Arc::new(AtomicBool::new(false)),
        };
        self.current = Some(ticket.clone());
        ticket
    }

    /// True when `id` belongs to the most recently issued ticket.
    pub fn is_current(&self, id: u64) -> bool {
        self.current.as_ref().is_some_and(|ticket| ticket.id == id)
    }

    #[cfg(test)]
    pub fn current_id(&self) -> Option<u64> {
        self.current.as_ref().map(LoadTicket::id)
    }
}
