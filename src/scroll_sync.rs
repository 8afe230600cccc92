//! Proportional scroll synchronization between the PDF and HTML panels.
//!
//! The two panels have unrelated content heights, so alignment is by
//! position ratio: `offset / (content - viewport)` on the reporting side is
//! replayed as `ratio * (content - viewport)` on the other side.
//!
//! Two mechanisms keep the panels from chasing each other forever:
//! - the coordinator only dispatches a target offset when it moves more than
//!   the deadband away from the last value known for that panel;
//! - each panel owns a [`FeedbackGuard`] that recognises the scroll event
//!   produced by a programmatic scroll and keeps it away from
//!   [`ScrollSync::report_scroll`].

use crate::annotations::Panel;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

pub const DEFAULT_DEADBAND: f32 = 10.0;
pub const DEFAULT_SUPPRESS_WINDOW: Duration = Duration::from_millis(100);
/// Distance under which a scroll event is taken to be the echo of an armed
/// programmatic scroll.
const ECHO_TOLERANCE: f32 = 1.0;

/// One scroll observation from a panel, along the synchronized (vertical) axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollReport {
    pub offset: f32,
    pub content_extent: f32,
    pub viewport_extent: f32,
}

impl ScrollReport {
    fn is_well_formed(&self) -> bool {
        [self.offset, self.content_extent, self.viewport_extent]
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0)
    }

    fn scrollable_range(&self) -> f32 {
        self.content_extent - self.viewport_extent
    }
}

/// Position the coordinator wants applied to `target`.
///
/// `offset` is absolute and present once the target has reported its
/// geometry. Before that only the position ratio is known and the panel is
/// moved to the same relative position instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncRequest {
    pub target: Panel,
    pub offset: Option<f32>,
    pub ratio: f32,
}

#[derive(Debug, Clone, Copy, Default)]
struct PanelTrack {
    offset: f32,
    geometry: Option<(f32, f32)>,
    requested: Option<f32>,
    last_known: f32,
}

impl PanelTrack {
    fn record(&mut self, report: ScrollReport) {
        self.offset = report.offset;
        self.last_known = report.offset;
        self.geometry = Some((report.content_extent, report.viewport_extent));
    }

    fn scrollable_range(&self) -> Option<f32> {
        self.geometry
            .map(|(content, viewport)| content - viewport)
            .filter(|range| *range > 0.0)
    }
}

#[derive(Debug)]
pub struct ScrollSync {
    enabled: bool,
    deadband: f32,
    pdf: PanelTrack,
    html: PanelTrack,
}

impl Default for ScrollSync {
    fn default() -> Self {
        Self::new(true, DEFAULT_DEADBAND)
    }
}

impl ScrollSync {
    pub fn new(enabled: bool, deadband: f32) -> Self {
        let deadband = if deadband.is_finite() {
            deadband.max(0.0)
        } else {
            DEFAULT_DEADBAND
        };
        Self {
            enabled,
            deadband,
            pdf: PanelTrack::default(),
            html: PanelTrack::default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip synchronization. Re-enabling does not realign; the next user
    /// scroll does.
    pub fn toggle_sync(&mut self) -> bool {
        self.enabled = !self.enabled;
        debug!(enabled = self.enabled, "Scroll sync toggled");
        self.enabled
    }

    pub fn offset(&self, panel: Panel) -> f32 {
        self.track(panel).offset
    }

    pub fn requested_offset(&self, panel: Panel) -> Option<f32> {
        self.track(panel).requested
    }

    /// Record a user-originated scroll and, when sync is on, derive the
    /// counterpart offset for the other panel.
    pub fn report_scroll(&mut self, source: Panel, report: ScrollReport) -> Option<SyncRequest> {
        if !report.is_well_formed() {
            trace!(panel = %source, ?report, "Ignoring malformed scroll report");
            return None;
        }
        self.track_mut(source).record(report);

        if !self.enabled {
            return None;
        }

        let source_range = report.scrollable_range();
        if source_range <= 0.0 {
            return None;
        }
        let target = source.other();
        let ratio = (report.offset / source_range).clamp(0.0, 1.0);
        let Some(target_range) = self.track(target).scrollable_range() else {
            if self.track(target).geometry.is_some() {
                // Target content fits its viewport; nothing to move.
                return None;
            }
            trace!(panel = %target, ratio, "Target geometry unknown; syncing by ratio");
            return Some(SyncRequest {
                target,
                offset: None,
                ratio,
            });
        };

        let offset = ratio * target_range;
        let deadband = self.deadband;
        let track = self.track_mut(target);
        if (offset - track.last_known).abs() <= deadband {
            return None;
        }
        track.requested = Some(offset);
        track.last_known = offset;
        debug!(from = %source, to = %target, ratio, offset, "Dispatching synced scroll");
        Some(SyncRequest {
            target,
            offset: Some(offset),
            ratio,
        })
    }

    /// Record the scroll event produced by a programmatic scroll. The panel's
    /// own offset is updated but nothing is propagated.
    pub fn record_programmatic(&mut self, panel: Panel, report: ScrollReport) {
        if report.is_well_formed() {
            self.track_mut(panel).record(report);
        }
    }

    /// Forget offsets after the content of both panels was replaced.
    pub fn reset_offsets(&mut self) {
        for track in [&mut self.pdf, &mut self.html] {
            track.offset = 0.0;
            track.last_known = 0.0;
            track.requested = None;
        }
    }

    fn track(&self, panel: Panel) -> &PanelTrack {
        match panel {
            Panel::Pdf => &self.pdf,
            Panel::Html => &self.html,
        }
    }

    fn track_mut(&mut self, panel: Panel) -> &mut PanelTrack {
        match panel {
            Panel::Pdf => &mut self.pdf,
            Panel::Html => &mut self.html,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOrigin {
    User,
    Programmatic { generation: u64 },
}

#[derive(Debug, Clone, Copy)]
struct ArmedScroll {
    generation: u64,
    offset: Option<f32>,
    issued_at: Instant,
}

/// Tags programmatic scrolls of one panel so their echo is not mistaken for
/// user input.
#[derive(Debug)]
pub struct FeedbackGuard {
    generation: u64,
    armed: Option<ArmedScroll>,
    window: Duration,
}

impl Default for FeedbackGuard {
    fn default() -> Self {
        Self::new(DEFAULT_SUPPRESS_WINDOW)
    }
}

impl FeedbackGuard {
    pub fn new(window: Duration) -> Self {
        Self {
            generation: 0,
            armed: None,
            window,
        }
    }

    /// Mark that `offset` is about to be applied programmatically. `None`
    /// when only a relative position was requested; the echo is then
    /// recognised by the suppression window alone.
    pub fn arm(&mut self, offset: Option<f32>, now: Instant) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.armed = Some(ArmedScroll {
            generation: self.generation,
            offset,
            issued_at: now,
        });
        self.generation
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Decide whether a scroll event came from the user or from the most
    /// recent programmatic scroll.
    pub fn classify(&mut self, offset: f32, now: Instant) -> ScrollOrigin {
        let Some(armed) = self.armed else {
            return ScrollOrigin::User;
        };

        if now.saturating_duration_since(armed.issued_at) > self.window {
            // An echo that never came (e.g. the target was already at the
            // clamped offset) must not swallow later user input.
            self.armed = None;
            return ScrollOrigin::User;
        }

        let matches_target = armed
            .offset
            .is_some_and(|target| (offset - target).abs() <= ECHO_TOLERANCE);
        if matches_target {
            self.armed = None;
        }
        // A non-matching position inside the window is the programmatic
        // scroll still settling.
        ScrollOrigin::Programmatic {
            generation: armed.generation,
        }
    }
}
