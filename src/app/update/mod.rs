use crate::annotations::Panel;
use crate::scroll_sync::SyncRequest;

mod core;
mod drawing;
mod loading;
mod navigation;
mod scroll;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Effect {
    LoadPageCount,
    RenderPdfPage,
    LoadHtmlPage,
    SyncScroll(SyncRequest),
    ResetScroll(Panel),
    QuitSafely,
}
