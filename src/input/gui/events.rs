/// Custom user events for the GUI event loop.
///
/// These events let the band worker threads wake the main UI thread, which
/// then collects finished passes from the scheduler.
#[derive(Debug, Clone)]
pub enum GuiEvent {
    /// A band has finished and its result is waiting in the scheduler.
    ///
    /// Receiving this does not redraw by itself. The handler polls the
    /// scheduler and requests a redraw only if the display changed.
    Wake,
}
