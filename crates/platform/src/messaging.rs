//! System-wide message dispatch
//!
//! The UI never manages power state or firmware hand-off itself. It posts a
//! [`SystemMessage`] to whatever dispatcher the platform injects and returns
//! immediately.

/// Fire-and-forget notifications posted by the UI shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemMessage {
    /// Blank the display and enter low-power sleep until the next key press
    DisplaySleep,
    /// Stop the application and hand control to the stock firmware
    RequestStop,
}

impl SystemMessage {
    /// Short name for logs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DisplaySleep => "display-sleep",
            Self::RequestStop => "request-stop",
        }
    }
}

/// Sink for [`SystemMessage`]s
pub trait MessageDispatcher {
    /// Post `message`; delivery and handling are the dispatcher's concern.
    fn send(&mut self, message: SystemMessage);
}
