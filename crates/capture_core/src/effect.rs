use crate::CaptureRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the capture pipeline off the UI thread.
    StartCapture(CaptureRequest),
    /// Tear down the UI and exit the process.
    Quit,
}
