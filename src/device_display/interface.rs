use crate::capture_session::preview_layer::PreviewLayer;
use crate::ui_context::UiContext;
use std::error::Error;

/// A screen hosting the live preview and the two result labels.
pub trait DeviceDisplay {
    /// Runs the UI loop on the calling thread. Returns when the display is
    /// closed, or for displays without a window, once updates stop arriving.
    fn run(
        &mut self,
        ui: UiContext,
        preview: PreviewLayer,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}
