use crate::capture_session::preview_layer::PreviewLayer;
use crate::device_display::interface::DeviceDisplay;
use crate::display_state::DisplayState;
use crate::ui_context::UiContext;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Records every state it would have drawn.
#[derive(Clone, Default)]
pub struct DeviceDisplayFake {
    rendered: Arc<Mutex<Vec<DisplayState>>>,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rendered(&self) -> Vec<DisplayState> {
        self.rendered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn record(&self, state: &DisplayState) {
        self.rendered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(state.clone());
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn run(
        &mut self,
        mut ui: UiContext,
        _preview: PreviewLayer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        while let Some(changed) = ui.wait_for_update() {
            if changed {
                self.record(ui.state());
            }
        }
        Ok(())
    }
}
