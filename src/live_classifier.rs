use crate::capture_session::preview_layer::PreviewLayer;
use crate::capture_session::CaptureSession;
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::frame_classifier::FrameClassifier;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use crate::ui_context::{ui_context, UiDispatcher};
use std::sync::Arc;


/// The single screen: camera preview with the top guess overlaid.
pub struct LiveClassifier {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    device: Option<Arc<dyn DeviceCamera + Send + Sync>>,
    classifier: Arc<dyn ImageClassifier + Send + Sync>,
    display: Box<dyn DeviceDisplay>,
}

impl LiveClassifier {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device: Option<Arc<dyn DeviceCamera + Send + Sync>>,
        classifier: Arc<dyn ImageClassifier + Send + Sync>,
        display: Box<dyn DeviceDisplay>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("live_classifier"),
            device,
            classifier,
            display,
        }
    }

    /// Blocks on the display's UI loop and tears the session down after it.
    pub fn run(mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let preview = PreviewLayer::new();
        let (dispatcher, ui) = ui_context(self.config.min_confidence);

        let mut session = self.setup_session(preview.clone(), dispatcher);
        if let Some(session) = session.as_mut() {
            if let Err(e) = session.start_running() {
                let _ = self.logger.debug(&format!("session did not start: {}", e));
            }
        }

        let result = self.display.run(ui, preview);

        if let Some(mut session) = session {
            session.stop_running();
        }
        self.logger.info("Stopped")?;

        result
    }

    fn setup_session(
        &self,
        preview: PreviewLayer,
        dispatcher: UiDispatcher,
    ) -> Option<CaptureSession> {
        let Some(device) = self.device.clone() else {
            let _ = self.logger.debug("no camera available");
            return None;
        };

        let mut session = CaptureSession::setup(
            device,
            self.config.session_preset,
            preview,
            self.logger.clone(),
        );

        let frame_classifier = FrameClassifier::new(self.classifier.clone(), self.logger.clone());
        session.set_sample_buffer_delegate(move |frame| {
            if let Some(top) = frame_classifier.classify_frame(frame) {
                dispatcher.dispatch_async(top);
            }
        });

        Some(session)
    }
}
