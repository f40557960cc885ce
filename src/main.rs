use config::{ClassifierKind, Config, DisplayKind};
use device_camera::default_device;
use device_display::impl_console::DeviceDisplayConsole;
use device_display::interface::DeviceDisplay;
use image_classifier::impl_fake::ImageClassifierFake;
use image_classifier::impl_tract_onnx::ImageClassifierTractOnnx;
use image_classifier::interface::ImageClassifier;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use live_classifier::LiveClassifier;
use std::sync::Arc;

mod capture_session;
mod config;
mod device_camera;
mod device_display;
mod display_state;
mod frame_classifier;
mod image_classifier;
mod library;
mod live_classifier;
mod ui_context;

const TITLE: &str = "Live Classifier";

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone, config.log_level));

    let device = default_device(&config, logger.clone());

    let image_classifier: Arc<dyn ImageClassifier + Send + Sync> = match &config.classifier {
        ClassifierKind::Fake => Arc::new(ImageClassifierFake::new(logger.clone())),
        ClassifierKind::TractOnnx(model_config) => Arc::new(ImageClassifierTractOnnx::new(
            model_config.clone(),
            logger.clone(),
        )),
    };

    let device_display: Box<dyn DeviceDisplay> = match config.display {
        DisplayKind::Console => Box::new(DeviceDisplayConsole::new()),
        #[cfg(feature = "gui")]
        DisplayKind::Gui => Box::new(device_display::impl_gui::DeviceDisplayGui::new(TITLE)),
    };

    logger.info(&format!("Starting {}", TITLE))?;

    let live_classifier = LiveClassifier::new(
        config,
        logger,
        device,
        image_classifier,
        device_display,
    );

    live_classifier.run()?;

    Ok(())
}
