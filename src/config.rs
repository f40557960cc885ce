use crate::device_camera::interface::SessionPreset;
use crate::image_classifier::models::model_config::ModelConfig;
use crate::library::logger::interface::LogLevel;
use chrono::Offset;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum CameraSource {
    /// Synthetic frames, useful without hardware.
    Fake,
    /// Plays the images of a directory once, in name order.
    #[allow(dead_code)]
    ImageDirectory(PathBuf),
    #[cfg(feature = "webcam")]
    Webcam,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierKind {
    #[allow(dead_code)]
    Fake,
    TractOnnx(ModelConfig),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    Console,
    #[cfg(feature = "gui")]
    Gui,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub session_preset: SessionPreset,
    pub camera_source: CameraSource,
    pub frame_interval: Duration,
    pub classifier: ClassifierKind,
    pub min_confidence: f32,
    pub display: DisplayKind,
    pub logger_timezone: chrono::FixedOffset,
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_preset: SessionPreset::Hd4K3840x2160,
            camera_source: default_camera_source(),
            frame_interval: Duration::from_millis(500),
            classifier: ClassifierKind::TractOnnx(ModelConfig::default()),
            min_confidence: 0.5,
            display: default_display(),
            logger_timezone: utc(),
            log_level: LogLevel::Info,
        }
    }
}

#[cfg(feature = "webcam")]
fn default_camera_source() -> CameraSource {
    CameraSource::Webcam
}

#[cfg(not(feature = "webcam"))]
fn default_camera_source() -> CameraSource {
    CameraSource::Fake
}

#[cfg(feature = "gui")]
fn default_display() -> DisplayKind {
    DisplayKind::Gui
}

#[cfg(not(feature = "gui"))]
fn default_display() -> DisplayKind {
    DisplayKind::Console
}

fn utc() -> chrono::FixedOffset {
    chrono::Utc.fix()
}
