use crate::config::{CameraSource, Config};
use crate::device_camera::impl_fake::DeviceCameraFake;
use crate::device_camera::impl_image_directory::DeviceCameraImageDirectory;
use crate::device_camera::interface::DeviceCamera;
use crate::library::logger::interface::Logger;
use std::sync::Arc;

pub mod frame;
pub mod impl_fake;
pub mod impl_image_directory;
#[cfg(feature = "webcam")]
pub mod impl_webcam;
pub mod interface;

/// Acquires the default video input for the configured source.
///
/// Returns `None` when no such device exists; callers treat that as "nothing
/// to capture" rather than an error.
pub fn default_device(
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Option<Arc<dyn DeviceCamera + Send + Sync>> {
    match &config.camera_source {
        CameraSource::Fake => Some(Arc::new(DeviceCameraFake::new(
            logger,
            config.frame_interval,
        ))),
        CameraSource::ImageDirectory(path) => {
            if !path.is_dir() {
                let _ = logger.debug(&format!("no image directory at {}", path.display()));
                return None;
            }
            Some(Arc::new(DeviceCameraImageDirectory::new(
                path.clone(),
                config.frame_interval,
                logger,
            )))
        }
        #[cfg(feature = "webcam")]
        CameraSource::Webcam => impl_webcam::DeviceCameraWebcam::default_device(logger)
            .map(|camera| Arc::new(camera) as Arc<dyn DeviceCamera + Send + Sync>),
    }
}
