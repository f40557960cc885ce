use crate::device_camera::frame::Frame;
use crate::device_camera::interface::{CaptureStream, DeviceCamera, SessionPreset};
use crate::library::logger::interface::Logger;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
    Resolution,
};
use nokhwa::Camera;
use std::sync::Arc;

const REQUESTED_FRAME_RATE: u32 = 30;

pub struct DeviceCameraWebcam {
    index: CameraIndex,
    human_name: String,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraWebcam {
    /// The first camera the platform reports, if any.
    pub fn default_device(logger: Arc<dyn Logger + Send + Sync>) -> Option<Self> {
        let logger = logger.with_namespace("camera").with_namespace("webcam");
        let cameras = match nokhwa::query(ApiBackend::Auto) {
            Ok(cameras) => cameras,
            Err(e) => {
                let _ = logger.debug(&format!("camera query failed: {}", e));
                return None;
            }
        };
        let info = cameras.into_iter().next()?;

        Some(Self {
            index: info.index().clone(),
            human_name: info.human_name(),
            logger,
        })
    }
}

impl DeviceCamera for DeviceCameraWebcam {
    fn name(&self) -> String {
        self.human_name.clone()
    }

    fn open_stream(
        &self,
        preset: SessionPreset,
    ) -> Result<Box<dyn CaptureStream>, Box<dyn std::error::Error + Send + Sync>> {
        let (width, height) = preset.resolution();
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(
                Resolution::new(width, height),
                FrameFormat::MJPEG,
                REQUESTED_FRAME_RATE,
            ),
        ));

        let mut camera = Camera::new(self.index.clone(), requested)?;
        camera.open_stream()?;
        self.logger.info(&format!(
            "Streaming {} at {}",
            self.human_name,
            camera.resolution()
        ))?;

        Ok(Box::new(WebcamStream { camera }))
    }
}

struct WebcamStream {
    camera: Camera,
}

impl CaptureStream for WebcamStream {
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error + Send + Sync>> {
        let buffer = self.camera.frame()?;
        let decoded = buffer.decode_image::<RgbFormat>()?;
        let (width, height) = (decoded.width(), decoded.height());
        Ok(Some(Frame::new(width, height, decoded.into_raw())))
    }
}

impl Drop for WebcamStream {
    fn drop(&mut self) {
        let _ = self.camera.stop_stream();
    }
}
