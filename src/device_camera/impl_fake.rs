use crate::device_camera::frame::Frame;
use crate::device_camera::interface::{CaptureStream, DeviceCamera, SessionPreset};
use crate::library::logger::interface::Logger;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum FakeFrame {
    Frame(Frame),
    ReadError(String),
}

pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    frame_interval: Duration,
    script: Option<Vec<FakeFrame>>,
    open_error: Option<String>,
}

impl DeviceCameraFake {
    /// Endless synthetic frames at the session preset resolution.
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, frame_interval: Duration) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            frame_interval,
            script: None,
            open_error: None,
        }
    }

    /// Plays `script` once with no delay, then ends the stream.
    #[allow(dead_code)]
    pub fn scripted(logger: Arc<dyn Logger + Send + Sync>, script: Vec<FakeFrame>) -> Self {
        Self {
            script: Some(script),
            ..Self::new(logger, Duration::ZERO)
        }
    }

    /// A device that exists but refuses to stream, like a denied permission.
    #[allow(dead_code)]
    pub fn unavailable(logger: Arc<dyn Logger + Send + Sync>, reason: &str) -> Self {
        Self {
            open_error: Some(reason.to_string()),
            ..Self::new(logger, Duration::ZERO)
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn name(&self) -> String {
        "fake camera".to_string()
    }

    fn open_stream(
        &self,
        preset: SessionPreset,
    ) -> Result<Box<dyn CaptureStream>, Box<dyn std::error::Error + Send + Sync>> {
        if let Some(reason) = &self.open_error {
            return Err(reason.clone().into());
        }
        self.logger
            .info(&format!("Opening fake stream at {:?}", preset.resolution()))?;

        Ok(Box::new(FakeStream {
            resolution: preset.resolution(),
            frame_interval: self.frame_interval,
            script: self.script.clone().map(VecDeque::from),
            tick: 0,
        }))
    }
}

struct FakeStream {
    resolution: (u32, u32),
    frame_interval: Duration,
    script: Option<VecDeque<FakeFrame>>,
    tick: u32,
}

impl FakeStream {
    fn synthetic_frame(&self) -> Frame {
        let (width, height) = self.resolution;
        let shift = (self.tick * 8) % 256;
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(((x * 255 / width.max(1) + shift) % 256) as u8);
                data.push((y * 255 / height.max(1)) as u8);
                data.push(shift as u8);
            }
        }
        Frame::new(width, height, data)
    }
}

impl CaptureStream for FakeStream {
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error + Send + Sync>> {
        if let Some(script) = &mut self.script {
            return match script.pop_front() {
                Some(FakeFrame::Frame(frame)) => Ok(Some(frame)),
                Some(FakeFrame::ReadError(message)) => Err(message.into()),
                None => Ok(None),
            };
        }

        std::thread::sleep(self.frame_interval);
        self.tick = self.tick.wrapping_add(1);
        Ok(Some(self.synthetic_frame()))
    }
}
