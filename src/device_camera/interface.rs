use crate::device_camera::frame::Frame;

/// Fixed capture quality. The session never negotiates anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPreset {
    Hd4K3840x2160,
    Hd1920x1080,
    Hd1280x720,
    Vga640x480,
}

impl SessionPreset {
    pub fn resolution(&self) -> (u32, u32) {
        match self {
            SessionPreset::Hd4K3840x2160 => (3840, 2160),
            SessionPreset::Hd1920x1080 => (1920, 1080),
            SessionPreset::Hd1280x720 => (1280, 720),
            SessionPreset::Vga640x480 => (640, 480),
        }
    }
}

/// A video input device. Opening a stream happens on the capture thread, so
/// streams themselves need not be `Send`.
pub trait DeviceCamera {
    fn name(&self) -> String;

    fn open_stream(
        &self,
        preset: SessionPreset,
    ) -> Result<Box<dyn CaptureStream>, Box<dyn std::error::Error + Send + Sync>>;
}

pub trait CaptureStream {
    /// `Ok(None)` marks the end of a finite source.
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error + Send + Sync>>;
}
