use crate::device_camera::frame::Frame;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct PreviewSlot {
    frame: Option<Frame>,
    sequence: u64,
}

/// Holds the most recent captured frame for whoever draws the live preview.
#[derive(Clone, Default)]
pub struct PreviewLayer {
    slot: Arc<Mutex<PreviewSlot>>,
}

impl PreviewLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn present(&self, frame: Frame) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.frame = Some(frame);
        slot.sequence += 1;
    }

    /// The latest frame and its sequence number, if newer than `sequence`.
    pub fn latest_since(&self, sequence: u64) -> Option<(u64, Frame)> {
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        if slot.sequence <= sequence {
            return None;
        }
        slot.frame.clone().map(|frame| (slot.sequence, frame))
    }
}
