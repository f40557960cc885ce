use crate::capture_session::preview_layer::PreviewLayer;
use crate::device_camera::frame::Frame;
use crate::device_camera::interface::{DeviceCamera, SessionPreset};
use crate::library::logger::interface::Logger;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

pub mod preview_layer;

pub type SampleBufferDelegate = Box<dyn FnMut(&Frame) + Send>;

const VIDEO_QUEUE: &str = "video-queue";
const READ_ERROR_BACKOFF: Duration = Duration::from_millis(50);

/// Streams one device at one fixed preset on a dedicated serial thread.
///
/// Frames go to the delegate first and then replace the preview layer's
/// contents. Every failure along the way ends or skips quietly.
pub struct CaptureSession {
    device: Arc<dyn DeviceCamera + Send + Sync>,
    preset: SessionPreset,
    preview: PreviewLayer,
    delegate: Option<SampleBufferDelegate>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl CaptureSession {
    pub fn setup(
        device: Arc<dyn DeviceCamera + Send + Sync>,
        preset: SessionPreset,
        preview: PreviewLayer,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            device,
            preset,
            preview,
            delegate: None,
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
            logger: logger.with_namespace("capture_session"),
        }
    }

    pub fn set_sample_buffer_delegate(&mut self, delegate: impl FnMut(&Frame) + Send + 'static) {
        self.delegate = Some(Box::new(delegate));
    }

    #[allow(dead_code)]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn start_running(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.worker.is_some() {
            return Ok(());
        }

        let device = self.device.clone();
        let preset = self.preset;
        let preview = self.preview.clone();
        let running = self.running.clone();
        let logger = self.logger.clone();
        let mut delegate = self.delegate.take();

        self.logger.info(&format!(
            "Starting session on {} at {:?}",
            device.name(),
            preset
        ))?;
        running.store(true, Ordering::SeqCst);

        let worker = std::thread::Builder::new()
            .name(VIDEO_QUEUE.to_string())
            .spawn(move || {
                let mut stream = match device.open_stream(preset) {
                    Ok(stream) => stream,
                    Err(e) => {
                        let _ = logger.debug(&format!("could not open stream: {}", e));
                        running.store(false, Ordering::SeqCst);
                        return;
                    }
                };

                while running.load(Ordering::SeqCst) {
                    match stream.next_frame() {
                        Ok(Some(frame)) => {
                            if let Some(delegate) = delegate.as_mut() {
                                delegate(&frame);
                            }
                            preview.present(frame);
                        }
                        Ok(None) => break,
                        Err(e) => {
                            let _ = logger.debug(&format!("frame dropped: {}", e));
                            // a device that keeps failing must not spin this thread
                            std::thread::sleep(READ_ERROR_BACKOFF);
                        }
                    }
                }

                running.store(false, Ordering::SeqCst);
                let _ = logger.info("Session ended");
            })?;

        self.worker = Some(worker);
        Ok(())
    }

    /// Blocks until the stream ends on its own. Only finite sources end.
    pub fn wait_until_finished(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }

    pub fn stop_running(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.wait_until_finished();
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.stop_running();
    }
}
