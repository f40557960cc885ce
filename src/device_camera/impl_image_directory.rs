use crate::device_camera::frame::Frame;
use crate::device_camera::interface::{CaptureStream, DeviceCamera, SessionPreset};
use crate::library::logger::interface::Logger;
use image::imageops::FilterType;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "webp"];

/// Replays still images as if they came from a camera.
pub struct DeviceCameraImageDirectory {
    directory: PathBuf,
    frame_interval: Duration,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraImageDirectory {
    pub fn new(
        directory: PathBuf,
        frame_interval: Duration,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            directory,
            frame_interval,
            logger: logger.with_namespace("camera").with_namespace("image_directory"),
        }
    }

    fn image_paths(&self) -> Result<Vec<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&self.directory)? {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false);
            if is_image {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

impl DeviceCamera for DeviceCameraImageDirectory {
    fn name(&self) -> String {
        format!("images in {}", self.directory.display())
    }

    fn open_stream(
        &self,
        preset: SessionPreset,
    ) -> Result<Box<dyn CaptureStream>, Box<dyn std::error::Error + Send + Sync>> {
        let paths = self.image_paths()?;
        self.logger.info(&format!(
            "Streaming {} images from {}",
            paths.len(),
            self.directory.display()
        ))?;

        Ok(Box::new(ImageDirectoryStream {
            paths: VecDeque::from(paths),
            max_resolution: preset.resolution(),
            frame_interval: self.frame_interval,
            first: true,
        }))
    }
}

struct ImageDirectoryStream {
    paths: VecDeque<PathBuf>,
    max_resolution: (u32, u32),
    frame_interval: Duration,
    first: bool,
}

impl CaptureStream for ImageDirectoryStream {
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error + Send + Sync>> {
        let Some(path) = self.paths.pop_front() else {
            return Ok(None);
        };

        if !self.first {
            std::thread::sleep(self.frame_interval);
        }
        self.first = false;

        let mut image = image::open(&path)?;
        let (max_width, max_height) = self.max_resolution;
        if image.width() > max_width || image.height() > max_height {
            image = image.resize(max_width, max_height, FilterType::Triangle);
        }

        Ok(Some(Frame::from_image(&image)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;
    use crate::library::logger::interface::LogLevel;
    use image::{DynamicImage, Rgb, RgbImage};

    fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(
            chrono::FixedOffset::east_opt(0).unwrap(),
            LogLevel::Info,
        ))
    }

    #[test]
    fn test_streams_images_in_name_order_then_ends() {
        let dir = tempfile::tempdir().unwrap();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 2, Rgb([0, 0, 255])))
            .save(dir.path().join("b.png"))
            .unwrap();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([255, 0, 0])))
            .save(dir.path().join("a.png"))
            .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

        let camera =
            DeviceCameraImageDirectory::new(dir.path().to_path_buf(), Duration::ZERO, logger());
        let mut stream = camera.open_stream(SessionPreset::Vga640x480).unwrap();

        let first = stream.next_frame().unwrap().unwrap();
        let second = stream.next_frame().unwrap().unwrap();

        assert_eq!((first.width, first.height), (2, 2));
        assert_eq!(&first.data[0..3], &[255, 0, 0]);
        assert_eq!((second.width, second.height), (4, 2));
        assert_eq!(stream.next_frame().unwrap(), None);
    }

    #[test]
    fn test_unreadable_image_is_a_frame_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.png"), b"not really a png").unwrap();

        let camera =
            DeviceCameraImageDirectory::new(dir.path().to_path_buf(), Duration::ZERO, logger());
        let mut stream = camera.open_stream(SessionPreset::Vga640x480).unwrap();

        assert!(stream.next_frame().is_err());
        assert_eq!(stream.next_frame().unwrap(), None);
    }

    #[test]
    fn test_large_images_fit_the_preset() {
        let dir = tempfile::tempdir().unwrap();
        DynamicImage::ImageRgb8(RgbImage::new(1280, 960))
            .save(dir.path().join("big.png"))
            .unwrap();

        let camera =
            DeviceCameraImageDirectory::new(dir.path().to_path_buf(), Duration::ZERO, logger());
        let mut stream = camera.open_stream(SessionPreset::Vga640x480).unwrap();

        let frame = stream.next_frame().unwrap().unwrap();

        assert_eq!((frame.width, frame.height), (640, 480));
    }
}
