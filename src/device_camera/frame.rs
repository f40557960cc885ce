use image::{DynamicImage, RgbImage};

/// One captured RGB8 pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    pub fn from_image(image: &DynamicImage) -> Self {
        let rgb = image.to_rgb8();
        Self {
            width: rgb.width(),
            height: rgb.height(),
            data: rgb.into_raw(),
        }
    }

    /// Fails on an empty frame or when the buffer does not hold exactly
    /// `width * height` RGB pixels.
    pub fn to_image(&self) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("empty {}x{} frame", self.width, self.height).into());
        }
        let rgb = RgbImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(
            || {
                format!(
                    "pixel buffer of {} bytes does not match {}x{} rgb",
                    self.data.len(),
                    self.width,
                    self.height
                )
            },
        )?;
        Ok(DynamicImage::ImageRgb8(rgb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_image_matching_buffer() {
        let frame = Frame::new(2, 1, vec![255, 0, 0, 0, 255, 0]);

        let image = frame.to_image().unwrap().to_rgb8();

        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(image.get_pixel(1, 0).0, [0, 255, 0]);
    }

    #[test]
    fn test_to_image_empty_frame_fails() {
        assert!(Frame::new(0, 0, vec![]).to_image().is_err());
        assert!(Frame::new(0, 10, vec![]).to_image().is_err());
    }

    #[test]
    fn test_to_image_short_buffer_fails() {
        let frame = Frame::new(4, 4, vec![0; 10]);

        assert!(frame.to_image().is_err());
    }
}
