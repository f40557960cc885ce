use image::{imageops, DynamicImage};
use tract_onnx::prelude::*;

/// Crops the largest centered region with the target aspect ratio, then
/// scales it to exactly `width` x `height`.
pub fn center_crop_resize(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let (w, h) = (image.width() as u64, image.height() as u64);
    let (target_w, target_h) = (width as u64, height as u64);

    let (crop_w, crop_h) = if w * target_h > h * target_w {
        ((h * target_w / target_h).max(1), h)
    } else {
        (w, (w * target_h / target_w).max(1))
    };
    let x = w.saturating_sub(crop_w) / 2;
    let y = h.saturating_sub(crop_h) / 2;

    image
        .crop_imm(x as u32, y as u32, crop_w as u32, crop_h as u32)
        .resize_exact(width, height, imageops::FilterType::Triangle)
}

/// `NCHW` float tensor with per-channel `(value / 255 - mean) / std`.
pub fn image_to_normalized_tensor(
    image: &DynamicImage,
    width: u32,
    height: u32,
    mean: [f32; 3],
    std: [f32; 3],
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    if std.iter().any(|s| *s == 0.0) {
        return Err("normalization std must be non-zero".into());
    }
    if image.width() == 0 || image.height() == 0 || width == 0 || height == 0 {
        return Err(format!(
            "cannot scale {}x{} image to {}x{}",
            image.width(),
            image.height(),
            width,
            height
        )
        .into());
    }

    let rgb = center_crop_resize(image, width, height).to_rgb8();
    let tensor = tract_ndarray::Array4::from_shape_fn(
        (1, 3, height as usize, width as usize),
        |(_, c, y, x)| {
            let pixel = rgb.get_pixel(x as u32, y as u32);
            (pixel[c] as f32 / 255.0 - mean[c]) / std[c]
        },
    );

    Ok(tensor.into_tensor())
}
