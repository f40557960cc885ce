use crate::capture_session::preview_layer::PreviewLayer;
use crate::device_display::interface::DeviceDisplay;
use crate::ui_context::UiContext;
use std::error::Error;
use std::time::Duration;

const REPAINT_INTERVAL: Duration = Duration::from_millis(33);
const LABEL_BAND_HEIGHT: f32 = 64.0;

struct LiveView {
    ui: UiContext,
    preview: PreviewLayer,
    texture: Option<egui::TextureHandle>,
    preview_sequence: u64,
}

impl LiveView {
    fn refresh_preview(&mut self, ctx: &egui::Context) {
        let Some((sequence, frame)) = self.preview.latest_since(self.preview_sequence) else {
            return;
        };
        self.preview_sequence = sequence;

        if frame.data.len() != (frame.width as usize) * (frame.height as usize) * 3 {
            return;
        }
        let image = egui::ColorImage::from_rgb(
            [frame.width as usize, frame.height as usize],
            &frame.data,
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ctx.load_texture("preview", image, egui::TextureOptions::LINEAR))
            }
        }
    }
}

/// The part of a texture that covers `view` without distortion, cropping the
/// overflow evenly from both sides.
pub fn aspect_fill_uv(texture: egui::Vec2, view: egui::Vec2) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    if texture.x <= 0.0 || texture.y <= 0.0 || view.x <= 0.0 || view.y <= 0.0 {
        return full;
    }

    let texture_aspect = texture.x / texture.y;
    let view_aspect = view.x / view.y;
    if texture_aspect > view_aspect {
        let visible = view_aspect / texture_aspect;
        let margin = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(margin, 0.0), egui::pos2(1.0 - margin, 1.0))
    } else {
        let visible = texture_aspect / view_aspect;
        let margin = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, margin), egui::pos2(1.0, 1.0 - margin))
    }
}

impl eframe::App for LiveView {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui.drain();
        self.refresh_preview(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let painter = ui.painter();

                match &self.texture {
                    Some(texture) => {
                        painter.image(
                            texture.id(),
                            rect,
                            aspect_fill_uv(texture.size_vec2(), rect.size()),
                            egui::Color32::WHITE,
                        );
                    }
                    None => {
                        painter.rect_filled(rect, 0.0, egui::Color32::BLACK);
                    }
                }

                let band = egui::Rect::from_min_max(
                    egui::pos2(rect.left(), rect.bottom() - LABEL_BAND_HEIGHT),
                    rect.right_bottom(),
                );
                painter.rect_filled(band, 0.0, egui::Color32::from_black_alpha(160));

                let state = self.ui.state();
                painter.text(
                    band.left_center() + egui::vec2(16.0, 0.0),
                    egui::Align2::LEFT_CENTER,
                    &state.label,
                    egui::FontId::proportional(28.0),
                    egui::Color32::WHITE,
                );
                painter.text(
                    band.right_center() - egui::vec2(16.0, 0.0),
                    egui::Align2::RIGHT_CENTER,
                    &state.confidence,
                    egui::FontId::proportional(22.0),
                    egui::Color32::LIGHT_GRAY,
                );
            });

        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}

pub struct DeviceDisplayGui {
    title: String,
}

impl DeviceDisplayGui {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
        }
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn run(
        &mut self,
        ui: UiContext,
        preview: PreviewLayer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(self.title.clone())
                .with_inner_size([960.0, 540.0]),
            ..Default::default()
        };

        let view = LiveView {
            ui,
            preview,
            texture: None,
            preview_sequence: 0,
        };

        eframe::run_native(&self.title, options, Box::new(move |_cc| Box::new(view)))
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_fill_crops_wide_texture_horizontally() {
        let uv = aspect_fill_uv(egui::vec2(3840.0, 2160.0), egui::vec2(1080.0, 1080.0));

        assert_eq!(uv.top(), 0.0);
        assert_eq!(uv.bottom(), 1.0);
        assert!((uv.width() - 0.5625).abs() < 1e-6);
        assert!((uv.center().x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_aspect_fill_crops_tall_texture_vertically() {
        let uv = aspect_fill_uv(egui::vec2(100.0, 200.0), egui::vec2(200.0, 200.0));

        assert_eq!(uv.left(), 0.0);
        assert_eq!(uv.right(), 1.0);
        assert!((uv.top() - 0.25).abs() < 1e-6);
        assert!((uv.bottom() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_aspect_fill_matching_aspect_uses_whole_texture() {
        let uv = aspect_fill_uv(egui::vec2(1920.0, 1080.0), egui::vec2(960.0, 540.0));

        assert_eq!(uv, egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)));
    }
}
