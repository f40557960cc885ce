use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::image_classifier::labels::parse_labels;
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::tract::image::image_to_normalized_tensor;
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::{Arc, Mutex};
use tract_onnx::prelude::*;

struct LoadedModel {
    plan: TypedRunnableModel<TypedModel>,
    labels: Vec<String>,
}

/// ONNX classifier run through tract.
///
/// The model is loaded on first use and kept. A failed load fails only the
/// current call; the next call tries again.
pub struct ImageClassifierTractOnnx {
    config: ModelConfig,
    loaded: Mutex<Option<Arc<LoadedModel>>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTractOnnx {
    pub fn new(config: ModelConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            config,
            loaded: Mutex::new(None),
            logger: logger.with_namespace("image_classifier").with_namespace("tract_onnx"),
        }
    }

    fn model(&self) -> Result<Arc<LoadedModel>, Box<dyn std::error::Error + Send + Sync>> {
        let mut loaded = self.loaded.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(model) = loaded.as_ref() {
            return Ok(model.clone());
        }

        let model = Arc::new(self.load()?);
        *loaded = Some(model.clone());
        Ok(model)
    }

    fn load(&self) -> Result<LoadedModel, Box<dyn std::error::Error + Send + Sync>> {
        let (height, width) = self.config.input_shape;
        let plan = tract_onnx::onnx()
            .model_for_path(&self.config.onnx_model_path)?
            .with_input_fact(
                0,
                f32::fact([1, 3, height as usize, width as usize]).into(),
            )?
            .into_optimized()?
            .into_runnable()?;

        let labels = parse_labels(&std::fs::read_to_string(&self.config.labels_path)?);

        self.logger.info(&format!(
            "Loaded {} with {} labels",
            self.config.onnx_model_path,
            labels.len()
        ))?;

        Ok(LoadedModel { plan, labels })
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        let model = self.model()?;
        let (height, width) = self.config.input_shape;

        let input =
            image_to_normalized_tensor(image, width, height, self.config.mean, self.config.std)?;
        let outputs = model.plan.run(tvec!(input.into_tvalue()))?;
        let output = outputs
            .first()
            .ok_or("model produced no outputs")?
            .to_array_view::<f32>()?;

        let scores: Vec<f32> = output.iter().copied().collect();
        let scores = if self.config.apply_softmax {
            softmax(&scores)
        } else {
            scores
        };

        Ok(rank(&scores, &model.labels, self.config.top_k))
    }
}

pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum == 0.0 || !sum.is_finite() {
        return vec![0.0; logits.len()];
    }
    exps.iter().map(|e| e / sum).collect()
}

/// Top `top_k` scores, highest first. Indices without a label get a
/// placeholder name so a short labels file never hides a result.
pub fn rank(scores: &[f32], labels: &[String], top_k: usize) -> Vec<Classification> {
    let mut indexed: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
    indexed.truncate(top_k);

    indexed
        .into_iter()
        .map(|(index, confidence)| Classification {
            label: labels
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("class {}", index)),
            confidence,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;
    use crate::library::logger::interface::LogLevel;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_rank_sorts_descending_and_truncates() {
        let ranked = rank(
            &[0.1, 0.7, 0.05, 0.15],
            &labels(&["sofa", "tabby cat", "tench", "golden retriever"]),
            2,
        );

        assert_eq!(
            ranked,
            vec![
                Classification {
                    label: "tabby cat".to_string(),
                    confidence: 0.7
                },
                Classification {
                    label: "golden retriever".to_string(),
                    confidence: 0.15
                },
            ]
        );
    }

    #[test]
    fn test_rank_unlabelled_index() {
        let ranked = rank(&[0.2, 0.8], &labels(&["sofa"]), 1);

        assert_eq!(ranked[0].label, "class 1");
    }

    #[test]
    fn test_softmax_sums_to_one_and_keeps_order() {
        let probabilities = softmax(&[1.0, 3.0, 2.0]);

        let sum: f32 = probabilities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(probabilities[1] > probabilities[2]);
        assert!(probabilities[2] > probabilities[0]);
    }

    #[test]
    fn test_missing_model_fails_each_call() {
        let logger = Arc::new(LoggerConsole::new(
            chrono::FixedOffset::east_opt(0).unwrap(),
            LogLevel::Info,
        ));
        let classifier = ImageClassifierTractOnnx::new(
            ModelConfig {
                onnx_model_path: "./does/not/exist.onnx".to_string(),
                ..ModelConfig::default()
            },
            logger,
        );
        let image = DynamicImage::new_rgb8(8, 8);

        assert!(classifier.classify(&image).is_err());
        assert!(classifier.classify(&image).is_err());
    }
}
