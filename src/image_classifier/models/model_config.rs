#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: String,
    pub labels_path: String,
    /// (height, width)
    pub input_shape: (u32, u32),
    pub mean: [f32; 3],
    pub std: [f32; 3],
    /// Set when the model outputs logits rather than probabilities.
    pub apply_softmax: bool,
    pub top_k: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            onnx_model_path: "./models/mobilenetv2-7.onnx".to_string(),
            labels_path: "./models/synset.txt".to_string(),
            input_shape: (224, 224),
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
            apply_softmax: true,
            top_k: 5,
        }
    }
}
