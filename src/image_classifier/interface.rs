use image::DynamicImage;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

pub trait ImageClassifier {
    /// Ranked by descending confidence. May be empty.
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>>;
}
