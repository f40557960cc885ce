use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use rand::distr::{Distribution, Uniform};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const OBJECTS: [&str; 12] = [
    "golden retriever",
    "tabby cat",
    "sofa",
    "coffee mug",
    "laptop",
    "desk",
    "water bottle",
    "computer keyboard",
    "mouse",
    "pot plant",
    "wall clock",
    "notebook",
];

#[allow(dead_code)]
pub enum FakeResult {
    Ranked(Vec<Classification>),
    Failure(String),
}

/// Random guesses for demos, or a fixed script of results for tests.
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    script: Option<Mutex<VecDeque<FakeResult>>>,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            script: None,
        }
    }

    /// Answers each call with the next scripted result, then with nothing.
    #[allow(dead_code)]
    pub fn scripted(logger: Arc<dyn Logger + Send + Sync>, script: Vec<FakeResult>) -> Self {
        Self {
            script: Some(Mutex::new(VecDeque::from(script))),
            ..Self::new(logger)
        }
    }

    fn random_ranking(
        &self,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        let mut rng = rand::rng();
        let index_dist = Uniform::new(0, OBJECTS.len())?;
        let confidence_dist = Uniform::new(0.0f32, 1.0)?;

        let mut ranked: Vec<Classification> = (0..3)
            .map(|_| Classification {
                label: OBJECTS[index_dist.sample(&mut rng)].to_string(),
                confidence: confidence_dist.sample(&mut rng),
            })
            .collect();
        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        Ok(ranked)
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.debug(&format!(
            "Classifying {}x{} image",
            image.width(),
            image.height()
        ))?;

        let Some(script) = &self.script else {
            return self.random_ranking();
        };

        match script.lock().unwrap_or_else(|e| e.into_inner()).pop_front() {
            Some(FakeResult::Ranked(ranked)) => Ok(ranked),
            Some(FakeResult::Failure(message)) => Err(message.into()),
            None => Ok(vec![]),
        }
    }
}
