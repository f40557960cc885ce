use crate::device_camera::frame::Frame;
use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::library::logger::interface::Logger;
use std::sync::Arc;

/// Runs one classification request per frame and keeps only the top entry.
pub struct FrameClassifier {
    classifier: Arc<dyn ImageClassifier + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl FrameClassifier {
    pub fn new(
        classifier: Arc<dyn ImageClassifier + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            classifier,
            logger: logger.with_namespace("frame_classifier"),
        }
    }

    /// `None` whenever the frame yields nothing usable. Nothing is retried.
    pub fn classify_frame(&self, frame: &Frame) -> Option<Classification> {
        match self.top_classification(frame) {
            Ok(Some(top)) => Some(top),
            Ok(None) => {
                let _ = self.logger.debug("frame skipped: no results");
                None
            }
            Err(e) => {
                let _ = self.logger.debug(&format!("frame skipped: {}", e));
                None
            }
        }
    }

    fn top_classification(
        &self,
        frame: &Frame,
    ) -> Result<Option<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        let image = frame.to_image()?;
        let ranked = self.classifier.classify(&image)?;
        Ok(ranked.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_classifier::impl_fake::{FakeResult, ImageClassifierFake};
    use crate::library::logger::impl_console::LoggerConsole;
    use crate::library::logger::interface::LogLevel;

    fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(
            chrono::FixedOffset::east_opt(0).unwrap(),
            LogLevel::Info,
        ))
    }

    fn classification(label: &str, confidence: f32) -> Classification {
        Classification {
            label: label.to_string(),
            confidence,
        }
    }

    fn good_frame() -> Frame {
        Frame::new(2, 2, vec![128; 12])
    }

    #[test]
    fn test_takes_first_entry() {
        let classifier = Arc::new(ImageClassifierFake::scripted(
            logger(),
            vec![FakeResult::Ranked(vec![
                classification("golden retriever", 0.91),
                classification("tabby cat", 0.05),
            ])],
        ));
        let frame_classifier = FrameClassifier::new(classifier, logger());

        assert_eq!(
            frame_classifier.classify_frame(&good_frame()),
            Some(classification("golden retriever", 0.91))
        );
    }

    #[test]
    fn test_failures_are_swallowed_and_next_frame_is_unaffected() {
        let classifier = Arc::new(ImageClassifierFake::scripted(
            logger(),
            vec![
                FakeResult::Failure("request failed".to_string()),
                FakeResult::Ranked(vec![]),
                FakeResult::Ranked(vec![classification("sofa", 0.6)]),
            ],
        ));
        let frame_classifier = FrameClassifier::new(classifier, logger());

        assert_eq!(frame_classifier.classify_frame(&good_frame()), None);
        assert_eq!(frame_classifier.classify_frame(&good_frame()), None);
        assert_eq!(
            frame_classifier.classify_frame(&good_frame()),
            Some(classification("sofa", 0.6))
        );
    }

    #[test]
    fn test_empty_frame_is_skipped_and_next_frame_classifies() {
        let classifier = Arc::new(ImageClassifierFake::scripted(
            logger(),
            vec![FakeResult::Ranked(vec![classification("tabby cat", 0.8)])],
        ));
        let frame_classifier = FrameClassifier::new(classifier, logger());

        assert_eq!(
            frame_classifier.classify_frame(&Frame::new(0, 0, vec![])),
            None
        );
        assert_eq!(
            frame_classifier.classify_frame(&good_frame()),
            Some(classification("tabby cat", 0.8))
        );
    }

    #[test]
    fn test_malformed_frame_never_reaches_the_classifier() {
        let classifier = Arc::new(ImageClassifierFake::scripted(
            logger(),
            vec![FakeResult::Ranked(vec![classification("sofa", 0.6)])],
        ));
        let frame_classifier = FrameClassifier::new(classifier, logger());

        assert_eq!(
            frame_classifier.classify_frame(&Frame::new(10, 10, vec![0; 7])),
            None
        );
        assert_eq!(
            frame_classifier.classify_frame(&good_frame()),
            Some(classification("sofa", 0.6))
        );
    }
}
