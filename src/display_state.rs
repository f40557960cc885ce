use crate::image_classifier::interface::Classification;

/// The two on-screen text fields. Empty until the first confident result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    pub label: String,
    pub confidence: String,
}

impl DisplayState {
    /// Overwrites both fields when `top` is confident enough, otherwise leaves
    /// them as they were. Returns whether anything was written.
    pub fn apply(&mut self, top: &Classification, min_confidence: f32) -> bool {
        if top.confidence < min_confidence {
            return false;
        }
        self.label = capitalize(&top.label);
        self.confidence = format_confidence(top.confidence);
        true
    }
}

/// Upper-cases the first letter of each word and lower-cases the rest. Any
/// non-alphanumeric character starts a new word.
pub fn capitalize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(c);
            at_word_start = true;
        }
    }
    result
}

/// Percentage in the shortest form that round-trips, never rounded to a fixed
/// precision, and always with a fractional part.
pub fn format_confidence(confidence: f32) -> String {
    let percent = confidence * 100.0;
    let mut text = percent.to_string();
    if percent.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text.push('%');
    text
}
