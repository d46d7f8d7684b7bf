use crate::error::{Result, StreamcueError};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

/// Result of transcribing one inference window.
///
/// `text` is the finalized recognized text. The remaining fields are
/// metadata passed through unexamined by the trigger and overlay logic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptionResult {
    /// Recognized text for the window.
    pub text: String,
    /// Detected or configured language, when the backend reports one.
    pub language: Option<String>,
}

impl TranscriptionResult {
    /// Creates a result carrying only text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
        }
    }

    /// Returns true when the recognized text is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Trait for speech-to-text transcription.
///
/// This trait allows swapping implementations (real Whisper vs mock).
/// Implementations must tolerate being called repeatedly on overlapping
/// windows of the same audio.
pub trait Transcriber: Send + Sync {
    /// Transcribe audio samples to text.
    ///
    /// # Arguments
    /// * `audio` - Mono f32 samples in [-1.0, 1.0] at 16kHz
    fn transcribe(&self, audio: &[f32]) -> Result<TranscriptionResult>;

    /// Get the name of the loaded model
    fn model_name(&self) -> &str;

    /// Check if the transcriber is ready
    fn is_ready(&self) -> bool;
}

/// Implement Transcriber for Arc<T> to allow sharing across contexts.
impl<T: Transcriber> Transcriber for Arc<T> {
    fn transcribe(&self, audio: &[f32]) -> Result<TranscriptionResult> {
        (**self).transcribe(audio)
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

/// Mock transcriber for testing.
///
/// Returns a fixed response, or a scripted sequence of responses when
/// configured with `with_script` (one entry per call, then the fixed
/// response).
#[derive(Debug)]
pub struct MockTranscriber {
    model_name: String,
    response: String,
    script: Mutex<VecDeque<String>>,
    should_fail: bool,
}

impl MockTranscriber {
    /// Create a new mock transcriber with default settings
    pub fn new(model_name: &str) -> Self {
        Self {
            model_name: model_name.to_string(),
            response: "mock transcription".to_string(),
            script: Mutex::new(VecDeque::new()),
            should_fail: false,
        }
    }

    /// Configure the mock to return a specific response on every call
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the mock to return one scripted response per call.
    ///
    /// After the script runs out, subsequent calls return the fixed response.
    pub fn with_script<I, S>(self, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        {
            let mut script = self.script.lock().unwrap_or_else(|e| e.into_inner());
            *script = responses.into_iter().map(Into::into).collect();
        }
        self
    }

    /// Configure the mock to fail on transcribe
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl Transcriber for MockTranscriber {
    fn transcribe(&self, _audio: &[f32]) -> Result<TranscriptionResult> {
        if self.should_fail {
            return Err(StreamcueError::Transcription {
                message: "mock transcription failure".to_string(),
            });
        }

        let mut script = self.script.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(next) = script.pop_front() {
            return Ok(TranscriptionResult::from_text(next));
        }

        Ok(TranscriptionResult::from_text(self.response.clone()))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn is_ready(&self) -> bool {
        !self.should_fail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_transcriber_returns_response() {
        let transcriber = MockTranscriber::new("test-model").with_response("Hello, this is a test");

        let audio = vec![0.0f32; 1000];
        let result = transcriber.transcribe(&audio).unwrap();

        assert_eq!(result.text, "Hello, this is a test");
        assert_eq!(result.language, None);
    }

    #[test]
    fn test_mock_transcriber_script_runs_in_order() {
        let transcriber =
            MockTranscriber::new("test-model").with_script(["first", "second"]);

        let audio = vec![0.0f32; 10];
        assert_eq!(transcriber.transcribe(&audio).unwrap().text, "first");
        assert_eq!(transcriber.transcribe(&audio).unwrap().text, "second");
    }

    #[test]
    fn test_mock_transcriber_returns_error_when_configured() {
        let transcriber = MockTranscriber::new("test-model").with_failure();

        let result = transcriber.transcribe(&[0.0f32; 1000]);
        match result {
            Err(StreamcueError::Transcription { message }) => {
                assert_eq!(message, "mock transcription failure");
            }
            _ => panic!("Expected Transcription error"),
        }
    }

    #[test]
    fn test_mock_transcriber_is_ready() {
        assert!(MockTranscriber::new("m").is_ready());
        assert!(!MockTranscriber::new("m").with_failure().is_ready());
    }

    #[test]
    fn test_transcriber_trait_is_object_safe() {
        let transcriber: Box<dyn Transcriber> =
            Box::new(MockTranscriber::new("test-model").with_response("boxed test"));

        assert_eq!(transcriber.model_name(), "test-model");
        let result = transcriber.transcribe(&[0.0f32; 100]).unwrap();
        assert_eq!(result.text, "boxed test");
    }

    #[test]
    fn test_is_blank() {
        assert!(TranscriptionResult::from_text("").is_blank());
        assert!(TranscriptionResult::from_text("   \n").is_blank());
        assert!(!TranscriptionResult::from_text("creeper").is_blank());
    }
}
