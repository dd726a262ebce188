use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::TextGenerator;
use super::error::GenerationError;

/// Recording [`TextGenerator`] for tests.
///
/// Replies with `"explanation #<n>"` where `n` counts calls from 1.
#[derive(Default)]
pub struct MockGenerator {
    prompts: Mutex<Vec<(String, u32)>>,
    fail: AtomicBool,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let generator = Self::default();
        generator.set_failing(true);
        generator
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Prompts received so far, with the requested token cap.
    pub fn prompts(&self) -> Vec<(String, u32)> {
        self.prompts.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError> {
        let mut prompts = self.prompts.lock();
        prompts.push((prompt.to_string(), max_tokens));

        if self.fail.load(Ordering::SeqCst) {
            return Err(GenerationError::Provider("simulated failure".to_string()));
        }

        Ok(format!("explanation #{}", prompts.len()))
    }

    fn model(&self) -> &str {
        "mock"
    }
}
