/*!
 * Mock translator implementations for testing.
 *
 * This module provides a translator that simulates different behaviors:
 * - `MockTranslator::working()` - Always succeeds with tagged text
 * - `MockTranslator::batch_failing()` - Batch calls fail, single calls work
 * - `MockTranslator::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Batch calls fail outright, single calls succeed
    BatchFailing,
    /// Always fails with an error
    Failing,
    /// Returns empty translations
    Empty,
    /// Batch calls return one item fewer than requested
    ShortBatch,
}

/// Mock translator for testing pipeline behavior
#[derive(Debug)]
pub struct MockTranslator {
    source_language: String,
    target_language: String,
    behavior: MockBehavior,
    /// Texts containing this marker always fail, in batch and single calls
    fail_marker: Option<String>,
    single_calls: Arc<AtomicUsize>,
    batch_calls: Arc<AtomicUsize>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            source_language: "en".to_string(),
            target_language: "xx".to_string(),
            behavior,
            fail_marker: None,
            single_calls: Arc::new(AtomicUsize::new(0)),
            batch_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn batch_failing() -> Self {
        Self::new(MockBehavior::BatchFailing)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Bind the mock to a language pair
    pub fn with_languages(mut self, source: &str, target: &str) -> Self {
        self.source_language = source.to_string();
        self.target_language = target.to_string();
        self
    }

    /// Fail every text that contains `marker`
    pub fn with_fail_marker(mut self, marker: &str) -> Self {
        self.fail_marker = Some(marker.to_string());
        self
    }

    /// Number of single translate calls made so far
    pub fn single_calls(&self) -> usize {
        self.single_calls.load(Ordering::SeqCst)
    }

    /// Number of batch translate calls made so far
    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    /// The text a working mock produces for `text`
    pub fn expected_translation(&self, text: &str) -> String {
        format!("[{}] {}", self.target_language, text)
    }

    fn check_marker(&self, text: &str) -> Result<(), ProviderError> {
        match &self.fail_marker {
            Some(marker) if text.contains(marker.as_str()) => Err(ProviderError::ApiError {
                status_code: 500,
                message: format!("Simulated failure for marked text: {}", text),
            }),
            _ => Ok(()),
        }
    }
}

impl Clone for MockTranslator {
    fn clone(&self) -> Self {
        Self {
            source_language: self.source_language.clone(),
            target_language: self.target_language.clone(),
            behavior: self.behavior,
            fail_marker: self.fail_marker.clone(),
            single_calls: Arc::clone(&self.single_calls),
            batch_calls: Arc::clone(&self.batch_calls),
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    fn source_language(&self) -> &str {
        &self.source_language
    }

    fn target_language(&self) -> &str {
        &self.target_language
    }

    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        self.check_marker(text)?;

        match self.behavior {
            MockBehavior::Working | MockBehavior::BatchFailing | MockBehavior::ShortBatch => {
                Ok(self.expected_translation(text))
            }
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),
            MockBehavior::Empty => Ok(String::new()),
        }
    }

    async fn translate_batch(&self, texts: &[String]) -> Result<Vec<String>, ProviderError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        for text in texts {
            self.check_marker(text)?;
        }

        match self.behavior {
            MockBehavior::Working => Ok(texts.iter().map(|t| self.expected_translation(t)).collect()),
            MockBehavior::Empty => Ok(vec![String::new(); texts.len()]),
            MockBehavior::ShortBatch => Ok(texts
                .iter()
                .skip(1)
                .map(|t| self.expected_translation(t))
                .collect()),
            MockBehavior::BatchFailing => {
                Err(ProviderError::RateLimitExceeded("Simulated batch rejection".to_string()))
            }
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),
        }
    }
}
