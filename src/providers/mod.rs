/*!
 * Provider implementations for translation services.
 *
 * This module contains client implementations for the machine translation
 * backends the pipeline can use:
 * - Google: public Google Translate web endpoint
 * - Mock: scripted translator for tests and dry runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation backends
///
/// A translator is bound to one source/target language pair at construction
/// time. Both operations are fallible independently; callers decide how to
/// recover.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Source language code
    fn source_language(&self) -> &str;

    /// Target language code
    fn target_language(&self) -> &str;

    /// Translate a single text
    async fn translate(&self, text: &str) -> Result<String, ProviderError>;

    /// Translate several texts, preserving order
    ///
    /// The default implementation translates item by item and fails the
    /// whole batch on the first error.
    async fn translate_batch(&self, texts: &[String]) -> Result<Vec<String>, ProviderError> {
        let mut translated = Vec::with_capacity(texts.len());
        for text in texts {
            translated.push(self.translate(text).await?);
        }
        Ok(translated)
    }
}

pub mod google;
pub mod mock;
