/*!
 * Batch-then-fallback translation of text lists.
 *
 * One batched call is attempted for the whole list. If it fails, or comes
 * back with the wrong number of items, every text is retried on its own so
 * that a single bad item only costs its own position.
 */

use log::{debug, warn};
use std::time::Duration;

use crate::providers::Translator;

/// Result of translating one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// The provider returned a non-empty translation
    Translated(String),
    /// The provider failed or returned nothing for this item
    Failed,
}

impl TranslationOutcome {
    /// Translated text, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Translated(text) => Some(text),
            Self::Failed => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    fn from_text(text: String) -> Self {
        if text.trim().is_empty() {
            Self::Failed
        } else {
            Self::Translated(text)
        }
    }
}

/// Translate `texts` with `translator`, never failing as a whole
///
/// The returned list always has the same length as `texts`. `pause` is
/// slept between consecutive single-item calls on the fallback path.
pub async fn translate_with_fallback(
    translator: &dyn Translator,
    texts: &[String],
    pause: Duration,
) -> Vec<TranslationOutcome> {
    if texts.is_empty() {
        return Vec::new();
    }

    match translator.translate_batch(texts).await {
        Ok(translated) if translated.len() == texts.len() => {
            return translated.into_iter().map(TranslationOutcome::from_text).collect();
        }
        Ok(translated) => {
            warn!(
                "Batch {} -> {} returned {} items for {} texts, retrying individually",
                translator.source_language(),
                translator.target_language(),
                translated.len(),
                texts.len()
            );
        }
        Err(e) => {
            warn!(
                "Batch {} -> {} failed ({}), retrying {} texts individually",
                translator.source_language(),
                translator.target_language(),
                e,
                texts.len()
            );
        }
    }

    let mut outcomes = Vec::with_capacity(texts.len());
    for (idx, text) in texts.iter().enumerate() {
        if idx > 0 && !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }

        let outcome = match translator.translate(text).await {
            Ok(translated) => TranslationOutcome::from_text(translated),
            Err(e) => {
                debug!("Item {} failed: {}", idx, e);
                TranslationOutcome::Failed
            }
        };
        outcomes.push(outcome);
    }

    outcomes
}
