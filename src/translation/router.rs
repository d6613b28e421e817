/*!
 * Routing of translated rows into per-artifact accumulators.
 */

use crate::dataset::{QaRecord, Schema};

use super::adapter::TranslationOutcome;

/// Ordered rows destined for one output artifact
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowAccumulator {
    /// Language of the rows, `None` for untranslated rows
    language: Option<String>,
    rows: Vec<QaRecord>,
}

impl RowAccumulator {
    /// Accumulator for rows translated into `language`
    pub fn translated(language: &str) -> Self {
        Self {
            language: Some(language.to_string()),
            rows: Vec::new(),
        }
    }

    /// Accumulator for untranslated rows
    pub fn untranslated() -> Self {
        Self::default()
    }

    /// Seed with rows carried over from a previous run
    pub fn with_rows(mut self, rows: Vec<QaRecord>) -> Self {
        self.rows = rows;
        self
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn push(&mut self, record: QaRecord) {
        self.rows.push(record);
    }

    pub fn rows(&self) -> &[QaRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The three accumulators a run appends to
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulators {
    pub primary: RowAccumulator,
    pub secondary: RowAccumulator,
    pub errors: RowAccumulator,
}

impl Accumulators {
    /// Empty accumulators for the given target languages
    pub fn new(primary_language: &str, secondary_language: &str) -> Self {
        Self {
            primary: RowAccumulator::translated(primary_language),
            secondary: RowAccumulator::translated(secondary_language),
            errors: RowAccumulator::untranslated(),
        }
    }
}

/// Translation results of one batch, one list per language and field
#[derive(Debug, Clone, Default)]
pub struct BatchTranslations {
    pub primary_questions: Vec<TranslationOutcome>,
    pub primary_answers: Vec<TranslationOutcome>,
    pub secondary_questions: Vec<TranslationOutcome>,
    pub secondary_answers: Vec<TranslationOutcome>,
}

/// Per-batch classification counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteStats {
    pub primary: usize,
    pub secondary: usize,
    pub failed: usize,
}

/// Both texts for `idx`, when both were translated
fn translated_pair<'a>(
    questions: &'a [TranslationOutcome],
    answers: &'a [TranslationOutcome],
    idx: usize,
) -> Option<(&'a str, &'a str)> {
    let question = questions.get(idx)?.text()?;
    let answer = answers.get(idx)?.text()?;
    Some((question, answer))
}

/// Classify every row of `batch` and append it to the matching accumulators
///
/// A row goes to a language's accumulator only when its question and answer
/// were both translated into that language. A row that missed either
/// language is recorded once, untranslated, in the error accumulator.
pub fn route_batch(
    schema: &Schema,
    batch: &[QaRecord],
    translations: &BatchTranslations,
    accumulators: &mut Accumulators,
) -> RouteStats {
    let mut stats = RouteStats::default();

    for (idx, record) in batch.iter().enumerate() {
        let mut failed = false;

        match translated_pair(&translations.primary_questions, &translations.primary_answers, idx) {
            Some((question, answer)) => {
                accumulators
                    .primary
                    .push(record.with_translation(schema, question, answer));
                stats.primary += 1;
            }
            None => failed = true,
        }

        match translated_pair(&translations.secondary_questions, &translations.secondary_answers, idx) {
            Some((question, answer)) => {
                accumulators
                    .secondary
                    .push(record.with_translation(schema, question, answer));
                stats.secondary += 1;
            }
            None => failed = true,
        }

        if failed {
            accumulators.errors.push(record.clone());
            stats.failed += 1;
        }
    }

    stats
}
