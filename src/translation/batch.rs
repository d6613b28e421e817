/*!
 * Batch driver for the resumable translation run.
 *
 * Rows left after the resume point are cut into fixed-size windows. Each
 * window is translated field by field into both languages, routed into the
 * accumulators and, when the flush condition holds, persisted. A randomized
 * pause follows every window to stay under the provider's rate limits.
 */

use anyhow::{Result, anyhow};
use log::{debug, info};
use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::dataset::{QaRecord, Schema};
use crate::providers::Translator;

use super::adapter::translate_with_fallback;
use super::router::{Accumulators, BatchTranslations, route_batch};
use super::sink::{FlushReport, OutputSink};

/// Tunables of a run
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Rows per translation call
    pub batch_size: usize,
    /// Flush whenever the primary accumulator length is a multiple of this
    pub save_interval: usize,
    /// Lower bound of the pause after each batch
    pub pause_min: Duration,
    /// Upper bound of the pause after each batch
    pub pause_max: Duration,
    /// Pause between single-item calls on the fallback path
    pub fallback_pause: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            batch_size: 50,
            save_interval: 1000,
            pause_min: Duration::from_secs(5),
            pause_max: Duration::from_secs(15),
            fallback_pause: Duration::from_millis(500),
        }
    }
}

impl BatchOptions {
    /// Options without any pacing, for tests and local mocks
    pub fn unpaced(batch_size: usize, save_interval: usize) -> Self {
        Self {
            batch_size,
            save_interval,
            pause_min: Duration::ZERO,
            pause_max: Duration::ZERO,
            fallback_pause: Duration::ZERO,
        }
    }

    /// Draw the pause that follows a batch
    pub fn pacing_delay(&self) -> Duration {
        if self.pause_max <= self.pause_min {
            return self.pause_min;
        }
        let min = self.pause_min.as_millis() as u64;
        let max = self.pause_max.as_millis() as u64;
        Duration::from_millis(rand::rng().random_range(min..=max))
    }
}

/// What a run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Resume point the run started from
    pub resumed_after: Option<i64>,
    /// Rows translated in this run
    pub processed_rows: usize,
    pub batches: usize,
    /// Flushes including the final one
    pub flushes: usize,
    /// Counts written by the final flush
    pub report: FlushReport,
}

/// Drives batches through both translators into the accumulators
pub struct BatchTranslator {
    primary: Arc<dyn Translator>,
    secondary: Arc<dyn Translator>,
    options: BatchOptions,
}

impl BatchTranslator {
    /// Create a new batch translator
    pub fn new(
        primary: Arc<dyn Translator>,
        secondary: Arc<dyn Translator>,
        options: BatchOptions,
    ) -> Result<Self> {
        if options.batch_size == 0 {
            return Err(anyhow!("Batch size must be greater than zero"));
        }
        if options.save_interval == 0 {
            return Err(anyhow!("Save interval must be greater than zero"));
        }
        Ok(Self {
            primary,
            secondary,
            options,
        })
    }

    /// Translate one window in both languages
    async fn translate_window(&self, schema: &Schema, batch: &[QaRecord]) -> BatchTranslations {
        let questions: Vec<String> = batch.iter().map(|r| r.question(schema).to_string()).collect();
        let answers: Vec<String> = batch.iter().map(|r| r.answer(schema).to_string()).collect();
        let pause = self.options.fallback_pause;

        BatchTranslations {
            primary_questions: translate_with_fallback(self.primary.as_ref(), &questions, pause).await,
            primary_answers: translate_with_fallback(self.primary.as_ref(), &answers, pause).await,
            secondary_questions: translate_with_fallback(self.secondary.as_ref(), &questions, pause).await,
            secondary_answers: translate_with_fallback(self.secondary.as_ref(), &answers, pause).await,
        }
    }

    /// Process every record with `qa_id` above `resume_after`
    ///
    /// `records` must be in ascending `qa_id` order. `progress_callback`
    /// receives the number of rows done and the number pending after each
    /// batch.
    pub async fn run(
        &self,
        schema: &Schema,
        records: &[QaRecord],
        resume_after: Option<i64>,
        accumulators: &mut Accumulators,
        sink: &OutputSink,
        progress_callback: impl Fn(usize, usize, &FlushReport),
    ) -> Result<RunSummary> {
        let pending: Vec<QaRecord> = match resume_after {
            Some(last) => records.iter().filter(|r| r.qa_id() > last).cloned().collect(),
            None => records.to_vec(),
        };

        let total = pending.len();
        let total_batches = total.div_ceil(self.options.batch_size);
        let mut summary = RunSummary {
            resumed_after: resume_after,
            ..Default::default()
        };
        let mut last_report = FlushReport::default();

        info!(
            "{} rows to translate in {} batches of up to {}",
            total, total_batches, self.options.batch_size
        );

        for (batch_index, batch) in pending.chunks(self.options.batch_size).enumerate() {
            let start_time = Instant::now();
            let is_last = batch_index + 1 == total_batches;

            let translations = self.translate_window(schema, batch).await;
            let stats = route_batch(schema, batch, &translations, accumulators);

            summary.batches += 1;
            summary.processed_rows += batch.len();

            debug!(
                "Batch {}/{} ({}..={}) done in {:?}: primary={}, secondary={}, failed={}",
                batch_index + 1,
                total_batches,
                batch[0].qa_id(),
                batch[batch.len() - 1].qa_id(),
                start_time.elapsed(),
                stats.primary,
                stats.secondary,
                stats.failed
            );

            if accumulators.primary.len() % self.options.save_interval == 0 || is_last {
                last_report = sink.flush(schema, accumulators)?;
                summary.flushes += 1;
            }

            progress_callback(summary.processed_rows, total, &last_report);

            let delay = self.options.pacing_delay();
            if !delay.is_zero() {
                debug!("Sleeping {:?} before next batch", delay);
                tokio::time::sleep(delay).await;
            }
        }

        summary.report = sink.flush(schema, accumulators)?;
        summary.flushes += 1;

        Ok(summary)
    }
}
