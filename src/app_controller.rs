use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::{Config, TranslationProvider};
use crate::dataset::QaDataset;
use crate::file_utils::FileManager;
use crate::providers::Translator;
use crate::providers::google::GoogleTranslator;
use crate::providers::mock::MockTranslator;
use crate::translation::{BatchTranslator, OutputSink, RunSummary, resolve_resume_point};

// @module: Application controller for dataset translation

/// Main application controller for a translation run
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Draw a progress bar while translating
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self {
            config,
            show_progress: true,
        })
    }

    /// Disable the progress bar, for tests and non-interactive runs
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the translator for one target language from the configuration
    fn build_translator(&self, target_language: &str) -> Arc<dyn Translator> {
        let provider = &self.config.provider;
        match provider.provider_type {
            TranslationProvider::Google => Arc::new(GoogleTranslator::with_options(
                self.config.source_language.clone(),
                target_language.to_string(),
                provider.endpoint.clone(),
                Duration::from_secs(provider.timeout_secs),
                provider.max_chars_per_request,
            )),
            TranslationProvider::Mock => Arc::new(
                MockTranslator::working().with_languages(&self.config.source_language, target_language),
            ),
        }
    }

    /// Run the main workflow with the configured provider
    pub async fn run(&self) -> Result<RunSummary> {
        info!(
            "Translating {} -> {} + {} with {}",
            self.config.source_language,
            self.config.primary_language,
            self.config.secondary_language,
            self.config.provider.provider_type.display_name()
        );
        let primary = self.build_translator(&self.config.primary_language);
        let secondary = self.build_translator(&self.config.secondary_language);
        self.run_with_translators(primary, secondary).await
    }

    /// Run the main workflow with the given translators
    pub async fn run_with_translators(
        &self,
        primary: Arc<dyn Translator>,
        secondary: Arc<dyn Translator>,
    ) -> Result<RunSummary> {
        let start_time = std::time::Instant::now();
        let input = &self.config.files.input;

        if !FileManager::file_exists(input) {
            return Err(anyhow!("Input file does not exist: {:?}", input));
        }

        let dataset = QaDataset::read(input)
            .with_context(|| format!("Failed to load dataset: {:?}", input))?;
        if dataset.skipped > 0 {
            warn!("Skipped {} malformed rows in {:?}", dataset.skipped, input);
        }
        info!("Loaded {} rows from {:?}", dataset.records.len(), input);

        let sink = OutputSink::new(
            self.config.primary_output(),
            self.config.secondary_output(),
            self.config.errors_output(),
        );

        let resume_after = resolve_resume_point(sink.primary_path(), sink.secondary_path());
        let mut accumulators = sink.load_existing(
            &dataset.schema,
            &self.config.primary_language,
            &self.config.secondary_language,
        );

        let batch_translator = BatchTranslator::new(primary, secondary, self.config.batch_options())?;

        let progress_bar = if self.show_progress {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("=>-"));

        let pb = progress_bar.clone();
        let primary_language = self.config.primary_language.clone();
        let secondary_language = self.config.secondary_language.clone();
        let summary = batch_translator
            .run(
                &dataset.schema,
                &dataset.records,
                resume_after,
                &mut accumulators,
                &sink,
                move |done, total, report| {
                    pb.set_length(total as u64);
                    pb.set_position(done as u64);
                    pb.set_message(format!(
                        "{}={} {}={} errors={}",
                        primary_language, report.primary, secondary_language, report.secondary, report.errors
                    ));
                },
            )
            .await?;

        progress_bar.finish_and_clear();

        info!(
            "Translation complete in {}. {}={}, {}={}, errors={} ({} rows in {} batches, {} saves)",
            Self::format_duration(start_time.elapsed()),
            self.config.primary_language,
            summary.report.primary,
            self.config.secondary_language,
            summary.report.secondary,
            summary.report.errors,
            summary.processed_rows,
            summary.batches,
            summary.flushes
        );

        Ok(summary)
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
