/*!
 * # qa-translator - resumable question-answer dataset translation
 *
 * A Rust library for translating a question-answer CSV dataset into two
 * target languages at once, surviving flaky translation endpoints and
 * process restarts.
 *
 * ## Features
 *
 * - Resume from partially written outputs by `qa_id`
 * - Batch translation with per-item fallback when a batch call fails
 * - Separate outputs per target language plus an error output
 * - Atomic whole-file saves at a configurable interval
 * - Randomized pacing between batches to respect rate limits
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `dataset`: CSV dataset model, lenient reading and writing
 * - `translation`: the batch pipeline:
 *   - `translation::resume`: resume point resolution
 *   - `translation::batch`: batch driver
 *   - `translation::adapter`: batch-then-fallback translation
 *   - `translation::router`: row classification into accumulators
 *   - `translation::sink`: artifact persistence
 * - `providers`: translation backends (`google`, `mock`)
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod dataset;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use dataset::{QaDataset, QaRecord, Schema};
pub use errors::{DatasetError, ProviderError};
pub use providers::Translator;
pub use translation::{Accumulators, BatchTranslator, OutputSink, RunSummary, TranslationOutcome};
