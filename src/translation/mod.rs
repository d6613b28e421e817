/*!
 * Resumable batch translation pipeline.
 *
 * - `resume`: resume point from previously written artifacts
 * - `batch`: batch driver with pacing and flush scheduling
 * - `adapter`: batch-then-fallback translation of text lists
 * - `router`: classification of rows into accumulators
 * - `sink`: persistence of accumulators to artifacts
 */

// Re-export main types for easier usage
pub use self::adapter::{TranslationOutcome, translate_with_fallback};
pub use self::batch::{BatchOptions, BatchTranslator, RunSummary};
pub use self::resume::resolve_resume_point;
pub use self::router::{Accumulators, BatchTranslations, RowAccumulator, route_batch};
pub use self::sink::{FlushReport, OutputSink};

// Submodules
pub mod adapter;
pub mod batch;
pub mod resume;
pub mod router;
pub mod sink;
