/*!
 * Common test utilities for the qa-translator test suite
 */

use anyhow::Result;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use qa_translator::app_config::{Config, TranslationProvider};
use qa_translator::dataset::{QA_ID_COLUMN, RawTable, parse_qa_id};

/// Marker placed in texts the primary-language mock should reject
pub const PRIMARY_FAIL_MARKER: &str = "FAIL_PRIMARY";

/// Marker placed in texts the secondary-language mock should reject
pub const SECONDARY_FAIL_MARKER: &str = "FAIL_SECONDARY";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds dataset CSV content for the given ids
///
/// `decorate` may append a failure marker to the question or answer of a row.
pub fn dataset_csv(
    ids: RangeInclusive<i64>,
    decorate: impl Fn(i64, &mut String, &mut String),
) -> String {
    let mut content = String::from("qa_id,question,answer,source\n");
    for id in ids {
        let mut question = format!("Question {}?", id);
        let mut answer = format!("Answer {}", id);
        decorate(id, &mut question, &mut answer);
        content.push_str(&format!("{},\"{}\",\"{}\",src{}\n", id, question, answer, id % 3));
    }
    content
}

/// Creates a dataset file with plain rows
pub fn create_test_dataset(dir: &Path, filename: &str, ids: RangeInclusive<i64>) -> Result<PathBuf> {
    create_test_file(dir, filename, &dataset_csv(ids, |_, _, _| {}))
}

/// Ids of an artifact in file order
pub fn read_ids(path: &Path) -> Vec<i64> {
    let table = RawTable::read(path).expect("artifact should be readable");
    let column = table.column(QA_ID_COLUMN).expect("artifact should have qa_id");
    table
        .rows
        .iter()
        .filter_map(|row| parse_qa_id(&row[column]))
        .collect()
}

/// Configuration pointing at `input` inside `dir`, with all pauses disabled
pub fn test_config(dir: &Path, input: &Path, batch_size: usize, save_interval: usize) -> Config {
    let mut config = Config::default();
    config.files.input = input.to_path_buf();
    config.files.primary_output = Some(dir.join("out_ru.csv"));
    config.files.secondary_output = Some(dir.join("out_kk.csv"));
    config.files.errors_output = Some(dir.join("errors.csv"));
    config.pipeline.batch_size = batch_size;
    config.pipeline.save_interval = save_interval;
    config.pipeline.pause_min_secs = 0;
    config.pipeline.pause_max_secs = 0;
    config.pipeline.fallback_pause_ms = 0;
    config.provider.provider_type = TranslationProvider::Mock;
    config
}
