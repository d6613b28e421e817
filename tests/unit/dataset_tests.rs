/*!
 * Tests for dataset loading against files on disk
 */

use anyhow::Result;
use std::fs;
use qa_translator::dataset::{QaDataset, write_records};
use crate::common;

/// Test that a generated dataset loads with passthrough columns intact
#[test]
fn test_read_withGeneratedDataset_shouldKeepPassthroughColumns() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_dataset(temp_dir.path(), "input.csv", 1..=5)?;

    let dataset = QaDataset::read(&input)?;

    assert_eq!(dataset.records.len(), 5);
    assert_eq!(dataset.schema.headers(), &["qa_id", "question", "answer", "source"]);
    assert_eq!(dataset.records[4].values()[3], "src2");
    Ok(())
}

/// Test that invalid UTF-8 rows are skipped, not fatal
#[test]
fn test_read_withInvalidUtf8Row_shouldSkipRow() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("input.csv");
    let mut bytes = b"qa_id,question,answer\n1,q1,a1\n2,".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe]);
    bytes.extend_from_slice(b",a2\n3,q3,a3\n");
    fs::write(&path, bytes)?;

    let dataset = QaDataset::read(&path)?;

    let ids: Vec<i64> = dataset.records.iter().map(|r| r.qa_id()).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(dataset.skipped, 1);
    Ok(())
}

/// Test that writing then reading preserves every cell
#[test]
fn test_write_then_read_shouldPreserveRows() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_dataset(temp_dir.path(), "input.csv", 1..=3)?;
    let dataset = QaDataset::read(&input)?;

    let output = temp_dir.path().join("copy.csv");
    write_records(fs::File::create(&output)?, &dataset.schema, &dataset.records)?;
    let copy = QaDataset::read(&output)?;

    assert_eq!(copy.records, dataset.records);
    Ok(())
}

/// Test that a missing input file is reported as an error
#[test]
fn test_read_withMissingFile_shouldFail() {
    assert!(QaDataset::read("definitely_missing_input.csv").is_err());
}
