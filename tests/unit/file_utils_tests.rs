/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use std::io::Write;
use std::path::Path;
use qa_translator::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "exists.csv", "qa_id\n")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    Ok(())
}

/// Test non-empty detection
#[test]
fn test_is_non_empty_file_withEmptyAndMissingFiles_shouldReturnFalse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let empty = common::create_test_file(temp_dir.path(), "empty.csv", "")?;
    let full = common::create_test_file(temp_dir.path(), "full.csv", "x")?;

    assert!(!FileManager::is_non_empty_file(&empty));
    assert!(!FileManager::is_non_empty_file(temp_dir.path().join("missing.csv")));
    assert!(FileManager::is_non_empty_file(&full));
    Ok(())
}

/// Test that generate_output_path creates the correct path
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let output_path = FileManager::generate_output_path(Path::new("/tmp/data/cpart2.csv"), "kk");
    assert_eq!(output_path, Path::new("/tmp/data/cpart2_kk.csv"));
}

/// Test atomic writes replace content and create parent directories
#[test]
fn test_write_atomically_withNestedPath_shouldReplaceContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("a").join("b").join("out.csv");

    FileManager::write_atomically(&target, |w| {
        w.write_all(b"first")?;
        Ok(())
    })?;
    FileManager::write_atomically(&target, |w| {
        w.write_all(b"second")?;
        Ok(())
    })?;

    assert_eq!(fs::read_to_string(&target)?, "second");
    let leftovers = fs::read_dir(target.parent().unwrap())?.count();
    assert_eq!(leftovers, 1);
    Ok(())
}

/// Test that a failed write leaves the previous content untouched
#[test]
fn test_write_atomically_withFailingWriter_shouldKeepOldContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = common::create_test_file(temp_dir.path(), "out.csv", "old")?;

    let result = FileManager::write_atomically(&target, |w| {
        w.write_all(b"partial")?;
        Err(anyhow::anyhow!("encoder failed"))
    });

    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&target)?, "old");
    Ok(())
}
