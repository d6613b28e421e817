/*!
 * Tests for error types and conversions
 */

use qa_translator::errors::{DatasetError, ProviderError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_providerError_invalidInput_shouldDisplayCorrectly() {
    let error = ProviderError::InvalidInput("Text is empty".to_string());
    assert_eq!(error.to_string(), "Invalid input: Text is empty");
}

#[test]
fn test_datasetError_missingColumn_shouldNameColumn() {
    let error = DatasetError::MissingColumn("qa_id");
    assert_eq!(error.to_string(), "Missing required column 'qa_id'");
}

#[test]
fn test_datasetError_fromIoError_shouldWrap() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
    let error: DatasetError = io_error.into();
    assert!(matches!(error, DatasetError::Io(_)));
    assert!(error.to_string().contains("missing.csv"));
}
