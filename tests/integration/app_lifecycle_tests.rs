/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use qa_translator::app_config::Config;
use qa_translator::app_controller::Controller;
use crate::common;

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    assert_eq!(controller.config().primary_language, "ru");
    Ok(())
}

/// Test that an invalid configuration is rejected up front
#[test]
fn test_controller_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.secondary_language = "ru".to_string();
    assert!(Controller::with_config(config).is_err());
}

/// Test a missing input file
#[test]
fn test_run_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = temp_dir.path().join("nope.csv");
    let config = common::test_config(temp_dir.path(), &input, 5, 5);
    let controller = Controller::with_config(config)?.without_progress();

    let result = tokio_test::block_on(controller.run());

    assert!(result.is_err());
    assert!(!temp_dir.path().join("out_ru.csv").exists());
    Ok(())
}

/// Test an input without the required columns
#[test]
fn test_run_withInputMissingColumns_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "input.csv", "id,question,answer\n1,q,a\n")?;
    let config = common::test_config(temp_dir.path(), &input, 5, 5);
    let controller = Controller::with_config(config)?.without_progress();

    let result = tokio_test::block_on(controller.run());

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("qa_id"));
    Ok(())
}

/// Test a full run through the configured mock provider
#[tokio::test]
async fn test_run_withMockProvider_shouldWriteAllArtifacts() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_dataset(temp_dir.path(), "input.csv", 1..=7)?;
    let config = common::test_config(temp_dir.path(), &input, 3, 3);
    let controller = Controller::with_config(config)?.without_progress();

    let summary = controller.run().await?;

    assert_eq!(summary.batches, 3);
    assert_eq!(summary.report.primary, 7);
    assert!(temp_dir.path().join("out_ru.csv").exists());
    assert!(temp_dir.path().join("out_kk.csv").exists());
    assert!(temp_dir.path().join("errors.csv").exists());
    Ok(())
}
