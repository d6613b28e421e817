/*!
 * Resume behavior across interrupted runs
 */

use anyhow::Result;
use std::sync::Arc;
use qa_translator::app_controller::Controller;
use qa_translator::providers::mock::MockTranslator;
use crate::common;

fn controller_for(dir: &std::path::Path, input: &std::path::Path) -> Result<Controller> {
    let config = common::test_config(dir, input, 10, 10);
    Ok(Controller::with_config(config)?.without_progress())
}

/// A second run continues after the first run's last id without duplicates
#[tokio::test]
async fn test_rerun_afterPartialRun_shouldNotReprocessRows() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_dataset(temp_dir.path(), "input.csv", 1..=25)?;
    let first = controller_for(temp_dir.path(), &input)?.run().await?;
    assert_eq!(first.processed_rows, 25);

    // The dataset grows; the rerun must only touch the new rows
    common::create_test_dataset(temp_dir.path(), "input.csv", 1..=60)?;
    let primary = MockTranslator::working().with_languages("en", "ru");
    let secondary = MockTranslator::working().with_languages("en", "kk");
    let second = controller_for(temp_dir.path(), &input)?
        .run_with_translators(Arc::new(primary), Arc::new(secondary))
        .await?;

    assert_eq!(second.resumed_after, Some(25));
    assert_eq!(second.processed_rows, 35);
    assert_eq!(common::read_ids(&temp_dir.path().join("out_ru.csv")), (1..=60).collect::<Vec<i64>>());
    assert_eq!(common::read_ids(&temp_dir.path().join("out_kk.csv")), (1..=60).collect::<Vec<i64>>());
    Ok(())
}

/// A rerun over a fully translated dataset only rewrites the same files
#[tokio::test]
async fn test_rerun_afterCompleteRun_shouldProcessNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_dataset(temp_dir.path(), "input.csv", 1..=12)?;
    controller_for(temp_dir.path(), &input)?.run().await?;
    let before = std::fs::read(temp_dir.path().join("out_ru.csv"))?;

    let summary = controller_for(temp_dir.path(), &input)?.run().await?;

    assert_eq!(summary.processed_rows, 0);
    assert_eq!(summary.batches, 0);
    assert_eq!(summary.flushes, 1);
    assert_eq!(std::fs::read(temp_dir.path().join("out_ru.csv"))?, before);
    Ok(())
}

/// The language that got further decides the resume point
#[tokio::test]
async fn test_rerun_withLanguagesAtDifferentIds_shouldResumeAfterLarger() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_dataset(temp_dir.path(), "input.csv", 1..=30)?;
    common::create_test_dataset(temp_dir.path(), "out_ru.csv", 1..=20)?;
    common::create_test_dataset(temp_dir.path(), "out_kk.csv", 1..=12)?;

    let summary = controller_for(temp_dir.path(), &input)?.run().await?;

    assert_eq!(summary.resumed_after, Some(20));
    assert_eq!(summary.processed_rows, 10);
    let kk_ids = common::read_ids(&temp_dir.path().join("out_kk.csv"));
    let expected: Vec<i64> = (1..=12).chain(21..=30).collect();
    assert_eq!(kk_ids, expected);
    Ok(())
}

/// Earlier failures stay in the error output across runs
#[tokio::test]
async fn test_rerun_shouldKeepPreviousErrors() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = common::dataset_csv(1..=10, |id, question, _| {
        if id == 4 {
            question.push_str(" FAIL_PRIMARY");
        }
    });
    let input = common::create_test_file(temp_dir.path(), "input.csv", &content)?;
    let primary = MockTranslator::working()
        .with_languages("en", "ru")
        .with_fail_marker(common::PRIMARY_FAIL_MARKER);
    controller_for(temp_dir.path(), &input)?
        .run_with_translators(
            Arc::new(primary),
            Arc::new(MockTranslator::working().with_languages("en", "kk")),
        )
        .await?;

    common::create_test_dataset(temp_dir.path(), "input.csv", 1..=15)?;
    let summary = controller_for(temp_dir.path(), &input)?.run().await?;

    assert_eq!(summary.resumed_after, Some(10));
    assert_eq!(common::read_ids(&temp_dir.path().join("errors.csv")), vec![4]);
    assert_eq!(summary.report.primary, 14);
    Ok(())
}

/// Garbage at the end of an artifact does not stop the resume
#[tokio::test]
async fn test_rerun_withCorruptArtifactTail_shouldSkipBadRows() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_dataset(temp_dir.path(), "input.csv", 1..=10)?;
    let mut ru = common::dataset_csv(1..=5, |_, _, _| {});
    ru.push_str("6,too,many,fields,here,x\n");
    ru.push_str("not-an-id,q,a,s\n");
    common::create_test_file(temp_dir.path(), "out_ru.csv", &ru)?;

    let summary = controller_for(temp_dir.path(), &input)?.run().await?;

    assert_eq!(summary.resumed_after, Some(5));
    assert_eq!(common::read_ids(&temp_dir.path().join("out_ru.csv")), (1..=10).collect::<Vec<i64>>());
    Ok(())
}
