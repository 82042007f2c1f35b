//! tests/api/workflow.rs
use crate::helpers::{setup, test_data_dir};
use claims::{assert_err, assert_ok};
use wordcount::workflow::Workflow;

#[tokio::test]
async fn should_count_words_across_files_into_one_sorted_artifact() {
    // Arrange
    let run = setup();
    run.write_input("input_0.txt", "apple banana apple\n");
    run.write_input("input_1.txt", "zebra apple\nbanana cherry\n");

    // Act
    let report = Workflow::new(run.settings.clone()).run().await;

    // Assert
    assert_ok!(&report.outcome);
    assert_eq!(
        run.output(),
        "\"apple\", 3\n\"banana\", 2\n\"cherry\", 1\n\"zebra\", 1\n"
    );
    run.teardown();
}

#[tokio::test]
async fn should_keep_the_artifact_sorted_across_the_shard_boundary() {
    let run = setup();
    let corpus = test_data_dir().join("small_test.txt");
    let contents = std::fs::read_to_string(corpus).expect("Failed to read test corpus");
    run.write_input("small_test.txt", &contents);

    let report = Workflow::new(run.settings.clone()).run().await;

    assert_ok!(&report.outcome);
    assert_eq!(
        run.output(),
        "\"barks\", 1\n\"brown\", 1\n\"dog\", 2\n\"fox\", 2\n\"jumps\", 1\n\
         \"lazy\", 1\n\"over\", 1\n\"quick\", 1\n\"runs\", 1\n\"the\", 4\n"
    );
    run.teardown();
}

#[tokio::test]
async fn should_produce_an_empty_artifact_for_an_empty_input_directory() {
    let run = setup();

    let report = Workflow::new(run.settings.clone()).run().await;

    assert_ok!(&report.outcome);
    assert_eq!(run.output(), "");
    run.teardown();
}

#[tokio::test]
async fn should_report_failure_and_duration_when_the_input_directory_is_missing() {
    let run = setup();
    std::fs::remove_dir_all(&run.settings.paths.input_dir)
        .expect("Failed to delete input directory");

    let report = Workflow::new(run.settings.clone()).run().await;

    assert!(!report.succeeded());
    assert_err!(&report.outcome);
    // The failed run still measures how long it took.
    assert!(report.elapsed > std::time::Duration::ZERO);
    run.teardown();
}

#[tokio::test]
async fn should_fail_during_setup_for_an_unknown_mapper() {
    let run = setup();
    let mut settings = run.settings.clone();
    settings.pipeline.mapper = "no_such_mapper".to_string();

    let report = Workflow::new(settings).run().await;

    assert!(!report.succeeded());
    run.teardown();
}
