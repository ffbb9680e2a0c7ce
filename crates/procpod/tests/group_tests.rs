#![cfg(unix)]

use std::time::Duration;

use procpod::{CommandSpec, GroupError, ProcessGroup};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}

fn sleep_spec(seconds: &str) -> CommandSpec {
    CommandSpec::builder()
        .program("sleep")
        .args([seconds])
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_wait_reaps_quick_children() {
    init_tracing();
    let mut group = ProcessGroup::new().unwrap();

    for _ in 0..3 {
        group.run(&sleep_spec("0")).await.unwrap();
    }
    assert_eq!(group.len(), 3);

    tokio::time::timeout(Duration::from_secs(10), group.wait())
        .await
        .expect("wait should finish once the children exit");
    assert!(group.is_empty());
}

#[tokio::test]
async fn test_shutdown_interrupts_long_running_children() {
    init_tracing();
    let mut group = ProcessGroup::new().unwrap();

    for _ in 0..3 {
        group.run(&sleep_spec("30")).await.unwrap();
    }
    assert_eq!(group.len(), 3);

    tokio::time::timeout(Duration::from_secs(10), group.shutdown())
        .await
        .expect("shutdown should interrupt the sleeps instead of waiting them out");
    assert!(group.is_empty());
}

#[tokio::test]
async fn test_shutdown_on_empty_group_returns_immediately() {
    init_tracing();
    let mut group = ProcessGroup::new().unwrap();

    tokio::time::timeout(Duration::from_secs(1), group.shutdown())
        .await
        .expect("empty shutdown should be a no-op");
    assert!(group.is_empty());
}

#[tokio::test]
async fn test_launch_error_surfaces_and_leaves_group_empty() {
    init_tracing();
    let mut group = ProcessGroup::new().unwrap();

    let error = group
        .run(
            &CommandSpec::builder()
                .program("procpod-test-no-such-binary")
                .build()
                .unwrap(),
        )
        .await
        .unwrap_err();
    assert!(matches!(error, GroupError::Launch { .. }));
    assert!(group.is_empty());
}

#[tokio::test]
async fn test_scope_shuts_down_children_of_failed_body() {
    init_tracing();
    let started = std::time::Instant::now();

    let result: Result<(), anyhow::Error> = ProcessGroup::new()
        .unwrap()
        .scope(async |group| {
            group.run(&sleep_spec("30")).await?;
            anyhow::bail!("body failed")
        })
        .await;

    assert_eq!(result.unwrap_err().to_string(), "body failed");
    // The sleep was interrupted rather than waited out.
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_scope_returns_body_value() {
    init_tracing();

    let result: Result<u32, anyhow::Error> = ProcessGroup::new()
        .unwrap()
        .scope(async |group| {
            group.run(&sleep_spec("0")).await?;
            group.wait().await;
            assert!(group.is_empty());
            Ok(7)
        })
        .await;

    assert_eq!(result.unwrap(), 7);
}
