use procpod::{CommandSpec, ProcessGroup};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to stderr; RUST_LOG overrides the default level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Create the group; this also takes over Ctrl-C handling.
    let mut group = ProcessGroup::new()?;

    // Launch a few children of different lifetimes.
    for seconds in ["1", "2", "3"] {
        let spec = CommandSpec::builder()
            .program("sleep")
            .args([seconds])
            .build()?;
        group.run(&spec).await?;
    }

    println!(
        "waiting for {} children; Ctrl-C abandons the wait and leaves them tracked",
        group.len()
    );
    group.wait().await;

    if group.is_empty() {
        println!("all children exited");
    } else {
        println!("interrupted; {} children still tracked, shutting them down", group.len());
        group.shutdown().await;
    }

    Ok(())
}
