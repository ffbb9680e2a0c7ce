use std::time::Duration;

use procpod::{CommandSpec, ProcessGroup};

/// Load command specs from the JSON file given as the first argument, or
/// fall back to a few long-running sleeps.
fn load_specs() -> anyhow::Result<Vec<CommandSpec>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => ["600", "600", "600"]
            .iter()
            .map(|seconds| {
                CommandSpec::builder()
                    .program("sleep")
                    .args([seconds])
                    .build()
                    .map_err(Into::into)
            })
            .collect(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let specs = load_specs()?;

    // Whatever happens inside the scope, the children are interrupted and
    // reaped before the call returns. A Ctrl-C during that teardown only
    // makes the group re-send the interrupt; it never orphans a child.
    ProcessGroup::new()?
        .scope(async |group| {
            for spec in &specs {
                group.run(spec).await?;
            }
            println!("launched {} children; leaving the scope in 2s", group.len());
            tokio::time::sleep(Duration::from_secs(2)).await;
            Ok::<_, anyhow::Error>(())
        })
        .await?;

    println!("scope ended, every child has been reaped");
    Ok(())
}
