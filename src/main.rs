//! src/main.rs
use anyhow::Context;
use wordcount::configuration::get_configuration;
use wordcount::telemetry::init_tracing;
use wordcount::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_tracing()?;
    let configuration = get_configuration().context("Failed to read configuration")?;
    let report = Workflow::new(configuration).run().await;
    report.outcome
}
