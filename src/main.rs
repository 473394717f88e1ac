use anyhow::Context;
use book_api_contract::configuration::get_configuration;
use book_api_contract::runner::ContractRunner;
use book_api_contract::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("book_api_contract".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration.")?;
    tracing::info!(
        base_url = %configuration.service.base_url,
        "Checking the book service contract"
    );
    let runner = ContractRunner::build(&configuration)?;
    let report = runner.run().await;
    report.log();

    if report.is_success() {
        Ok(())
    } else {
        anyhow::bail!("The book service does not honour its contract: {}", report)
    }
}
