// Starts an in-process book service that honours the validation contract,
// so the checker can be tried without the real service.
// Build with: cargo run --bin spawn_fake_service --features fake-service

#[cfg(feature = "fake-service")]
#[allow(dead_code)]
mod fake_service {
    // The path is relative to this file
    include!("../../tests/common/fake_service.rs");
}

#[cfg(feature = "fake-service")]
use std::io::{self, Write};

#[cfg(feature = "fake-service")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use book_api_contract::telemetry::{get_subscriber, init_subscriber};

    let subscriber = get_subscriber("spawn_fake_service".into(), "info".into(), std::io::stderr);
    init_subscriber(subscriber);

    // Same default as the checker's `service.base_url`
    let address =
        std::env::var("FAKE_SERVICE_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
    let listener = std::net::TcpListener::bind(&address)?;
    let server = wiremock::MockServer::builder().listener(listener).start().await;
    fake_service::mount_fake_service(&server).await;
    tracing::info!(address = %server.uri(), "Fake book service is listening");

    // Output the address as JSON to stdout
    let output = serde_json::json!({ "address": server.uri() });
    println!("{}", serde_json::to_string(&output)?);
    io::stdout().flush()?;

    // Keep the service running until we receive a signal
    tokio::signal::ctrl_c().await?;

    Ok(())
}

#[cfg(not(feature = "fake-service"))]
fn main() {
    eprintln!("This binary requires the 'fake-service' feature to be enabled.");
    eprintln!("Build with: cargo run --bin spawn_fake_service --features fake-service");
    std::process::exit(1);
}
