use book_api_contract::report::{ContractReport, ScenarioResult};
use book_api_contract::telemetry::{get_subscriber, init_subscriber};
use std::sync::{LazyLock, Mutex};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};

// This holds the guard for the entire lifetime of the test process
static LOG_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

// Ensure that the `tracing` stack is only initialised once using `LazyLock`
pub static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    let loglevel = std::env::var("LOGLEVEL").unwrap_or(default_filter_level);

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, loglevel, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, loglevel, test_writer());
        init_subscriber(subscriber);
    }
});

pub fn test_writer() -> NonBlocking {
    let test_name = std::env::args()
        .skip_while(|arg| arg != "--exact")
        .nth(1)
        .map(|arg| arg.replace("::", "-"))
        .unwrap_or("unlabeled_test".into())
        .replace(' ', "_");

    let _ = std::fs::create_dir_all("tests/logs/nextest");
    let _ = std::fs::create_dir_all("tests/logs/cargo_test");

    let filename = if test_name != "unlabeled_test" {
        format!("tests/logs/nextest/{}.log", test_name)
    } else {
        "tests/logs/cargo_test/cargo_test.log".to_string()
    };

    let file_appender = tracing_appender::rolling::never(".", filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Store the guard to prevent it from being dropped
    *LOG_GUARD.lock().unwrap() = Some(guard);

    non_blocking
}

/// Fails the test with every failing scenario listed.
pub fn assert_contract_honoured(report: &ContractReport) {
    let failures: Vec<String> = report
        .failures()
        .map(|outcome| format!("{}: {:?}", outcome.label, outcome.result))
        .collect();
    assert!(
        failures.is_empty(),
        "The service broke its contract in {} scenario(s):\n{}",
        failures.len(),
        failures.join("\n")
    );
    assert!(report.is_success(), "Run was not successful: {}", report);
}

pub fn actual_status(result: &ScenarioResult) -> Option<u16> {
    match result {
        ScenarioResult::Passed { actual } => Some(*actual),
        _ => None,
    }
}
