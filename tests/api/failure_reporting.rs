use crate::common::{runner_for, spawn_checker_with};
use book_api_contract::configuration::ContractSettings;
use book_api_contract::contract::{ExpectedStatus, default_scenarios};
use book_api_contract::report::{ScenarioFailure, ScenarioResult};
use serde_json::json;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Accepts everything: creations succeed, nothing is ever validated.
async fn spawn_lenient_service() -> MockServer {
    let service = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
        .mount(&service)
        .await;
    service
}

#[tokio::test]
async fn a_service_without_validation_fails_exactly_the_rejection_scenarios() {
    // Arrange
    let checker = spawn_checker_with(spawn_lenient_service().await, ContractSettings::default()).await;

    // Act
    let report = checker.runner.run().await;

    // Assert
    for outcome in &report.outcomes {
        let should_pass = outcome.expected == ExpectedStatus::Ok;
        assert_eq!(
            should_pass,
            outcome.passed(),
            "Unexpected result for {}: {:?}",
            outcome.label,
            outcome.result
        );
    }
    let expected_failures = default_scenarios()
        .iter()
        .filter(|s| s.expected != ExpectedStatus::Ok)
        .count();
    assert_eq!(report.failed(), expected_failures);
    assert!(report.lifecycle_failed());
    assert!(!report.is_success());
}

#[tokio::test]
async fn an_unreachable_service_fails_every_scenario() {
    // Arrange
    // Nothing listens on a port we just released
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let runner = runner_for(&format!("http://127.0.0.1:{}", port), ContractSettings::default());

    // Act
    let report = runner.run().await;

    // Assert
    assert_eq!(report.failed(), report.outcomes.len());
    for outcome in &report.outcomes {
        assert!(
            matches!(
                outcome.result,
                ScenarioResult::Failed(ScenarioFailure::Client(_))
                    | ScenarioResult::Failed(ScenarioFailure::Provisioning(_))
            ),
            "{} did not fail on the transport: {:?}",
            outcome.label,
            outcome.result
        );
    }
    assert!(report.lifecycle_failed());
}

#[tokio::test]
async fn fail_fast_stops_at_the_first_failure() {
    // Arrange
    let settings = ContractSettings {
        fail_fast: true,
        ..Default::default()
    };
    let checker = spawn_checker_with(spawn_lenient_service().await, settings).await;

    // Act
    let report = checker.runner.run().await;

    // Assert
    assert_eq!(report.failed(), 1);
    assert_eq!(report.outcomes.len(), 29);
    assert_eq!(report.passed() + report.failed() + report.skipped(), 29);
    assert!(report.skipped() > 0);
    assert!(report.lifecycle.is_none());
}

#[tokio::test]
async fn a_server_error_is_reported_as_a_status_mismatch() {
    // Arrange
    let service = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&service)
        .await;
    let checker = spawn_checker_with(service, ContractSettings::default()).await;
    let scenarios = default_scenarios();

    // Act
    let report = checker.runner.run_scenarios(&scenarios[..1]).await;

    // Assert
    assert!(matches!(
        report.outcomes[0].result,
        ScenarioResult::Failed(ScenarioFailure::StatusMismatch {
            expected: 200,
            actual: 500
        })
    ));
}
