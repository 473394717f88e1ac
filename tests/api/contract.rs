use crate::common::{actual_status, assert_contract_honoured, spawn_checker};
use book_api_contract::contract::default_scenarios;

#[tokio::test]
async fn a_conforming_service_honours_the_whole_contract() {
    // Arrange
    let checker = spawn_checker().await;

    // Act
    let report = checker.runner.run().await;

    // Assert
    assert_eq!(report.outcomes.len(), 29);
    assert_contract_honoured(&report);
    assert!(matches!(report.lifecycle, Some(Ok(()))));
    assert!(report.finished_at.is_some());
}

#[tokio::test]
async fn every_scenario_observes_its_expected_status() {
    // Arrange
    let checker = spawn_checker().await;
    let scenarios = default_scenarios();

    // Act
    let report = checker.runner.run_scenarios(&scenarios).await;

    // Assert
    for (scenario, outcome) in scenarios.iter().zip(&report.outcomes) {
        assert_eq!(
            Some(scenario.expected.code()),
            actual_status(&outcome.result),
            "The service did not answer {} for {}.",
            scenario.expected,
            scenario.label
        );
    }
    assert!(report.lifecycle.is_none());
}

#[tokio::test]
async fn scenarios_are_independent_of_each_other() {
    // Arrange
    let checker = spawn_checker().await;
    let mut scenarios = default_scenarios();
    scenarios.reverse();

    // Act
    let report = checker.runner.run_scenarios(&scenarios).await;

    // Assert
    assert_contract_honoured(&report);
}
