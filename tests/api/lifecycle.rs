use crate::common::{spawn_checker, spawn_checker_with};
use book_api_contract::configuration::ContractSettings;
use book_api_contract::report::ScenarioFailure;
use claims::{assert_err, assert_ok};
use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn lifecycle_walk_passes_against_a_conforming_service() {
    // Arrange
    let checker = spawn_checker().await;

    // Act
    let outcome = checker.runner.check_lifecycle().await;

    // Assert
    assert_ok!(outcome);
}

#[tokio::test]
async fn lifecycle_walk_stops_at_a_delete_that_does_not_answer_204() {
    // Arrange
    let service = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/authors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
        .mount(&service)
        .await;
    Mock::given(method("POST"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 2 })))
        .mount(&service)
        .await;
    Mock::given(method("GET"))
        .and(path("/books/2"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&service)
        .await;
    Mock::given(method("PATCH"))
        .and(path_regex(r"^/books/\d+$"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&service)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&service)
        .await;
    // Never reached
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(422))
        .expect(0)
        .mount(&service)
        .await;
    let checker = spawn_checker_with(service, ContractSettings::default()).await;

    // Act
    let outcome = checker.runner.check_lifecycle().await;

    // Assert
    let failure = assert_err!(outcome);
    assert_eq!(failure.step, "delete book");
    assert!(matches!(
        failure.failure,
        ScenarioFailure::StatusMismatch {
            expected: 204,
            actual: 200
        }
    ));
}

#[tokio::test]
async fn lifecycle_walk_requires_an_integer_id_from_author_creation() {
    // Arrange
    let service = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/authors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "one" })))
        .mount(&service)
        .await;
    let checker = spawn_checker_with(service, ContractSettings::default()).await;

    // Act
    let outcome = checker.runner.check_lifecycle().await;

    // Assert
    let failure = assert_err!(outcome);
    assert_eq!(failure.step, "create author");
    assert!(matches!(failure.failure, ScenarioFailure::Client(_)));
}
