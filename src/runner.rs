use crate::client::{BookApiClient, ClientError, created_id};
use crate::configuration::{ContractSettings, Settings};
use crate::contract::{FilterInput, Fixtures, IdInput, Operation, Scenario, scenarios};
use crate::report::{
    ContractReport, LifecycleFailure, ScenarioFailure, ScenarioOutcome, ScenarioResult,
};
use crate::transport::{ApiResponse, ReqwestTransport, Transport, TransportError};
use serde_json::Value;
use tracing::{Span, field::display};

/// A scenario with every provisioned input replaced by a real id.
enum Call {
    List(Option<String>),
    Create {
        name: String,
        author_id: Value,
    },
    Get(String),
    Update {
        book_id: String,
        name: String,
        author_id: Value,
    },
    Delete(String),
}

/// Runs scenarios one after the other: provision, act, compare the status.
#[derive(Debug)]
pub struct ContractRunner<T> {
    client: BookApiClient<T>,
    settings: ContractSettings,
}

impl ContractRunner<ReqwestTransport> {
    pub fn build(configuration: &Settings) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(
            configuration.service.base_url.clone(),
            configuration.service.timeout(),
        )?;
        Ok(Self::new(
            BookApiClient::new(transport),
            configuration.contract.clone(),
        ))
    }
}

impl<T: Transport> ContractRunner<T> {
    pub fn new(client: BookApiClient<T>, settings: ContractSettings) -> Self {
        Self { client, settings }
    }

    pub fn client(&self) -> &BookApiClient<T> {
        &self.client
    }

    /// The configured table followed by the lifecycle walk.
    #[tracing::instrument(
        name = "Checking the book service contract",
        skip_all,
        fields(run_id = tracing::field::Empty)
    )]
    pub async fn run(&self) -> ContractReport {
        let scenarios = scenarios(&self.settings);
        let mut report = ContractReport::start();
        Span::current().record("run_id", display(report.run_id));

        self.run_into(&scenarios, &mut report).await;
        if !self.settings.fail_fast || report.is_success() {
            report.lifecycle = Some(self.check_lifecycle().await);
        }
        report.finish();
        report
    }

    pub async fn run_scenarios(&self, scenarios: &[Scenario]) -> ContractReport {
        let mut report = ContractReport::start();
        self.run_into(scenarios, &mut report).await;
        report.finish();
        report
    }

    async fn run_into(&self, scenarios: &[Scenario], report: &mut ContractReport) {
        let mut halted = false;
        for scenario in scenarios {
            let result = if halted {
                ScenarioResult::Skipped
            } else {
                self.run_scenario(scenario).await
            };
            if self.settings.fail_fast && matches!(result, ScenarioResult::Failed(_)) {
                halted = true;
            }
            report.record(ScenarioOutcome::new(scenario, result));
        }
    }

    #[tracing::instrument(
        name = "Running scenario",
        skip_all,
        fields(scenario = %scenario.label, expected = scenario.expected.code())
    )]
    pub async fn run_scenario(&self, scenario: &Scenario) -> ScenarioResult {
        let call = match self.provision(&scenario.operation).await {
            Ok(call) => call,
            Err(e) => return ScenarioResult::Failed(ScenarioFailure::Provisioning(e)),
        };
        let response = match self.send(call).await {
            Ok(response) => response,
            Err(e) => return ScenarioResult::Failed(ScenarioFailure::Client(e)),
        };

        let expected = scenario.expected.code();
        if response.status == expected {
            tracing::debug!(actual = response.status, "Scenario passed");
            ScenarioResult::Passed {
                actual: response.status,
            }
        } else {
            tracing::warn!(
                actual = response.status,
                body = %String::from_utf8_lossy(&response.body),
                "Unexpected status"
            );
            ScenarioResult::Failed(ScenarioFailure::StatusMismatch {
                expected,
                actual: response.status,
            })
        }
    }

    async fn provision(&self, operation: &Operation) -> Result<Call, ClientError> {
        let fixtures = operation.fixtures();
        let call = match operation {
            Operation::ListBooks { author_id } => Call::List(match author_id {
                FilterInput::Absent => None,
                FilterInput::Provisioned => Some(
                    self.client
                        .create_author(fixtures.author_name)
                        .await?
                        .to_string(),
                ),
                FilterInput::Literal(s) => Some(s.clone()),
            }),
            Operation::CreateBook { name, author_id } => Call::Create {
                name: name.clone(),
                author_id: self.body_author_id(author_id, fixtures).await?,
            },
            Operation::GetBook { book_id } => Call::Get(self.path_book_id(book_id, fixtures).await?),
            Operation::UpdateBook {
                book_id,
                name,
                author_id,
            } => {
                // Author first, then the book with its own author.
                let author_id = self.body_author_id(author_id, fixtures).await?;
                let book_id = self.path_book_id(book_id, fixtures).await?;
                Call::Update {
                    book_id,
                    name: name.clone(),
                    author_id,
                }
            }
            Operation::DeleteBook { book_id } => {
                Call::Delete(self.path_book_id(book_id, fixtures).await?)
            }
        };
        Ok(call)
    }

    async fn body_author_id(&self, input: &IdInput, fixtures: Fixtures) -> Result<Value, ClientError> {
        match input {
            IdInput::Provisioned => {
                let author_id = self.client.create_author(fixtures.author_name).await?;
                Ok(Value::from(author_id.get()))
            }
            IdInput::Literal(raw) => Ok(raw.to_json()),
        }
    }

    async fn path_book_id(&self, input: &IdInput, fixtures: Fixtures) -> Result<String, ClientError> {
        match input {
            IdInput::Provisioned => {
                let book_id = self
                    .client
                    .create_book_with_author(fixtures.book_name, fixtures.author_name)
                    .await?;
                Ok(book_id.to_string())
            }
            IdInput::Literal(raw) => Ok(raw.as_path_segment()),
        }
    }

    async fn send(&self, call: Call) -> Result<ApiResponse, ClientError> {
        match call {
            Call::List(author_id) => self.client.list_books(author_id.as_deref()).await,
            Call::Create { name, author_id } => self.client.post_book(&name, author_id).await,
            Call::Get(book_id) => self.client.get_book(&book_id).await,
            Call::Update {
                book_id,
                name,
                author_id,
            } => self.client.patch_book(&book_id, &name, author_id).await,
            Call::Delete(book_id) => self.client.delete_book(&book_id).await,
        }
    }

    /// Create, read, reject a bad update, delete; stops at the first deviation.
    #[tracing::instrument(name = "Walking a book through its lifecycle", skip(self))]
    pub async fn check_lifecycle(&self) -> Result<(), LifecycleFailure> {
        let step = "create author";
        let response = self.client.post_author("A").await.map_err(failed(step))?;
        let author_id = created_id("POST /authors", &response).map_err(failed(step))?;

        let step = "create book";
        let response = self
            .client
            .post_book("B", Value::from(author_id.get()))
            .await
            .map_err(failed(step))?;
        let book_id = created_id("POST /books", &response)
            .map_err(failed(step))?
            .to_string();

        let response = self.client.get_book(&book_id).await;
        expect_status("get book", response, 200)?;

        let response = self
            .client
            .patch_book(&book_id, "", Value::from(author_id.get()))
            .await;
        expect_status("reject empty name", response, 422)?;

        let response = self.client.delete_book(&book_id).await;
        expect_status("delete book", response, 204)?;

        let response = self.client.list_books(Some("abc")).await;
        expect_status("reject malformed author filter", response, 422)?;

        Ok(())
    }
}

fn failed(step: &'static str) -> impl Fn(ClientError) -> LifecycleFailure {
    move |e| {
        let failure = match e {
            ClientError::UnexpectedStatus {
                expected, actual, ..
            } => ScenarioFailure::StatusMismatch { expected, actual },
            e => ScenarioFailure::Client(e),
        };
        LifecycleFailure { step, failure }
    }
}

fn expect_status(
    step: &'static str,
    response: Result<ApiResponse, ClientError>,
    expected: u16,
) -> Result<(), LifecycleFailure> {
    let response = response.map_err(failed(step))?;
    if response.status == expected {
        Ok(())
    } else {
        Err(LifecycleFailure {
            step,
            failure: ScenarioFailure::StatusMismatch {
                expected,
                actual: response.status,
            },
        })
    }
}
