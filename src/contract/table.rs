use super::scenario::{ExpectedStatus, FilterInput, IdInput, Operation, Scenario};
use crate::configuration::ContractSettings;

/// A well-formed book id that no freshly seeded service hands out.
pub const NONEXISTENT_BOOK_ID: i64 = 2_147_483_647;

const VALID_NAME: &str = "ValidBook";
const UPDATED_NAME: &str = "UpdatedBook";
const LONG_NAME_LENGTH: usize = 255;

fn malformed_ids() -> [IdInput; 3] {
    [IdInput::integer(-1), IdInput::integer(0), IdInput::text("abc")]
}

/// Every name the create and update probes send, with the expected outcome.
fn names(valid_name: &str) -> Vec<(String, ExpectedStatus)> {
    vec![
        (valid_name.to_string(), ExpectedStatus::Ok),
        (String::new(), ExpectedStatus::UnprocessableEntity),
        ("x".repeat(LONG_NAME_LENGTH), ExpectedStatus::Ok),
        ("x".to_string(), ExpectedStatus::Ok),
    ]
}

fn list_books() -> Vec<Scenario> {
    let author_ids = [
        (FilterInput::Absent, ExpectedStatus::Ok),
        (FilterInput::Provisioned, ExpectedStatus::Ok),
        (FilterInput::Literal(String::new()), ExpectedStatus::Ok),
        (FilterInput::Literal("abc".into()), ExpectedStatus::UnprocessableEntity),
    ];
    author_ids
        .into_iter()
        .map(|(author_id, expected)| Scenario::new(Operation::ListBooks { author_id }, expected))
        .collect()
}

fn create_book() -> Vec<Scenario> {
    let by_name = names(VALID_NAME).into_iter().map(|(name, expected)| {
        Scenario::new(
            Operation::CreateBook {
                name,
                author_id: IdInput::Provisioned,
            },
            expected,
        )
    });
    let by_author = malformed_ids().into_iter().map(|author_id| {
        Scenario::new(
            Operation::CreateBook {
                name: VALID_NAME.into(),
                author_id,
            },
            ExpectedStatus::UnprocessableEntity,
        )
    });
    by_name.chain(by_author).collect()
}

fn get_book() -> Vec<Scenario> {
    let mut scenarios = vec![Scenario::new(
        Operation::GetBook {
            book_id: IdInput::Provisioned,
        },
        ExpectedStatus::Ok,
    )];
    scenarios.extend(malformed_ids().into_iter().map(|book_id| {
        Scenario::new(Operation::GetBook { book_id }, ExpectedStatus::UnprocessableEntity)
    }));
    scenarios
}

fn update_book() -> Vec<Scenario> {
    let by_name = names(UPDATED_NAME).into_iter().map(|(name, expected)| {
        Scenario::new(
            Operation::UpdateBook {
                book_id: IdInput::Provisioned,
                name,
                author_id: IdInput::Provisioned,
            },
            expected,
        )
    });
    let by_author = malformed_ids().into_iter().map(|author_id| {
        Scenario::new(
            Operation::UpdateBook {
                book_id: IdInput::Provisioned,
                name: VALID_NAME.into(),
                author_id,
            },
            ExpectedStatus::UnprocessableEntity,
        )
    });
    let by_book = malformed_ids().into_iter().map(|book_id| {
        Scenario::new(
            Operation::UpdateBook {
                book_id,
                name: VALID_NAME.into(),
                author_id: IdInput::Provisioned,
            },
            ExpectedStatus::UnprocessableEntity,
        )
    });
    by_name.chain(by_author).chain(by_book).collect()
}

fn delete_book() -> Vec<Scenario> {
    let mut scenarios = vec![Scenario::new(
        Operation::DeleteBook {
            book_id: IdInput::Provisioned,
        },
        ExpectedStatus::NoContent,
    )];
    scenarios.extend(malformed_ids().into_iter().map(|book_id| {
        Scenario::new(Operation::DeleteBook { book_id }, ExpectedStatus::UnprocessableEntity)
    }));
    scenarios
}

/// The validation contract, in execution order.
pub fn default_scenarios() -> Vec<Scenario> {
    [list_books(), create_book(), get_book(), update_book(), delete_book()]
        .into_iter()
        .flatten()
        .collect()
}

/// Well-formed ids that do not exist must be told apart from malformed ones.
pub fn not_found_probes() -> Vec<Scenario> {
    let book_id = IdInput::integer(NONEXISTENT_BOOK_ID);
    vec![
        Scenario::new(
            Operation::GetBook {
                book_id: book_id.clone(),
            },
            ExpectedStatus::NotFound,
        ),
        Scenario::new(
            Operation::UpdateBook {
                book_id: book_id.clone(),
                name: VALID_NAME.into(),
                author_id: IdInput::Provisioned,
            },
            ExpectedStatus::NotFound,
        ),
        Scenario::new(Operation::DeleteBook { book_id }, ExpectedStatus::NotFound),
    ]
}

pub fn scenarios(settings: &ContractSettings) -> Vec<Scenario> {
    let mut scenarios = default_scenarios();
    if settings.probe_not_found {
        scenarios.extend(not_found_probes());
    }
    scenarios
}
