use super::scenario::{ExpectedStatus, FilterInput, IdInput, Operation, RawId};
use crate::domain::{AuthorFilter, BookName, EntityId};

/// The status a conforming service answers `operation` with.
///
/// Every field is validated before any lookup, so one malformed field is
/// enough for a 422. Provisioned ids always exist; a well-formed literal book
/// id is assumed not to. Whether a body's author exists is not part of the
/// contract.
pub fn derive_expected(operation: &Operation) -> ExpectedStatus {
    match operation {
        Operation::ListBooks { author_id } => {
            let raw = match author_id {
                FilterInput::Absent | FilterInput::Provisioned => None,
                FilterInput::Literal(s) => Some(s.as_str()),
            };
            match AuthorFilter::parse(raw) {
                Ok(_) => ExpectedStatus::Ok,
                Err(_) => ExpectedStatus::UnprocessableEntity,
            }
        }
        Operation::CreateBook { name, author_id } => {
            if name_is_valid(name) && body_id_is_valid(author_id) {
                ExpectedStatus::Ok
            } else {
                ExpectedStatus::UnprocessableEntity
            }
        }
        Operation::GetBook { book_id } => lookup(book_id, ExpectedStatus::Ok),
        Operation::DeleteBook { book_id } => lookup(book_id, ExpectedStatus::NoContent),
        Operation::UpdateBook {
            book_id,
            name,
            author_id,
        } => {
            if name_is_valid(name) && body_id_is_valid(author_id) {
                lookup(book_id, ExpectedStatus::Ok)
            } else {
                ExpectedStatus::UnprocessableEntity
            }
        }
    }
}

fn lookup(book_id: &IdInput, found: ExpectedStatus) -> ExpectedStatus {
    match book_id {
        IdInput::Provisioned => found,
        IdInput::Literal(raw) if path_id_is_valid(raw) => ExpectedStatus::NotFound,
        IdInput::Literal(_) => ExpectedStatus::UnprocessableEntity,
    }
}

fn name_is_valid(name: &str) -> bool {
    BookName::parse(name.to_string()).is_ok()
}

fn path_id_is_valid(raw: &RawId) -> bool {
    EntityId::parse(&raw.as_path_segment()).is_ok()
}

fn body_id_is_valid(input: &IdInput) -> bool {
    match input {
        IdInput::Provisioned => true,
        IdInput::Literal(raw) => EntityId::from_json(&raw.to_json()).is_ok(),
    }
}
