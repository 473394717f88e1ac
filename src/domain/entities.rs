use super::entity_id::{AuthorId, BookId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub name: String,
    pub author_id: AuthorId,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAuthor<'a> {
    pub name: &'a str,
}

/// Body of `POST /books` and `PATCH /books/{id}`.
///
/// `author_id` stays a raw JSON value so malformed ids can be sent on purpose.
#[derive(Debug, Clone, Serialize)]
pub struct NewBook<'a> {
    pub name: &'a str,
    pub author_id: serde_json::Value,
}

/// Minimal view of a creation response: an integer `id`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CreatedEntity {
    pub id: i64,
}
