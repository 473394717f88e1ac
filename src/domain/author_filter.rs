use super::entity_id::{AuthorId, EntityId, IdError};

/// The `author_id` query parameter of `GET /books`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorFilter {
    All,
    ByAuthor(AuthorId),
}

impl AuthorFilter {
    /// An absent or empty parameter means "no filter".
    pub fn parse(raw: Option<&str>) -> Result<AuthorFilter, IdError> {
        match raw {
            None | Some("") => Ok(AuthorFilter::All),
            Some(s) => EntityId::parse(s).map(AuthorFilter::ByAuthor),
        }
    }

    pub fn matches(&self, author_id: AuthorId) -> bool {
        match self {
            AuthorFilter::All => true,
            AuthorFilter::ByAuthor(id) => *id == author_id,
        }
    }
}
