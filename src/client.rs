use crate::domain::{AuthorId, BookId, CreatedEntity, EntityId, NewAuthor, NewBook};
use crate::telemetry::error_chain_fmt;
use crate::transport::{ApiRequest, ApiResponse, Transport, TransportError};
use serde_json::Value;

#[derive(thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Failed to encode the request body")]
    Encode(#[from] serde_json::Error),
    #[error("{operation} answered {actual}, expected {expected}")]
    UnexpectedStatus {
        operation: &'static str,
        expected: u16,
        actual: u16,
    },
    #[error("{operation} did not return a positive integer `id`: {body}")]
    MalformedBody { operation: &'static str, body: String },
}

impl std::fmt::Debug for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Typed access to the book service endpoints.
///
/// Probing methods take raw ids (`&str` for paths, `Value` for bodies) and
/// hand back the raw response; the `create_*` helpers are for provisioning
/// and insist on a successful answer.
#[derive(Debug, Clone)]
pub struct BookApiClient<T> {
    transport: T,
}

impl<T: Transport> BookApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `None` sends no query string at all; `Some("")` sends `?author_id=`.
    pub async fn list_books(&self, author_id: Option<&str>) -> Result<ApiResponse, ClientError> {
        let mut request = ApiRequest::get("/books");
        if let Some(author_id) = author_id {
            request = request.with_query("author_id", author_id);
        }
        Ok(self.transport.send(request).await?)
    }

    pub async fn post_author(&self, name: &str) -> Result<ApiResponse, ClientError> {
        let request = ApiRequest::post("/authors", &NewAuthor { name })?;
        Ok(self.transport.send(request).await?)
    }

    pub async fn post_book(&self, name: &str, author_id: Value) -> Result<ApiResponse, ClientError> {
        let request = ApiRequest::post("/books", &NewBook { name, author_id })?;
        Ok(self.transport.send(request).await?)
    }

    pub async fn get_book(&self, book_id: &str) -> Result<ApiResponse, ClientError> {
        let request = ApiRequest::get(format!("/books/{}", book_id));
        Ok(self.transport.send(request).await?)
    }

    pub async fn patch_book(
        &self,
        book_id: &str,
        name: &str,
        author_id: Value,
    ) -> Result<ApiResponse, ClientError> {
        let request = ApiRequest::patch(format!("/books/{}", book_id), &NewBook { name, author_id })?;
        Ok(self.transport.send(request).await?)
    }

    pub async fn delete_book(&self, book_id: &str) -> Result<ApiResponse, ClientError> {
        let request = ApiRequest::delete(format!("/books/{}", book_id));
        Ok(self.transport.send(request).await?)
    }

    #[tracing::instrument(name = "Provisioning an author", skip(self))]
    pub async fn create_author(&self, name: &str) -> Result<AuthorId, ClientError> {
        let response = self.post_author(name).await?;
        created_id("POST /authors", &response)
    }

    #[tracing::instrument(name = "Provisioning a book", skip(self))]
    pub async fn create_book(&self, name: &str, author_id: AuthorId) -> Result<BookId, ClientError> {
        let response = self.post_book(name, Value::from(author_id.get())).await?;
        created_id("POST /books", &response)
    }

    /// Creates a fresh author and a book written by them.
    pub async fn create_book_with_author(
        &self,
        name: &str,
        author_name: &str,
    ) -> Result<BookId, ClientError> {
        let author_id = self.create_author(author_name).await?;
        self.create_book(name, author_id).await
    }
}

/// Creation endpoints answer 200 with `{"id": <int>}`.
pub fn created_id(operation: &'static str, response: &ApiResponse) -> Result<EntityId, ClientError> {
    if response.status != 200 {
        return Err(ClientError::UnexpectedStatus {
            operation,
            expected: 200,
            actual: response.status,
        });
    }
    response
        .json::<CreatedEntity>()
        .ok()
        .and_then(|created| EntityId::try_from(created.id).ok())
        .ok_or_else(|| ClientError::MalformedBody {
            operation,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        })
}
