mod author_filter;
mod book_name;
mod entities;
mod entity_id;

pub use author_filter::AuthorFilter;
pub use book_name::{BookName, NameError};
pub use entities::{Author, Book, CreatedEntity, NewAuthor, NewBook};
pub use entity_id::{AuthorId, BookId, EntityId, IdError};
