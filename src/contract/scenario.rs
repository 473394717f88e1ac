use crate::domain::BookName;
use serde_json::Value;

/// An id as it goes over the wire, before any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawId {
    Integer(i64),
    Text(String),
}

impl RawId {
    pub fn text(s: &str) -> Self {
        RawId::Text(s.to_string())
    }

    pub fn as_path_segment(&self) -> String {
        match self {
            RawId::Integer(n) => n.to_string(),
            RawId::Text(s) => s.clone(),
        }
    }

    /// Integers become JSON numbers, text becomes a JSON string.
    pub fn to_json(&self) -> Value {
        match self {
            RawId::Integer(n) => Value::from(*n),
            RawId::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawId::Integer(n) => write!(f, "{}", n),
            RawId::Text(s) => write!(f, "{:?}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdInput {
    /// Replaced at run time by the id of a freshly created entity.
    Provisioned,
    Literal(RawId),
}

impl IdInput {
    pub fn integer(n: i64) -> Self {
        IdInput::Literal(RawId::Integer(n))
    }

    pub fn text(s: &str) -> Self {
        IdInput::Literal(RawId::text(s))
    }
}

impl std::fmt::Display for IdInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdInput::Provisioned => write!(f, "provisioned"),
            IdInput::Literal(raw) => write!(f, "{}", raw),
        }
    }
}

/// The `author_id` query parameter of `GET /books`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterInput {
    Absent,
    /// The id of a freshly created author, sent as text.
    Provisioned,
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListBooks {
        author_id: FilterInput,
    },
    CreateBook {
        name: String,
        author_id: IdInput,
    },
    GetBook {
        book_id: IdInput,
    },
    UpdateBook {
        book_id: IdInput,
        name: String,
        author_id: IdInput,
    },
    DeleteBook {
        book_id: IdInput,
    },
}

/// Names given to the entities created while provisioning a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixtures {
    pub author_name: &'static str,
    pub book_name: &'static str,
}

impl Operation {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Operation::ListBooks { .. } => "GET /books",
            Operation::CreateBook { .. } => "POST /books",
            Operation::GetBook { .. } => "GET /books/{id}",
            Operation::UpdateBook { .. } => "PATCH /books/{id}",
            Operation::DeleteBook { .. } => "DELETE /books/{id}",
        }
    }

    pub fn fixtures(&self) -> Fixtures {
        match self {
            Operation::ListBooks { .. } => Fixtures {
                author_name: "Author for List Books",
                book_name: "Book for List",
            },
            Operation::CreateBook { .. } => Fixtures {
                author_name: "Author for Create Book",
                book_name: "Book for Create",
            },
            Operation::GetBook { .. } => Fixtures {
                author_name: "Author for Get Book",
                book_name: "Book for Get",
            },
            Operation::UpdateBook { .. } => Fixtures {
                author_name: "Author for Update Book",
                book_name: "Book for Update",
            },
            Operation::DeleteBook { .. } => Fixtures {
                author_name: "Author for Delete Book",
                book_name: "Book for Delete",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedStatus {
    Ok,
    NoContent,
    NotFound,
    UnprocessableEntity,
}

impl ExpectedStatus {
    pub fn code(&self) -> u16 {
        match self {
            ExpectedStatus::Ok => 200,
            ExpectedStatus::NoContent => 204,
            ExpectedStatus::NotFound => 404,
            ExpectedStatus::UnprocessableEntity => 422,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExpectedStatus::Ok | ExpectedStatus::NoContent)
    }
}

impl std::fmt::Display for ExpectedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub label: String,
    pub operation: Operation,
    pub expected: ExpectedStatus,
}

impl Scenario {
    pub fn new(operation: Operation, expected: ExpectedStatus) -> Self {
        let label = describe(&operation);
        Self {
            label,
            operation,
            expected,
        }
    }
}

fn describe_name(name: &str) -> String {
    match BookName::parse(name.to_string()) {
        Err(_) => "empty name".to_string(),
        Ok(parsed) if parsed.grapheme_len() > 32 => {
            format!("{}-character name", parsed.grapheme_len())
        }
        Ok(_) => format!("name {:?}", name),
    }
}

fn describe(operation: &Operation) -> String {
    let inputs = match operation {
        Operation::ListBooks { author_id } => match author_id {
            FilterInput::Absent => "no filter".to_string(),
            FilterInput::Provisioned => "author_id=provisioned".to_string(),
            FilterInput::Literal(s) => format!("author_id={:?}", s),
        },
        Operation::CreateBook { name, author_id } => {
            format!("{}, author_id={}", describe_name(name), author_id)
        }
        Operation::GetBook { book_id } | Operation::DeleteBook { book_id } => {
            format!("id={}", book_id)
        }
        Operation::UpdateBook {
            book_id,
            name,
            author_id,
        } => format!(
            "id={}, {}, author_id={}",
            book_id,
            describe_name(name),
            author_id
        ),
    };
    format!("{} ({})", operation.endpoint(), inputs)
}
