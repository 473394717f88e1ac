use serde_json::Value;

/// A positive integer identifier, as handed out by the book service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(i64);

pub type AuthorId = EntityId;
pub type BookId = EntityId;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("`{0}` is not an integer")]
    NotAnInteger(String),
    #[error("{0} is not a positive id")]
    NotPositive(i64),
}

impl EntityId {
    /// Parses the textual form used in paths and query strings.
    /// A leading `+` is not part of that form.
    pub fn parse(s: &str) -> Result<EntityId, IdError> {
        if s.starts_with('+') {
            return Err(IdError::NotAnInteger(s.to_string()));
        }
        let value: i64 = s
            .parse()
            .map_err(|_| IdError::NotAnInteger(s.to_string()))?;
        Self::try_from(value)
    }

    /// Only JSON integers are accepted; a numeric-looking string is still malformed.
    pub fn from_json(value: &Value) -> Result<EntityId, IdError> {
        match value.as_i64() {
            Some(n) => Self::try_from(n),
            None => Err(IdError::NotAnInteger(value.to_string())),
        }
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for EntityId {
    type Error = IdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(IdError::NotPositive(value))
        }
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for EntityId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for EntityId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <i64 as serde::Deserialize>::deserialize(deserializer)?;
        EntityId::try_from(value).map_err(serde::de::Error::custom)
    }
}
