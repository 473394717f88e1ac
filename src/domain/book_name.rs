use unicode_segmentation::UnicodeSegmentation;

/// A book title the service accepts: anything except the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookName(String);

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("book name must not be empty")]
    Empty,
}

impl BookName {
    pub fn parse(s: String) -> Result<BookName, NameError> {
        if s.is_empty() {
            return Err(NameError::Empty);
        }
        Ok(Self(s))
    }

    /// Length in user-perceived characters.
    pub fn grapheme_len(&self) -> usize {
        self.0.graphemes(true).count()
    }
}

impl AsRef<str> for BookName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
