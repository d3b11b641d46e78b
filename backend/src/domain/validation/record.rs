//! Unvalidated contact input as received from a driving adapter.

/// One inbound field before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldInput {
    /// Absent or `null`.
    #[default]
    Missing,
    /// A text value, still raw.
    Text(String),
    /// Present but not text (number, boolean, array, object).
    NotText,
}

impl FieldInput {
    /// Shorthand for a raw text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl From<Option<String>> for FieldInput {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Missing, Self::Text)
    }
}

/// Raw contact fields submitted for create or update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactRecord {
    /// `firstName`
    pub first_name: FieldInput,
    /// `lastName`
    pub last_name: FieldInput,
    /// `favoriteColor`
    pub favorite_color: FieldInput,
    /// `birthday`
    pub birthday: FieldInput,
    /// `email`
    pub email: FieldInput,
}
