//! Field-level validation failures and their user-facing messages.

use serde_json::{Map, Value};

/// Contact fields subject to validation, named by their JSON keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    /// `firstName`
    FirstName,
    /// `lastName`
    LastName,
    /// `favoriteColor`
    FavoriteColor,
    /// `birthday`
    Birthday,
    /// `email`
    Email,
}

impl ContactField {
    /// JSON key used in requests, responses and error lists.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::FavoriteColor => "favoriteColor",
            Self::Birthday => "birthday",
            Self::Email => "email",
        }
    }
}

/// Category of a field failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldErrorKind {
    /// Missing or empty after trimming.
    FieldRequired,
    /// Shorter than the field's minimum length.
    FieldTooShort,
    /// Present but not a JSON string.
    FieldTypeError,
    /// Not a member of a closed enumeration.
    InvalidEnumValue,
    /// Does not match the field's expected shape.
    InvalidFormat,
    /// Collides with a value already stored.
    DuplicateValue,
}

/// One `(field, message)` failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: ContactField,
    kind: FieldErrorKind,
}

impl FieldError {
    /// Record a failure of `kind` on `field`.
    #[must_use]
    pub const fn new(field: ContactField, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }

    /// Field that failed.
    #[must_use]
    pub const fn field(&self) -> ContactField {
        self.field
    }

    /// Failure category.
    #[must_use]
    pub const fn kind(&self) -> FieldErrorKind {
        self.kind
    }

    /// Human-readable message shown to clients.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        use ContactField as F;
        use FieldErrorKind as K;

        match (self.field, self.kind) {
            (F::FirstName, K::FieldRequired) => "First Name Field Error",
            (F::FirstName, K::FieldTypeError) => "First name must be a string",
            (F::LastName, K::FieldRequired) => "Last Name Field Error",
            (F::LastName, K::FieldTooShort) => "Last name must contain at least 2 characters.",
            (F::LastName, K::FieldTypeError) => "Last name must be a string",
            (F::FavoriteColor, K::FieldRequired) => "Favorite color is required",
            (F::FavoriteColor, K::FieldTypeError) => "Favorite color must be a string",
            (F::FavoriteColor, K::InvalidEnumValue) => {
                "Color must begin with a capital letter and be a valid color from the color list."
            }
            (F::Birthday, K::FieldRequired) => "Birthday is required.",
            (F::Birthday, K::FieldTypeError) => "Birthday must be a string",
            (F::Birthday, K::InvalidFormat) => {
                "Birthday must be in the format MM/DD/YY or MM/DD/YYYY. (e.g., 12/12/76)."
            }
            (F::Email, K::FieldRequired) => "Email Address Field Error",
            (F::Email, K::FieldTypeError) => "Email must be a string",
            (F::Email, K::InvalidFormat) => "A valid email is required.",
            (F::Email, K::DuplicateValue) => "This email already exists.",
            _ => "Invalid value",
        }
    }
}

/// Ordered collection of field failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Append a failure, keeping detection order.
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// `true` when no rule failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate failures in detection order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Render as `[{"<field>": "<message>"}, ...]`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|error| {
                    let mut entry = Map::new();
                    entry.insert(
                        error.field().as_str().to_owned(),
                        Value::String(error.message().to_owned()),
                    );
                    Value::Object(entry)
                })
                .collect(),
        )
    }
}
