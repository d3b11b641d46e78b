//! Contact aggregate and its value types.
//!
//! A [`ContactDraft`] is the validated, sanitised field set produced by the
//! validation gate. A [`Contact`] is a draft that has been given an identity
//! by the create use-case.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised when parsing a [`ContactId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactIdValidationError {
    /// The identifier was empty after trimming.
    #[error("contact id must not be empty")]
    Empty,
    /// The identifier was not a UUID.
    #[error("contact id must be a valid UUID")]
    Invalid,
}

/// Stable contact identifier, generated once at creation.
///
/// # Examples
/// ```
/// use contacts_api::domain::ContactId;
///
/// let id = ContactId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// assert!(ContactId::new("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContactId(Uuid);

impl ContactId {
    /// Parse an identifier from its string form.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ContactIdValidationError> {
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            return Err(ContactIdValidationError::Empty);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| ContactIdValidationError::Invalid)
    }

    /// Generate a fresh identifier for a new contact.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier loaded from storage.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Borrow the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<ContactId> for String {
    fn from(value: ContactId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ContactId {
    type Error = ContactIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Raised when text does not name a colour from [`FavoriteColor::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown favourite colour: {0}")]
pub struct UnknownColorError(pub String);

macro_rules! favorite_colors {
    ($($variant:ident),* $(,)?) => {
        /// Closed set of accepted favourite colours.
        ///
        /// Names are case-sensitive and serialise exactly as written.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum FavoriteColor {
            $(
                #[doc = concat!("The colour `", stringify!($variant), "`.")]
                $variant,
            )*
        }

        impl FavoriteColor {
            /// Every accepted colour, in list order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Canonical name of the colour.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)*
                }
            }
        }
    };
}

favorite_colors! {
    Red, Green, Blue, Yellow, Purple, Orange, Black, White, Gray, Brown, Pink,
    Teal, Cyan, Magenta, Violet, Indigo, Turquoise, Lavender, Beige, Maroon,
    Navy, Aqua, Lime, Peach, Coral, Mint, Olive, Burgundy, Gold, Silver, Ivory,
    Crimson, Chartreuse, Tan, Amber, Plum, Copper, Sapphire, Emerald, Rose,
    Fuchsia, Periwinkle, Rainbow, All,
}

impl FromStr for FavoriteColor {
    type Err = UnknownColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| UnknownColorError(s.to_owned()))
    }
}

impl fmt::Display for FavoriteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated contact fields without an identity.
///
/// Construct through the validation gate for inbound data. The public
/// constructor exists for values that were validated before being stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    first_name: String,
    last_name: String,
    email: String,
    favorite_color: FavoriteColor,
    birthday: String,
}

impl ContactDraft {
    /// Assemble a draft from already-validated values.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        favorite_color: FavoriteColor,
        birthday: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            favorite_color,
            birthday: birthday.into(),
        }
    }

    /// Sanitised first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Sanitised last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Normalised email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Favourite colour.
    #[must_use]
    pub const fn favorite_color(&self) -> FavoriteColor {
        self.favorite_color
    }

    /// Birthday in `MM/DD/YY` or `MM/DD/YYYY` form.
    #[must_use]
    pub fn birthday(&self) -> &str {
        &self.birthday
    }
}

/// Stored contact record.
///
/// Serialises with camelCase keys:
/// `{"id","firstName","lastName","email","favoriteColor","birthday"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    id: ContactId,
    first_name: String,
    last_name: String,
    email: String,
    favorite_color: FavoriteColor,
    birthday: String,
}

impl Contact {
    /// Give a validated draft its identity.
    ///
    /// # Examples
    /// ```
    /// use contacts_api::domain::{Contact, ContactDraft, ContactId, FavoriteColor};
    ///
    /// let draft = ContactDraft::new("Jo", "Do", "jo@x.com", FavoriteColor::Red, "01/01/2000");
    /// let contact = Contact::new(ContactId::random(), draft);
    /// assert_eq!(contact.email(), "jo@x.com");
    /// ```
    #[must_use]
    pub fn new(id: ContactId, draft: ContactDraft) -> Self {
        let ContactDraft {
            first_name,
            last_name,
            email,
            favorite_color,
            birthday,
        } = draft;
        Self {
            id,
            first_name,
            last_name,
            email,
            favorite_color,
            birthday,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> &ContactId {
        &self.id
    }

    /// Sanitised first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Sanitised last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Normalised email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Favourite colour.
    #[must_use]
    pub const fn favorite_color(&self) -> FavoriteColor {
        self.favorite_color
    }

    /// Birthday text.
    #[must_use]
    pub fn birthday(&self) -> &str {
        &self.birthday
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case("Red", Some(FavoriteColor::Red))]
    #[case("Teal", Some(FavoriteColor::Teal))]
    #[case("All", Some(FavoriteColor::All))]
    #[case("Rainbow", Some(FavoriteColor::Rainbow))]
    #[case("red", None)]
    #[case("Chartreuse2", None)]
    #[case("", None)]
    fn colours_parse_case_sensitively(#[case] raw: &str, #[case] expected: Option<FavoriteColor>) {
        assert_eq!(raw.parse::<FavoriteColor>().ok(), expected);
    }

    #[rstest]
    fn colour_list_has_forty_four_entries() {
        assert_eq!(FavoriteColor::ALL.len(), 44);
        assert!(
            FavoriteColor::ALL
                .iter()
                .all(|c| c.as_str().parse::<FavoriteColor>() == Ok(*c))
        );
    }

    #[rstest]
    #[case("", ContactIdValidationError::Empty)]
    #[case("   ", ContactIdValidationError::Empty)]
    #[case("abc", ContactIdValidationError::Invalid)]
    fn contact_id_rejects_bad_input(#[case] raw: &str, #[case] expected: ContactIdValidationError) {
        assert_eq!(ContactId::new(raw), Err(expected));
    }

    #[rstest]
    fn contact_serialises_with_camel_case_keys() {
        let id = ContactId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("id");
        let contact = Contact::new(
            id,
            ContactDraft::new("Jo", "Do", "jo@x.com", FavoriteColor::Red, "01/01/2000"),
        );

        let value: Value = serde_json::to_value(&contact).expect("serialise");
        assert_eq!(
            value,
            json!({
                "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "firstName": "Jo",
                "lastName": "Do",
                "email": "jo@x.com",
                "favoriteColor": "Red",
                "birthday": "01/01/2000"
            })
        );
    }
}
