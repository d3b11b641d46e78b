//! Synchronous per-field rules.
//!
//! Each rule sanitises its input first and returns the value to store, or
//! the first failure it meets.

use std::sync::OnceLock;

use regex::Regex;

use super::email::{is_valid_email, normalize_email};
use super::errors::FieldErrorKind;
use super::record::FieldInput;
use super::sanitize::sanitize;
use crate::domain::FavoriteColor;

/// Minimum length of a last name, in characters.
pub(super) const LAST_NAME_MIN: usize = 2;

static COLOR_SHAPE_RE: OnceLock<Regex> = OnceLock::new();
static BIRTHDAY_RE: OnceLock<Regex> = OnceLock::new();

fn color_shape_regex() -> &'static Regex {
    COLOR_SHAPE_RE.get_or_init(|| {
        Regex::new(r"^[A-Z][a-zA-Z]*$")
            .unwrap_or_else(|error| panic!("colour regex failed to compile: {error}"))
    })
}

fn birthday_regex() -> &'static Regex {
    BIRTHDAY_RE.get_or_init(|| {
        Regex::new(r"^(0[1-9]|1[0-2])/(0[1-9]|[12][0-9]|3[01])/(\d{2}|\d{4})$")
            .unwrap_or_else(|error| panic!("birthday regex failed to compile: {error}"))
    })
}

/// Presence and type check shared by every field; yields the trimmed text.
fn trimmed_text(input: &FieldInput) -> Result<&str, FieldErrorKind> {
    let value = match input {
        FieldInput::Missing => return Err(FieldErrorKind::FieldRequired),
        FieldInput::NotText => return Err(FieldErrorKind::FieldTypeError),
        FieldInput::Text(raw) => raw.trim(),
    };
    if value.is_empty() {
        return Err(FieldErrorKind::FieldRequired);
    }
    Ok(value)
}

/// Trimmed and HTML-escaped text.
fn required_text(input: &FieldInput) -> Result<String, FieldErrorKind> {
    trimmed_text(input).map(sanitize)
}

pub(super) fn first_name(input: &FieldInput) -> Result<String, FieldErrorKind> {
    required_text(input)
}

pub(super) fn last_name(input: &FieldInput) -> Result<String, FieldErrorKind> {
    let value = required_text(input)?;
    if value.chars().count() < LAST_NAME_MIN {
        return Err(FieldErrorKind::FieldTooShort);
    }
    Ok(value)
}

pub(super) fn favorite_color(input: &FieldInput) -> Result<FavoriteColor, FieldErrorKind> {
    let value = required_text(input)?;
    if !color_shape_regex().is_match(&value) {
        return Err(FieldErrorKind::InvalidEnumValue);
    }
    value
        .parse()
        .map_err(|_| FieldErrorKind::InvalidEnumValue)
}

/// Trimmed only: the accepted shape holds nothing but digits and `/`.
pub(super) fn birthday(input: &FieldInput) -> Result<String, FieldErrorKind> {
    let value = trimmed_text(input)?;
    if !birthday_regex().is_match(value) {
        return Err(FieldErrorKind::InvalidFormat);
    }
    Ok(value.to_owned())
}

/// Syntax check and canonicalisation; uniqueness is checked by the gate.
pub(super) fn email_format(input: &FieldInput) -> Result<String, FieldErrorKind> {
    let value = required_text(input)?;
    if !is_valid_email(&value) {
        return Err(FieldErrorKind::InvalidFormat);
    }
    Ok(normalize_email(&value))
}
