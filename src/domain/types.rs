//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! normalized phone numbers, eleven-digit tax ids, non-negative prices) so
//! that once a value reaches the domain layer it can be treated as trusted.
use std::ops::Deref;
use std::str::FromStr;

use ammonia;
use phonenumber::{Mode, country, parse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Provided url failed format validation.
    #[error("invalid url address")]
    InvalidUrl,
    /// Tax id did not contain exactly eleven digits.
    #[error("tax id must have 11 digits")]
    InvalidTaxId,
    /// Price was below zero or not a decimal number.
    #[error("price must be a non-negative decimal")]
    InvalidPrice,
    /// Duration was zero or negative.
    #[error("duration must be a positive number of minutes")]
    NonPositiveDuration,
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
        )]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ClientId, "Unique identifier for a client.");
id_newtype!(ServiceId, "Unique identifier for a catalog service.");
id_newtype!(AppointmentId, "Unique identifier for an appointment.");
id_newtype!(PhotoId, "Unique identifier for a portfolio photo.");

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(ClientName, "Client name wrapper enforcing non-empty values.");

non_empty_string_newtype!(
    ServiceName,
    "Catalog service name wrapper enforcing non-empty values."
);

non_empty_string_newtype!(
    PhotoTitle,
    "Portfolio photo title wrapper enforcing trimmed, non-empty values."
);

/// Free text stripped of unsafe HTML, trimmed and non-empty.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SanitizedText(String);

impl SanitizedText {
    /// Constructs a sanitized, trimmed, non-empty value.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let sanitized = ammonia::clean(&value.into());
        let inner = NonEmptyString::new(sanitized)?;
        Ok(Self(inner.into_inner()))
    }

    /// Sanitizes optional input, mapping blank text to `None`.
    pub fn optional<S: Into<String>>(value: Option<S>) -> Option<Self> {
        value.and_then(|v| Self::new(v).ok())
    }

    /// Borrow the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for SanitizedText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalizes a phone number string to E.164 format.
///
/// Numbers without a country prefix are read as Brazilian numbers.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed =
        parse(Some(country::Id::BR), trimmed).map_err(|_| TypeConstraintError::InvalidPhone)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Normalized phone number wrapper (expected E.164).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Constructs a phone number ensuring it is valid and normalizes to E.164 format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_phone_to_e164(&value.into())?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Brazilian individual tax id (CPF) stored as its eleven digits.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TaxId(String);

impl TaxId {
    /// Strips punctuation and requires exactly eleven digits.
    pub fn new<S: AsRef<str>>(value: S) -> Result<Self, TypeConstraintError> {
        let digits: String = value
            .as_ref()
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        if digits.len() != 11 {
            return Err(TypeConstraintError::InvalidTaxId);
        }
        Ok(Self(digits))
    }

    /// Borrow the bare digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Renders the id with the usual `000.000.000-00` mask.
    pub fn formatted(&self) -> String {
        let d = &self.0;
        format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for TaxId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

impl TryFrom<&str> for TaxId {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Non-negative monetary amount.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// Rejects negative amounts.
    pub fn new(value: Decimal) -> Result<Self, TypeConstraintError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(TypeConstraintError::InvalidPrice);
        }
        Ok(Self(value))
    }

    pub const fn amount(self) -> Decimal {
        self.0
    }
}

impl FromStr for Price {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim().replace(',', ".").as_str())
            .map_err(|_| TypeConstraintError::InvalidPrice)?;
        Self::new(value)
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

/// Positive service duration expressed in minutes.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DurationMinutes(i32);

impl DurationMinutes {
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveDuration)
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<DurationMinutes> for i32 {
    fn from(value: DurationMinutes) -> Self {
        value.0
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Non-empty, trimmed image URL.
pub struct ImageUrl(String);

impl ImageUrl {
    /// Ensures a trimmed image URL is non-empty and well formed before wrapping.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let url = NonEmptyString::new(value)?;

        if !url.as_str().validate_url() {
            Err(TypeConstraintError::InvalidUrl)
        } else {
            Ok(Self(url.into_inner()))
        }
    }

    /// Borrow the image URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the owned image URL.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ImageUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for ImageUrl {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive() {
        assert_eq!(ClientId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(ServiceId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(AppointmentId::new(7).map(AppointmentId::get), Ok(7));
    }

    #[test]
    fn names_are_trimmed_and_non_empty() {
        assert_eq!(ClientName::new("  Maria  ").unwrap().as_str(), "Maria");
        assert_eq!(ClientName::new("   "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn tax_id_strips_mask() {
        let tax_id = TaxId::new("123.456.789-01").unwrap();
        assert_eq!(tax_id.as_str(), "12345678901");
        assert_eq!(tax_id.formatted(), "123.456.789-01");
        assert_eq!(TaxId::new("1234"), Err(TypeConstraintError::InvalidTaxId));
        assert_eq!(
            TaxId::new("123456789012"),
            Err(TypeConstraintError::InvalidTaxId)
        );
    }

    #[test]
    fn phone_defaults_to_brazil() {
        let phone = PhoneNumber::new("11999999999").unwrap();
        assert_eq!(phone.as_str(), "+5511999999999");
        assert_eq!(PhoneNumber::new(" "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn price_rejects_negative_values() {
        assert_eq!(
            "25.00".parse::<Price>().unwrap().amount(),
            Decimal::new(2500, 2)
        );
        assert_eq!("25,5".parse::<Price>().unwrap().amount(), Decimal::new(255, 1));
        assert_eq!("-1".parse::<Price>(), Err(TypeConstraintError::InvalidPrice));
        assert_eq!("abc".parse::<Price>(), Err(TypeConstraintError::InvalidPrice));
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn duration_must_be_positive() {
        assert!(DurationMinutes::new(30).is_ok());
        assert_eq!(
            DurationMinutes::new(0),
            Err(TypeConstraintError::NonPositiveDuration)
        );
    }

    #[test]
    fn sanitized_text_strips_scripts() {
        let text = SanitizedText::new("<script>alert(1)</script>unhas curtas").unwrap();
        assert_eq!(text.as_str(), "unhas curtas");
        assert!(SanitizedText::optional(Some("   ")).is_none());
    }

    #[test]
    fn image_url_requires_valid_url() {
        assert!(ImageUrl::new("https://example.com/nails.jpg").is_ok());
        assert_eq!(
            ImageUrl::new("not a url"),
            Err(TypeConstraintError::InvalidUrl)
        );
    }
}
