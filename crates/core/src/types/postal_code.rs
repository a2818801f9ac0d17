//! Brazilian postal code (CEP) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PostalCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PostalCodeError {
    /// The input string is empty.
    #[error("postal code cannot be empty")]
    Empty,
    /// The input does not contain exactly eight digits.
    #[error("postal code must contain exactly {expected} digits (got {got})")]
    WrongLength {
        /// Required digit count.
        expected: usize,
        /// Digit count found in the input.
        got: usize,
    },
    /// The input contains a character that is neither a digit nor a hyphen.
    #[error("postal code may only contain digits and a hyphen")]
    InvalidCharacter,
}

/// A Brazilian postal code (CEP).
///
/// Parsing accepts either the bare eight-digit form (`01001000`) or the
/// hyphenated form (`01001-000`) and normalizes to the hyphenated form.
/// The normalization matters: the postal code is the address cache key,
/// so both spellings of the same code must land on the same row.
///
/// ## Examples
///
/// ```
/// use customer_registry_core::PostalCode;
///
/// let code = PostalCode::parse("01001000").unwrap();
/// assert_eq!(code.as_str(), "01001-000");
/// assert_eq!(code, PostalCode::parse("01001-000").unwrap());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PostalCode(String);

impl PostalCode {
    /// Number of digits in a CEP.
    pub const DIGITS: usize = 8;

    /// Parse a `PostalCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains characters other
    /// than digits and a hyphen, or does not hold exactly eight digits.
    pub fn parse(s: &str) -> Result<Self, PostalCodeError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PostalCodeError::Empty);
        }

        if s.chars().any(|c| !c.is_ascii_digit() && c != '-') {
            return Err(PostalCodeError::InvalidCharacter);
        }

        let digits: String = s.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != Self::DIGITS {
            return Err(PostalCodeError::WrongLength {
                expected: Self::DIGITS,
                got: digits.len(),
            });
        }

        let (prefix, suffix) = digits.split_at(5);
        Ok(Self(format!("{prefix}-{suffix}")))
    }

    /// Returns the canonical `NNNNN-NNN` form as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the eight digits with the hyphen stripped.
    ///
    /// This is the form the ViaCEP URL scheme expects.
    #[must_use]
    pub fn digits(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }

    /// Consumes the `PostalCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PostalCode {
    type Err = PostalCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PostalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for PostalCode {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for PostalCode {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for PostalCode {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
