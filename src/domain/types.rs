//! Strongly-typed value objects used by the list controller.
//!
//! These wrappers enforce basic invariants (non-empty identifiers, well-formed
//! sort keys, positive page sizes) so that once a value reaches the controller
//! it can be put on the wire without further checks.
use std::fmt::{Display, Formatter};
use std::num::NonZeroU32;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Page size must be at least one item.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    /// Sort key is not `field` or `-field`.
    #[error("invalid sort key: {0}")]
    InvalidSortKey(String),
    /// Flag names are plain field identifiers.
    #[error("invalid flag name: {0}")]
    InvalidFlagName(String),
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Returns true for `camelCase`, `snake_case` and dotted field paths.
fn is_field_path(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = value.into().trim().to_string();
                if trimmed.is_empty() {
                    return Err(TypeConstraintError::EmptyString);
                }
                Ok(Self(trimmed))
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

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
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

non_empty_string_newtype!(EntityId, "Backend identifier of a single record.");
non_empty_string_newtype!(FilterKey, "Query-string key of a list filter.");

/// Sort expression understood by the list endpoints: `field` for ascending,
/// `-field` for descending.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct SortKey(String);

impl SortKey {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into().trim().to_string();
        let field = value.strip_prefix('-').unwrap_or(&value);
        if !is_field_path(field) {
            return Err(TypeConstraintError::InvalidSortKey(value));
        }
        Ok(Self(value))
    }

    /// Descending by creation time, the default ordering of every console list.
    pub fn newest_first() -> Self {
        Self("-createdAt".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The field being ordered on, without the direction marker.
    pub fn field(&self) -> &str {
        self.0.strip_prefix('-').unwrap_or(&self.0)
    }

    pub fn is_descending(&self) -> bool {
        self.0.starts_with('-')
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::newest_first()
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for SortKey {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for SortKey {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SortKey> for String {
    fn from(value: SortKey) -> Self {
        value.0
    }
}

/// Name of a boolean status field such as `isActive` or `isFeatured`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct FlagName(String);

impl FlagName {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into().trim().to_string();
        if value.contains('.') || !is_field_path(&value) {
            return Err(TypeConstraintError::InvalidFlagName(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FlagName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for FlagName {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for FlagName {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FlagName> for String {
    fn from(value: FlagName) -> Self {
        value.0
    }
}

/// Number of items requested per page.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageSize(NonZeroU32);

impl PageSize {
    /// Page size used by the console list screens.
    pub const DEFAULT: PageSize = PageSize(NonZeroU32::MIN.saturating_add(7));

    pub fn new(value: u32) -> Result<Self, TypeConstraintError> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or(TypeConstraintError::ZeroPageSize)
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for PageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for PageSize {
    type Error = TypeConstraintError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for u32 {
    fn from(value: PageSize) -> Self {
        value.get()
    }
}
