//! User domain entity and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Serde adapter for `dd-MM-yyyy` dates.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::constants::DATE_OF_BIRTH_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_OF_BIRTH_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, DATE_OF_BIRTH_FORMAT).map_err(de::Error::custom)
    }

    /// Same format for an optional date; `null` and absent both map to `None`.
    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => NaiveDate::parse_from_str(&raw, DATE_OF_BIRTH_FORMAT)
                    .map(Some)
                    .map_err(de::Error::custom),
                None => Ok(None),
            }
        }
    }
}

/// Reads a JSON `null` string as empty so it falls under the blank rule.
fn null_as_empty<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Client-supplied user attributes (everything except the identifier).
///
/// Text fields default to empty and the date to `None` when absent or
/// `null`, so that missing values surface as field violations rather than
/// parse failures.
/// Any `id` in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserFields {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[cfg_attr(feature = "openapi", schema(example = "Jane"))]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[cfg_attr(feature = "openapi", schema(example = "Doe"))]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[cfg_attr(feature = "openapi", schema(example = "jane@x.com"))]
    pub email_address: String,
    /// Date of birth, `dd-MM-yyyy`
    #[serde(default, with = "date_format::option")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "01-01-2000"))]
    pub date_of_birth: Option<NaiveDate>,
}

/// Validated user attributes, only obtainable through [`UserFields::into_profile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub date_of_birth: NaiveDate,
}

/// Persisted user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier assigned by the record store
    #[cfg_attr(feature = "openapi", schema(example = "5f0c1e8a-8f7b-4c51-9a52-2b1f1f0a9d3e"))]
    pub id: String,
    #[cfg_attr(feature = "openapi", schema(example = "Jane"))]
    pub first_name: String,
    #[cfg_attr(feature = "openapi", schema(example = "Doe"))]
    pub last_name: String,
    #[cfg_attr(feature = "openapi", schema(example = "jane@x.com"))]
    pub email_address: String,
    /// Date of birth, `dd-MM-yyyy`
    #[serde(with = "date_format")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "01-01-2000"))]
    pub date_of_birth: NaiveDate,
}

impl User {
    /// Build a record from an identifier and validated attributes
    pub fn from_profile(id: impl Into<String>, profile: UserProfile) -> Self {
        Self {
            id: id.into(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            email_address: profile.email_address,
            date_of_birth: profile.date_of_birth,
        }
    }

    /// Replace every attribute, keeping the identifier
    pub fn replaced_with(&self, profile: UserProfile) -> Self {
        Self::from_profile(self.id.clone(), profile)
    }
}

/// Error payload returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorMessage {
    #[cfg_attr(feature = "openapi", schema(example = "The user with id 'abc' does not exist"))]
    pub message: String,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
