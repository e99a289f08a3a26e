#![deny(unsafe_code)]

use std::borrow::Borrow;
use std::fmt;

use chrono::Utc;

use crate::ModelError;

/// Identifier of an orderable definition within its owning collection.
///
/// Always non-empty and trimmed.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct DefinitionId(String);

impl DefinitionId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidDefinitionId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Build an id from a string literal.
    ///
    /// # Panics
    ///
    /// Panics if `value` is blank.
    pub fn from_static(value: &'static str) -> Self {
        match Self::new(value) {
            Ok(id) => id,
            Err(_) => panic!("definition id literal must not be blank"),
        }
    }

    /// Generate a fresh `<prefix>-<unix millis>` id.
    ///
    /// A blank prefix yields a bare timestamp.
    pub fn generate(prefix: &str) -> Self {
        let millis = Utc::now().timestamp_millis();
        let prefix = prefix.trim();
        if prefix.is_empty() {
            Self(millis.to_string())
        } else {
            Self(format!("{prefix}-{millis}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for DefinitionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DefinitionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DefinitionId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DefinitionId> for String {
    fn from(value: DefinitionId) -> Self {
        value.0
    }
}

impl PartialEq<str> for DefinitionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DefinitionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
