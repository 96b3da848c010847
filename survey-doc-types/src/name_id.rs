use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::SurveyError;

/// Letter first, letters/digits/`_`/`-` in the body, letter or digit last, 3 to 64 chars.
pub const NAME_ID_PATTERN: &str = r"^[a-zA-Z][a-zA-Z0-9_-]{1,62}[a-zA-Z0-9]$";

static NAME_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NAME_ID_PATTERN).expect("Invalid nameId regex"));

/// Check whether `s` is a well-formed question identifier.
pub fn is_valid_name_id(s: &str) -> bool {
    NAME_ID_REGEX.is_match(s)
}

/// A validated question identifier (the `nameId` field of a question).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NameId(String);

impl NameId {
    /// Validate and wrap an identifier.
    pub fn new(s: impl Into<String>) -> Result<Self, SurveyError> {
        let s = s.into();
        if is_valid_name_id(&s) {
            Ok(Self(s))
        } else {
            Err(SurveyError::InvalidIdentifier(s))
        }
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NameId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NameId {
    type Error = SurveyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for NameId {
    type Error = SurveyError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}
