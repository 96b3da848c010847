use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SurveyError;

/// The closed set of question types a survey document may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Pick exactly one option from a dropdown-like list.
    SingleSelect,

    /// Pick one or more options from a list.
    MultipleSelect,

    /// Pick exactly one option from a radio group.
    Radio,

    /// Tick one or more checkboxes.
    Checkbox,

    /// Free text.
    TextArea,
}

impl QuestionType {
    /// All known question types, in declaration order.
    pub const ALL: [QuestionType; 5] = [
        Self::SingleSelect,
        Self::MultipleSelect,
        Self::Radio,
        Self::Checkbox,
        Self::TextArea,
    ];

    /// The tag used for this type in survey JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleSelect => "single_select",
            Self::MultipleSelect => "multiple_select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::TextArea => "text_area",
        }
    }

    /// Check if this type carries a list of options.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            Self::SingleSelect | Self::MultipleSelect | Self::Radio | Self::Checkbox
        )
    }

    /// Check if answers to this type must select exactly one option.
    pub fn is_single_choice(&self) -> bool {
        matches!(self, Self::SingleSelect | Self::Radio)
    }
}

/// Parse a type tag such as `"checkbox"` into a [`QuestionType`].
pub fn parse_question_type(s: &str) -> Result<QuestionType, SurveyError> {
    QuestionType::ALL
        .into_iter()
        .find(|t| t.as_str() == s)
        .ok_or_else(|| SurveyError::InvalidType(s.to_string()))
}

impl FromStr for QuestionType {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_question_type(s)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
