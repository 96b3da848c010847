//! Core types for the survey-doc crate.
//!
//! This crate provides the foundational types for JSON survey documents:
//! - `QuestionType` - The closed set of question types
//! - `Question`, `QuestionValue`, `Choice`, `TextArea` - The parsed question tree
//! - `NameId`, `JsonPath`, `NameIdPath` - Identifiers and their locations
//! - `Answers` - Submitted answer values keyed by identifier
//! - `SurveyError`, `CheckError` - Errors for parsing and answer checking

mod json_path;
pub use json_path::{JsonPath, PathSegment};

mod name_id;
pub use name_id::{NAME_ID_PATTERN, NameId, is_valid_name_id};

mod question_type;
pub use question_type::{QuestionType, parse_question_type};

mod question;
pub use question::{
    Choice, ChoiceOption, NAME_ID_KEY, NameIdPath, OPTIONS_KEY, Question, QuestionValue,
    SUB_QUESTIONS_KEY, TYPE_KEY, TextArea, VALUE_KEY,
};

mod answers;
pub use answers::Answers;

mod error;
pub use error::{CheckError, Result, SurveyError};
