//! # survey-doc
//!
//! JSON survey documents: typed question trees, identifier indexes and answer checking.
//!
//! A survey is a JSON document of questions (single/multiple select, radio,
//! checkbox, text area). Choice options may nest further sub-questions to any
//! depth. Every question has a unique `nameId`, and answers are submitted per
//! `nameId`.
//!
//! ## Usage
//!
//! ```rust
//! use survey_doc::{Answers, Survey};
//!
//! let survey = Survey::parse_str(r#"{
//!     "title": "Lunch",
//!     "version": "1",
//!     "questions": [{
//!         "nameId": "sides",
//!         "type": "checkbox",
//!         "label": "Pick your sides",
//!         "value": {"options": [
//!             {"id": "1", "label": "Fries"},
//!             {"id": "2", "label": "Salad", "required": true, "subQuestions": [{
//!                 "nameId": "dressing",
//!                 "type": "text_area",
//!                 "label": "Which dressing?",
//!                 "value": {"max": 40}
//!             }]}
//!         ]}
//!     }]
//! }"#)?;
//!
//! assert_eq!(
//!     survey.path_of("dressing").unwrap().to_string(),
//!     "questions.0.value.options.1.subQuestions.0"
//! );
//!
//! let answers = Answers::new()
//!     .with("sides", ["2"])
//!     .with("dressing", ["vinaigrette"]);
//! survey.check(&answers)?;
//!
//! let unknown_side = Answers::new()
//!     .with("sides", ["9"])
//!     .with("dressing", ["ranch"]);
//! assert!(survey.check(&unknown_side).is_err());
//! # Ok::<(), survey_doc::SurveyError>(())
//! ```
//!
//! ## Checkers
//!
//! Answers are validated by the [`Checker`] registered for the question's type
//! in a [`CheckerRegistry`]. [`Survey::check`] uses the built-in checkers;
//! [`Survey::check_with`] takes a registry with custom ones.

// Re-export all types from survey-doc-types
pub use survey_doc_types::*;

pub mod check;
pub use check::{Checker, CheckerRegistry};

mod index;
pub use index::{NameIdIndex, QUESTIONS_KEY, build_index};

mod survey;
pub use survey::Survey;
