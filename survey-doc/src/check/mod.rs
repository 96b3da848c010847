//! Answer checkers and the table that dispatches to them by question type.
//!
//! A checker receives the live question sub-document (as found in the survey
//! JSON), the submitted values and the question type. It never mutates the
//! document.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::{CheckError, QuestionType};

mod choice;
pub use choice::check_choice;

mod text_area;
pub use text_area::check_text_area;

/// Validates the answer values submitted for one question.
pub trait Checker: Send + Sync {
    /// Check `answers` against the live `question` sub-document.
    fn check(
        &self,
        question: &Value,
        answers: &[Value],
        question_type: QuestionType,
    ) -> Result<(), CheckError>;
}

impl<F> Checker for F
where
    F: Fn(&Value, &[Value], QuestionType) -> Result<(), CheckError> + Send + Sync,
{
    fn check(
        &self,
        question: &Value,
        answers: &[Value],
        question_type: QuestionType,
    ) -> Result<(), CheckError> {
        self(question, answers, question_type)
    }
}

/// Maps each question type to the checker that validates its answers.
///
/// Built once at startup:
///
/// ```
/// use survey_doc::{CheckError, CheckerRegistry, QuestionType};
///
/// let registry = CheckerRegistry::builtin().with_checker(
///     QuestionType::TextArea,
///     |_: &serde_json::Value, answers: &[serde_json::Value], _: QuestionType| {
///         if answers.is_empty() {
///             return Err(CheckError::custom(anyhow::anyhow!("say something")));
///         }
///         Ok(())
///     },
/// );
/// assert!(registry.get(QuestionType::TextArea).is_some());
/// ```
pub struct CheckerRegistry {
    checkers: HashMap<QuestionType, Box<dyn Checker>>,
}

impl CheckerRegistry {
    /// Create a registry with no checkers.
    pub fn empty() -> Self {
        Self {
            checkers: HashMap::new(),
        }
    }

    /// Create a registry with the built-in checker for every question type.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for question_type in QuestionType::ALL {
            match question_type {
                QuestionType::SingleSelect
                | QuestionType::MultipleSelect
                | QuestionType::Radio
                | QuestionType::Checkbox => registry.register(question_type, check_choice),
                QuestionType::TextArea => registry.register(question_type, check_text_area),
            }
        }
        registry
    }

    /// Register a checker, replacing any previous one for that type.
    pub fn register(&mut self, question_type: QuestionType, checker: impl Checker + 'static) {
        self.checkers.insert(question_type, Box::new(checker));
    }

    /// Builder form of [`CheckerRegistry::register`].
    pub fn with_checker(
        mut self,
        question_type: QuestionType,
        checker: impl Checker + 'static,
    ) -> Self {
        self.register(question_type, checker);
        self
    }

    /// Remove the checker for a type.
    pub fn unregister(&mut self, question_type: QuestionType) {
        self.checkers.remove(&question_type);
    }

    /// Resolve the checker for a type.
    pub fn get(&self, question_type: QuestionType) -> Option<&dyn Checker> {
        self.checkers.get(&question_type).map(Box::as_ref)
    }
}

impl Default for CheckerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for CheckerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.checkers.keys().collect();
        types.sort();
        f.debug_struct("CheckerRegistry")
            .field("types", &types)
            .finish()
    }
}
