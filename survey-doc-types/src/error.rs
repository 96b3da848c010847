use crate::{JsonPath, QuestionType};

/// Error type for survey parsing, indexing, mutation and answer checking.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// A `type` tag that is not one of the known question types.
    #[error("invalid question type '{0}'")]
    InvalidType(String),

    /// A `nameId` that does not match the identifier pattern.
    #[error("invalid nameId '{0}', must match {pattern}", pattern = crate::NAME_ID_PATTERN)]
    InvalidIdentifier(String),

    /// A required question field is absent.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// The question has no `value` payload.
    #[error("value is not defined")]
    MissingValue,

    /// The `value` payload does not have the shape its type requires.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Two questions in the tree share one `nameId`.
    #[error("duplicate nameId: {0}")]
    DuplicateIdentifier(String),

    /// An answer or mutation names a `nameId` the survey does not contain.
    #[error("nameId not found: {0}")]
    UnknownIdentifier(String),

    /// Required questions without an answer, in required-list order.
    #[error("missing required answers: {}", .0.join(", "))]
    MissingRequiredAnswers(Vec<String>),

    /// No checker is registered for a question type.
    #[error("no checker registered for question type '{0}'")]
    NoCheckerRegistered(QuestionType),

    /// A checker rejected the answer to a question.
    #[error("invalid answer for nameId '{name_id}', path '{path}', error: {source}")]
    AnswerValidationFailed {
        name_id: String,
        path: JsonPath,
        #[source]
        source: CheckError,
    },

    /// The survey JSON is unreadable or lacks its title/version.
    #[error("malformed survey document: {0}")]
    MalformedDocument(String),

    /// Context wrapper naming the question whose parse failed.
    #[error("error parsing question '{name_id}': {source}")]
    Question {
        name_id: String,
        #[source]
        source: Box<SurveyError>,
    },
}

impl SurveyError {
    /// Wrap an error with the `nameId` of the question being parsed.
    pub fn in_question(name_id: impl Into<String>, err: SurveyError) -> Self {
        Self::Question {
            name_id: name_id.into(),
            source: Box::new(err),
        }
    }

    /// The innermost error, with every [`SurveyError::Question`] wrapper removed.
    pub fn root_cause(&self) -> &SurveyError {
        match self {
            Self::Question { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// The `nameId`s of the question wrappers, outermost first.
    pub fn question_trail(&self) -> Vec<&str> {
        let mut trail = Vec::new();
        let mut current = self;
        while let Self::Question { name_id, source } = current {
            trail.push(name_id.as_str());
            current = source;
        }
        trail
    }
}

impl From<serde_json::Error> for SurveyError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedDocument(err.to_string())
    }
}

/// Error returned by a checker when an answer does not fit its question.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("expected {expected} answer(s), got {actual}")]
    AnswerCount { expected: String, actual: usize },

    #[error("option '{0}' was selected more than once")]
    DuplicateAnswer(String),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("expected a string answer, got {0}")]
    NotAString(String),

    #[error("text is too short: {len} characters, minimum is {min}")]
    TooShort { len: usize, min: usize },

    #[error("text is too long: {len} characters, maximum is {max}")]
    TooLong { len: usize, max: usize },

    /// The live question sub-document lacks what the checker needs.
    #[error("malformed question: {0}")]
    MalformedQuestion(String),

    /// Failure reported by a caller-supplied checker.
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}

impl CheckError {
    /// Create a custom error from any error type.
    pub fn custom(err: impl Into<anyhow::Error>) -> Self {
        Self::Custom(err.into())
    }
}

/// Result alias used throughout the survey crates.
pub type Result<T, E = SurveyError> = std::result::Result<T, E>;
