use serde::Deserialize;
use serde_json::Value;

use crate::{CheckError, QuestionType, TextArea, VALUE_KEY};

/// Check the answer to a `text_area` question: a single string whose
/// character count lies within the question's `min`/`max` bounds.
pub fn check_text_area(
    question: &Value,
    answers: &[Value],
    _question_type: QuestionType,
) -> Result<(), CheckError> {
    let [answer] = answers else {
        return Err(CheckError::AnswerCount {
            expected: "exactly 1".into(),
            actual: answers.len(),
        });
    };
    let text = answer
        .as_str()
        .ok_or_else(|| CheckError::NotAString(answer.to_string()))?;

    let bounds = match question.get(VALUE_KEY) {
        Some(value) => TextArea::deserialize(value)
            .map_err(|e| CheckError::MalformedQuestion(e.to_string()))?,
        None => TextArea::default(),
    };

    let len = text.chars().count();
    if let Some(min) = bounds.min
        && len < min
    {
        return Err(CheckError::TooShort { len, min });
    }
    if let Some(max) = bounds.max
        && len > max
    {
        return Err(CheckError::TooLong { len, max });
    }

    Ok(())
}
