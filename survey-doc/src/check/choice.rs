use std::collections::HashSet;

use serde_json::Value;

use crate::{CheckError, OPTIONS_KEY, QuestionType, VALUE_KEY};

const OPTION_ID_KEY: &str = "id";

/// Check answers to a choice-family question.
///
/// `single_select` and `radio` take exactly one value, `multiple_select` and
/// `checkbox` take one or more distinct values. Every value must be the id of
/// one of the question's options.
pub fn check_choice(
    question: &Value,
    answers: &[Value],
    question_type: QuestionType,
) -> Result<(), CheckError> {
    if !question_type.is_choice() {
        return Err(CheckError::MalformedQuestion(format!(
            "'{question_type}' is not a choice question"
        )));
    }

    let options = question
        .get(VALUE_KEY)
        .and_then(|value| value.get(OPTIONS_KEY))
        .and_then(Value::as_array)
        .ok_or_else(|| CheckError::MalformedQuestion("missing value.options".into()))?;
    let known: HashSet<&str> = options
        .iter()
        .filter_map(|option| option.get(OPTION_ID_KEY).and_then(Value::as_str))
        .collect();

    if question_type.is_single_choice() {
        if answers.len() != 1 {
            return Err(CheckError::AnswerCount {
                expected: "exactly 1".into(),
                actual: answers.len(),
            });
        }
    } else if answers.is_empty() {
        return Err(CheckError::AnswerCount {
            expected: "at least 1".into(),
            actual: 0,
        });
    }

    let mut seen = HashSet::new();
    for answer in answers {
        let id = option_id(answer)?;
        if !known.contains(id.as_str()) {
            return Err(CheckError::UnknownOption(id));
        }
        if !seen.insert(id.clone()) {
            return Err(CheckError::DuplicateAnswer(id));
        }
    }

    Ok(())
}

// Numbers are accepted and compared by their JSON text, so `2` selects option "2".
fn option_id(answer: &Value) -> Result<String, CheckError> {
    match answer {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(CheckError::NotAString(other.to_string())),
    }
}
