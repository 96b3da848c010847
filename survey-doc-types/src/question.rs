use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{JsonPath, NameId, QuestionType, Result, SurveyError, parse_question_type};

/// Field names of the question JSON shape.
pub const NAME_ID_KEY: &str = "nameId";
pub const VALUE_KEY: &str = "value";
pub const OPTIONS_KEY: &str = "options";
pub const SUB_QUESTIONS_KEY: &str = "subQuestions";
pub const TYPE_KEY: &str = "type";

/// A single question in a survey document.
///
/// Questions are built by parsing JSON. The payload in [`QuestionValue`] always
/// matches the declared [`QuestionType`]: choice types carry a [`Choice`],
/// `text_area` carries a [`TextArea`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<i64>,

    name_id: NameId,

    #[serde(rename = "type")]
    question_type: QuestionType,

    label: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    required: bool,

    value: QuestionValue,
}

/// The type-specific payload of a question.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QuestionValue {
    /// Options to pick from (single/multiple select, radio, checkbox).
    Choice(Choice),

    /// Free-text constraints.
    TextArea(TextArea),
}

/// Options of a choice-family question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    options: Vec<ChoiceOption>,
}

/// One option of a [`Choice`]. Options may open nested sub-questions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOption {
    id: String,

    label: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<i64>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    required: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    sub_questions: Vec<Question>,
}

/// Length constraints for a free-text answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextArea {
    /// Text pre-filled for the respondent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Minimum number of characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<usize>,

    /// Maximum number of characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
}

/// A question identifier together with its location in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameIdPath {
    pub name_id: String,
    pub path: JsonPath,
    pub required: bool,
}

// Base fields only; the payload stays untyped until the type tag is known.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    order: Option<i64>,
    #[serde(rename = "type")]
    question_type: Option<Value>,
    label: Option<String>,
    placeholder: Option<String>,
    required: Option<bool>,
    #[serde(default)]
    value: Value,
}

#[derive(Deserialize)]
struct RawChoice {
    options: Option<Vec<Value>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOption {
    id: Option<String>,
    label: Option<String>,
    order: Option<i64>,
    required: Option<bool>,
    sub_questions: Option<Vec<Value>>,
}

impl Question {
    /// Parse a question from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(&value)
    }

    /// Parse a question from an already decoded JSON tree.
    ///
    /// Once the `nameId` is read, every failure is wrapped with it.
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(SurveyError::InvalidValue(
                "question must be a JSON object".into(),
            ));
        }

        let name_id = match value.get(NAME_ID_KEY) {
            None | Some(Value::Null) => return Err(SurveyError::MissingField("nameId")),
            Some(Value::String(name_id)) => name_id.clone(),
            Some(other) => return Err(SurveyError::InvalidIdentifier(other.to_string())),
        };

        Self::from_fields(&name_id, value).map_err(|err| SurveyError::in_question(name_id, err))
    }

    fn from_fields(name_id: &str, value: &Value) -> Result<Self> {
        let raw =
            RawQuestion::deserialize(value).map_err(|e| SurveyError::InvalidValue(e.to_string()))?;

        let name_id = NameId::new(name_id)?;
        let question_type = match raw.question_type {
            None | Some(Value::Null) => return Err(SurveyError::MissingField("type")),
            Some(Value::String(tag)) => parse_question_type(&tag)?,
            Some(other) => return Err(SurveyError::InvalidType(other.to_string())),
        };
        let label = raw.label.ok_or(SurveyError::MissingField("label"))?;

        if raw.value.is_null() {
            return Err(SurveyError::MissingValue);
        }

        let payload = match question_type {
            QuestionType::SingleSelect
            | QuestionType::MultipleSelect
            | QuestionType::Radio
            | QuestionType::Checkbox => QuestionValue::Choice(Choice::from_value(&raw.value)?),
            QuestionType::TextArea => QuestionValue::TextArea(TextArea::from_value(&raw.value)?),
        };

        Ok(Self {
            order: raw.order,
            name_id,
            question_type,
            label,
            placeholder: raw.placeholder,
            required: raw.required.unwrap_or(false),
            value: payload,
        })
    }

    /// Get the question identifier.
    pub fn name_id(&self) -> &str {
        self.name_id.as_str()
    }

    /// Get the question type.
    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    /// Get the label shown to the respondent.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn order(&self) -> Option<i64> {
        self.order
    }

    /// Check if the question itself carries `"required": true`.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Get the type-specific payload.
    pub fn value(&self) -> &QuestionValue {
        &self.value
    }

    /// Get the options, if this is a choice-family question.
    pub fn choice(&self) -> Option<&Choice> {
        match &self.value {
            QuestionValue::Choice(choice) => Some(choice),
            QuestionValue::TextArea(_) => None,
        }
    }

    /// Get the text constraints, if this is a `text_area` question.
    pub fn text_area(&self) -> Option<&TextArea> {
        match &self.value {
            QuestionValue::TextArea(text) => Some(text),
            QuestionValue::Choice(_) => None,
        }
    }

    /// Convert back to the JSON shape the question was parsed from.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// List this question's identifier and path, then those of every nested
    /// sub-question, depth first in declared option and sub-question order.
    pub fn name_id_paths(&self, base: &JsonPath) -> Vec<NameIdPath> {
        let mut paths = Vec::new();
        self.collect_name_id_paths(base, false, &mut paths);
        paths
    }

    fn collect_name_id_paths(
        &self,
        base: &JsonPath,
        required_by_option: bool,
        paths: &mut Vec<NameIdPath>,
    ) {
        paths.push(NameIdPath {
            name_id: self.name_id.to_string(),
            path: base.clone(),
            required: self.required || required_by_option,
        });

        // Only choice questions can nest sub-questions.
        let QuestionValue::Choice(choice) = &self.value else {
            return;
        };

        let options_path = base.field(VALUE_KEY).field(OPTIONS_KEY);
        for (oi, option) in choice.options.iter().enumerate() {
            let sub_path = options_path.index(oi).field(SUB_QUESTIONS_KEY);
            for (si, sub) in option.sub_questions.iter().enumerate() {
                sub.collect_name_id_paths(&sub_path.index(si), option.required, paths);
            }
        }
    }
}

impl FromStr for Question {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice(s.as_bytes())
    }
}

impl Choice {
    fn from_value(value: &Value) -> Result<Self> {
        require_object(value, "choice value")?;
        let raw =
            RawChoice::deserialize(value).map_err(|e| SurveyError::InvalidValue(e.to_string()))?;
        let raw_options = raw
            .options
            .filter(|options| !options.is_empty())
            .ok_or_else(|| {
                SurveyError::InvalidValue("choice must define at least one option".into())
            })?;

        let mut seen = HashSet::new();
        let mut options = Vec::with_capacity(raw_options.len());
        for (i, raw) in raw_options.iter().enumerate() {
            require_object(raw, "option")?;
            let raw =
                RawOption::deserialize(raw).map_err(|e| SurveyError::InvalidValue(e.to_string()))?;
            let id = raw
                .id
                .filter(|id| !id.is_empty())
                .ok_or_else(|| SurveyError::InvalidValue(format!("option {i} has no id")))?;
            if !seen.insert(id.clone()) {
                return Err(SurveyError::InvalidValue(format!(
                    "duplicate option id '{id}'"
                )));
            }
            let label = raw
                .label
                .ok_or_else(|| SurveyError::InvalidValue(format!("option '{id}' has no label")))?;
            let sub_questions = raw
                .sub_questions
                .unwrap_or_default()
                .iter()
                .map(Question::from_value)
                .collect::<Result<Vec<_>>>()?;

            options.push(ChoiceOption {
                id,
                label,
                order: raw.order,
                required: raw.required.unwrap_or(false),
                sub_questions,
            });
        }

        Ok(Self { options })
    }

    /// Get the options in declared order.
    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    /// Find an option by id.
    pub fn option(&self, id: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

impl ChoiceOption {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn order(&self) -> Option<i64> {
        self.order
    }

    /// Check if the sub-questions of this option must be answered.
    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn sub_questions(&self) -> &[Question] {
        &self.sub_questions
    }
}

impl TextArea {
    fn from_value(value: &Value) -> Result<Self> {
        require_object(value, "text_area value")?;
        let text =
            TextArea::deserialize(value).map_err(|e| SurveyError::InvalidValue(e.to_string()))?;
        text.validate()?;
        Ok(text)
    }

    /// Check that the bounds are consistent.
    pub fn validate(&self) -> Result<()> {
        match (self.min, self.max) {
            (_, Some(0)) => Err(SurveyError::InvalidValue(
                "text_area max must be greater than 0".into(),
            )),
            (Some(min), Some(max)) if min > max => Err(SurveyError::InvalidValue(format!(
                "text_area min ({min}) is greater than max ({max})"
            ))),
            _ => Ok(()),
        }
    }
}

// Derived struct visitors also accept sequences, so payload shapes are checked first.
fn require_object(value: &Value, what: &str) -> Result<()> {
    if value.is_object() {
        Ok(())
    } else {
        Err(SurveyError::InvalidValue(format!("{what} must be a JSON object")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn checkbox() -> Value {
        json!({
            "order": 0,
            "nameId": "generals",
            "type": "checkbox",
            "label": "select one or more options",
            "value": {
                "options": [
                    {"id": "1", "label": "option 1", "order": 0},
                    {
                        "id": "2",
                        "label": "option 2",
                        "order": 1,
                        "required": true,
                        "subQuestions": [
                            {
                                "nameId": "sub_generals",
                                "type": "radio",
                                "label": "pick one",
                                "value": {"options": [{"id": "a", "label": "A"}]}
                            },
                            {
                                "nameId": "sub_comment",
                                "type": "text_area",
                                "label": "why?",
                                "value": {"max": 100}
                            }
                        ]
                    }
                ]
            }
        })
    }

    #[test]
    fn parses_choice_with_sub_questions() {
        let q = Question::from_value(&checkbox()).unwrap();
        assert_eq!(q.name_id(), "generals");
        assert_eq!(q.question_type(), QuestionType::Checkbox);
        assert_eq!(q.order(), Some(0));

        let choice = q.choice().unwrap();
        assert_eq!(choice.options().len(), 2);
        let second = choice.option("2").unwrap();
        assert!(second.is_required());
        assert_eq!(second.sub_questions().len(), 2);
        assert_eq!(
            second.sub_questions()[1].text_area().unwrap().max,
            Some(100)
        );
    }

    #[test]
    fn parses_text_area() {
        let q: Question = r#"{"nameId": "comment", "type": "text_area", "label": "Comment",
            "placeholder": "type here", "value": {"min": 2, "max": 10}}"#
            .parse()
            .unwrap();
        assert_eq!(q.placeholder(), Some("type here"));
        assert_eq!(
            q.text_area(),
            Some(&TextArea {
                default: None,
                min: Some(2),
                max: Some(10)
            })
        );
        assert!(q.choice().is_none());
    }

    #[test]
    fn missing_name_id() {
        let err = Question::from_value(&json!({"type": "radio", "label": "x", "value": {}}))
            .unwrap_err();
        assert!(matches!(err, SurveyError::MissingField("nameId")));
    }

    #[test]
    fn missing_type() {
        let err = Question::from_value(&json!({"nameId": "abc", "label": "x", "value": {}}))
            .unwrap_err();
        assert!(matches!(err.root_cause(), SurveyError::MissingField("type")));
        assert_eq!(err.question_trail(), vec!["abc"]);
    }

    #[test]
    fn wrong_typed_name_id_and_type() {
        let err = Question::from_value(&json!({
            "nameId": 5, "type": "radio", "label": "x", "value": {}
        }))
        .unwrap_err();
        assert!(matches!(err, SurveyError::InvalidIdentifier(id) if id == "5"));

        let err = Question::from_value(&json!({
            "nameId": "abc", "type": 3, "label": "x", "value": {}
        }))
        .unwrap_err();
        assert!(matches!(err.root_cause(), SurveyError::InvalidType(t) if t == "3"));
        assert_eq!(err.question_trail(), vec!["abc"]);
    }

    #[test]
    fn array_question_rejected() {
        let err =
            Question::from_value(&json!([0, "abc", "text_area", "l", null, null, []])).unwrap_err();
        assert!(matches!(err, SurveyError::InvalidValue(_)));
    }

    #[test]
    fn array_payloads_rejected() {
        for value in [
            json!({"nameId": "abc", "type": "text_area", "label": "x", "value": [1, 10]}),
            json!({"nameId": "abc", "type": "radio", "label": "x", "value": [[]]}),
            json!({"nameId": "abc", "type": "radio", "label": "x",
                   "value": {"options": [["1", "one"]]}}),
        ] {
            let err = Question::from_value(&value).unwrap_err();
            assert!(matches!(err.root_cause(), SurveyError::InvalidValue(_)), "{value}");
            assert_eq!(err.question_trail(), vec!["abc"]);
        }
    }

    #[test]
    fn array_sub_question_rejected() {
        let err = Question::from_value(&json!({
            "nameId": "abc", "type": "radio", "label": "x",
            "value": {"options": [{"id": "1", "label": "one", "subQuestions": [["nested"]]}]}
        }))
        .unwrap_err();
        assert!(matches!(err.root_cause(), SurveyError::InvalidValue(_)));
        assert_eq!(err.question_trail(), vec!["abc"]);
    }

    #[test]
    fn invalid_identifier() {
        let err = Question::from_value(&json!({
            "nameId": "telephone..client", "type": "text_area", "label": "x", "value": {}
        }))
        .unwrap_err();
        assert!(matches!(err.root_cause(), SurveyError::InvalidIdentifier(_)));
    }

    #[test]
    fn invalid_type() {
        let err = Question::from_value(&json!({
            "nameId": "abc", "type": "email", "label": "x", "value": {}
        }))
        .unwrap_err();
        assert!(matches!(err.root_cause(), SurveyError::InvalidType(t) if t == "email"));
    }

    #[test]
    fn missing_value() {
        for value in [
            json!({"nameId": "abc", "type": "radio", "label": "x"}),
            json!({"nameId": "abc", "type": "text_area", "label": "x", "value": null}),
        ] {
            let err = Question::from_value(&value).unwrap_err();
            assert!(matches!(err.root_cause(), SurveyError::MissingValue));
            assert_eq!(err.question_trail(), vec!["abc"]);
        }
    }

    #[test]
    fn empty_options_rejected() {
        let err = Question::from_value(&json!({
            "nameId": "abc", "type": "radio", "label": "x", "value": {"options": []}
        }))
        .unwrap_err();
        assert!(matches!(err.root_cause(), SurveyError::InvalidValue(_)));
    }

    #[test]
    fn duplicate_option_ids_rejected() {
        let err = Question::from_value(&json!({
            "nameId": "abc", "type": "radio", "label": "x",
            "value": {"options": [{"id": "1", "label": "a"}, {"id": "1", "label": "b"}]}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("duplicate option id '1'"));
    }

    #[test]
    fn inconsistent_text_bounds_rejected() {
        let err = Question::from_value(&json!({
            "nameId": "abc", "type": "text_area", "label": "x", "value": {"min": 5, "max": 2}
        }))
        .unwrap_err();
        assert!(matches!(err.root_cause(), SurveyError::InvalidValue(_)));
    }

    #[test]
    fn nested_failure_names_both_questions() {
        let mut doc = checkbox();
        doc["value"]["options"][1]["subQuestions"][0]["value"] = Value::Null;
        let err = Question::from_value(&doc).unwrap_err();
        assert_eq!(err.question_trail(), vec!["generals", "sub_generals"]);
        assert!(matches!(err.root_cause(), SurveyError::MissingValue));
    }

    #[test]
    fn name_id_paths_in_traversal_order() {
        let q = Question::from_value(&checkbox()).unwrap();
        let base = JsonPath::root().field("questions").index(3);
        let paths = q.name_id_paths(&base);

        let rendered: Vec<_> = paths
            .iter()
            .map(|p| (p.name_id.as_str(), p.path.to_string(), p.required))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("generals", "questions.3".to_string(), false),
                (
                    "sub_generals",
                    "questions.3.value.options.1.subQuestions.0".to_string(),
                    true
                ),
                (
                    "sub_comment",
                    "questions.3.value.options.1.subQuestions.1".to_string(),
                    true
                ),
            ]
        );
    }

    #[test]
    fn text_area_has_only_its_own_path() {
        let q = Question::from_value(&json!({
            "nameId": "comment", "type": "text_area", "label": "x", "required": true, "value": {}
        }))
        .unwrap();
        let paths = q.name_id_paths(&JsonPath::parse("questions.0"));
        assert_eq!(paths.len(), 1);
        assert!(paths[0].required);
    }

    #[test]
    fn to_value_reparses_to_same_question() {
        let q = Question::from_value(&checkbox()).unwrap();
        let again = Question::from_value(&q.to_value().unwrap()).unwrap();
        assert_eq!(q, again);
    }
}
