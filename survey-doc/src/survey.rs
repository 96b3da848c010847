use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::index::{QUESTIONS_KEY, build_index};
use crate::{
    Answers, CheckerRegistry, JsonPath, PathSegment, Question, Result, SurveyError, TYPE_KEY,
    parse_question_type,
};

static BUILTIN_CHECKERS: LazyLock<CheckerRegistry> = LazyLock::new(CheckerRegistry::builtin);

/// A parsed survey document.
///
/// Holds the survey metadata, the `nameId` → path index of every question
/// (nested ones included), the `nameId`s that must be answered, and the full
/// survey JSON that answers are checked against.
///
/// Serializes to the persisted form
/// `{title, version, description, idPaths, required, fullJsonSurvey}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PersistedSurvey")]
pub struct Survey {
    title: String,

    version: String,

    description: Option<String>,

    #[serde(rename = "idPaths")]
    name_id_paths: BTreeMap<String, JsonPath>,

    #[serde(rename = "required")]
    required_name_ids: Vec<String>,

    full_json_survey: String,
}

#[derive(Deserialize)]
struct RawSurvey {
    title: Option<String>,
    version: Option<String>,
    description: Option<String>,
    #[serde(default)]
    questions: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSurvey {
    #[serde(rename = "idPaths")]
    name_id_paths: BTreeMap<String, JsonPath>,
    #[serde(rename = "required")]
    required_name_ids: Vec<String>,
    full_json_survey: String,
}

impl TryFrom<PersistedSurvey> for Survey {
    type Error = SurveyError;

    // The stored index must match the one rebuilt from fullJsonSurvey.
    fn try_from(persisted: PersistedSurvey) -> Result<Self> {
        let survey = Survey::parse_str(&persisted.full_json_survey)?;
        if survey.name_id_paths != persisted.name_id_paths
            || survey.required_name_ids != persisted.required_name_ids
        {
            return Err(SurveyError::MalformedDocument(
                "stored idPaths/required do not match fullJsonSurvey".into(),
            ));
        }
        Ok(survey)
    }
}

impl Survey {
    /// Parse a survey from JSON bytes.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self> {
        let document: Value = serde_json::from_slice(bytes)?;
        Self::from_value(document)
    }

    /// Parse a survey from a JSON string.
    pub fn parse_str(s: &str) -> Result<Self> {
        Self::parse_bytes(s.as_bytes())
    }

    /// Build a survey from an already decoded JSON document.
    ///
    /// Validates the metadata, parses every question, and indexes the tree.
    /// Nothing is returned unless all of that succeeds.
    pub fn from_value(document: Value) -> Result<Self> {
        if !document.is_object() {
            return Err(SurveyError::MalformedDocument(
                "survey must be a JSON object".into(),
            ));
        }
        let raw = RawSurvey::deserialize(&document)?;

        let title = raw
            .title
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SurveyError::MalformedDocument("survey title is required".into()))?;
        let version = raw
            .version
            .filter(|v| !v.is_empty())
            .ok_or_else(|| SurveyError::MalformedDocument("survey version is required".into()))?;

        let questions = raw
            .questions
            .iter()
            .map(Question::from_value)
            .collect::<Result<Vec<_>>>()?;
        let (name_id_paths, required_name_ids) = build_index(&questions)?.into_parts();

        tracing::debug!(
            %title,
            %version,
            questions = questions.len(),
            name_ids = name_id_paths.len(),
            "Parsed survey"
        );

        Ok(Self {
            title,
            version,
            description: raw.description,
            name_id_paths,
            required_name_ids,
            full_json_survey: serde_json::to_string(&document)?,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the `nameId` → path index.
    pub fn name_id_paths(&self) -> &BTreeMap<String, JsonPath> {
        &self.name_id_paths
    }

    /// Get the path of a question in the survey JSON.
    pub fn path_of(&self, name_id: &str) -> Option<&JsonPath> {
        self.name_id_paths.get(name_id)
    }

    /// Get the `nameId`s that must be answered, in document order.
    pub fn required_name_ids(&self) -> &[String] {
        &self.required_name_ids
    }

    /// Get the survey JSON as text.
    pub fn full_json(&self) -> &str {
        &self.full_json_survey
    }

    /// Decode the survey JSON into an untyped map.
    pub fn to_map(&self) -> Result<Map<String, Value>> {
        Ok(serde_json::from_str(&self.full_json_survey)?)
    }

    /// Re-parse the typed top-level questions.
    pub fn questions(&self) -> Result<Vec<Question>> {
        let document: Value = serde_json::from_str(&self.full_json_survey)?;
        RawSurvey::deserialize(&document)?
            .questions
            .iter()
            .map(Question::from_value)
            .collect()
    }

    /// Check answers with the built-in checkers.
    pub fn check(&self, answers: &Answers) -> Result<()> {
        self.check_with(answers, &BUILTIN_CHECKERS)
    }

    /// Check answers against this survey.
    ///
    /// Fails with every unanswered required `nameId` at once, then checks the
    /// answers one by one and stops at the first that is rejected.
    pub fn check_with(&self, answers: &Answers, registry: &CheckerRegistry) -> Result<()> {
        let document: Value = serde_json::from_str(&self.full_json_survey)?;

        let missing: Vec<String> = self
            .required_name_ids
            .iter()
            .filter(|name_id| !answers.contains(name_id))
            .cloned()
            .collect();
        if !missing.is_empty() {
            tracing::debug!(missing = missing.len(), "Required answers missing");
            return Err(SurveyError::MissingRequiredAnswers(missing));
        }

        for (name_id, values) in answers.iter() {
            let path = self
                .path_of(name_id)
                .ok_or_else(|| SurveyError::UnknownIdentifier(name_id.to_string()))?;
            let question = path.resolve(&document).ok_or_else(|| {
                SurveyError::MalformedDocument(format!(
                    "path '{path}' of nameId '{name_id}' does not resolve"
                ))
            })?;

            let type_tag = question
                .get(TYPE_KEY)
                .and_then(Value::as_str)
                .unwrap_or_default();
            let question_type = parse_question_type(type_tag)?;

            let checker = registry
                .get(question_type)
                .ok_or(SurveyError::NoCheckerRegistered(question_type))?;
            checker
                .check(question, values, question_type)
                .map_err(|source| SurveyError::AnswerValidationFailed {
                    name_id: name_id.to_string(),
                    path: path.clone(),
                    source,
                })?;

            tracing::trace!(name_id, %path, %question_type, "Answer accepted");
        }

        Ok(())
    }

    /// Append a question to the top-level question list.
    pub fn add_question(&mut self, question: &Question) -> Result<()> {
        self.add_question_value(question.to_value()?)
    }

    /// Append a question given as JSON text.
    pub fn add_question_json(&mut self, json: &str) -> Result<()> {
        self.add_question_value(serde_json::from_str(json)?)
    }

    /// Append a question given as a JSON tree.
    ///
    /// The whole document is re-validated and re-indexed. On error the survey
    /// is left exactly as it was.
    pub fn add_question_value(&mut self, question: Value) -> Result<()> {
        self.rebuild_with(|document| {
            let questions = document
                .as_object_mut()
                .ok_or_else(|| SurveyError::MalformedDocument("survey is not an object".into()))?
                .entry(QUESTIONS_KEY)
                .or_insert_with(|| Value::Array(Vec::new()))
                .as_array_mut()
                .ok_or_else(|| {
                    SurveyError::MalformedDocument("survey questions is not a list".into())
                })?;
            questions.push(question);
            Ok(())
        })
    }

    /// Replace the question with the given `nameId` (at any depth) by a new one
    /// given as JSON text. The replacement may change the `nameId`.
    pub fn replace_question_json(&mut self, name_id: &str, json: &str) -> Result<()> {
        let replacement: Value = serde_json::from_str(json)?;
        let path = self.require_path(name_id)?;
        self.rebuild_with(|document| {
            let slot = path.resolve_mut(document).ok_or_else(|| {
                SurveyError::MalformedDocument(format!("path '{path}' does not resolve"))
            })?;
            *slot = replacement;
            Ok(())
        })
    }

    /// Remove the question with the given `nameId`, including its sub-questions.
    pub fn remove_question(&mut self, name_id: &str) -> Result<()> {
        let path = self.require_path(name_id)?;
        let Some(&PathSegment::Index(position)) = path.last() else {
            return Err(SurveyError::MalformedDocument(format!(
                "path '{path}' does not end in a list position"
            )));
        };
        let parent = path.parent();
        self.rebuild_with(|document| {
            let siblings = parent
                .resolve_mut(document)
                .and_then(Value::as_array_mut)
                .filter(|list| position < list.len())
                .ok_or_else(|| {
                    SurveyError::MalformedDocument(format!("path '{path}' does not resolve"))
                })?;
            siblings.remove(position);
            Ok(())
        })
    }

    fn require_path(&self, name_id: &str) -> Result<JsonPath> {
        self.path_of(name_id)
            .cloned()
            .ok_or_else(|| SurveyError::UnknownIdentifier(name_id.to_string()))
    }

    // Edits a copy of the document and swaps it in only once it parses and indexes cleanly.
    fn rebuild_with(&mut self, edit: impl FnOnce(&mut Value) -> Result<()>) -> Result<()> {
        let mut document: Value = serde_json::from_str(&self.full_json_survey)?;
        let rebuilt = edit(&mut document).and_then(|()| Self::from_value(document));
        match rebuilt {
            Ok(survey) => {
                *self = survey;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, title = %self.title, "Rejected survey change");
                Err(err)
            }
        }
    }
}

impl FromStr for Survey {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}
