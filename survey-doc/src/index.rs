use std::collections::BTreeMap;

use crate::{JsonPath, Question, Result, SurveyError};

/// Field holding the top-level question list of a survey document.
pub const QUESTIONS_KEY: &str = "questions";

/// Flat lookup from question `nameId` to its location in the survey JSON,
/// plus the `nameId`s that must be answered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameIdIndex {
    paths: BTreeMap<String, JsonPath>,
    required: Vec<String>,
}

impl NameIdIndex {
    /// Get the path of a question.
    pub fn get(&self, name_id: &str) -> Option<&JsonPath> {
        self.paths.get(name_id)
    }

    /// Get all `nameId` to path entries.
    pub fn paths(&self) -> &BTreeMap<String, JsonPath> {
        &self.paths
    }

    /// Get the required `nameId`s in traversal order.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Split into the path map and the required list.
    pub fn into_parts(self) -> (BTreeMap<String, JsonPath>, Vec<String>) {
        (self.paths, self.required)
    }
}

/// Walk the question tree once and index every `nameId`.
///
/// Top-level question `i` lives at `questions.i`; nested questions extend
/// that path through their option and sub-question positions. The first
/// repeated `nameId` aborts the build.
pub fn build_index(questions: &[Question]) -> Result<NameIdIndex> {
    let root = JsonPath::root().field(QUESTIONS_KEY);
    let mut index = NameIdIndex::default();

    for (i, question) in questions.iter().enumerate() {
        for entry in question.name_id_paths(&root.index(i)) {
            if index.paths.contains_key(&entry.name_id) {
                return Err(SurveyError::DuplicateIdentifier(entry.name_id));
            }
            if entry.required {
                index.required.push(entry.name_id.clone());
            }
            index.paths.insert(entry.name_id, entry.path);
        }
    }

    tracing::debug!(
        name_ids = index.paths.len(),
        required = index.required.len(),
        "Built nameId index"
    );
    Ok(index)
}
