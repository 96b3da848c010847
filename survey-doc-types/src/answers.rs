use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Answers submitted for a survey, keyed by question `nameId`.
///
/// Each question maps to an ordered list of values. The values are untyped;
/// the checker for the question's type decides what shape is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers {
    values: HashMap<String, Vec<Value>>,
}

impl Answers {
    /// Create a new empty answer set.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Set the answer values for a question, replacing any previous ones.
    pub fn insert<V: Into<Value>>(
        &mut self,
        name_id: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) {
        self.values.insert(
            name_id.into(),
            values.into_iter().map(Into::into).collect(),
        );
    }

    /// Builder form of [`Answers::insert`].
    pub fn with<V: Into<Value>>(
        mut self,
        name_id: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.insert(name_id, values);
        self
    }

    /// Get the answer values for a question.
    pub fn get(&self, name_id: &str) -> Option<&[Value]> {
        self.values.get(name_id).map(Vec::as_slice)
    }

    /// Check if a question has been answered.
    pub fn contains(&self, name_id: &str) -> bool {
        self.values.contains_key(name_id)
    }

    /// Remove the answer for a question.
    pub fn remove(&mut self, name_id: &str) -> Option<Vec<Value>> {
        self.values.remove(name_id)
    }

    /// Get an iterator over all `nameId`-values pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Get the number of answered questions.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge another answer set into this one.
    pub fn extend(&mut self, other: Answers) {
        self.values.extend(other.values);
    }
}

impl From<HashMap<String, Vec<Value>>> for Answers {
    fn from(values: HashMap<String, Vec<Value>>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<Value>)> for Answers {
    fn from_iter<I: IntoIterator<Item = (K, Vec<Value>)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl IntoIterator for Answers {
    type Item = (String, Vec<Value>);
    type IntoIter = std::collections::hash_map::IntoIter<String, Vec<Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Answers {
    type Item = (&'a String, &'a Vec<Value>);
    type IntoIter = std::collections::hash_map::Iter<'a, String, Vec<Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
