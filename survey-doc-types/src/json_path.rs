use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// One step of a [`JsonPath`]: an object field or an array position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(s: &str) -> Self {
        Self::Field(s.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

/// A path from the root of a survey document to a node inside it,
/// e.g. `questions.0.value.options.1.subQuestions.0`.
///
/// Segments stay typed while the path is built and navigated. The dot-joined
/// form only appears when the path is displayed or serialized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Create a path from its segments.
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Create an empty path (the document root).
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dot-separated path. Numeric segments become array indices.
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split('.')
            .filter(|s| !s.is_empty())
            .map(|s| match s.parse::<usize>() {
                Ok(i) => PathSegment::Index(i),
                Err(_) => PathSegment::Field(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// Append an object field, returning a new path.
    pub fn field(&self, name: &str) -> Self {
        self.child(PathSegment::Field(name.to_string()))
    }

    /// Append an array index, returning a new path.
    pub fn index(&self, i: usize) -> Self {
        self.child(PathSegment::Index(i))
    }

    /// Append a segment, returning a new path.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Get the segments of this path.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Get the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if this is the root path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Get the last segment, if any.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Get the parent path by removing the last segment.
    pub fn parent(&self) -> Self {
        let mut segments = self.segments.clone();
        segments.pop();
        Self { segments }
    }

    /// Navigate a JSON tree along this path.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(root, |node, segment| match segment {
                PathSegment::Field(name) => node.as_object()?.get(name),
                PathSegment::Index(i) => node.as_array()?.get(*i),
            })
    }

    /// Navigate a JSON tree along this path, mutably.
    pub fn resolve_mut<'a>(&self, root: &'a mut Value) -> Option<&'a mut Value> {
        root.pointer_mut(&self.to_pointer())
    }

    /// Render this path as an RFC 6901 JSON pointer.
    pub fn to_pointer(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                PathSegment::Field(name) => {
                    format!("/{}", name.replace('~', "~0").replace('/', "~1"))
                }
                PathSegment::Index(i) => format!("/{i}"),
            })
            .collect()
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl From<&str> for JsonPath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<Vec<PathSegment>> for JsonPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self::new(segments)
    }
}

impl Serialize for JsonPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for JsonPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_and_displays() {
        let path = JsonPath::root()
            .field("questions")
            .index(0)
            .field("value")
            .field("options")
            .index(1);
        assert_eq!(path.to_string(), "questions.0.value.options.1");
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn root_displays_empty() {
        assert_eq!(JsonPath::root().to_string(), "");
        assert!(JsonPath::root().is_empty());
    }

    #[test]
    fn parse_types_segments() {
        let path = JsonPath::parse("questions.2.label");
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Field("questions".into()),
                PathSegment::Index(2),
                PathSegment::Field("label".into()),
            ]
        );
    }

    #[test]
    fn parent() {
        let path = JsonPath::parse("questions.2.label");
        assert_eq!(path.parent().to_string(), "questions.2");
        assert_eq!(JsonPath::root().parent(), JsonPath::root());
    }

    #[test]
    fn resolve() {
        let doc = json!({"questions": [{"nameId": "a"}, {"nameId": "b"}]});
        let node = JsonPath::parse("questions.1.nameId").resolve(&doc).unwrap();
        assert_eq!(node, "b");

        assert!(JsonPath::parse("questions.5").resolve(&doc).is_none());
        assert!(JsonPath::parse("questions.x").resolve(&doc).is_none());
    }

    #[test]
    fn resolve_mut_matches_resolve() {
        let mut doc = json!({"questions": [{"nameId": "a"}]});
        let path = JsonPath::parse("questions.0.nameId");
        *path.resolve_mut(&mut doc).unwrap() = json!("z");
        assert_eq!(path.resolve(&doc).unwrap(), "z");
    }

    #[test]
    fn pointer_escapes() {
        let path = JsonPath::root().field("a/b").field("c~d").index(3);
        assert_eq!(path.to_pointer(), "/a~1b/c~0d/3");
    }

    #[test]
    fn serde_as_dotted_string() {
        let path = JsonPath::parse("questions.0.value.options.1.subQuestions.0");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"questions.0.value.options.1.subQuestions.0\"");
        let back: JsonPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}
