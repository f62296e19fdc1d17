use indexmap::IndexMap;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::ParseError;

const PATHS: &str = "paths";
const OPERATION_ID: &str = "operationId";
const TAGS: &str = "tags";

/// Path item keys that hold an operation object.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Whether a path item key names an HTTP method (case-insensitive).
pub fn is_http_method(key: &str) -> bool {
    HTTP_METHODS
        .iter()
        .any(|method| method.eq_ignore_ascii_case(key))
}

/// A Swagger 2.0 document.
///
/// Only `paths` is modeled. Every other top-level member is carried through
/// untouched, and serialization keeps the original member order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "IndexMap<String, Value>")]
pub struct SwaggerDocument {
    pub paths: IndexMap<String, PathItem>,
    members: IndexMap<String, Value>,
}

impl SwaggerDocument {
    pub fn new(paths: IndexMap<String, PathItem>) -> Self {
        let mut members = IndexMap::new();
        members.insert(PATHS.to_string(), Value::Null);
        Self { paths, members }
    }

    /// A top-level member other than `paths`.
    pub fn member(&self, key: &str) -> Option<&Value> {
        if key == PATHS {
            return None;
        }
        self.members.get(key)
    }

    /// Iterate every `(path, method, operation)` triple in document order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &str, &Operation)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.operations()
                .map(move |(method, operation)| (path.as_str(), method, operation))
        })
    }
}

impl TryFrom<IndexMap<String, Value>> for SwaggerDocument {
    type Error = serde_json::Error;

    fn try_from(mut members: IndexMap<String, Value>) -> Result<Self, Self::Error> {
        let slot = members
            .get_mut(PATHS)
            .ok_or_else(|| serde_json::Error::missing_field(PATHS))?;
        let paths = serde_json::from_value(slot.take())?;
        Ok(Self { paths, members })
    }
}

impl Serialize for SwaggerDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.members.len()))?;
        for (key, value) in &self.members {
            if key == PATHS {
                map.serialize_entry(key, &self.paths)?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

/// A path item: HTTP methods mapped to operations, alongside any other
/// members such as shared `parameters`, `$ref` or `x-` extensions.
/// A `null` path item reads as an empty one.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "Option<IndexMap<String, Value>>")]
pub struct PathItem {
    entries: IndexMap<String, PathEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathEntry {
    Operation(Operation),
    Other(Value),
}

impl PathItem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation under the given method key.
    pub fn with_operation(mut self, method: impl Into<String>, operation: Operation) -> Self {
        self.entries
            .insert(method.into(), PathEntry::Operation(operation));
        self
    }

    /// True when the path item has no members at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn operation(&self, method: &str) -> Option<&Operation> {
        match self.entries.get(method) {
            Some(PathEntry::Operation(operation)) => Some(operation),
            _ => None,
        }
    }

    pub fn operations(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.entries.iter().filter_map(|(key, entry)| match entry {
            PathEntry::Operation(operation) => Some((key.as_str(), operation)),
            PathEntry::Other(_) => None,
        })
    }

    pub fn operations_mut(&mut self) -> impl Iterator<Item = (&str, &mut Operation)> {
        self.entries.iter_mut().filter_map(|(key, entry)| match entry {
            PathEntry::Operation(operation) => Some((key.as_str(), operation)),
            PathEntry::Other(_) => None,
        })
    }
}

impl TryFrom<IndexMap<String, Value>> for PathItem {
    type Error = serde_json::Error;

    fn try_from(members: IndexMap<String, Value>) -> Result<Self, Self::Error> {
        let entries = members
            .into_iter()
            .map(|(key, value)| {
                let entry = if is_http_method(&key) {
                    PathEntry::Operation(serde_json::from_value(value)?)
                } else {
                    PathEntry::Other(value)
                };
                Ok::<_, serde_json::Error>((key, entry))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { entries })
    }
}

impl TryFrom<Option<IndexMap<String, Value>>> for PathItem {
    type Error = serde_json::Error;

    fn try_from(members: Option<IndexMap<String, Value>>) -> Result<Self, Self::Error> {
        match members {
            Some(members) => Self::try_from(members),
            None => Ok(Self::default()),
        }
    }
}

impl Serialize for PathItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

/// An operation object. `operationId` and `tags` are typed; all other
/// members pass through. A newly assigned `operationId` is emitted after
/// the existing members.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "IndexMap<String, Value>")]
pub struct Operation {
    pub operation_id: Option<String>,
    pub tags: Option<Vec<String>>,
    members: IndexMap<String, Value>,
}

impl Operation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// The first tag, if it is present and non-empty.
    pub fn first_tag(&self) -> Option<&str> {
        self.tags
            .as_ref()
            .and_then(|tags| tags.first())
            .map(String::as_str)
            .filter(|tag| !tag.is_empty())
    }

    /// A pass-through member such as `summary` or `responses`.
    pub fn member(&self, key: &str) -> Option<&Value> {
        match key {
            OPERATION_ID | TAGS => None,
            _ => self.members.get(key),
        }
    }
}

impl TryFrom<IndexMap<String, Value>> for Operation {
    type Error = serde_json::Error;

    fn try_from(mut members: IndexMap<String, Value>) -> Result<Self, Self::Error> {
        let operation_id = match members.get_mut(OPERATION_ID) {
            Some(slot) => serde_json::from_value(slot.take())?,
            None => None,
        };
        let tags = match members.get_mut(TAGS) {
            Some(slot) => serde_json::from_value(slot.take())?,
            None => None,
        };
        Ok(Self {
            operation_id,
            tags,
            members,
        })
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.members {
            match key.as_str() {
                OPERATION_ID => {
                    if let Some(operation_id) = &self.operation_id {
                        map.serialize_entry(key, operation_id)?;
                    }
                }
                TAGS => {
                    if let Some(tags) = &self.tags {
                        map.serialize_entry(key, tags)?;
                    }
                }
                _ => map.serialize_entry(key, value)?,
            }
        }
        if !self.members.contains_key(TAGS) {
            if let Some(tags) = &self.tags {
                map.serialize_entry(TAGS, tags)?;
            }
        }
        if !self.members.contains_key(OPERATION_ID) {
            if let Some(operation_id) = &self.operation_id {
                map.serialize_entry(OPERATION_ID, operation_id)?;
            }
        }
        map.end()
    }
}

/// Parse a Swagger document from JSON.
pub fn from_json(input: &str) -> Result<SwaggerDocument, ParseError> {
    Ok(serde_json::from_str(input)?)
}

/// Render a document as JSON with a two-space indent.
pub fn to_json_pretty(document: &SwaggerDocument) -> Result<String, ParseError> {
    Ok(serde_json::to_string_pretty(document)?)
}
