//! # Payload Paths
//!
//! A [`JsonPath`] locates a node inside a JSON payload as a sequence of
//! object keys and array indices. It renders with `.` between keys and
//! `[n]` for indices, with no leading separator:
//!
//! ```
//! use shapegate_core::JsonPath;
//!
//! let path = JsonPath::root().key("materials").index(0).key("material");
//! assert_eq!(path.to_string(), "materials[0].material");
//! ```

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

/// One step into a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object member name.
    Key(String),
    /// Array position.
    Index(usize),
}

/// Location of a node inside a JSON document, from the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPath(Vec<PathSegment>);

impl JsonPath {
    /// The empty path, pointing at the document root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// This path extended by an object key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.into()));
        Self(segments)
    }

    /// This path extended by an array index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// The segments from the root outwards.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Whether this path points at the root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Build a path from an RFC 6901 JSON Pointer, using `document` to tell
    /// array indices from object keys that happen to be numeric.
    ///
    /// Segments past the point where the pointer leaves `document` are kept
    /// as keys.
    pub fn from_pointer(pointer: &str, document: &Value) -> Self {
        let mut segments = Vec::new();
        let mut node = Some(document);
        for raw in pointer.split('/').skip(1) {
            let token = raw.replace("~1", "/").replace("~0", "~");
            match node {
                Some(Value::Array(items)) => match token.parse::<usize>() {
                    Ok(i) => {
                        node = items.get(i);
                        segments.push(PathSegment::Index(i));
                    }
                    Err(_) => {
                        node = None;
                        segments.push(PathSegment::Key(token));
                    }
                },
                Some(Value::Object(map)) => {
                    node = map.get(&token);
                    segments.push(PathSegment::Key(token));
                }
                _ => {
                    node = None;
                    segments.push(PathSegment::Key(token));
                }
            }
        }
        Self(segments)
    }
}

impl From<Vec<PathSegment>> for JsonPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for JsonPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
