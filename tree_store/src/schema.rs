//! Strict schema validation for stored trees
//!
//! Stored JSON is untrusted input: it may come from an older build, a
//! hand-edited state directory, or a different tool entirely. Decoding
//! walks the raw value field by field and rejects anything that does not
//! match the persisted shape exactly — unknown fields, missing fields,
//! wrong types, malformed timestamps, unknown node tags. Every error
//! carries a JSONPath-style location so a bad byte in a deep subtree is
//! reportable without a debugger.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::persisted::{PersistedFile, PersistedFolder, PersistedNode};

/// Fields a persisted file node must carry, and no others.
const FILE_FIELDS: [&str; 7] = [
    "type",
    "name",
    "parent",
    "createdAt",
    "lastModified",
    "renaming",
    "content",
];

/// Fields a persisted folder node must carry, and no others.
const FOLDER_FIELDS: [&str; 8] = [
    "type",
    "name",
    "parent",
    "createdAt",
    "lastModified",
    "renaming",
    "expand",
    "children",
];

/// Why a stored tree was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The bytes were not valid JSON at all.
    #[error("invalid JSON: {0}")]
    Json(String),
    /// A node position held something other than an object.
    #[error("expected an object at {at}")]
    NotAnObject { at: String },
    /// A required field was absent.
    #[error("missing field `{field}` at {at}")]
    MissingField { at: String, field: &'static str },
    /// A field outside the persisted shape was present.
    #[error("unknown field `{field}` at {at}")]
    UnknownField { at: String, field: String },
    /// A field held a value of the wrong type.
    #[error("field `{field}` at {at} must be {expected}")]
    InvalidField {
        at: String,
        field: &'static str,
        expected: &'static str,
    },
    /// The `type` tag was neither `file` nor `folder`.
    #[error("unknown node type `{found}` at {at}")]
    UnknownNodeType { at: String, found: String },
    /// A timestamp field did not parse as RFC 3339.
    #[error("field `{field}` at {at} holds invalid timestamp `{value}`")]
    InvalidTimestamp {
        at: String,
        field: &'static str,
        value: String,
    },
    /// Two children of one folder shared a name.
    #[error("duplicate child `{name}` in folder `{folder}`")]
    DuplicateChild { folder: String, name: String },
    /// The root of the stored tree was a file.
    #[error("root node must be a folder")]
    RootNotFolder,
}

/// Decodes stored bytes into a validated [`PersistedNode`].
///
/// Rejects rather than repairs: any deviation from the persisted shape
/// fails the whole decode, and the caller decides whether to fall back
/// to a fresh tree.
pub fn decode_tree(bytes: &[u8]) -> Result<PersistedNode, SchemaError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|err| SchemaError::Json(err.to_string()))?;
    parse_node(&value, "$")
}

fn parse_node(value: &Value, at: &str) -> Result<PersistedNode, SchemaError> {
    let map = value.as_object().ok_or_else(|| SchemaError::NotAnObject {
        at: at.to_string(),
    })?;
    match require_str(map, at, "type")? {
        "file" => {
            check_fields(map, at, &FILE_FIELDS)?;
            Ok(PersistedNode::File(PersistedFile {
                name: require_str(map, at, "name")?.to_string(),
                parent: require_nullable_str(map, at, "parent")?,
                created_at: require_timestamp(map, at, "createdAt")?,
                last_modified: require_timestamp(map, at, "lastModified")?,
                renaming: require_bool(map, at, "renaming")?,
                content: require_str(map, at, "content")?.to_string(),
            }))
        }
        "folder" => {
            check_fields(map, at, &FOLDER_FIELDS)?;
            let raw_children = require_array(map, at, "children")?;
            let mut children = Vec::with_capacity(raw_children.len());
            for (index, child) in raw_children.iter().enumerate() {
                children.push(parse_node(child, &format!("{at}.children[{index}]"))?);
            }
            Ok(PersistedNode::Folder(PersistedFolder {
                name: require_str(map, at, "name")?.to_string(),
                parent: require_nullable_str(map, at, "parent")?,
                created_at: require_timestamp(map, at, "createdAt")?,
                last_modified: require_timestamp(map, at, "lastModified")?,
                renaming: require_bool(map, at, "renaming")?,
                expand: require_bool(map, at, "expand")?,
                children,
            }))
        }
        found => Err(SchemaError::UnknownNodeType {
            at: at.to_string(),
            found: found.to_string(),
        }),
    }
}

fn check_fields(
    map: &Map<String, Value>,
    at: &str,
    allowed: &[&str],
) -> Result<(), SchemaError> {
    for field in map.keys() {
        if !allowed.contains(&field.as_str()) {
            return Err(SchemaError::UnknownField {
                at: at.to_string(),
                field: field.clone(),
            });
        }
    }
    Ok(())
}

fn require<'a>(
    map: &'a Map<String, Value>,
    at: &str,
    field: &'static str,
) -> Result<&'a Value, SchemaError> {
    map.get(field).ok_or_else(|| SchemaError::MissingField {
        at: at.to_string(),
        field,
    })
}

fn require_str<'a>(
    map: &'a Map<String, Value>,
    at: &str,
    field: &'static str,
) -> Result<&'a str, SchemaError> {
    require(map, at, field)?
        .as_str()
        .ok_or_else(|| SchemaError::InvalidField {
            at: at.to_string(),
            field,
            expected: "a string",
        })
}

fn require_nullable_str(
    map: &Map<String, Value>,
    at: &str,
    field: &'static str,
) -> Result<Option<String>, SchemaError> {
    match require(map, at, field)? {
        Value::Null => Ok(None),
        Value::String(value) => Ok(Some(value.clone())),
        _ => Err(SchemaError::InvalidField {
            at: at.to_string(),
            field,
            expected: "a string or null",
        }),
    }
}

fn require_bool(
    map: &Map<String, Value>,
    at: &str,
    field: &'static str,
) -> Result<bool, SchemaError> {
    require(map, at, field)?
        .as_bool()
        .ok_or_else(|| SchemaError::InvalidField {
            at: at.to_string(),
            field,
            expected: "a boolean",
        })
}

fn require_array<'a>(
    map: &'a Map<String, Value>,
    at: &str,
    field: &'static str,
) -> Result<&'a Vec<Value>, SchemaError> {
    require(map, at, field)?
        .as_array()
        .ok_or_else(|| SchemaError::InvalidField {
            at: at.to_string(),
            field,
            expected: "an array",
        })
}

fn require_timestamp(
    map: &Map<String, Value>,
    at: &str,
    field: &'static str,
) -> Result<DateTime<Utc>, SchemaError> {
    let raw = require_str(map, at, field)?;
    raw.parse::<DateTime<Utc>>()
        .map_err(|_| SchemaError::InvalidTimestamp {
            at: at.to_string(),
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_file(name: &str) -> Value {
        json!({
            "type": "file",
            "name": name,
            "parent": "/",
            "createdAt": "2023-01-01T00:00:00Z",
            "lastModified": "2023-01-01T00:00:00Z",
            "renaming": false,
            "content": "hello"
        })
    }

    fn valid_root(children: Vec<Value>) -> Value {
        json!({
            "type": "folder",
            "name": "/",
            "parent": null,
            "createdAt": "2023-01-01T00:00:00Z",
            "lastModified": "2023-01-02T00:00:00Z",
            "renaming": false,
            "expand": true,
            "children": children
        })
    }

    fn decode(value: &Value) -> Result<PersistedNode, SchemaError> {
        decode_tree(value.to_string().as_bytes())
    }

    #[test]
    fn test_decode_valid_tree() {
        let root = decode(&valid_root(vec![valid_file("a.txt")])).unwrap();
        let folder = root.as_folder().unwrap();
        assert_eq!(folder.name, "/");
        assert!(folder.expand);
        assert_eq!(folder.children.len(), 1);
        assert_eq!(folder.children[0].name(), "a.txt");
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(matches!(
            decode_tree(b"{not json"),
            Err(SchemaError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_non_object_nodes() {
        let err = decode(&valid_root(vec![json!(42)])).unwrap_err();
        assert_eq!(
            err,
            SchemaError::NotAnObject {
                at: "$.children[0]".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_missing_field() {
        let mut file = valid_file("a.txt");
        file.as_object_mut().unwrap().remove("content");
        let err = decode(&valid_root(vec![file])).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingField {
                at: "$.children[0]".to_string(),
                field: "content"
            }
        );
    }

    #[test]
    fn test_rejects_unknown_field() {
        let mut file = valid_file("a.txt");
        file.as_object_mut()
            .unwrap()
            .insert("color".to_string(), json!("red"));
        let err = decode(&valid_root(vec![file])).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownField {
                at: "$.children[0]".to_string(),
                field: "color".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_wrong_field_type() {
        let mut file = valid_file("a.txt");
        file.as_object_mut()
            .unwrap()
            .insert("renaming".to_string(), json!("yes"));
        let err = decode(&valid_root(vec![file])).unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidField {
                at: "$.children[0]".to_string(),
                field: "renaming",
                expected: "a boolean"
            }
        );
    }

    #[test]
    fn test_rejects_unknown_node_type() {
        let mut file = valid_file("a.txt");
        file.as_object_mut()
            .unwrap()
            .insert("type".to_string(), json!("symlink"));
        let err = decode(&valid_root(vec![file])).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownNodeType {
                at: "$.children[0]".to_string(),
                found: "symlink".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_malformed_timestamp() {
        let mut file = valid_file("a.txt");
        file.as_object_mut()
            .unwrap()
            .insert("createdAt".to_string(), json!("yesterday"));
        let err = decode(&valid_root(vec![file])).unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidTimestamp {
                at: "$.children[0]".to_string(),
                field: "createdAt",
                value: "yesterday".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_folder_without_expand() {
        let mut root = valid_root(vec![]);
        root.as_object_mut().unwrap().remove("expand");
        let err = decode(&root).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingField {
                at: "$".to_string(),
                field: "expand"
            }
        );
    }

    #[test]
    fn test_file_may_not_carry_children() {
        let mut file = valid_file("a.txt");
        file.as_object_mut()
            .unwrap()
            .insert("children".to_string(), json!([]));
        let err = decode(&valid_root(vec![file])).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownField {
                at: "$.children[0]".to_string(),
                field: "children".to_string()
            }
        );
    }

    #[test]
    fn test_error_location_reaches_into_nested_folders() {
        let nested = json!({
            "type": "folder",
            "name": "src",
            "parent": "/",
            "createdAt": "2023-01-01T00:00:00Z",
            "lastModified": "2023-01-01T00:00:00Z",
            "renaming": false,
            "expand": false,
            "children": [json!("oops")]
        });
        let err = decode(&valid_root(vec![nested])).unwrap_err();
        assert_eq!(
            err,
            SchemaError::NotAnObject {
                at: "$.children[0].children[0]".to_string()
            }
        );
    }
}
