//! Application annotations
//!
//! Callers attach annotations to an [`AppDraft`](crate::AppDraft) as an open
//! map of [`AnnotationValue`]s. Only the subnet list is interpreted, and only
//! at create time. What the service reports back lives in
//! [`ObservedAnnotations`], a separate type.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Subnets used to place the function runtime
pub const ANNOTATION_SUBNET: &str = "oracle.com/oci/subnetIds";

/// Compartment the application lives in (output only)
pub const ANNOTATION_COMPARTMENT_ID: &str = "oracle.com/oci/compartmentId";

/// Caller-supplied annotation map
pub type Annotations = BTreeMap<String, AnnotationValue>;

/// A single annotation value
///
/// Deserializes from any JSON value. Arrays made only of strings become
/// `StringList`; any other array becomes `List`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    StringList(Vec<String>),
    List(Vec<AnnotationValue>),
    Map(BTreeMap<String, AnnotationValue>),
}

impl AnnotationValue {
    /// The value as a list of strings, if it is one
    #[must_use]
    pub fn as_string_list(&self) -> Option<Vec<String>> {
        match self {
            AnnotationValue::StringList(items) => Some(items.clone()),
            AnnotationValue::List(items) => items
                .iter()
                .map(|item| match item {
                    AnnotationValue::String(s) => Some(s.clone()),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }

    fn is_list(&self) -> bool {
        matches!(self, AnnotationValue::StringList(_) | AnnotationValue::List(_))
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        AnnotationValue::String(value.to_string())
    }
}

impl From<Vec<String>> for AnnotationValue {
    fn from(value: Vec<String>) -> Self {
        AnnotationValue::StringList(value)
    }
}

impl From<serde_json::Value> for AnnotationValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => AnnotationValue::Null,
            serde_json::Value::Bool(b) => AnnotationValue::Bool(b),
            serde_json::Value::Number(n) => AnnotationValue::Number(n),
            serde_json::Value::String(s) => AnnotationValue::String(s),
            serde_json::Value::Array(items) => {
                if items.iter().all(serde_json::Value::is_string) {
                    AnnotationValue::StringList(
                        items
                            .into_iter()
                            .filter_map(|item| match item {
                                serde_json::Value::String(s) => Some(s),
                                _ => None,
                            })
                            .collect(),
                    )
                } else {
                    AnnotationValue::List(items.into_iter().map(Self::from).collect())
                }
            }
            serde_json::Value::Object(map) => {
                AnnotationValue::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// Extract the desired subnet IDs from caller annotations
///
/// Any malformed element rejects the whole annotation.
pub fn parse_subnet_ids(annotations: &Annotations) -> Result<Vec<String>> {
    if annotations.is_empty() {
        return Err(AppError::InvalidConfiguration(
            "missing subnets annotation".to_string(),
        ));
    }

    let value = annotations.get(ANNOTATION_SUBNET).ok_or_else(|| {
        AppError::InvalidConfiguration("missing subnets annotation".to_string())
    })?;

    if !value.is_list() {
        return Err(AppError::InvalidConfiguration(format!(
            "invalid subnets annotation: {ANNOTATION_SUBNET} must be a list"
        )));
    }

    value.as_string_list().ok_or_else(|| {
        AppError::InvalidConfiguration(format!(
            "invalid subnets annotation: every {ANNOTATION_SUBNET} entry must be a string"
        ))
    })
}

/// Annotations reported by the service for an existing application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedAnnotations {
    #[serde(rename = "oracle.com/oci/subnetIds")]
    pub subnet_ids: Vec<String>,
    #[serde(rename = "oracle.com/oci/compartmentId")]
    pub compartment_id: String,
}

impl ObservedAnnotations {
    /// Render as a generic annotation map
    #[must_use]
    pub fn to_map(&self) -> Annotations {
        Annotations::from([
            (
                ANNOTATION_SUBNET.to_string(),
                AnnotationValue::StringList(self.subnet_ids.clone()),
            ),
            (
                ANNOTATION_COMPARTMENT_ID.to_string(),
                AnnotationValue::String(self.compartment_id.clone()),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn annotations(value: serde_json::Value) -> Annotations {
        Annotations::from([(ANNOTATION_SUBNET.to_string(), AnnotationValue::from(value))])
    }

    #[test]
    fn test_parse_subnet_ids() {
        let ids = parse_subnet_ids(&annotations(json!(["a", "b"]))).unwrap();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);

        // Order is preserved
        let ids = parse_subnet_ids(&annotations(json!(["z", "a", "m"]))).unwrap();
        assert_eq!(ids, vec!["z", "a", "m"]);

        // An empty list is still a list
        let ids = parse_subnet_ids(&annotations(json!([]))).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_parse_subnet_ids_rejects_malformed_input() {
        // No annotations at all
        assert!(matches!(
            parse_subnet_ids(&Annotations::new()),
            Err(AppError::InvalidConfiguration(_))
        ));

        // Subnet key missing
        let other = Annotations::from([("team".to_string(), AnnotationValue::from("infra"))]);
        assert!(matches!(
            parse_subnet_ids(&other),
            Err(AppError::InvalidConfiguration(_))
        ));

        // Not a list
        assert!(matches!(
            parse_subnet_ids(&annotations(json!("x"))),
            Err(AppError::InvalidConfiguration(_))
        ));

        // Non-string elements
        assert!(matches!(
            parse_subnet_ids(&annotations(json!([1, 2]))),
            Err(AppError::InvalidConfiguration(_))
        ));

        // A single bad element rejects the whole list
        assert!(matches!(
            parse_subnet_ids(&annotations(json!(["a", null, "b"]))),
            Err(AppError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_string_only_list_built_by_hand() {
        let value = AnnotationValue::List(vec![
            AnnotationValue::from("a"),
            AnnotationValue::from("b"),
        ]);
        let map = Annotations::from([(ANNOTATION_SUBNET.to_string(), value)]);
        assert_eq!(parse_subnet_ids(&map).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_deserialize_annotation_values() {
        let map: Annotations = serde_json::from_value(json!({
            "oracle.com/oci/subnetIds": ["s1", "s2"],
            "mixed": ["s1", 2],
            "flag": true,
            "name": "x"
        }))
        .unwrap();

        assert_eq!(
            map[ANNOTATION_SUBNET],
            AnnotationValue::StringList(vec!["s1".to_string(), "s2".to_string()])
        );
        assert!(matches!(map["mixed"], AnnotationValue::List(_)));
        assert_eq!(map["flag"], AnnotationValue::Bool(true));
        assert_eq!(map["name"], AnnotationValue::String("x".to_string()));
    }

    #[test]
    fn test_observed_annotations_to_map() {
        let observed = ObservedAnnotations {
            subnet_ids: vec!["s1".to_string()],
            compartment_id: "c1".to_string(),
        };

        let map = observed.to_map();
        assert_eq!(
            map[ANNOTATION_SUBNET],
            AnnotationValue::StringList(vec!["s1".to_string()])
        );
        assert_eq!(
            map[ANNOTATION_COMPARTMENT_ID],
            AnnotationValue::String("c1".to_string())
        );
    }
}
