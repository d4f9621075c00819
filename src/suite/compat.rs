//! Suite file shapes accepted across releases.
//!
//! Older suites list plain commands in a `[commands]` table; current suites use
//! `[[benchmark]]` entries. A document is matched against the known shapes in
//! order and the first match is normalised into a [`SuiteDefinition`].

use super::{BenchmarkDefinition, MethodDefinition, SuiteDefinition};
use crate::error::{Result, ToolboxError};
use crate::host::job::Job;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// One accepted layout of a suite document
pub trait SuiteShape: Sync {
    fn name(&self) -> &'static str;

    /// Cheap structural check, `bind` may still fail on bad content
    fn matches(&self, document: &Value) -> bool;

    fn bind(&self, document: Value) -> Result<SuiteDefinition>;
}

pub struct CurrentShape;

#[derive(Deserialize)]
struct CurrentDocument {
    benchmark: Vec<BenchmarkDefinition>,
    #[serde(default)]
    job: Vec<Job>,
}

impl SuiteShape for CurrentShape {
    fn name(&self) -> &'static str {
        "benchmark"
    }

    fn matches(&self, document: &Value) -> bool {
        document.get("benchmark").is_some_and(Value::is_array)
    }

    fn bind(&self, document: Value) -> Result<SuiteDefinition> {
        let doc: CurrentDocument = serde_json::from_value(document)?;
        Ok(SuiteDefinition {
            benchmarks: doc.benchmark,
            jobs: doc.job,
        })
    }
}

/// `name`/`namespace` at the top level and a flat `[commands]` table, one
/// parameterless method per entry
pub struct LegacyCommandsShape;

#[derive(Deserialize)]
struct LegacyDocument {
    #[serde(default = "legacy_type_name")]
    name: String,
    #[serde(default)]
    namespace: String,
    commands: BTreeMap<String, String>,
    #[serde(default)]
    baseline: Option<String>,
}

fn legacy_type_name() -> String {
    "Commands".to_string()
}

impl SuiteShape for LegacyCommandsShape {
    fn name(&self) -> &'static str {
        "commands"
    }

    fn matches(&self, document: &Value) -> bool {
        document.get("commands").is_some_and(Value::is_object)
    }

    fn bind(&self, document: Value) -> Result<SuiteDefinition> {
        let doc: LegacyDocument = serde_json::from_value(document)?;
        let methods = doc
            .commands
            .into_iter()
            .map(|(name, command)| MethodDefinition {
                baseline: doc.baseline.as_deref() == Some(name.as_str()),
                name,
                command,
                categories: Vec::new(),
            })
            .collect();
        Ok(SuiteDefinition {
            benchmarks: vec![BenchmarkDefinition {
                type_name: doc.name,
                namespace: doc.namespace,
                categories: Vec::new(),
                params: Vec::new(),
                methods,
            }],
            jobs: Vec::new(),
        })
    }
}

static SHAPES: [&dyn SuiteShape; 2] = [&CurrentShape, &LegacyCommandsShape];

/// Binds the document to the first matching shape
pub fn negotiate(document: Value) -> Result<SuiteDefinition> {
    for shape in SHAPES {
        if shape.matches(&document) {
            debug!(shape = shape.name(), "suite shape matched");
            return shape.bind(document);
        }
    }
    let tried: Vec<&str> = SHAPES.iter().map(|s| s.name()).collect();
    Err(ToolboxError::MissingMethod(format!(
        "suite document matches no known shape (tried: {})",
        tried.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_current_shape() {
        let doc = json!({"benchmark": [{"type": "A", "methods": []}], "job": [{"id": "J"}]});
        let suite = negotiate(doc).unwrap();
        assert_eq!(suite.benchmarks[0].type_name, "A");
        assert_eq!(suite.jobs[0].id, "J");
    }

    #[test]
    fn test_legacy_shape() {
        let doc = json!({
            "name": "Tools",
            "baseline": "grep",
            "commands": {"rg": "rg foo", "grep": "grep foo"}
        });
        let suite = negotiate(doc).unwrap();
        let tools = &suite.benchmarks[0];
        assert_eq!(tools.type_name, "Tools");
        assert_eq!(tools.methods.len(), 2);
        assert!(tools.method("grep").unwrap().baseline);
        assert!(!tools.method("rg").unwrap().baseline);
    }

    #[test]
    fn test_legacy_default_name() {
        let suite = negotiate(json!({"commands": {"a": "true"}})).unwrap();
        assert_eq!(suite.benchmarks[0].type_name, "Commands");
    }

    #[test]
    fn test_unknown_shape_is_missing_method() {
        let err = negotiate(json!({"tests": []})).unwrap_err();
        match err {
            ToolboxError::MissingMethod(msg) => assert!(msg.contains("benchmark, commands")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_matching_shape_with_bad_content_fails() {
        assert!(negotiate(json!({"benchmark": [{"methods": []}]})).is_err());
    }
}
