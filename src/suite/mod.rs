//! Benchmark suite files.
//!
//! A suite describes benchmark types, their parameters and methods, and the jobs
//! to run them with. Files are TOML, or JSON when the extension is `.json`.
//!
//! ```toml
//! [[benchmark]]
//! type = "Sorting"
//! namespace = "algos"
//! categories = ["cpu"]
//!
//! [[benchmark.params]]
//! name = "size"
//! values = [100, { value = 10000, display = "10k" }]
//!
//! [[benchmark.methods]]
//! name = "Quick"
//! command = "./sort --quick {size}"
//! baseline = true
//!
//! [[job]]
//! id = "Short"
//! iteration_count = 3
//! ```

pub mod compat;

use crate::error::{Result, ToolboxError};
use crate::host::job::Job;
use crate::host::params::{ParamWrapper, ParameterInstance, ParameterInstances};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A plain parameter value as written in the suite file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// A parameter value, optionally with the text shown in summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Labeled { value: Scalar, display: String },
    Plain(Scalar),
}

impl ParamValue {
    pub fn to_wrapper(&self) -> ParamWrapper<String> {
        match self {
            ParamValue::Labeled { value, display } => {
                ParamWrapper::new(value.to_string(), Some(display.clone()))
            }
            ParamValue::Plain(value) => ParamWrapper::new(value.to_string(), None),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDefinition {
    pub name: String,
    pub values: Vec<ParamValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDefinition {
    pub name: String,
    /// Shell command, `{param}` placeholders are replaced by raw parameter values
    pub command: String,
    #[serde(default)]
    pub baseline: bool,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// A benchmark type: a group of methods sharing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkDefinition {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub params: Vec<ParamDefinition>,
    #[serde(default)]
    pub methods: Vec<MethodDefinition>,
}

impl BenchmarkDefinition {
    pub fn method(&self, name: &str) -> Option<&MethodDefinition> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Every combination of parameter values, first parameter varying slowest
    pub fn parameter_combinations(&self) -> Vec<ParameterInstances> {
        let mut combinations: Vec<Vec<ParameterInstance>> = vec![Vec::new()];
        for param in &self.params {
            let mut next = Vec::with_capacity(combinations.len() * param.values.len());
            for prefix in &combinations {
                for value in &param.values {
                    let mut items = prefix.clone();
                    items.push(ParameterInstance::new(&param.name, Some(value.to_wrapper())));
                    next.push(items);
                }
            }
            combinations = next;
        }
        combinations.into_iter().map(ParameterInstances::new).collect()
    }

    fn validate(&self) -> Result<()> {
        if self.type_name.trim().is_empty() {
            return Err(ToolboxError::InvalidArgument(
                "benchmark type name must not be empty".to_string(),
            ));
        }
        for method in &self.methods {
            if method.name.trim().is_empty() {
                return Err(ToolboxError::InvalidArgument(format!(
                    "method without name in benchmark type '{}'",
                    self.type_name
                )));
            }
        }
        for param in &self.params {
            if param.values.is_empty() {
                return Err(ToolboxError::InvalidArgument(format!(
                    "parameter '{}' of '{}' has no values",
                    param.name, self.type_name
                )));
            }
        }
        Ok(())
    }
}

/// Suite contents, independent of the file shape it was read from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuiteDefinition {
    pub benchmarks: Vec<BenchmarkDefinition>,
    pub jobs: Vec<Job>,
}

/// Text format of a suite file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteFormat {
    Toml,
    Json,
}

impl SuiteFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SuiteFormat::Json,
            _ => SuiteFormat::Toml,
        }
    }
}

impl SuiteDefinition {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading suite");
        Self::parse(&text, SuiteFormat::from_path(path))
    }

    pub fn parse(text: &str, format: SuiteFormat) -> Result<Self> {
        let document: serde_json::Value = match format {
            SuiteFormat::Json => serde_json::from_str(text)?,
            SuiteFormat::Toml => {
                let value: toml::Value = toml::from_str(text)?;
                serde_json::to_value(value)?
            }
        };
        let suite = compat::negotiate(document)?;
        for benchmark in &suite.benchmarks {
            benchmark.validate()?;
        }
        Ok(suite)
    }

    pub fn benchmark(&self, type_name: &str) -> Option<&BenchmarkDefinition> {
        self.benchmarks.iter().find(|b| b.type_name == type_name)
    }
}
