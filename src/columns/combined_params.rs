use crate::columns::{Column, ColumnCategory};
use crate::host::case::BenchmarkCase;
use crate::host::params::NULL_PARAMETER_TEXT;
use crate::host::summary::Summary;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PAIR_PLACEHOLDER: Lazy<std::result::Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"\{([01])\}"));

/// All parameters of a case in one column, as an alternative to one column per
/// parameter.
///
/// `format` is applied per parameter with `{0}` replaced by the name and `{1}`
/// by the display value.
#[derive(Debug, Clone)]
pub struct CombinedParamsColumn {
    format: String,
    separator: String,
    prefix: String,
    suffix: String,
}

impl CombinedParamsColumn {
    pub fn new(
        format: impl Into<String>,
        separator: impl Into<String>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            format: format.into(),
            separator: separator.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Fills both placeholders in one pass, so braces in names or values stay as they are
    fn format_pair(&self, name: &str, value: &str) -> String {
        match PAIR_PLACEHOLDER.as_ref() {
            Ok(regex) => regex
                .replace_all(&self.format, |caps: &Captures| {
                    if &caps[1] == "0" {
                        name.to_string()
                    } else {
                        value.to_string()
                    }
                })
                .into_owned(),
            Err(_) => format!("{}={}", name, value),
        }
    }
}

impl Default for CombinedParamsColumn {
    fn default() -> Self {
        Self::new("{0}={1}", ", ", "", "")
    }
}

impl Column for CombinedParamsColumn {
    fn id(&self) -> String {
        format!("CombinedParamsColumn.{}", self.column_name())
    }

    fn column_name(&self) -> String {
        "Params".to_string()
    }

    fn value(&self, _summary: &Summary, case: &BenchmarkCase) -> String {
        if case.parameters.is_empty() {
            return NULL_PARAMETER_TEXT.to_string();
        }
        let pairs: Vec<String> = case
            .parameters
            .items()
            .iter()
            .map(|p| self.format_pair(&p.name, &p.to_display_text()))
            .collect();
        format!("{}{}{}", self.prefix, pairs.join(&self.separator), self.suffix)
    }

    fn category(&self) -> ColumnCategory {
        ColumnCategory::Params
    }

    fn legend(&self) -> String {
        "All parameter values".to_string()
    }
}
