use crate::columns::ColumnCategory;
use std::fmt;

/// Column category used for filtering.
///
/// Adds `Unknown` and splits `TargetMethod` and `Category` off the table's `Job`
/// group, so removing job columns keeps method names and benchmark categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExtendedCategory {
    Unknown,
    TargetMethod,
    Category,
    Job,
    Params,
    Statistics,
    Baseline,
    Custom,
    Meta,
    Metric,
}

impl From<ColumnCategory> for ExtendedCategory {
    fn from(category: ColumnCategory) -> Self {
        match category {
            ColumnCategory::Job => ExtendedCategory::Job,
            ColumnCategory::Params => ExtendedCategory::Params,
            ColumnCategory::Statistics => ExtendedCategory::Statistics,
            ColumnCategory::Baseline => ExtendedCategory::Baseline,
            ColumnCategory::Custom => ExtendedCategory::Custom,
            ColumnCategory::Meta => ExtendedCategory::Meta,
            ColumnCategory::Metric => ExtendedCategory::Metric,
        }
    }
}

impl ExtendedCategory {
    /// Parse a category name (case-insensitive), as used on the command line
    pub fn parse(name: &str) -> Option<Self> {
        let category = match name.to_lowercase().as_str() {
            "targetmethod" | "method" => ExtendedCategory::TargetMethod,
            "category" | "categories" => ExtendedCategory::Category,
            "job" => ExtendedCategory::Job,
            "params" => ExtendedCategory::Params,
            "statistics" => ExtendedCategory::Statistics,
            "baseline" => ExtendedCategory::Baseline,
            "custom" => ExtendedCategory::Custom,
            "meta" => ExtendedCategory::Meta,
            "metric" | "metrics" => ExtendedCategory::Metric,
            _ => return None,
        };
        Some(category)
    }
}

impl fmt::Display for ExtendedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
