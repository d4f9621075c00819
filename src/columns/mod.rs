pub mod builtin;
pub mod category;
pub mod combined_params;
pub mod job_selection;
pub mod recyclable;

use crate::host::case::BenchmarkCase;
use crate::host::summary::Summary;
use std::fmt;

pub use builtin::{
    BaselineColumn, BaselineRatioColumn, CategoriesColumn, JobCharacteristicColumn, MetricColumn,
    ParamColumn, StatisticColumn, StatisticKind, TargetMethodColumn, TargetMethodPart,
};
pub use category::ExtendedCategory;
pub use combined_params::CombinedParamsColumn;
pub use job_selection::{JobCharacteristicColumnWithLegend, JobColumnSelectionProvider};
pub use recyclable::{RecyclableParamColumn, RecyclableParamsColumnProvider};

/// Semantic group of a column as the summary table sees it.
///
/// Declaration order is the order of column groups in the rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnCategory {
    Job,
    Params,
    Statistics,
    Baseline,
    Custom,
    Meta,
    Metric,
}

impl fmt::Display for ColumnCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Kind of value a column displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitType {
    Dimensionless,
    Time,
    Size,
}

/// Renders one field of a benchmark result row as display text
pub trait Column {
    /// Unique identifier, also used to de-duplicate columns in a table
    fn id(&self) -> String;

    /// Header text
    fn column_name(&self) -> String;

    fn value(&self, summary: &Summary, case: &BenchmarkCase) -> String;

    /// A column whose value is the default for every row is hidden
    fn is_default(&self, _summary: &Summary, _case: &BenchmarkCase) -> bool {
        false
    }

    fn is_available(&self, _summary: &Summary) -> bool {
        true
    }

    /// Keep the column even when every row shares the same value
    fn always_show(&self) -> bool {
        false
    }

    fn category(&self) -> ColumnCategory;

    /// Category used when filtering columns by category.
    ///
    /// Columns that report a generic category but form their own group override this.
    fn extended_category(&self) -> ExtendedCategory {
        self.category().into()
    }

    fn priority_in_category(&self) -> i32 {
        0
    }

    fn is_numeric(&self) -> bool {
        false
    }

    fn unit_type(&self) -> UnitType {
        UnitType::Dimensionless
    }

    fn legend(&self) -> String;
}

impl fmt::Debug for dyn Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Column").field(&self.id()).finish()
    }
}
