use crate::columns::{Column, ColumnCategory, ExtendedCategory, UnitType};
use crate::host::case::BenchmarkCase;
use crate::host::job::JobCharacteristic;
use crate::host::params::NULL_PARAMETER_TEXT;
use crate::host::report::{MetricDescriptor, Statistics, TimeUnit};
use crate::host::summary::Summary;

/// Part of the benchmark method identity shown by a [`TargetMethodColumn`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMethodPart {
    Namespace,
    Type,
    Method,
}

/// Namespace, type or method name of the benchmark.
///
/// Reported as a `Job` column to the table, filtered as `TargetMethod`.
#[derive(Debug, Clone)]
pub struct TargetMethodColumn {
    part: TargetMethodPart,
}

impl TargetMethodColumn {
    pub fn namespace() -> Self {
        Self {
            part: TargetMethodPart::Namespace,
        }
    }

    pub fn type_name() -> Self {
        Self {
            part: TargetMethodPart::Type,
        }
    }

    pub fn method() -> Self {
        Self {
            part: TargetMethodPart::Method,
        }
    }
}

impl Column for TargetMethodColumn {
    fn id(&self) -> String {
        format!("TargetMethodColumn.{}", self.column_name())
    }

    fn column_name(&self) -> String {
        let name = match self.part {
            TargetMethodPart::Namespace => "Namespace",
            TargetMethodPart::Type => "Type",
            TargetMethodPart::Method => "Method",
        };
        name.to_string()
    }

    fn value(&self, _summary: &Summary, case: &BenchmarkCase) -> String {
        match self.part {
            TargetMethodPart::Namespace => case.descriptor.namespace.clone(),
            TargetMethodPart::Type => case.descriptor.type_name.clone(),
            TargetMethodPart::Method => case.descriptor.method_name.clone(),
        }
    }

    fn is_available(&self, summary: &Summary) -> bool {
        match self.part {
            TargetMethodPart::Namespace => {
                summary.cases().any(|c| !c.descriptor.namespace.is_empty())
            }
            _ => true,
        }
    }

    fn always_show(&self) -> bool {
        self.part != TargetMethodPart::Namespace
    }

    fn category(&self) -> ColumnCategory {
        ColumnCategory::Job
    }

    fn extended_category(&self) -> ExtendedCategory {
        ExtendedCategory::TargetMethod
    }

    fn priority_in_category(&self) -> i32 {
        match self.part {
            TargetMethodPart::Namespace => -3,
            TargetMethodPart::Type => -2,
            TargetMethodPart::Method => -1,
        }
    }

    fn legend(&self) -> String {
        format!("Benchmark {}", self.column_name().to_lowercase())
    }
}

/// Benchmark categories of a case.
///
/// Reported as a `Job` column to the table, filtered as `Category`.
#[derive(Debug, Clone, Default)]
pub struct CategoriesColumn;

impl Column for CategoriesColumn {
    fn id(&self) -> String {
        "CategoriesColumn".to_string()
    }

    fn column_name(&self) -> String {
        "Categories".to_string()
    }

    fn value(&self, _summary: &Summary, case: &BenchmarkCase) -> String {
        case.descriptor.categories.join(",")
    }

    fn is_default(&self, _summary: &Summary, case: &BenchmarkCase) -> bool {
        case.descriptor.categories.is_empty()
    }

    fn is_available(&self, summary: &Summary) -> bool {
        summary.cases().any(|c| !c.descriptor.categories.is_empty())
    }

    fn category(&self) -> ColumnCategory {
        ColumnCategory::Job
    }

    fn extended_category(&self) -> ExtendedCategory {
        ExtendedCategory::Category
    }

    fn priority_in_category(&self) -> i32 {
        100
    }

    fn legend(&self) -> String {
        "All categories of the corresponding benchmark".to_string()
    }
}

/// Value of one job characteristic
#[derive(Debug, Clone)]
pub struct JobCharacteristicColumn {
    characteristic: JobCharacteristic,
}

impl JobCharacteristicColumn {
    pub fn new(characteristic: JobCharacteristic) -> Self {
        Self { characteristic }
    }

    pub fn all() -> Vec<Self> {
        JobCharacteristic::ALL.into_iter().map(Self::new).collect()
    }

    pub fn characteristic(&self) -> JobCharacteristic {
        self.characteristic
    }
}

impl Column for JobCharacteristicColumn {
    fn id(&self) -> String {
        format!("Job.{}", self.characteristic.id())
    }

    fn column_name(&self) -> String {
        self.characteristic.id().to_string()
    }

    fn value(&self, _summary: &Summary, case: &BenchmarkCase) -> String {
        self.characteristic.value(&case.job)
    }

    fn is_default(&self, _summary: &Summary, case: &BenchmarkCase) -> bool {
        !self.characteristic.is_set(&case.job)
    }

    fn category(&self) -> ColumnCategory {
        ColumnCategory::Job
    }

    fn priority_in_category(&self) -> i32 {
        JobCharacteristic::ALL
            .iter()
            .position(|c| *c == self.characteristic)
            .unwrap_or_default() as i32
    }

    fn legend(&self) -> String {
        match self.characteristic {
            JobCharacteristic::Id => "Job name".to_string(),
            other => format!("Value of the '{}' characteristic", other.id()),
        }
    }
}

/// Statistic shown by a [`StatisticColumn`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticKind {
    Mean,
    Error,
    StdDev,
    Min,
    Max,
    Median,
}

impl StatisticKind {
    fn pick(&self, stats: &Statistics) -> f64 {
        match self {
            StatisticKind::Mean => stats.mean,
            StatisticKind::Error => stats.standard_error,
            StatisticKind::StdDev => stats.standard_deviation,
            StatisticKind::Min => stats.min,
            StatisticKind::Max => stats.max,
            StatisticKind::Median => stats.median,
        }
    }
}

/// Duration statistic over the measured iterations of a case
#[derive(Debug, Clone)]
pub struct StatisticColumn {
    kind: StatisticKind,
}

impl StatisticColumn {
    pub fn new(kind: StatisticKind) -> Self {
        Self { kind }
    }

    pub fn mean() -> Self {
        Self::new(StatisticKind::Mean)
    }

    pub fn error() -> Self {
        Self::new(StatisticKind::Error)
    }

    pub fn std_dev() -> Self {
        Self::new(StatisticKind::StdDev)
    }

    /// Unit shared by every row so values stay comparable
    fn unit(&self, summary: &Summary) -> TimeUnit {
        if let Some(unit) = summary.style.time_unit {
            return unit;
        }
        let smallest = summary
            .reports
            .iter()
            .filter_map(|r| r.statistics())
            .map(|s| s.mean)
            .filter(|m| *m > 0.0)
            .fold(f64::INFINITY, f64::min);
        if smallest.is_finite() {
            TimeUnit::best_for(smallest)
        } else {
            TimeUnit::Nanosecond
        }
    }
}

impl Column for StatisticColumn {
    fn id(&self) -> String {
        format!("StatisticColumn.{}", self.column_name())
    }

    fn column_name(&self) -> String {
        format!("{:?}", self.kind)
    }

    fn value(&self, summary: &Summary, case: &BenchmarkCase) -> String {
        let stats = summary.report(case).and_then(|r| r.statistics());
        match stats {
            Some(stats) if self.kind == StatisticKind::Error && stats.n < 2 => "NA".to_string(),
            Some(stats) => self.unit(summary).format(self.kind.pick(&stats)),
            None => "NA".to_string(),
        }
    }

    fn always_show(&self) -> bool {
        true
    }

    fn category(&self) -> ColumnCategory {
        ColumnCategory::Statistics
    }

    fn priority_in_category(&self) -> i32 {
        self.kind as i32
    }

    fn is_numeric(&self) -> bool {
        true
    }

    fn unit_type(&self) -> UnitType {
        UnitType::Time
    }

    fn legend(&self) -> String {
        let legend = match self.kind {
            StatisticKind::Mean => "Arithmetic mean of all measurements",
            StatisticKind::Error => "Standard error of all measurements",
            StatisticKind::StdDev => "Standard deviation of all measurements",
            StatisticKind::Min => "Minimum",
            StatisticKind::Max => "Maximum",
            StatisticKind::Median => "Value separating the higher half of all measurements",
        };
        legend.to_string()
    }
}

/// Mean of a case relative to the baseline of its type
#[derive(Debug, Clone, Default)]
pub struct BaselineRatioColumn;

impl Column for BaselineRatioColumn {
    fn id(&self) -> String {
        "BaselineRatioColumn.Ratio".to_string()
    }

    fn column_name(&self) -> String {
        "Ratio".to_string()
    }

    fn value(&self, summary: &Summary, case: &BenchmarkCase) -> String {
        let current = summary.report(case).and_then(|r| r.statistics());
        let baseline = summary.baseline_for(case).and_then(|r| r.statistics());
        match (current, baseline) {
            (Some(current), Some(baseline)) if baseline.mean > 0.0 => {
                format!("{:.2}", current.mean / baseline.mean)
            }
            _ => NULL_PARAMETER_TEXT.to_string(),
        }
    }

    fn is_available(&self, summary: &Summary) -> bool {
        summary.has_baselines()
    }

    fn always_show(&self) -> bool {
        true
    }

    fn category(&self) -> ColumnCategory {
        ColumnCategory::Baseline
    }

    fn is_numeric(&self) -> bool {
        true
    }

    fn legend(&self) -> String {
        "Mean of the ratio distribution ([Current]/[Baseline])".to_string()
    }
}

/// Marks the baseline case of each type
#[derive(Debug, Clone, Default)]
pub struct BaselineColumn;

impl Column for BaselineColumn {
    fn id(&self) -> String {
        "BaselineColumn".to_string()
    }

    fn column_name(&self) -> String {
        "Baseline".to_string()
    }

    fn value(&self, _summary: &Summary, case: &BenchmarkCase) -> String {
        let text = if case.descriptor.baseline { "Yes" } else { "No" };
        text.to_string()
    }

    fn is_default(&self, _summary: &Summary, case: &BenchmarkCase) -> bool {
        !case.descriptor.baseline
    }

    fn is_available(&self, summary: &Summary) -> bool {
        summary.has_baselines()
    }

    fn category(&self) -> ColumnCategory {
        ColumnCategory::Meta
    }

    fn legend(&self) -> String {
        "Is the benchmark a baseline".to_string()
    }
}

/// Value of one named parameter
#[derive(Debug, Clone)]
pub struct ParamColumn {
    name: String,
    priority: i32,
}

impl ParamColumn {
    pub fn new(name: impl Into<String>, priority: i32) -> Self {
        Self {
            name: name.into(),
            priority,
        }
    }
}

impl Column for ParamColumn {
    fn id(&self) -> String {
        format!("ParamColumn.{}", self.name)
    }

    fn column_name(&self) -> String {
        self.name.clone()
    }

    fn value(&self, _summary: &Summary, case: &BenchmarkCase) -> String {
        case.parameters
            .by_name(&self.name)
            .map(|p| p.to_display_text())
            .unwrap_or_else(|| NULL_PARAMETER_TEXT.to_string())
    }

    fn always_show(&self) -> bool {
        true
    }

    fn category(&self) -> ColumnCategory {
        ColumnCategory::Params
    }

    fn priority_in_category(&self) -> i32 {
        self.priority
    }

    fn legend(&self) -> String {
        format!("Value of the '{}' parameter", self.name)
    }
}

/// Value of one metric reported by the engine
#[derive(Debug, Clone)]
pub struct MetricColumn {
    descriptor: MetricDescriptor,
}

impl MetricColumn {
    pub fn new(descriptor: MetricDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Column for MetricColumn {
    fn id(&self) -> String {
        format!("MetricColumn.{}", self.descriptor.id)
    }

    fn column_name(&self) -> String {
        self.descriptor.display_name.clone()
    }

    fn value(&self, summary: &Summary, case: &BenchmarkCase) -> String {
        summary
            .report(case)
            .and_then(|r| {
                r.metrics
                    .iter()
                    .find(|m| m.descriptor.id == self.descriptor.id)
            })
            .map(|m| format!("{:.0} {}", m.value, self.descriptor.unit))
            .unwrap_or_else(|| "-".to_string())
    }

    fn is_available(&self, summary: &Summary) -> bool {
        summary.reports.iter().any(|r| {
            r.metrics
                .iter()
                .any(|m| m.descriptor.id == self.descriptor.id)
        })
    }

    fn always_show(&self) -> bool {
        true
    }

    fn category(&self) -> ColumnCategory {
        ColumnCategory::Metric
    }

    fn is_numeric(&self) -> bool {
        true
    }

    fn unit_type(&self) -> UnitType {
        if self.descriptor.unit == "B" {
            UnitType::Size
        } else {
            UnitType::Dimensionless
        }
    }

    fn legend(&self) -> String {
        self.descriptor.legend.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::{case, summary_of};
    use crate::host::report::Measurement;

    #[test]
    fn test_target_method_columns_split_off_job() {
        let column = TargetMethodColumn::method();
        assert_eq!(column.category(), ColumnCategory::Job);
        assert_eq!(column.extended_category(), ExtendedCategory::TargetMethod);
        assert_eq!(
            CategoriesColumn.extended_category(),
            ExtendedCategory::Category
        );
        assert_eq!(
            JobCharacteristicColumn::new(JobCharacteristic::Id).extended_category(),
            ExtendedCategory::Job
        );
    }

    #[test]
    fn test_statistic_values() {
        let c = case("Sorting", "Quick", &[]);
        let summary = summary_of(vec![(
            c.clone(),
            vec![
                Measurement::new(0, 1, 2_000_000.0),
                Measurement::new(1, 1, 4_000_000.0),
            ],
        )]);
        assert_eq!(StatisticColumn::mean().value(&summary, &c), "3.000 ms");
        assert_eq!(StatisticColumn::error().value(&summary, &c), "1.000 ms");
    }

    #[test]
    fn test_error_needs_two_measurements() {
        let c = case("Sorting", "Quick", &[]);
        let summary = summary_of(vec![(c.clone(), vec![Measurement::new(0, 1, 10.0)])]);
        assert_eq!(StatisticColumn::error().value(&summary, &c), "NA");
    }

    #[test]
    fn test_param_column_missing_param() {
        let c = case("Sorting", "Quick", &[("size", "10")]);
        let summary = summary_of(vec![(c.clone(), Vec::new())]);
        assert_eq!(ParamColumn::new("size", 0).value(&summary, &c), "10");
        assert_eq!(
            ParamColumn::new("mode", 1).value(&summary, &c),
            NULL_PARAMETER_TEXT
        );
    }
}
