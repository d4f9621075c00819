pub mod category_filter;

use crate::columns::{
    BaselineRatioColumn, CategoriesColumn, Column, JobCharacteristicColumn, MetricColumn,
    ParamColumn, StatisticColumn, TargetMethodColumn,
};
use crate::host::summary::Summary;
use std::fmt;
use std::rc::Rc;

pub use category_filter::CategoryFilter;

pub const DESCRIPTOR_PROVIDER: &str = "descriptor";
pub const JOB_PROVIDER: &str = "job";
pub const STATISTICS_PROVIDER: &str = "statistics";
pub const PARAMS_PROVIDER: &str = "params";
pub const METRICS_PROVIDER: &str = "metrics";
pub const RECYCLABLE_PARAMS_PROVIDER: &str = "recyclable-params";
pub const JOB_SELECTION_PROVIDER: &str = "job-selection";

/// Yields the columns applicable to a summary
pub trait ColumnProvider {
    /// Identifies the kind of provider, see [`CategoryFilter`]
    fn name(&self) -> &str;

    fn columns(&self, summary: &Summary) -> Vec<Rc<dyn Column>>;
}

/// Provider holding a fixed list of columns
#[derive(Clone, Default)]
pub struct SimpleColumnProvider {
    columns: Vec<Rc<dyn Column>>,
}

impl SimpleColumnProvider {
    pub fn new(columns: Vec<Rc<dyn Column>>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Rc<dyn Column>] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut Vec<Rc<dyn Column>> {
        &mut self.columns
    }
}

/// Provider composed of child providers
#[derive(Clone, Default)]
pub struct CompositeColumnProvider {
    providers: Vec<ColumnProviderNode>,
}

impl CompositeColumnProvider {
    pub fn new(providers: Vec<ColumnProviderNode>) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &[ColumnProviderNode] {
        &self.providers
    }

    pub fn providers_mut(&mut self) -> &mut Vec<ColumnProviderNode> {
        &mut self.providers
    }
}

/// Entry of a config's column provider tree.
///
/// Simple and composite nodes own their lists and can be edited in place; custom
/// providers are opaque and can only be kept or dropped as a whole.
#[derive(Clone)]
pub enum ColumnProviderNode {
    Simple(SimpleColumnProvider),
    Composite(CompositeColumnProvider),
    Custom(Rc<dyn ColumnProvider>),
}

impl ColumnProviderNode {
    pub fn custom<P: ColumnProvider + 'static>(provider: P) -> Self {
        ColumnProviderNode::Custom(Rc::new(provider))
    }

    pub fn simple(columns: Vec<Rc<dyn Column>>) -> Self {
        ColumnProviderNode::Simple(SimpleColumnProvider::new(columns))
    }

    pub fn composite(providers: Vec<ColumnProviderNode>) -> Self {
        ColumnProviderNode::Composite(CompositeColumnProvider::new(providers))
    }

    /// Descriptor, job, statistics, params and metrics providers
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::custom(DescriptorColumnProvider),
            Self::custom(JobColumnProvider),
            Self::custom(StatisticsColumnProvider),
            Self::custom(ParamsColumnProvider),
            Self::custom(MetricsColumnProvider),
        ]
    }

    pub fn name(&self) -> &str {
        match self {
            ColumnProviderNode::Simple(_) => "simple",
            ColumnProviderNode::Composite(_) => "composite",
            ColumnProviderNode::Custom(provider) => provider.name(),
        }
    }

    pub fn columns(&self, summary: &Summary) -> Vec<Rc<dyn Column>> {
        match self {
            ColumnProviderNode::Simple(simple) => simple.columns.clone(),
            ColumnProviderNode::Composite(composite) => composite
                .providers
                .iter()
                .flat_map(|p| p.columns(summary))
                .collect(),
            ColumnProviderNode::Custom(provider) => provider.columns(summary),
        }
    }
}

impl fmt::Debug for ColumnProviderNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnProviderNode::Simple(simple) => f
                .debug_tuple("Simple")
                .field(&simple.columns.iter().map(|c| c.id()).collect::<Vec<_>>())
                .finish(),
            ColumnProviderNode::Composite(composite) => f
                .debug_tuple("Composite")
                .field(&composite.providers)
                .finish(),
            ColumnProviderNode::Custom(provider) => {
                f.debug_tuple("Custom").field(&provider.name()).finish()
            }
        }
    }
}

/// Namespace, type, method and categories
#[derive(Debug, Default)]
pub struct DescriptorColumnProvider;

impl ColumnProvider for DescriptorColumnProvider {
    fn name(&self) -> &str {
        DESCRIPTOR_PROVIDER
    }

    fn columns(&self, _summary: &Summary) -> Vec<Rc<dyn Column>> {
        vec![
            Rc::new(TargetMethodColumn::namespace()),
            Rc::new(TargetMethodColumn::type_name()),
            Rc::new(TargetMethodColumn::method()),
            Rc::new(CategoriesColumn),
        ]
    }
}

/// One column per job characteristic
#[derive(Debug, Default)]
pub struct JobColumnProvider;

impl ColumnProvider for JobColumnProvider {
    fn name(&self) -> &str {
        JOB_PROVIDER
    }

    fn columns(&self, _summary: &Summary) -> Vec<Rc<dyn Column>> {
        JobCharacteristicColumn::all()
            .into_iter()
            .map(|c| Rc::new(c) as Rc<dyn Column>)
            .collect()
    }
}

/// Mean, error, standard deviation and baseline ratio
#[derive(Debug, Default)]
pub struct StatisticsColumnProvider;

impl ColumnProvider for StatisticsColumnProvider {
    fn name(&self) -> &str {
        STATISTICS_PROVIDER
    }

    fn columns(&self, _summary: &Summary) -> Vec<Rc<dyn Column>> {
        vec![
            Rc::new(StatisticColumn::mean()),
            Rc::new(StatisticColumn::error()),
            Rc::new(StatisticColumn::std_dev()),
            Rc::new(BaselineRatioColumn),
        ]
    }
}

/// One column per distinct parameter name
#[derive(Debug, Default)]
pub struct ParamsColumnProvider;

impl ColumnProvider for ParamsColumnProvider {
    fn name(&self) -> &str {
        PARAMS_PROVIDER
    }

    fn columns(&self, summary: &Summary) -> Vec<Rc<dyn Column>> {
        let mut names: Vec<&str> = Vec::new();
        for case in summary.cases() {
            for param in case.parameters.items() {
                if !names.contains(&param.name.as_str()) {
                    names.push(&param.name);
                }
            }
        }
        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Rc::new(ParamColumn::new(name, i as i32)) as Rc<dyn Column>)
            .collect()
    }
}

/// One column per metric reported in the summary
#[derive(Debug, Default)]
pub struct MetricsColumnProvider;

impl ColumnProvider for MetricsColumnProvider {
    fn name(&self) -> &str {
        METRICS_PROVIDER
    }

    fn columns(&self, summary: &Summary) -> Vec<Rc<dyn Column>> {
        let mut descriptors = Vec::new();
        for report in &summary.reports {
            for metric in &report.metrics {
                if !descriptors.contains(&metric.descriptor) {
                    descriptors.push(metric.descriptor.clone());
                }
            }
        }
        descriptors
            .into_iter()
            .map(|d| Rc::new(MetricColumn::new(d)) as Rc<dyn Column>)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::{case, summary_of};

    #[test]
    fn test_params_provider_one_column_per_name() {
        let summary = summary_of(vec![
            (case("A", "M", &[("x", "1"), ("y", "2")]), Vec::new()),
            (case("B", "M", &[("z", "3"), ("x", "4")]), Vec::new()),
        ]);
        let names: Vec<String> = ParamsColumnProvider
            .columns(&summary)
            .iter()
            .map(|c| c.column_name())
            .collect();
        assert_eq!(names, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_composite_flattens_children() {
        let node = ColumnProviderNode::composite(vec![
            ColumnProviderNode::custom(DescriptorColumnProvider),
            ColumnProviderNode::simple(vec![Rc::new(StatisticColumn::mean())]),
        ]);
        let summary = summary_of(Vec::new());
        assert_eq!(node.columns(&summary).len(), 5);
        assert_eq!(node.name(), "composite");
    }

    #[test]
    fn test_default_provider_names() {
        let names: Vec<String> = ColumnProviderNode::defaults()
            .iter()
            .map(|n| n.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["descriptor", "job", "statistics", "params", "metrics"]
        );
    }
}
