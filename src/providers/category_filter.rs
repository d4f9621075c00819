use crate::columns::{Column, ExtendedCategory};
use crate::host::case::{BenchmarkCase, Descriptor};
use crate::host::config::ManualConfig;
use crate::host::job::Job;
use crate::host::params::{ParamWrapper, ParameterInstance, ParameterInstances};
use crate::host::report::{BenchmarkReport, Measurement, Metric, MetricDescriptor};
use crate::host::summary::{HostEnvironmentInfo, Summary};
use crate::providers::{
    ColumnProvider, ColumnProviderNode, DESCRIPTOR_PROVIDER, JOB_PROVIDER,
    JOB_SELECTION_PROVIDER, METRICS_PROVIDER, PARAMS_PROVIDER, RECYCLABLE_PARAMS_PROVIDER,
    STATISTICS_PROVIDER,
};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

/// Removes columns and whole providers from a provider tree by category.
///
/// Holds the lookup table of providers known to emit a single category and the
/// probe summary used to ask unknown providers which columns they yield.
pub struct CategoryFilter {
    known: HashMap<String, ExtendedCategory>,
    probe: Summary,
}

impl CategoryFilter {
    pub fn new() -> Self {
        let known = [
            (DESCRIPTOR_PROVIDER, ExtendedCategory::TargetMethod),
            (JOB_PROVIDER, ExtendedCategory::Job),
            (STATISTICS_PROVIDER, ExtendedCategory::Statistics),
            (PARAMS_PROVIDER, ExtendedCategory::Params),
            (METRICS_PROVIDER, ExtendedCategory::Metric),
            (RECYCLABLE_PARAMS_PROVIDER, ExtendedCategory::Params),
            (JOB_SELECTION_PROVIDER, ExtendedCategory::Job),
        ]
        .into_iter()
        .map(|(name, category)| (name.to_string(), category))
        .collect();

        Self {
            known,
            probe: probe_summary(),
        }
    }

    /// Treat every provider named `name` as emitting only `category`
    pub fn register(&mut self, name: impl Into<String>, category: ExtendedCategory) {
        self.known.insert(name.into(), category);
    }

    pub fn probe(&self) -> &Summary {
        &self.probe
    }

    /// Distinct categories of the columns the provider yields
    pub fn provider_categories(&self, provider: &dyn ColumnProvider) -> Vec<ExtendedCategory> {
        if let Some(category) = self.known.get(provider.name()) {
            return vec![*category];
        }
        distinct_categories(provider.columns(&self.probe))
    }

    pub fn node_categories(&self, node: &ColumnProviderNode) -> Vec<ExtendedCategory> {
        match node {
            ColumnProviderNode::Custom(provider) => self.provider_categories(provider.as_ref()),
            other => distinct_categories(other.columns(&self.probe)),
        }
    }

    /// Removes every column whose category is in `categories`, and every node left
    /// empty by that. Survivors keep their order.
    ///
    /// Custom providers cannot be split: they are dropped only if none of their
    /// categories survives.
    pub fn remove_by_category(
        &self,
        providers: &mut Vec<ColumnProviderNode>,
        categories: &[ExtendedCategory],
    ) {
        if categories.is_empty() {
            return;
        }

        for i in (0..providers.len()).rev() {
            let remove = match &mut providers[i] {
                ColumnProviderNode::Simple(simple) => {
                    simple
                        .columns_mut()
                        .retain(|c| !categories.contains(&c.extended_category()));
                    simple.columns().is_empty()
                }
                ColumnProviderNode::Composite(composite) => {
                    self.remove_by_category(composite.providers_mut(), categories);
                    composite.providers().is_empty()
                }
                ColumnProviderNode::Custom(provider) => self
                    .provider_categories(provider.as_ref())
                    .iter()
                    .all(|c| categories.contains(c)),
            };

            if remove {
                debug!(provider = providers[i].name(), index = i, "removing column provider");
                providers.remove(i);
            }
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::new()
    }
}

fn distinct_categories(columns: Vec<Rc<dyn Column>>) -> Vec<ExtendedCategory> {
    let mut categories = Vec::new();
    for column in columns {
        let category = column.extended_category();
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    categories
}

/// One baseline case with a category, a parameter, a measurement and a metric,
/// enough for any provider to yield its full column set.
fn probe_summary() -> Summary {
    let descriptor = Descriptor {
        type_name: "Probe".to_string(),
        namespace: "benchtoolbox".to_string(),
        method_name: "Probe".to_string(),
        command: String::new(),
        baseline: true,
        categories: vec!["c1".to_string()],
    };
    let parameters = ParameterInstances::new(vec![ParameterInstance::new(
        "p1",
        Some(ParamWrapper::new("1".to_string(), None)),
    )]);
    let case = BenchmarkCase::create(
        Rc::new(descriptor),
        Rc::new(Job::dry()),
        Rc::new(parameters),
        Rc::new(ManualConfig::default_config().freeze()),
    );
    let metric = MetricDescriptor {
        id: "ProbeMetric".to_string(),
        display_name: "ProbeMetric".to_string(),
        legend: String::new(),
        unit: String::new(),
    };
    let report = BenchmarkReport::new(
        case,
        true,
        vec![Measurement::new(0, 1, 1.0)],
        vec![Metric::new(metric, 1.0)],
    );
    Summary::new("", vec![report], HostEnvironmentInfo::current(), Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::{
        CategoriesColumn, JobCharacteristicColumn, ParamColumn, StatisticColumn,
        TargetMethodColumn,
    };
    use crate::host::job::JobCharacteristic;
    use crate::providers::{ParamsColumnProvider, StatisticsColumnProvider};

    fn ids(providers: &[ColumnProviderNode], filter: &CategoryFilter) -> Vec<String> {
        providers
            .iter()
            .flat_map(|p| p.columns(filter.probe()))
            .map(|c| c.id())
            .collect()
    }

    fn stats_params_and_job() -> Vec<ColumnProviderNode> {
        vec![ColumnProviderNode::composite(vec![
            ColumnProviderNode::simple(vec![
                Rc::new(StatisticColumn::mean()),
                Rc::new(ParamColumn::new("p1", 0)),
            ]),
            ColumnProviderNode::simple(vec![Rc::new(JobCharacteristicColumn::new(
                JobCharacteristic::Id,
            ))]),
        ])]
    }

    /// Yields columns of several categories under an unregistered name
    struct Mixed;

    impl ColumnProvider for Mixed {
        fn name(&self) -> &str {
            "mixed"
        }

        fn columns(&self, _summary: &Summary) -> Vec<Rc<dyn Column>> {
            vec![
                Rc::new(StatisticColumn::mean()),
                Rc::new(CategoriesColumn),
            ]
        }
    }

    #[test]
    fn test_empty_category_set_is_noop() {
        let filter = CategoryFilter::new();
        let mut providers = ColumnProviderNode::defaults();
        let before = ids(&providers, &filter);
        filter.remove_by_category(&mut providers, &[]);
        assert_eq!(providers.len(), 5);
        assert_eq!(ids(&providers, &filter), before);
    }

    #[test]
    fn test_partial_leaf_removal_keeps_structure() {
        let filter = CategoryFilter::new();
        let mut providers = stats_params_and_job();
        filter.remove_by_category(&mut providers, &[ExtendedCategory::Statistics]);

        assert_eq!(providers.len(), 1);
        let ColumnProviderNode::Composite(composite) = &providers[0] else {
            panic!("composite node was replaced");
        };
        assert_eq!(composite.providers().len(), 2);
        assert_eq!(ids(&providers, &filter), vec!["ParamColumn.p1", "Job.Job"]);
    }

    #[test]
    fn test_removal_is_idempotent() {
        let filter = CategoryFilter::new();
        let categories = [ExtendedCategory::Statistics, ExtendedCategory::Job];
        let mut providers = stats_params_and_job();
        providers.extend(ColumnProviderNode::defaults());

        filter.remove_by_category(&mut providers, &categories);
        let once = format!("{:?}", providers);
        filter.remove_by_category(&mut providers, &categories);
        assert_eq!(format!("{:?}", providers), once);
    }

    #[test]
    fn test_composite_emptied_is_removed() {
        let filter = CategoryFilter::new();
        let mut providers = vec![
            ColumnProviderNode::simple(vec![Rc::new(TargetMethodColumn::method())]),
            ColumnProviderNode::composite(vec![
                ColumnProviderNode::custom(StatisticsColumnProvider),
                ColumnProviderNode::composite(vec![ColumnProviderNode::custom(
                    ParamsColumnProvider,
                )]),
            ]),
        ];
        filter.remove_by_category(
            &mut providers,
            &[ExtendedCategory::Statistics, ExtendedCategory::Params],
        );
        assert_eq!(providers.len(), 1);
        assert!(matches!(providers[0], ColumnProviderNode::Simple(_)));
    }

    #[test]
    fn test_known_providers_removed_whole() {
        let filter = CategoryFilter::new();
        let mut providers = ColumnProviderNode::defaults();
        filter.remove_by_category(&mut providers, &[ExtendedCategory::Job]);
        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["descriptor", "statistics", "params", "metrics"]);
    }

    #[test]
    fn test_job_removal_keeps_target_method_and_categories() {
        let filter = CategoryFilter::new();
        let mut providers = vec![ColumnProviderNode::simple(vec![
            Rc::new(TargetMethodColumn::type_name()),
            Rc::new(CategoriesColumn),
            Rc::new(JobCharacteristicColumn::new(JobCharacteristic::Id)),
        ])];
        filter.remove_by_category(&mut providers, &[ExtendedCategory::Job]);
        assert_eq!(
            ids(&providers, &filter),
            vec!["TargetMethodColumn.Type", "CategoriesColumn"]
        );
    }

    #[test]
    fn test_opaque_provider_is_all_or_nothing() {
        let filter = CategoryFilter::new();
        let mut providers = vec![ColumnProviderNode::custom(Mixed)];
        assert_eq!(
            filter.node_categories(&providers[0]),
            vec![ExtendedCategory::Statistics, ExtendedCategory::Category]
        );

        filter.remove_by_category(&mut providers, &[ExtendedCategory::Statistics]);
        assert_eq!(providers.len(), 1);

        filter.remove_by_category(
            &mut providers,
            &[ExtendedCategory::Statistics, ExtendedCategory::Category],
        );
        assert!(providers.is_empty());
    }

    #[test]
    fn test_registered_provider_uses_table() {
        let mut filter = CategoryFilter::new();
        filter.register("mixed", ExtendedCategory::Custom);
        let mut providers = vec![ColumnProviderNode::custom(Mixed)];
        filter.remove_by_category(&mut providers, &[ExtendedCategory::Custom]);
        assert!(providers.is_empty());
    }
}
