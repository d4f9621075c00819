use crate::error::{Result, ToolboxError};
use crate::host::case::{BenchmarkCase, BenchmarkRunInfo, Descriptor};
use crate::host::config::{ImmutableConfig, ManualConfig};
use crate::host::job::Job;
use crate::suite::{BenchmarkDefinition, MethodDefinition, SuiteDefinition};
use std::rc::Rc;
use tracing::debug;

/// Turns suite definitions into runnable benchmark cases.
///
/// Each case is offered to every filter of its config; a case is kept only if
/// all of them accept it.
pub struct BenchmarkConverter;

impl BenchmarkConverter {
    pub fn type_to_run_info(
        benchmark: &BenchmarkDefinition,
        config: Option<&ImmutableConfig>,
    ) -> BenchmarkRunInfo {
        let methods: Vec<&MethodDefinition> = benchmark.methods.iter().collect();
        Self::build(benchmark, &methods, Self::resolve_config(config, &[]))
    }

    /// Only the named methods of a type
    pub fn methods_to_run_info(
        benchmark: &BenchmarkDefinition,
        method_names: &[&str],
        config: Option<&ImmutableConfig>,
    ) -> Result<BenchmarkRunInfo> {
        let methods = method_names
            .iter()
            .map(|name| {
                benchmark.method(name).ok_or_else(|| {
                    ToolboxError::MissingMethod(format!("{}.{}", benchmark.type_name, name))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::build(benchmark, &methods, Self::resolve_config(config, &[])))
    }

    /// One run info per benchmark type; the suite's jobs are added to the config
    pub fn suite_to_run_infos(
        suite: &SuiteDefinition,
        config: Option<&ImmutableConfig>,
    ) -> Vec<BenchmarkRunInfo> {
        let config = Self::resolve_config(config, &suite.jobs);
        suite
            .benchmarks
            .iter()
            .map(|benchmark| {
                let methods: Vec<&MethodDefinition> = benchmark.methods.iter().collect();
                Self::build(benchmark, &methods, config.clone())
            })
            .collect()
    }

    fn resolve_config(config: Option<&ImmutableConfig>, extra_jobs: &[Job]) -> Rc<ImmutableConfig> {
        let mut manual = match config {
            Some(config) => config.to_manual(),
            None => ManualConfig::default_config(),
        };
        manual.add_jobs(extra_jobs.to_vec());
        Rc::new(manual.freeze())
    }

    fn build(
        benchmark: &BenchmarkDefinition,
        methods: &[&MethodDefinition],
        config: Rc<ImmutableConfig>,
    ) -> BenchmarkRunInfo {
        let jobs: Vec<Rc<Job>> = if config.jobs().is_empty() {
            vec![Rc::new(Job::default_job())]
        } else {
            config.jobs().iter().cloned().map(Rc::new).collect()
        };
        let parameters: Vec<Rc<_>> = benchmark
            .parameter_combinations()
            .into_iter()
            .map(Rc::new)
            .collect();

        let mut cases = Vec::new();
        for method in methods {
            let descriptor = Rc::new(Self::descriptor(benchmark, method));
            for job in &jobs {
                for params in &parameters {
                    let case = BenchmarkCase::create(
                        descriptor.clone(),
                        job.clone(),
                        params.clone(),
                        config.clone(),
                    );
                    if config.filters().iter().all(|f| f.predicate(&case)) {
                        cases.push(case);
                    }
                }
            }
        }
        debug!(
            benchmark = %benchmark.type_name,
            cases = cases.len(),
            "converted benchmark type"
        );
        BenchmarkRunInfo::new(cases, benchmark.type_name.clone(), config)
    }

    fn descriptor(benchmark: &BenchmarkDefinition, method: &MethodDefinition) -> Descriptor {
        let mut categories: Vec<String> = Vec::new();
        for category in benchmark.categories.iter().chain(&method.categories) {
            if !categories.contains(category) {
                categories.push(category.clone());
            }
        }
        Descriptor {
            type_name: benchmark.type_name.clone(),
            namespace: benchmark.namespace.clone(),
            method_name: method.name.clone(),
            command: method.command.clone(),
            baseline: method.baseline,
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::filter::{AnyCategoriesFilter, Filter, GlobFilter};
    use crate::suite::SuiteFormat;

    const SUITE: &str = r#"
[[benchmark]]
type = "Sorting"
categories = ["cpu"]

[[benchmark.params]]
name = "size"
values = [10, 20]

[[benchmark.methods]]
name = "Quick"
command = "sort {size}"
categories = ["fast", "cpu"]

[[benchmark.methods]]
name = "Merge"
command = "merge {size}"
"#;

    fn sorting() -> BenchmarkDefinition {
        SuiteDefinition::parse(SUITE, SuiteFormat::Toml)
            .unwrap()
            .benchmarks
            .remove(0)
    }

    #[test]
    fn test_cases_per_method_job_and_params() {
        let info = BenchmarkConverter::type_to_run_info(&sorting(), None);
        assert_eq!(info.cases.len(), 4);
        assert_eq!(info.type_name, "Sorting");
        assert_eq!(info.cases[0].display_info(), "Sorting.Quick: DefaultJob [size=10]");
        assert_eq!(info.cases[0].descriptor.categories, vec!["cpu", "fast"]);
    }

    #[test]
    fn test_cases_share_descriptor_and_params() {
        let mut config = ManualConfig::default_config();
        config.add_jobs(vec![Job::dry(), Job::short_run()]);
        let info = BenchmarkConverter::type_to_run_info(&sorting(), Some(&config.freeze()));
        assert_eq!(info.cases.len(), 8);
        // Quick/Dry/size=10 and Quick/ShortRun/size=10
        assert!(Rc::ptr_eq(&info.cases[0].descriptor, &info.cases[2].descriptor));
        assert!(Rc::ptr_eq(&info.cases[0].parameters, &info.cases[2].parameters));
    }

    #[test]
    fn test_filters_are_applied() {
        let mut config = ManualConfig::default_config();
        let filters: Vec<Rc<dyn Filter>> = vec![
            Rc::new(GlobFilter::new(&["*.Quick".to_string(), "*.Merge".to_string()]).unwrap()),
            Rc::new(AnyCategoriesFilter::new(vec!["fast".to_string()])),
        ];
        config.add_filters(filters);
        let info = BenchmarkConverter::type_to_run_info(&sorting(), Some(&config.freeze()));
        assert_eq!(info.cases.len(), 2);
        assert!(info.cases.iter().all(|c| c.descriptor.method_name == "Quick"));
    }

    #[test]
    fn test_unknown_method_is_missing() {
        let err = BenchmarkConverter::methods_to_run_info(&sorting(), &["Heap"], None).unwrap_err();
        assert!(matches!(err, ToolboxError::MissingMethod(_)));

        let info = BenchmarkConverter::methods_to_run_info(&sorting(), &["Merge"], None).unwrap();
        assert_eq!(info.cases.len(), 2);
    }

    #[test]
    fn test_suite_jobs_are_used() {
        let mut suite = SuiteDefinition::parse(SUITE, SuiteFormat::Toml).unwrap();
        suite.jobs.push(Job::dry());
        let infos = BenchmarkConverter::suite_to_run_infos(&suite, None);
        assert_eq!(infos.len(), 1);
        assert!(infos[0].cases.iter().all(|c| c.job.id == "Dry"));
    }
}
