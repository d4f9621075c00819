use crate::converter::BenchmarkConverter;
use crate::engine::{BenchmarkRunner, Engine};
use crate::error::Result;
use crate::host::case::{BenchmarkCase, BenchmarkRunInfo};
use crate::host::config::ImmutableConfig;
use crate::host::filter::Filter;
use crate::host::job::Job;
use crate::host::summary::Summary;
use crate::suite::{BenchmarkDefinition, SuiteDefinition};
use crate::whatif::WhatifFilter;
use std::rc::Rc;
use tracing::debug;

fn whatif_of(config: &ImmutableConfig) -> Option<&WhatifFilter> {
    config
        .filters()
        .iter()
        .find_map(|f| f.as_any().downcast_ref::<WhatifFilter>())
}

/// Collects converted benchmarks for a single run.
///
/// With an override job set, every converted case is rebuilt with that job instead
/// of the jobs of its config, keeping one case per method and parameter set.
#[derive(Debug, Default)]
pub struct BenchmarkRunInfos {
    items: Vec<BenchmarkRunInfo>,
    pub config: Option<ImmutableConfig>,
    pub override_job: Option<Job>,
}

impl BenchmarkRunInfos {
    pub fn new(config: Option<ImmutableConfig>, override_job: Option<Job>) -> Self {
        Self {
            items: Vec::new(),
            config,
            override_job,
        }
    }

    /// Quickest job the command engine supports
    pub fn fast_job() -> Job {
        Job::fast()
    }

    /// Uses [`Self::fast_job`] as override job in debug builds only
    pub fn debug_use_default_override_job(&mut self) {
        if cfg!(debug_assertions) {
            self.override_job = Some(Self::fast_job());
        }
    }

    pub fn items(&self) -> &[BenchmarkRunInfo] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BenchmarkRunInfo> {
        self.items.get(index)
    }

    pub fn add(&mut self, run_info: BenchmarkRunInfo) {
        self.post_process(false, vec![run_info]);
    }

    pub fn add_range(&mut self, run_infos: Vec<BenchmarkRunInfo>) {
        self.post_process(false, run_infos);
    }

    /// Drops all collected run infos
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Hands all collected run infos over to the caller
    pub fn drain(&mut self) -> Vec<BenchmarkRunInfo> {
        std::mem::take(&mut self.items)
    }

    pub fn convert_type(&mut self, benchmark: &BenchmarkDefinition) {
        let paused = self.pre_process();
        let info = BenchmarkConverter::type_to_run_info(benchmark, self.config.as_ref());
        self.post_process(paused, vec![info]);
    }

    pub fn convert_methods(
        &mut self,
        benchmark: &BenchmarkDefinition,
        method_names: &[&str],
    ) -> Result<()> {
        let paused = self.pre_process();
        let converted =
            BenchmarkConverter::methods_to_run_info(benchmark, method_names, self.config.as_ref());
        match converted {
            Ok(info) => {
                self.post_process(paused, vec![info]);
                Ok(())
            }
            Err(e) => {
                self.post_process(paused, Vec::new());
                Err(e)
            }
        }
    }

    pub fn convert_suite(&mut self, suite: &SuiteDefinition) {
        let paused = self.pre_process();
        let infos = BenchmarkConverter::suite_to_run_infos(suite, self.config.as_ref());
        self.post_process(paused, infos);
    }

    pub async fn run_all(&self, engine: &dyn Engine) -> Result<Vec<Summary>> {
        BenchmarkRunner::run(engine, &self.items).await
    }

    /// An enabled what-if filter must see the cases built with the override job,
    /// not the converter's. Pause it during conversion.
    fn pre_process(&self) -> bool {
        if self.override_job.is_none() {
            return false;
        }
        match self.config.as_ref().and_then(whatif_of) {
            Some(whatif) if whatif.enabled() => {
                whatif.set_enabled(false);
                true
            }
            _ => false,
        }
    }

    fn post_process(&mut self, paused: bool, run_infos: Vec<BenchmarkRunInfo>) {
        let whatif = if paused {
            let whatif = self.config.as_ref().and_then(whatif_of);
            if let Some(w) = whatif {
                w.set_enabled(true);
            }
            whatif
        } else {
            None
        };

        let Some(job) = self.override_job.as_ref() else {
            self.items
                .extend(run_infos.into_iter().filter(|r| !r.cases.is_empty()));
            return;
        };
        let job = Rc::new(job.clone());

        let mut rebuilt = Vec::new();
        for run_info in run_infos {
            let mut cases: Vec<Rc<BenchmarkCase>> = Vec::new();
            let mut seen: Vec<&Rc<BenchmarkCase>> = Vec::new();
            for case in &run_info.cases {
                if seen.iter().any(|s| same_ignoring_job(s, case)) {
                    continue;
                }
                seen.push(case);
                let new_case = BenchmarkCase::create(
                    case.descriptor.clone(),
                    job.clone(),
                    case.parameters.clone(),
                    case.config.clone(),
                );
                if whatif.map_or(true, |w| w.predicate(&new_case)) {
                    cases.push(new_case);
                }
            }
            if !cases.is_empty() {
                rebuilt.push(BenchmarkRunInfo::new(
                    cases,
                    run_info.type_name.clone(),
                    run_info.config.clone(),
                ));
            }
        }
        debug!(job = %job.id, run_infos = rebuilt.len(), "applied override job");
        self.items.extend(rebuilt);
    }
}

/// Same method, parameters and config; the job may differ
fn same_ignoring_job(a: &BenchmarkCase, b: &BenchmarkCase) -> bool {
    Rc::ptr_eq(&a.descriptor, &b.descriptor)
        && Rc::ptr_eq(&a.parameters, &b.parameters)
        && Rc::ptr_eq(&a.config, &b.config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::config::ManualConfig;
    use crate::host::filter::GlobFilter;
    use crate::suite::SuiteFormat;

    const SUITE: &str = r#"
[[benchmark]]
type = "Sorting"

[[benchmark.params]]
name = "size"
values = [1, 2]

[[benchmark.methods]]
name = "Quick"
command = "true"

[[benchmark.methods]]
name = "Merge"
command = "true"

[[benchmark]]
type = "Empty"
"#;

    fn suite() -> SuiteDefinition {
        SuiteDefinition::parse(SUITE, SuiteFormat::Toml).unwrap()
    }

    fn config_with_jobs(filters: Vec<Rc<dyn Filter>>) -> ImmutableConfig {
        let mut config = ManualConfig::default_config();
        config.add_jobs(vec![Job::dry(), Job::short_run()]);
        config.add_filters(filters);
        config.freeze()
    }

    #[test]
    fn test_empty_run_infos_are_skipped() {
        let mut infos = BenchmarkRunInfos::new(Some(config_with_jobs(Vec::new())), None);
        infos.convert_suite(&suite());
        assert_eq!(infos.len(), 1);
        assert_eq!(infos.items()[0].cases.len(), 8);
    }

    #[test]
    fn test_override_job_replaces_jobs() {
        let mut infos = BenchmarkRunInfos::new(
            Some(config_with_jobs(Vec::new())),
            Some(BenchmarkRunInfos::fast_job()),
        );
        infos.convert_suite(&suite());
        let cases = &infos.items()[0].cases;
        assert_eq!(cases.len(), 4);
        assert!(cases.iter().all(|c| c.job.id == "Fast"));
    }

    #[test]
    fn test_override_job_with_whatif() {
        let whatif = Rc::new(WhatifFilter::new());
        whatif.set_enabled(true);
        let glob: Rc<dyn Filter> = Rc::new(GlobFilter::new(&["*.Quick".to_string()]).unwrap());
        let config = config_with_jobs(vec![glob, whatif.clone() as Rc<dyn Filter>]);

        let mut infos = BenchmarkRunInfos::new(Some(config), Some(Job::fast()));
        infos.convert_suite(&suite());

        assert!(infos.is_empty());
        assert!(whatif.enabled());
        let recorded = whatif.filtered_cases();
        assert_eq!(recorded.len(), 2);
        assert!(recorded.iter().all(|c| c.job.id == "Fast"));
        assert!(recorded.iter().all(|c| c.descriptor.method_name == "Quick"));
    }

    #[test]
    fn test_whatif_without_override_records_converted_cases() {
        let whatif = Rc::new(WhatifFilter::new());
        whatif.set_enabled(true);
        let config = config_with_jobs(vec![whatif.clone() as Rc<dyn Filter>]);

        let mut infos = BenchmarkRunInfos::new(Some(config), None);
        infos.convert_suite(&suite());
        assert!(infos.is_empty());
        assert_eq!(whatif.filtered_cases().len(), 8);
    }

    #[test]
    fn test_convert_methods_and_drain() {
        let mut infos = BenchmarkRunInfos::new(None, None);
        let suite = suite();
        assert!(infos.convert_methods(&suite.benchmarks[0], &["Heap"]).is_err());
        infos
            .convert_methods(&suite.benchmarks[0], &["Merge"])
            .unwrap();
        assert_eq!(infos.len(), 1);

        let drained = infos.drain();
        assert_eq!(drained.len(), 1);
        assert!(infos.is_empty());
    }

    #[test]
    fn test_debug_override_job() {
        let mut infos = BenchmarkRunInfos::default();
        infos.debug_use_default_override_job();
        assert_eq!(infos.override_job.is_some(), cfg!(debug_assertions));
    }
}
