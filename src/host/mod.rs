//! The benchmark model the column and filter tooling works on: cases, jobs,
//! reports, summaries, configurations, filters, loggers and exporters.

pub mod case;
pub mod config;
pub mod export;
pub mod filter;
pub mod job;
pub mod logger;
pub mod params;
pub mod report;
pub mod summary;
pub mod table;

pub use case::{BenchmarkCase, BenchmarkRunInfo, Descriptor};
pub use config::{ConfigLists, ConfigOptions, ImmutableConfig, ManualConfig};
pub use export::{Exporter, JsonExporter, MarkdownExporter};
pub use filter::{AnyCategoriesFilter, Filter, GlobFilter};
pub use job::{Job, JobCharacteristic, RunStrategy};
pub use logger::{AccumulationLogger, CompositeLogger, ConsoleLogger, LogCapture, LogKind, Logger};
pub use params::{ParamWrapper, ParameterInstance, ParameterInstances, NULL_PARAMETER_TEXT};
pub use report::{BenchmarkReport, Measurement, Metric, MetricDescriptor, Statistics};
pub use summary::{HostEnvironmentInfo, Summary, SummaryStyle};
pub use table::SummaryTable;

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::rc::Rc;
    use std::time::Duration;

    pub fn params(values: &[(&str, &str)]) -> ParameterInstances {
        ParameterInstances::new(
            values
                .iter()
                .map(|(name, value)| {
                    ParameterInstance::new(*name, Some(ParamWrapper::new(value.to_string(), None)))
                })
                .collect(),
        )
    }

    pub fn case_with_config(
        type_name: &str,
        method: &str,
        values: &[(&str, &str)],
        config: Rc<ImmutableConfig>,
    ) -> Rc<BenchmarkCase> {
        let descriptor = Descriptor {
            type_name: type_name.to_string(),
            namespace: "bench".to_string(),
            method_name: method.to_string(),
            command: "true".to_string(),
            ..Default::default()
        };
        BenchmarkCase::create(
            Rc::new(descriptor),
            Rc::new(Job::dry()),
            Rc::new(params(values)),
            config,
        )
    }

    pub fn case(type_name: &str, method: &str, values: &[(&str, &str)]) -> Rc<BenchmarkCase> {
        case_with_config(type_name, method, values, Rc::new(ImmutableConfig::empty()))
    }

    pub fn summary_of(rows: Vec<(Rc<BenchmarkCase>, Vec<Measurement>)>) -> Summary {
        let reports = rows
            .into_iter()
            .map(|(case, measurements)| BenchmarkReport::new(case, true, measurements, Vec::new()))
            .collect();
        Summary::new("test", reports, HostEnvironmentInfo::current(), Duration::ZERO)
    }
}
