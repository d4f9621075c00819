use crate::engine::Engine;
use crate::error::Result;
use crate::host::case::BenchmarkRunInfo;
use crate::host::config::ImmutableConfig;
use crate::host::logger::{CompositeLogger, ConsoleLogger, Logger};
use crate::host::report::BenchmarkReport;
use crate::host::summary::{HostEnvironmentInfo, Summary};
use crate::ui::RunProgress;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::info;

/// Runs converted benchmarks and presents the results
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    pub async fn run(engine: &dyn Engine, run_infos: &[BenchmarkRunInfo]) -> Result<Vec<Summary>> {
        let total: usize = run_infos.iter().map(|r| r.cases.len()).sum();
        Self::run_with_progress(engine, run_infos, RunProgress::new(total, "Benchmarks")).await
    }

    pub async fn run_with_progress(
        engine: &dyn Engine,
        run_infos: &[BenchmarkRunInfo],
        progress: RunProgress,
    ) -> Result<Vec<Summary>> {
        let total: usize = run_infos.iter().map(|r| r.cases.len()).sum();
        info!(engine = engine.name(), cases = total, "starting benchmark run");

        let mut executed: Vec<(Vec<BenchmarkReport>, Duration)> = Vec::new();
        let mut succeeded = 0;
        for run_info in run_infos {
            let started = Instant::now();
            let mut reports = Vec::with_capacity(run_info.cases.len());
            for case in &run_info.cases {
                let spinner = progress.start_case(&case.display_info());
                let case_started = Instant::now();
                let report = engine.run(case).await;
                progress.finish_case(&spinner, report.success, case_started.elapsed());
                if report.success {
                    succeeded += 1;
                }
                reports.push(report);
            }
            executed.push((reports, started.elapsed()));
        }
        progress.finish(succeeded, total);

        let host = HostEnvironmentInfo::current();
        let join = run_infos.iter().any(|r| r.config.options().join_summary);
        let summaries: Vec<Summary> = if join {
            let total_time = executed.iter().map(|(_, t)| *t).sum();
            let reports = executed.into_iter().flat_map(|(r, _)| r).collect();
            vec![Summary::new("Joined", reports, host, total_time)]
        } else {
            run_infos
                .iter()
                .zip(executed)
                .map(|(info, (reports, time))| {
                    Summary::new(info.type_name.clone(), reports, host.clone(), time)
                })
                .collect()
        };

        for summary in &summaries {
            Self::present(summary)?;
        }
        Ok(summaries)
    }

    /// Logs and exports a summary through the loggers and exporters of its config
    fn present(summary: &Summary) -> Result<()> {
        let Some(config) = summary.reports.first().map(|r| r.case.config.clone()) else {
            return Ok(());
        };
        let logger = Self::logger_for(&config);

        logger.write_line();
        logger.write_line_header(&format!("// * Summary: {} *", summary.title));
        for exporter in config.exporters() {
            exporter.export(summary, &logger)?;
        }
        let failed = summary.reports.iter().filter(|r| !r.success).count();
        if failed > 0 {
            logger.write_line_error(&format!("{} benchmark(s) failed", failed));
        }
        Ok(())
    }

    fn logger_for(config: &Rc<ImmutableConfig>) -> CompositeLogger {
        let loggers = config.loggers().to_vec();
        if loggers.is_empty() {
            CompositeLogger::new(vec![Rc::new(ConsoleLogger) as Rc<dyn Logger>])
        } else {
            CompositeLogger::new(loggers)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::case::BenchmarkCase;
    use crate::host::config::ManualConfig;
    use crate::host::logger::AccumulationLogger;
    use crate::host::report::Measurement;
    use crate::host::testing::case_with_config;
    use async_trait::async_trait;

    /// Reports a fixed duration without running anything
    struct FixedEngine;

    #[async_trait(?Send)]
    impl Engine for FixedEngine {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn run(&self, case: &Rc<BenchmarkCase>) -> BenchmarkReport {
            let ok = case.descriptor.method_name != "Broken";
            BenchmarkReport::new(
                case.clone(),
                ok,
                vec![Measurement::new(0, 1, 1_000.0)],
                Vec::new(),
            )
        }
    }

    fn config(join: bool, logger: &Rc<AccumulationLogger>) -> Rc<ImmutableConfig> {
        let mut config = ManualConfig::default_config();
        config.with_join_summary(join);
        crate::replace::replace_loggers(&mut config, vec![logger.clone() as Rc<dyn Logger>])
            .unwrap();
        Rc::new(config.freeze())
    }

    fn infos(config: Rc<ImmutableConfig>) -> Vec<BenchmarkRunInfo> {
        let a = case_with_config("Sorting", "Quick", &[], config.clone());
        let b = case_with_config("Hashing", "Broken", &[], config.clone());
        vec![
            BenchmarkRunInfo::new(vec![a], "Sorting", config.clone()),
            BenchmarkRunInfo::new(vec![b], "Hashing", config),
        ]
    }

    #[tokio::test]
    async fn test_one_summary_per_type() {
        let logger = Rc::new(AccumulationLogger::new());
        let summaries =
            BenchmarkRunner::run_with_progress(&FixedEngine, &infos(config(false, &logger)), RunProgress::hidden(2))
                .await
                .unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].title, "Sorting");
        let log = logger.log();
        assert!(log.contains("// * Summary: Hashing *"));
        assert!(log.contains("1 benchmark(s) failed"));
    }

    #[tokio::test]
    async fn test_joined_summary() {
        let logger = Rc::new(AccumulationLogger::new());
        let summaries =
            BenchmarkRunner::run_with_progress(&FixedEngine, &infos(config(true, &logger)), RunProgress::hidden(2))
                .await
                .unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].case_count(), 2);
    }
}
