use crate::host::case::BenchmarkCase;
use crate::host::report::{BenchmarkReport, TimeUnit};
use crate::host::table::SummaryTable;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::rc::Rc;
use std::time::Duration;

/// Facts about the machine the summary was produced on
#[derive(Debug, Clone, Serialize)]
pub struct HostEnvironmentInfo {
    pub toolbox_version: String,
    pub os: String,
    pub arch: String,
    pub logical_cores: usize,
    pub timestamp: DateTime<Utc>,
}

impl HostEnvironmentInfo {
    pub fn current() -> Self {
        Self {
            toolbox_version: env!("CARGO_PKG_VERSION").to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            logical_cores: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            timestamp: Utc::now(),
        }
    }

    pub fn information(&self) -> String {
        format!(
            "benchtoolbox v{}, {} {}, {} logical cores, {}",
            self.toolbox_version,
            self.os,
            self.arch,
            self.logical_cores,
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

/// Presentation options for summary values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStyle {
    /// Forces one unit for all durations instead of choosing per column
    pub time_unit: Option<TimeUnit>,
}

/// The reports of one benchmark run plus the context needed to present them
#[derive(Debug, Clone)]
pub struct Summary {
    pub title: String,
    pub reports: Vec<BenchmarkReport>,
    pub host: HostEnvironmentInfo,
    pub total_time: Duration,
    pub style: SummaryStyle,
}

impl Summary {
    pub fn new(
        title: impl Into<String>,
        reports: Vec<BenchmarkReport>,
        host: HostEnvironmentInfo,
        total_time: Duration,
    ) -> Self {
        Self {
            title: title.into(),
            reports,
            host,
            total_time,
            style: SummaryStyle::default(),
        }
    }

    pub fn cases(&self) -> impl Iterator<Item = &Rc<BenchmarkCase>> {
        self.reports.iter().map(|r| &r.case)
    }

    pub fn case_count(&self) -> usize {
        self.reports.len()
    }

    pub fn report(&self, case: &BenchmarkCase) -> Option<&BenchmarkReport> {
        self.reports
            .iter()
            .find(|r| std::ptr::eq(Rc::as_ptr(&r.case), case))
    }

    pub fn has_baselines(&self) -> bool {
        self.cases().any(|c| c.descriptor.baseline)
    }

    /// Baseline report of the same type, job and parameter values as `case`
    pub fn baseline_for(&self, case: &BenchmarkCase) -> Option<&BenchmarkReport> {
        self.reports.iter().find(|r| {
            r.case.descriptor.baseline
                && r.case.descriptor.full_type_name() == case.descriptor.full_type_name()
                && r.case.job.id == case.job.id
                && r.case.parameters.display_info() == case.parameters.display_info()
        })
    }

    /// Table built from the column providers of the first case's config
    pub fn table(&self) -> SummaryTable {
        match self.reports.first() {
            Some(report) => {
                SummaryTable::build(self, report.case.config.column_providers())
            }
            None => SummaryTable::build(self, &[]),
        }
    }
}
