use crate::host::case::{BenchmarkCase, BenchmarkRunInfo};
use crate::host::export::{Exporter, MarkdownExporter};
use crate::host::filter::{is_same_filter, Filter};
use crate::host::logger::{LogCapture, LogKind, Logger};
use crate::host::report::{BenchmarkReport, Measurement};
use crate::host::summary::{HostEnvironmentInfo, Summary};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

/// Previews a run: while enabled, every case that passes the other filters of its
/// config is recorded instead of executed.
///
/// Add the filter to the config, call [`WhatifFilter::preparse_console_arguments`]
/// before parsing the command line, and print the recorded cases with
/// [`WhatifFilter::print_as_summaries`] after the run.
#[derive(Debug, Default)]
pub struct WhatifFilter {
    enabled: Cell<bool>,
    cases: RefCell<Vec<Rc<BenchmarkCase>>>,
    console_arguments: RefCell<Option<Vec<String>>>,
}

impl WhatifFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// Strips every `-w`/`--whatif` and enables the filter if there was one.
    ///
    /// The arguments as given are kept for the summary header, unless nothing is
    /// left after stripping.
    pub fn preparse_console_arguments(&self, args: Vec<String>) -> Vec<String> {
        self.enabled.set(false);
        let original = args.clone();

        let stripped: Vec<String> = args
            .into_iter()
            .filter(|a| {
                let lower = a.to_lowercase();
                lower != "-w" && lower != "--whatif"
            })
            .collect();

        if stripped.len() != original.len() {
            self.enabled.set(true);
        }
        *self.console_arguments.borrow_mut() = if stripped.is_empty() {
            None
        } else {
            Some(original)
        };
        debug!(enabled = self.enabled.get(), "preparsed console arguments");
        stripped
    }

    pub fn filtered_cases(&self) -> Vec<Rc<BenchmarkCase>> {
        self.cases.borrow().clone()
    }

    /// Recorded cases grouped by benchmark type, in order of first appearance
    pub fn filtered_run_infos(&self) -> Vec<BenchmarkRunInfo> {
        group_by_type(&self.cases.borrow())
            .into_iter()
            .map(|cases| {
                let type_name = cases[0].descriptor.type_name.clone();
                let config = cases[0].config.clone();
                BenchmarkRunInfo::new(cases, type_name, config)
            })
            .collect()
    }

    /// Forgets the recorded cases
    pub fn clear(&self) {
        self.cases.borrow_mut().clear();
    }

    /// Hands the recorded cases over to the caller
    pub fn drain(&self) -> Vec<Rc<BenchmarkCase>> {
        std::mem::take(&mut *self.cases.borrow_mut())
    }

    /// Prints the recorded cases as summary tables without running them.
    ///
    /// `join` overrides whether all types share one table; by default they do if
    /// any recorded case's config asks for a joined summary.
    pub fn print_as_summaries(&self, logger: &dyn Logger, join: Option<bool>) {
        let cases = self.cases.borrow();
        if cases.is_empty() {
            return;
        }
        let join = join.unwrap_or_else(|| cases.iter().any(|c| c.config.options().join_summary));
        let host = HostEnvironmentInfo::current();

        logger.write_line();
        logger.write_line_header("// * What If Summary *");
        logger.write_line();
        if let Some(args) = self.console_arguments.borrow().as_ref() {
            logger.write_line_info(&format!("Console arguments: {}", args.join(" ")));
            logger.write_line();
        }
        logger.write_line_info(&host.information());

        if join {
            let summary = Self::fabricate("What If", &cases, &host);
            Self::print_summary(&summary, logger);
            return;
        }

        let mut namespaces: Vec<&str> = Vec::new();
        for case in cases.iter() {
            if !namespaces.contains(&case.descriptor.namespace.as_str()) {
                namespaces.push(&case.descriptor.namespace);
            }
        }
        let use_full_name = namespaces.len() > 1;

        for group in group_by_type(&cases) {
            let descriptor = &group[0].descriptor;
            let title = if use_full_name {
                descriptor.full_type_name()
            } else {
                descriptor.type_name.clone()
            };
            let summary = Self::fabricate(&title, &group, &host);
            logger.write_line();
            logger.write_line_header(&format!("// {}", title));
            logger.write_line();
            Self::print_summary(&summary, logger);
        }
    }

    /// Zero-duration reports for cases that never ran
    fn fabricate(title: &str, cases: &[Rc<BenchmarkCase>], host: &HostEnvironmentInfo) -> Summary {
        let reports = cases
            .iter()
            .map(|c| {
                BenchmarkReport::new(c.clone(), true, vec![Measurement::new(0, 1, 0.0)], Vec::new())
            })
            .collect();
        Summary::new(title, reports, host.clone(), Duration::ZERO)
    }

    fn print_summary(summary: &Summary, logger: &dyn Logger) {
        summary.table().print_common_columns(logger);
        logger.write_line();
        let capture = LogCapture::new();
        MarkdownExporter::console().export_to_log(summary, &capture);
        for line in capture
            .captured_output()
            .into_iter()
            .skip_while(|l| l.kind != LogKind::Statistic)
        {
            logger.write(line.kind, &line.text);
        }
    }
}

impl Filter for WhatifFilter {
    /// Never lets a case run while enabled
    fn predicate(&self, case: &Rc<BenchmarkCase>) -> bool {
        if !self.enabled.get() {
            return true;
        }
        let passes_others = case
            .config
            .filters()
            .iter()
            .filter(|f| !is_same_filter(f, self))
            .all(|f| f.predicate(case));
        if passes_others {
            let mut cases = self.cases.borrow_mut();
            if !cases.iter().any(|c| Rc::ptr_eq(c, case)) {
                cases.push(case.clone());
            }
        }
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn group_by_type(cases: &[Rc<BenchmarkCase>]) -> Vec<Vec<Rc<BenchmarkCase>>> {
    let mut groups: Vec<(String, Vec<Rc<BenchmarkCase>>)> = Vec::new();
    for case in cases {
        let key = case.descriptor.full_type_name();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, group)) => group.push(case.clone()),
            None => groups.push((key, vec![case.clone()])),
        }
    }
    groups.into_iter().map(|(_, group)| group).collect()
}
