use crate::error::Result;
use crate::host::logger::{LogKind, Logger};
use crate::host::report::{Measurement, Metric, Statistics};
use crate::host::summary::{HostEnvironmentInfo, Summary};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Turns a summary into some output format
pub trait Exporter {
    fn name(&self) -> &str;

    /// Writes the exported content to a logger
    fn export_to_log(&self, summary: &Summary, logger: &dyn Logger);

    /// Exports the summary and returns the written files, if any
    fn export(&self, summary: &Summary, logger: &dyn Logger) -> Result<Vec<PathBuf>> {
        self.export_to_log(summary, logger);
        Ok(Vec::new())
    }
}

/// Prints the summary table as markdown
#[derive(Debug, Default)]
pub struct MarkdownExporter;

impl MarkdownExporter {
    pub fn console() -> Self {
        Self
    }
}

impl Exporter for MarkdownExporter {
    fn name(&self) -> &str {
        "markdown-console"
    }

    fn export_to_log(&self, summary: &Summary, logger: &dyn Logger) {
        let table = summary.table();
        logger.write_line();
        logger.write_line_info(&summary.host.information());
        table.print_common_columns(logger);
        logger.write_line();

        for line in table.to_markdown() {
            logger.write_line_kind(LogKind::Statistic, &line);
        }

        let legends = table.legends();
        if !legends.is_empty() {
            logger.write_line();
            logger.write_line_kind(LogKind::Help, "// * Legends *");
            for legend in legends {
                logger.write_line_kind(LogKind::Help, &legend);
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct SummaryDocument<'a> {
    title: &'a str,
    host: &'a HostEnvironmentInfo,
    total_time_ms: u128,
    benchmarks: Vec<BenchmarkDocument<'a>>,
}

#[derive(Debug, Serialize)]
struct BenchmarkDocument<'a> {
    full_name: String,
    display_info: String,
    job: &'a str,
    parameters: BTreeMap<&'a str, String>,
    success: bool,
    statistics: Option<Statistics>,
    measurements: &'a [Measurement],
    metrics: &'a [Metric],
}

/// Writes `<dir>/<title>-report.json`
#[derive(Debug)]
pub struct JsonExporter {
    dir: PathBuf,
}

impl JsonExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn document<'a>(summary: &'a Summary) -> SummaryDocument<'a> {
        SummaryDocument {
            title: &summary.title,
            host: &summary.host,
            total_time_ms: summary.total_time.as_millis(),
            benchmarks: summary
                .reports
                .iter()
                .map(|r| BenchmarkDocument {
                    full_name: r.case.full_name(),
                    display_info: r.case.display_info(),
                    job: &r.case.job.id,
                    parameters: r
                        .case
                        .parameters
                        .items()
                        .iter()
                        .map(|p| (p.name.as_str(), p.to_display_text()))
                        .collect(),
                    success: r.success,
                    statistics: r.statistics(),
                    measurements: &r.measurements,
                    metrics: &r.metrics,
                })
                .collect(),
        }
    }

    fn file_name(title: &str) -> String {
        let safe: String = title
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        let safe = if safe.is_empty() { "summary".to_string() } else { safe };
        format!("{}-report.json", safe)
    }

    fn render(summary: &Summary) -> Result<String> {
        Ok(serde_json::to_string_pretty(&Self::document(summary))?)
    }
}

impl Exporter for JsonExporter {
    fn name(&self) -> &str {
        "json"
    }

    fn export_to_log(&self, summary: &Summary, logger: &dyn Logger) {
        match Self::render(summary) {
            Ok(json) => logger.write_line_kind(LogKind::Default, &json),
            Err(e) => logger.write_line_error(&e.to_string()),
        }
    }

    fn export(&self, summary: &Summary, logger: &dyn Logger) -> Result<Vec<PathBuf>> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        let path = self.dir.join(Self::file_name(&summary.title));
        fs::write(&path, Self::render(summary)?)?;
        debug!(path = %path.display(), "exported json summary");
        logger.write_line_info(&format!("  {}", path.display()));
        Ok(vec![path])
    }
}
