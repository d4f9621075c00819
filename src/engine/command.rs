use crate::engine::Engine;
use crate::error::{Result, ToolboxError};
use crate::host::case::BenchmarkCase;
use crate::host::job::Job;
use crate::host::params::ParameterInstances;
use crate::host::report::{BenchmarkReport, Measurement, Metric, MetricDescriptor};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, warn};

static PLACEHOLDER: Lazy<std::result::Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"\{(\w+)\}"));

/// Replaces `{name}` with the raw value of parameter `name`.
///
/// Unknown placeholders are left untouched.
pub fn substitute(template: &str, parameters: &ParameterInstances) -> Result<String> {
    let regex = PLACEHOLDER
        .as_ref()
        .map_err(|e| ToolboxError::ConfigError(e.to_string()))?;
    let command = regex.replace_all(template, |caps: &Captures| {
        parameters
            .by_name(&caps[1])
            .and_then(|p| p.raw_value())
            .map(str::to_string)
            .unwrap_or_else(|| caps[0].to_string())
    });
    Ok(command.into_owned())
}

/// Runs the case's command through the job's shell, one process per iteration
#[derive(Debug, Default)]
pub struct CommandEngine;

impl CommandEngine {
    pub fn new() -> Self {
        Self
    }

    /// Wall time and stdout size of one run
    async fn run_once(&self, command: &str, job: &Job) -> Result<(Duration, usize)> {
        let timeout = Duration::from_secs(job.resolved_timeout_secs());
        let start = Instant::now();
        let child = Command::new(job.resolved_shell())
            .arg("-c")
            .arg(command)
            .current_dir(job.resolved_working_directory())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(timeout, child)
            .await
            .map_err(|_| {
                ToolboxError::ExecutionError(format!(
                    "'{}' timed out after {}s",
                    command,
                    timeout.as_secs()
                ))
            })?
            .map_err(|e| ToolboxError::ExecutionError(format!("'{}': {}", command, e)))?;
        let elapsed = start.elapsed();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ToolboxError::ExecutionError(format!(
                "'{}' exited with {}: {}",
                command,
                output.status,
                stderr.trim()
            )));
        }
        Ok((elapsed, output.stdout.len()))
    }

    async fn measure(
        &self,
        case: &BenchmarkCase,
        measurements: &mut Vec<Measurement>,
        output_sizes: &mut Vec<usize>,
    ) -> Result<()> {
        let command = substitute(&case.descriptor.command, &case.parameters)?;
        let job = &case.job;

        for i in 0..job.resolved_warmup_count() {
            debug!(case = %case.display_info(), iteration = i, "warmup");
            self.run_once(&command, job).await?;
        }
        for i in 0..job.resolved_iteration_count() {
            let (elapsed, size) = self.run_once(&command, job).await?;
            measurements.push(Measurement::new(i, 1, elapsed.as_nanos() as f64));
            output_sizes.push(size);
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl Engine for CommandEngine {
    fn name(&self) -> &str {
        "command"
    }

    async fn run(&self, case: &Rc<BenchmarkCase>) -> BenchmarkReport {
        let mut measurements = Vec::new();
        let mut output_sizes = Vec::new();
        let result = self.measure(case, &mut measurements, &mut output_sizes).await;
        if let Err(e) = &result {
            warn!(case = %case.display_info(), error = %e, "benchmark case failed");
        }

        let mut metrics = Vec::new();
        if !output_sizes.is_empty() {
            let mean = output_sizes.iter().sum::<usize>() as f64 / output_sizes.len() as f64;
            metrics.push(Metric::new(MetricDescriptor::output_size(), mean));
        }
        BenchmarkReport::new(case.clone(), result.is_ok(), measurements, metrics)
    }
}
