use serde::{Deserialize, Serialize};
use std::fmt;

const DEFAULT_WARMUP_COUNT: u32 = 2;
const DEFAULT_ITERATION_COUNT: u32 = 10;
const DEFAULT_SHELL: &str = "sh";
const DEFAULT_WORKING_DIRECTORY: &str = ".";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// How a job schedules its iterations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStrategy {
    Throughput,
    ColdStart,
    Monitoring,
}

impl fmt::Display for RunStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunStrategy::Throughput => "Throughput",
            RunStrategy::ColdStart => "ColdStart",
            RunStrategy::Monitoring => "Monitoring",
        };
        f.write_str(name)
    }
}

/// Execution settings shared by a set of benchmark cases.
///
/// Unset characteristics resolve to the defaults of the command engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub run_strategy: Option<RunStrategy>,
    #[serde(default)]
    pub warmup_count: Option<u32>,
    #[serde(default)]
    pub iteration_count: Option<u32>,
    #[serde(default)]
    pub shell: Option<String>,
    #[serde(default)]
    pub working_directory: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Job {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn default_job() -> Self {
        Self::new("DefaultJob")
    }

    /// Single cold iteration without warmup
    pub fn dry() -> Self {
        Self {
            id: "Dry".to_string(),
            run_strategy: Some(RunStrategy::ColdStart),
            warmup_count: Some(0),
            iteration_count: Some(1),
            ..Default::default()
        }
    }

    pub fn short_run() -> Self {
        Self {
            id: "ShortRun".to_string(),
            warmup_count: Some(1),
            iteration_count: Some(3),
            ..Default::default()
        }
    }

    /// Preset used as override job to get through a suite quickly
    pub fn fast() -> Self {
        Self {
            id: "Fast".to_string(),
            timeout_secs: Some(10),
            ..Self::dry()
        }
    }

    /// Look up a predefined job by name (case-insensitive)
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_job()),
            "dry" => Some(Self::dry()),
            "short" | "shortrun" => Some(Self::short_run()),
            "fast" => Some(Self::fast()),
            _ => None,
        }
    }

    pub fn resolved_run_strategy(&self) -> RunStrategy {
        self.run_strategy.unwrap_or(RunStrategy::Throughput)
    }

    pub fn resolved_warmup_count(&self) -> u32 {
        match self.resolved_run_strategy() {
            RunStrategy::ColdStart => self.warmup_count.unwrap_or(0),
            _ => self.warmup_count.unwrap_or(DEFAULT_WARMUP_COUNT),
        }
    }

    pub fn resolved_iteration_count(&self) -> u32 {
        self.iteration_count.unwrap_or(DEFAULT_ITERATION_COUNT).max(1)
    }

    pub fn resolved_shell(&self) -> &str {
        self.shell.as_deref().unwrap_or(DEFAULT_SHELL)
    }

    pub fn resolved_working_directory(&self) -> &str {
        self.working_directory
            .as_deref()
            .unwrap_or(DEFAULT_WORKING_DIRECTORY)
    }

    pub fn resolved_timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}

/// Group of related job characteristics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacteristicGroup {
    Run,
    Environment,
    Infrastructure,
}

impl CharacteristicGroup {
    pub const ALL: [CharacteristicGroup; 3] = [
        CharacteristicGroup::Run,
        CharacteristicGroup::Environment,
        CharacteristicGroup::Infrastructure,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CharacteristicGroup::Run => "Run",
            CharacteristicGroup::Environment => "Environment",
            CharacteristicGroup::Infrastructure => "Infrastructure",
        }
    }

    /// Alternative name accepted in selection expressions
    pub fn alias(&self) -> &'static str {
        match self {
            CharacteristicGroup::Run => "RunMode",
            CharacteristicGroup::Environment => "EnvironmentMode",
            CharacteristicGroup::Infrastructure => "InfrastructureMode",
        }
    }
}

/// A single displayable job setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobCharacteristic {
    Id,
    RunStrategy,
    WarmupCount,
    IterationCount,
    Shell,
    WorkingDirectory,
    Timeout,
}

impl JobCharacteristic {
    pub const ALL: [JobCharacteristic; 7] = [
        JobCharacteristic::Id,
        JobCharacteristic::RunStrategy,
        JobCharacteristic::WarmupCount,
        JobCharacteristic::IterationCount,
        JobCharacteristic::Shell,
        JobCharacteristic::WorkingDirectory,
        JobCharacteristic::Timeout,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            JobCharacteristic::Id => "Job",
            JobCharacteristic::RunStrategy => "RunStrategy",
            JobCharacteristic::WarmupCount => "WarmupCount",
            JobCharacteristic::IterationCount => "IterationCount",
            JobCharacteristic::Shell => "Shell",
            JobCharacteristic::WorkingDirectory => "WorkingDirectory",
            JobCharacteristic::Timeout => "Timeout",
        }
    }

    /// `None` for the job name itself
    pub fn group(&self) -> Option<CharacteristicGroup> {
        match self {
            JobCharacteristic::Id => None,
            JobCharacteristic::RunStrategy
            | JobCharacteristic::WarmupCount
            | JobCharacteristic::IterationCount => Some(CharacteristicGroup::Run),
            JobCharacteristic::Shell | JobCharacteristic::WorkingDirectory => {
                Some(CharacteristicGroup::Environment)
            }
            JobCharacteristic::Timeout => Some(CharacteristicGroup::Infrastructure),
        }
    }

    /// Whether the job sets this characteristic explicitly
    pub fn is_set(&self, job: &Job) -> bool {
        match self {
            JobCharacteristic::Id => true,
            JobCharacteristic::RunStrategy => job.run_strategy.is_some(),
            JobCharacteristic::WarmupCount => job.warmup_count.is_some(),
            JobCharacteristic::IterationCount => job.iteration_count.is_some(),
            JobCharacteristic::Shell => job.shell.is_some(),
            JobCharacteristic::WorkingDirectory => job.working_directory.is_some(),
            JobCharacteristic::Timeout => job.timeout_secs.is_some(),
        }
    }

    pub fn value(&self, job: &Job) -> String {
        match self {
            JobCharacteristic::Id => job.id.clone(),
            JobCharacteristic::RunStrategy => job.resolved_run_strategy().to_string(),
            JobCharacteristic::WarmupCount => job.resolved_warmup_count().to_string(),
            JobCharacteristic::IterationCount => job.resolved_iteration_count().to_string(),
            JobCharacteristic::Shell => job.resolved_shell().to_string(),
            JobCharacteristic::WorkingDirectory => job.resolved_working_directory().to_string(),
            JobCharacteristic::Timeout => format!("{}s", job.resolved_timeout_secs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(Job::preset("DRY").unwrap().id, "Dry");
        assert_eq!(Job::preset("short").unwrap().resolved_iteration_count(), 3);
        assert!(Job::preset("unknown").is_none());
    }

    #[test]
    fn test_resolved_defaults() {
        let job = Job::new("Plain");
        assert_eq!(job.resolved_run_strategy(), RunStrategy::Throughput);
        assert_eq!(job.resolved_warmup_count(), 2);
        assert_eq!(job.resolved_iteration_count(), 10);
        assert_eq!(job.resolved_shell(), "sh");
    }

    #[test]
    fn test_cold_start_skips_warmup() {
        let job = Job {
            run_strategy: Some(RunStrategy::ColdStart),
            ..Job::new("Cold")
        };
        assert_eq!(job.resolved_warmup_count(), 0);
    }

    #[test]
    fn test_characteristic_values() {
        let job = Job::fast();
        assert_eq!(JobCharacteristic::Id.value(&job), "Fast");
        assert_eq!(JobCharacteristic::RunStrategy.value(&job), "ColdStart");
        assert_eq!(JobCharacteristic::Timeout.value(&job), "10s");
        assert_eq!(JobCharacteristic::Id.group(), None);
        assert_eq!(
            JobCharacteristic::Shell.group(),
            Some(CharacteristicGroup::Environment)
        );
    }
}
