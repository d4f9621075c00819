use crate::columns::Column;
use crate::error::{Result, ToolboxError};
use crate::host::export::{Exporter, MarkdownExporter};
use crate::host::filter::Filter;
use crate::host::job::Job;
use crate::host::logger::{ConsoleLogger, Logger};
use crate::providers::{ColumnProviderNode, SimpleColumnProvider};
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOptions {
    /// Present all benchmark types in one summary instead of one per type
    pub join_summary: bool,
}

/// Mutable access to the lists of a configuration.
///
/// Configurations that cannot be changed report `InvalidOperation` instead of
/// silently ignoring the change.
pub trait ConfigLists {
    fn column_providers_mut(&mut self) -> Result<&mut Vec<ColumnProviderNode>>;
    fn jobs_mut(&mut self) -> Result<&mut Vec<Job>>;
    fn filters_mut(&mut self) -> Result<&mut Vec<Rc<dyn Filter>>>;
    fn loggers_mut(&mut self) -> Result<&mut Vec<Rc<dyn Logger>>>;
    fn exporters_mut(&mut self) -> Result<&mut Vec<Rc<dyn Exporter>>>;
}

/// Benchmark run configuration under construction
#[derive(Clone, Default)]
pub struct ManualConfig {
    column_providers: Vec<ColumnProviderNode>,
    jobs: Vec<Job>,
    filters: Vec<Rc<dyn Filter>>,
    loggers: Vec<Rc<dyn Logger>>,
    exporters: Vec<Rc<dyn Exporter>>,
    options: ConfigOptions,
}

impl ManualConfig {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Default columns, console logger and markdown exporter
    pub fn default_config() -> Self {
        let mut config = Self::empty();
        config.column_providers = ColumnProviderNode::defaults();
        config.loggers.push(Rc::new(ConsoleLogger));
        config.exporters.push(Rc::new(MarkdownExporter::console()));
        config
    }

    /// A mutable copy of a frozen configuration
    pub fn create(config: &ImmutableConfig) -> Self {
        Self {
            column_providers: config.column_providers.clone(),
            jobs: config.jobs.clone(),
            filters: config.filters.clone(),
            loggers: config.loggers.clone(),
            exporters: config.exporters.clone(),
            options: config.options,
        }
    }

    /// Adds the columns wrapped in a single simple provider
    pub fn add_columns(&mut self, columns: Vec<Rc<dyn Column>>) -> &mut Self {
        if !columns.is_empty() {
            self.column_providers
                .push(ColumnProviderNode::Simple(SimpleColumnProvider::new(columns)));
        }
        self
    }

    pub fn add_column_providers(&mut self, providers: Vec<ColumnProviderNode>) -> &mut Self {
        self.column_providers.extend(providers);
        self
    }

    pub fn add_jobs(&mut self, jobs: Vec<Job>) -> &mut Self {
        for job in jobs {
            if !self.jobs.contains(&job) {
                self.jobs.push(job);
            }
        }
        self
    }

    pub fn add_filters(&mut self, filters: Vec<Rc<dyn Filter>>) -> &mut Self {
        self.filters.extend(filters);
        self
    }

    pub fn add_loggers(&mut self, loggers: Vec<Rc<dyn Logger>>) -> &mut Self {
        self.loggers.extend(loggers);
        self
    }

    pub fn add_exporters(&mut self, exporters: Vec<Rc<dyn Exporter>>) -> &mut Self {
        for exporter in exporters {
            if !self.exporters.iter().any(|e| e.name() == exporter.name()) {
                self.exporters.push(exporter);
            }
        }
        self
    }

    pub fn with_join_summary(&mut self, join: bool) -> &mut Self {
        self.options.join_summary = join;
        self
    }

    pub fn column_providers(&self) -> &[ColumnProviderNode] {
        &self.column_providers
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn filters(&self) -> &[Rc<dyn Filter>] {
        &self.filters
    }

    pub fn loggers(&self) -> &[Rc<dyn Logger>] {
        &self.loggers
    }

    pub fn exporters(&self) -> &[Rc<dyn Exporter>] {
        &self.exporters
    }

    pub fn options(&self) -> ConfigOptions {
        self.options
    }

    pub fn freeze(self) -> ImmutableConfig {
        ImmutableConfig {
            column_providers: self.column_providers,
            jobs: self.jobs,
            filters: self.filters,
            loggers: self.loggers,
            exporters: self.exporters,
            options: self.options,
        }
    }
}

impl ConfigLists for ManualConfig {
    fn column_providers_mut(&mut self) -> Result<&mut Vec<ColumnProviderNode>> {
        Ok(&mut self.column_providers)
    }

    fn jobs_mut(&mut self) -> Result<&mut Vec<Job>> {
        Ok(&mut self.jobs)
    }

    fn filters_mut(&mut self) -> Result<&mut Vec<Rc<dyn Filter>>> {
        Ok(&mut self.filters)
    }

    fn loggers_mut(&mut self) -> Result<&mut Vec<Rc<dyn Logger>>> {
        Ok(&mut self.loggers)
    }

    fn exporters_mut(&mut self) -> Result<&mut Vec<Rc<dyn Exporter>>> {
        Ok(&mut self.exporters)
    }
}

impl fmt::Debug for ManualConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualConfig")
            .field("column_providers", &self.column_providers.len())
            .field("jobs", &self.jobs)
            .field("filters", &self.filters.len())
            .field("loggers", &self.loggers.len())
            .field("exporters", &self.exporters.len())
            .field("options", &self.options)
            .finish()
    }
}

/// Frozen configuration shared by benchmark cases
#[derive(Clone, Default)]
pub struct ImmutableConfig {
    column_providers: Vec<ColumnProviderNode>,
    jobs: Vec<Job>,
    filters: Vec<Rc<dyn Filter>>,
    loggers: Vec<Rc<dyn Logger>>,
    exporters: Vec<Rc<dyn Exporter>>,
    options: ConfigOptions,
}

impl ImmutableConfig {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn to_manual(&self) -> ManualConfig {
        ManualConfig::create(self)
    }

    pub fn column_providers(&self) -> &[ColumnProviderNode] {
        &self.column_providers
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn filters(&self) -> &[Rc<dyn Filter>] {
        &self.filters
    }

    pub fn loggers(&self) -> &[Rc<dyn Logger>] {
        &self.loggers
    }

    pub fn exporters(&self) -> &[Rc<dyn Exporter>] {
        &self.exporters
    }

    pub fn options(&self) -> ConfigOptions {
        self.options
    }

    fn immutable<T>(list: &str) -> Result<T> {
        Err(ToolboxError::InvalidOperation(format!(
            "Failed to get a mutable list of {}: the configuration is frozen",
            list
        )))
    }
}

impl ConfigLists for ImmutableConfig {
    fn column_providers_mut(&mut self) -> Result<&mut Vec<ColumnProviderNode>> {
        Self::immutable("column providers")
    }

    fn jobs_mut(&mut self) -> Result<&mut Vec<Job>> {
        Self::immutable("jobs")
    }

    fn filters_mut(&mut self) -> Result<&mut Vec<Rc<dyn Filter>>> {
        Self::immutable("filters")
    }

    fn loggers_mut(&mut self) -> Result<&mut Vec<Rc<dyn Logger>>> {
        Self::immutable("loggers")
    }

    fn exporters_mut(&mut self) -> Result<&mut Vec<Rc<dyn Exporter>>> {
        Self::immutable("exporters")
    }
}

impl fmt::Debug for ImmutableConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImmutableConfig")
            .field("column_providers", &self.column_providers.len())
            .field("jobs", &self.jobs)
            .field("filters", &self.filters.len())
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::StatisticColumn;

    #[test]
    fn test_default_config() {
        let config = ManualConfig::default_config();
        assert_eq!(config.column_providers().len(), 5);
        assert_eq!(config.loggers().len(), 1);
        assert_eq!(config.exporters().len(), 1);
        assert!(!config.options().join_summary);
    }

    #[test]
    fn test_add_columns_wraps_in_simple_provider() {
        let mut config = ManualConfig::empty();
        config.add_columns(vec![Rc::new(StatisticColumn::mean())]);
        assert!(matches!(
            config.column_providers()[0],
            ColumnProviderNode::Simple(_)
        ));
        config.add_columns(Vec::new());
        assert_eq!(config.column_providers().len(), 1);
    }

    #[test]
    fn test_jobs_are_unique() {
        let mut config = ManualConfig::empty();
        config.add_jobs(vec![Job::dry(), Job::dry(), Job::short_run()]);
        assert_eq!(config.jobs().len(), 2);
    }

    #[test]
    fn test_frozen_config_refuses_mutation() {
        let mut frozen = ManualConfig::default_config().freeze();
        let err = frozen.column_providers_mut().unwrap_err();
        assert!(matches!(err, ToolboxError::InvalidOperation(_)));
        assert!(frozen.jobs_mut().is_err());

        let mut manual = frozen.to_manual();
        assert!(manual.column_providers_mut().is_ok());
        assert_eq!(manual.column_providers().len(), 5);
    }
}
