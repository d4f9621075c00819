//! Replace parts of a benchmark configuration.
//!
//! The functions at the top level edit a configuration in place and fail with
//! `InvalidOperation` for configurations that cannot be changed. The [`frozen`]
//! module offers the same operations for an [`ImmutableConfig`], returning a new
//! [`ManualConfig`] and leaving the original untouched.

use crate::columns::{Column, ColumnCategory, ExtendedCategory};
use crate::error::Result;
use crate::host::config::{ConfigLists, ImmutableConfig, ManualConfig};
use crate::host::export::Exporter;
use crate::host::filter::Filter;
use crate::host::job::Job;
use crate::host::logger::Logger;
use crate::providers::{CategoryFilter, ColumnProviderNode};
use std::rc::Rc;
use tracing::debug;

fn push_distinct(categories: &mut Vec<ExtendedCategory>, category: ExtendedCategory) {
    if !categories.contains(&category) {
        categories.push(category);
    }
}

/// Removes all columns of the categories the new columns belong to, then adds the
/// new columns as one provider.
pub fn replace_column_category_with_columns<C: ConfigLists + ?Sized>(
    config: &mut C,
    filter: &CategoryFilter,
    columns: Vec<Rc<dyn Column>>,
) -> Result<()> {
    let mut categories = Vec::new();
    for column in &columns {
        push_distinct(&mut categories, column.extended_category());
    }
    debug!(?categories, "replacing column categories with columns");

    let providers = config.column_providers_mut()?;
    filter.remove_by_category(providers, &categories);
    if !columns.is_empty() {
        providers.push(ColumnProviderNode::simple(columns));
    }
    Ok(())
}

/// Removes all columns of the categories the new providers yield, then adds the
/// new providers.
pub fn replace_column_category_with_providers<C: ConfigLists + ?Sized>(
    config: &mut C,
    filter: &CategoryFilter,
    new_providers: Vec<ColumnProviderNode>,
) -> Result<()> {
    let mut categories = Vec::new();
    for provider in &new_providers {
        for category in filter.node_categories(provider) {
            push_distinct(&mut categories, category);
        }
    }
    debug!(?categories, "replacing column categories with providers");

    let providers = config.column_providers_mut()?;
    filter.remove_by_category(providers, &categories);
    providers.extend(new_providers);
    Ok(())
}

pub fn remove_columns_by_category<C: ConfigLists + ?Sized>(
    config: &mut C,
    filter: &CategoryFilter,
    categories: &[ColumnCategory],
) -> Result<()> {
    let extended: Vec<ExtendedCategory> = categories.iter().map(|c| (*c).into()).collect();
    remove_columns_by_extended_category(config, filter, &extended)
}

/// Like [`remove_columns_by_category`], but can target method-name and benchmark
/// category columns separately from the other job columns.
pub fn remove_columns_by_extended_category<C: ConfigLists + ?Sized>(
    config: &mut C,
    filter: &CategoryFilter,
    categories: &[ExtendedCategory],
) -> Result<()> {
    debug!(?categories, "removing columns by category");
    filter.remove_by_category(config.column_providers_mut()?, categories);
    Ok(())
}

/// Exporters are unique by name
pub fn replace_exporters<C: ConfigLists + ?Sized>(
    config: &mut C,
    exporters: Vec<Rc<dyn Exporter>>,
) -> Result<()> {
    let list = config.exporters_mut()?;
    list.clear();
    for exporter in exporters {
        if !list.iter().any(|e| e.name() == exporter.name()) {
            list.push(exporter);
        }
    }
    Ok(())
}

pub fn replace_loggers<C: ConfigLists + ?Sized>(
    config: &mut C,
    loggers: Vec<Rc<dyn Logger>>,
) -> Result<()> {
    let list = config.loggers_mut()?;
    list.clear();
    list.extend(loggers);
    Ok(())
}

pub fn replace_jobs<C: ConfigLists + ?Sized>(config: &mut C, jobs: Vec<Job>) -> Result<()> {
    let list = config.jobs_mut()?;
    list.clear();
    for job in jobs {
        if !list.contains(&job) {
            list.push(job);
        }
    }
    Ok(())
}

pub fn replace_filters<C: ConfigLists + ?Sized>(
    config: &mut C,
    filters: Vec<Rc<dyn Filter>>,
) -> Result<()> {
    let list = config.filters_mut()?;
    list.clear();
    list.extend(filters);
    Ok(())
}

/// Replacements on a frozen configuration, each producing a new mutable copy
pub mod frozen {
    use super::*;

    fn thaw(
        config: &ImmutableConfig,
        edit: impl FnOnce(&mut ManualConfig) -> Result<()>,
    ) -> Result<ManualConfig> {
        let mut manual = config.to_manual();
        edit(&mut manual)?;
        Ok(manual)
    }

    pub fn replace_column_category_with_columns(
        config: &ImmutableConfig,
        filter: &CategoryFilter,
        columns: Vec<Rc<dyn Column>>,
    ) -> Result<ManualConfig> {
        thaw(config, |m| super::replace_column_category_with_columns(m, filter, columns))
    }

    pub fn replace_column_category_with_providers(
        config: &ImmutableConfig,
        filter: &CategoryFilter,
        providers: Vec<ColumnProviderNode>,
    ) -> Result<ManualConfig> {
        thaw(config, |m| super::replace_column_category_with_providers(m, filter, providers))
    }

    pub fn remove_columns_by_category(
        config: &ImmutableConfig,
        filter: &CategoryFilter,
        categories: &[ColumnCategory],
    ) -> Result<ManualConfig> {
        thaw(config, |m| super::remove_columns_by_category(m, filter, categories))
    }

    pub fn remove_columns_by_extended_category(
        config: &ImmutableConfig,
        filter: &CategoryFilter,
        categories: &[ExtendedCategory],
    ) -> Result<ManualConfig> {
        thaw(config, |m| super::remove_columns_by_extended_category(m, filter, categories))
    }

    pub fn replace_exporters(
        config: &ImmutableConfig,
        exporters: Vec<Rc<dyn Exporter>>,
    ) -> Result<ManualConfig> {
        thaw(config, |m| super::replace_exporters(m, exporters))
    }

    pub fn replace_loggers(
        config: &ImmutableConfig,
        loggers: Vec<Rc<dyn Logger>>,
    ) -> Result<ManualConfig> {
        thaw(config, |m| super::replace_loggers(m, loggers))
    }

    pub fn replace_jobs(config: &ImmutableConfig, jobs: Vec<Job>) -> Result<ManualConfig> {
        thaw(config, |m| super::replace_jobs(m, jobs))
    }

    pub fn replace_filters(
        config: &ImmutableConfig,
        filters: Vec<Rc<dyn Filter>>,
    ) -> Result<ManualConfig> {
        thaw(config, |m| super::replace_filters(m, filters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::{CombinedParamsColumn, RecyclableParamsColumnProvider};
    use crate::error::ToolboxError;
    use crate::host::export::{JsonExporter, MarkdownExporter};
    use crate::host::filter::AnyCategoriesFilter;
    use crate::host::logger::AccumulationLogger;

    fn provider_names(config: &ManualConfig) -> Vec<String> {
        config
            .column_providers()
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    #[test]
    fn test_replace_params_with_combined_column() {
        let filter = CategoryFilter::new();
        let mut config = ManualConfig::default_config();
        replace_column_category_with_columns(
            &mut config,
            &filter,
            vec![Rc::new(CombinedParamsColumn::default())],
        )
        .unwrap();
        assert_eq!(
            provider_names(&config),
            vec!["descriptor", "job", "statistics", "metrics", "simple"]
        );
    }

    #[test]
    fn test_replace_params_with_recyclable_provider() {
        let filter = CategoryFilter::new();
        let mut config = ManualConfig::default_config();
        replace_column_category_with_providers(
            &mut config,
            &filter,
            vec![ColumnProviderNode::custom(
                RecyclableParamsColumnProvider::default(),
            )],
        )
        .unwrap();
        assert_eq!(
            provider_names(&config),
            vec!["descriptor", "job", "statistics", "metrics", "recyclable-params"]
        );
    }

    #[test]
    fn test_remove_by_host_category() {
        let filter = CategoryFilter::new();
        let mut config = ManualConfig::default_config();
        remove_columns_by_category(
            &mut config,
            &filter,
            &[ColumnCategory::Job, ColumnCategory::Metric],
        )
        .unwrap();
        assert_eq!(
            provider_names(&config),
            vec!["descriptor", "statistics", "params"]
        );
    }

    #[test]
    fn test_remove_by_extended_category() {
        let filter = CategoryFilter::new();
        let mut config = ManualConfig::default_config();
        remove_columns_by_extended_category(&mut config, &filter, &[ExtendedCategory::TargetMethod])
            .unwrap();
        assert_eq!(
            provider_names(&config),
            vec!["job", "statistics", "params", "metrics"]
        );

        let frozen = ManualConfig::default_config().freeze();
        let manual = frozen::remove_columns_by_extended_category(
            &frozen,
            &filter,
            &[ExtendedCategory::Statistics],
        )
        .unwrap();
        assert_eq!(manual.column_providers().len(), 4);
    }

    #[test]
    fn test_replace_lists() {
        let mut config = ManualConfig::default_config();
        replace_jobs(&mut config, vec![Job::dry(), Job::dry()]).unwrap();
        assert_eq!(config.jobs().len(), 1);

        replace_exporters(
            &mut config,
            vec![
                Rc::new(JsonExporter::new("a")),
                Rc::new(JsonExporter::new("b")),
                Rc::new(MarkdownExporter::console()),
            ],
        )
        .unwrap();
        assert_eq!(config.exporters().len(), 2);

        replace_loggers(&mut config, vec![Rc::new(AccumulationLogger::new())]).unwrap();
        assert_eq!(config.loggers().len(), 1);

        replace_filters(
            &mut config,
            vec![Rc::new(AnyCategoriesFilter::new(vec!["x".to_string()]))],
        )
        .unwrap();
        assert_eq!(config.filters().len(), 1);
    }

    #[test]
    fn test_in_place_on_frozen_config_fails() {
        let filter = CategoryFilter::new();
        let mut config = ManualConfig::default_config().freeze();
        let err = remove_columns_by_category(&mut config, &filter, &[ColumnCategory::Job])
            .unwrap_err();
        assert!(matches!(err, ToolboxError::InvalidOperation(_)));
        assert!(replace_jobs(&mut config, Vec::new()).is_err());
    }

    #[test]
    fn test_frozen_variant_returns_copy() {
        let filter = CategoryFilter::new();
        let config = ManualConfig::default_config().freeze();
        let manual =
            frozen::remove_columns_by_category(&config, &filter, &[ColumnCategory::Statistics])
                .unwrap();
        assert_eq!(manual.column_providers().len(), 4);
        assert_eq!(config.column_providers().len(), 5);

        let manual = frozen::replace_jobs(&config, vec![Job::short_run()]).unwrap();
        assert_eq!(manual.jobs()[0].id, "ShortRun");
    }
}
