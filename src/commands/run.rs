use crate::cli::{Cli, ExporterKind};
use anyhow::{bail, Context};
use benchtoolbox::columns::{CombinedParamsColumn, RecyclableParamsColumnProvider};
use benchtoolbox::engine::CommandEngine;
use benchtoolbox::host::{
    AnyCategoriesFilter, ConsoleLogger, Exporter, Filter, GlobFilter, ImmutableConfig, Job,
    JsonExporter, ManualConfig,
};
use benchtoolbox::providers::{CategoryFilter, ColumnProviderNode};
use benchtoolbox::replace;
use benchtoolbox::run_infos::BenchmarkRunInfos;
use benchtoolbox::settings::{ParamsColumnKind, ToolboxSettings};
use benchtoolbox::suite::SuiteDefinition;
use benchtoolbox::whatif::WhatifFilter;
use colored::*;
use std::rc::Rc;
use tracing::{debug, info};

/// Run configuration from the command line, falling back to the settings file
pub fn build_config(
    cli: &Cli,
    settings: &ToolboxSettings,
    whatif: &Rc<WhatifFilter>,
) -> anyhow::Result<ImmutableConfig> {
    let mut config = ManualConfig::default_config();

    let mut filters: Vec<Rc<dyn Filter>> = Vec::new();
    if !cli.filters.is_empty() {
        filters.push(Rc::new(GlobFilter::new(&cli.filters)?));
    }
    if !cli.any_categories.is_empty() {
        filters.push(Rc::new(AnyCategoriesFilter::new(cli.any_categories.clone())));
    }
    filters.push(whatif.clone());
    config.add_filters(filters);
    config.with_join_summary(cli.join || settings.join_summary);

    let category_filter = CategoryFilter::new();
    match cli.params_column.unwrap_or(settings.params_column) {
        ParamsColumnKind::Default => {}
        ParamsColumnKind::Combined => {
            let column = CombinedParamsColumn::new(
                settings.combined_format.as_str(),
                settings.combined_separator.as_str(),
                settings.combined_prefix.as_str(),
                settings.combined_suffix.as_str(),
            );
            replace::replace_column_category_with_columns(
                &mut config,
                &category_filter,
                vec![Rc::new(column)],
            )?;
        }
        ParamsColumnKind::Recyclable => {
            let provider =
                RecyclableParamsColumnProvider::new(true, settings.generic_param_name.as_str());
            replace::replace_column_category_with_providers(
                &mut config,
                &category_filter,
                vec![ColumnProviderNode::custom(provider)],
            )?;
        }
    }

    if !cli.remove_columns.is_empty() {
        replace::remove_columns_by_extended_category(
            &mut config,
            &category_filter,
            &cli.remove_columns,
        )?;
    }

    let results_dir = match &cli.artifacts {
        Some(dir) => dir.join("results"),
        None => settings.results_dir(),
    };
    let exporters: Vec<Rc<dyn Exporter>> = cli
        .exporters
        .iter()
        .map(|kind| match kind {
            ExporterKind::Json => Rc::new(JsonExporter::new(&results_dir)) as Rc<dyn Exporter>,
        })
        .collect();
    config.add_exporters(exporters);

    debug!(?config, "built run configuration");
    Ok(config.freeze())
}

/// Runs the suite, or prints what would run when the what-if filter is enabled
pub async fn run_suite(
    cli: &Cli,
    suite: &SuiteDefinition,
    config: ImmutableConfig,
    whatif: &Rc<WhatifFilter>,
) -> anyhow::Result<()> {
    let override_job = match cli.job.as_deref() {
        Some(name) => Some(Job::preset(name).with_context(|| format!("unknown job '{}'", name))?),
        None => None,
    };
    let join = config.options().join_summary;

    let mut run_infos = BenchmarkRunInfos::new(Some(config), override_job);
    run_infos.convert_suite(suite);

    if whatif.enabled() {
        whatif.print_as_summaries(&ConsoleLogger, Some(join));
        return Ok(());
    }
    if run_infos.is_empty() {
        eprintln!("{} No benchmarks match.", "[X]".red());
        return Ok(());
    }

    let engine = CommandEngine::new();
    let summaries = run_infos.run_all(&engine).await?;
    let failed: usize = summaries
        .iter()
        .flat_map(|s| &s.reports)
        .filter(|r| !r.success)
        .count();
    info!(summaries = summaries.len(), failed, "benchmark run finished");
    if failed > 0 {
        bail!("{} benchmark(s) failed", failed);
    }
    Ok(())
}
