use benchtoolbox::columns::ExtendedCategory;
use benchtoolbox::settings::ParamsColumnKind;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListMode {
    /// One full benchmark name per line
    Flat,
    /// Names nested by namespace and type
    Tree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExporterKind {
    Json,
}

fn parse_column_category(name: &str) -> Result<ExtendedCategory, String> {
    ExtendedCategory::parse(name).ok_or_else(|| {
        format!(
            "unknown column category '{}' (expected method, category, job, params, \
             statistics, baseline, custom, meta or metric)",
            name
        )
    })
}

#[derive(Parser, Debug)]
#[command(name = "benchtoolbox")]
#[command(version)]
#[command(
    about = "Command-line benchmarks with configurable summary columns",
    long_about = "Runs the benchmarks of a suite file and prints summary tables.\n\
                  Pass -w or --whatif to list what would run without running it."
)]
pub struct Cli {
    /// Suite file (.toml or .json)
    pub suite: PathBuf,

    /// List the benchmarks instead of running them
    #[arg(long, value_enum)]
    pub list: Option<ListMode>,

    /// Only benchmarks whose full name matches one of the glob patterns
    #[arg(short = 'f', long = "filter", num_args = 1..)]
    pub filters: Vec<String>,

    /// Only benchmarks that carry at least one of the categories
    #[arg(long = "any-category", num_args = 1..)]
    pub any_categories: Vec<String>,

    /// One summary for all benchmark types
    #[arg(short = 'j', long)]
    pub join: bool,

    /// Run every benchmark once with this job instead of the configured jobs
    #[arg(long, value_parser = ["default", "dry", "short", "fast"])]
    pub job: Option<String>,

    /// How parameter columns are shown. Overrides the settings file
    #[arg(long, value_enum)]
    pub params_column: Option<ParamsColumnKind>,

    /// Remove all summary columns of these categories
    #[arg(long, value_parser = parse_column_category, num_args = 1..)]
    pub remove_columns: Vec<ExtendedCategory>,

    /// Additional exporters
    #[arg(long, value_enum, num_args = 1..)]
    pub exporters: Vec<ExporterKind>,

    /// Artifacts directory. Overrides the settings file
    #[arg(long)]
    pub artifacts: Option<PathBuf>,

    /// Debug output
    #[arg(short = 'd', long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::parse_from([
            "benchtoolbox",
            "suite.toml",
            "-f",
            "*.Sorting.*",
            "*.Hashing.*",
            "--any-category",
            "cpu",
            "-j",
            "--job",
            "fast",
            "--params-column",
            "combined",
            "--exporters",
            "json",
        ]);
        assert_eq!(cli.suite, PathBuf::from("suite.toml"));
        assert_eq!(cli.filters.len(), 2);
        assert_eq!(cli.any_categories, vec!["cpu".to_string()]);
        assert!(cli.join);
        assert_eq!(cli.job.as_deref(), Some("fast"));
        assert_eq!(cli.params_column, Some(ParamsColumnKind::Combined));
        assert_eq!(cli.exporters, vec![ExporterKind::Json]);
    }

    #[test]
    fn test_unknown_job_rejected() {
        assert!(Cli::try_parse_from(["benchtoolbox", "s.toml", "--job", "slow"]).is_err());
    }

    #[test]
    fn test_remove_columns() {
        let cli = Cli::parse_from([
            "benchtoolbox",
            "s.toml",
            "--remove-columns",
            "Statistics",
            "method",
        ]);
        assert_eq!(
            cli.remove_columns,
            vec![ExtendedCategory::Statistics, ExtendedCategory::TargetMethod]
        );
        assert!(Cli::try_parse_from(["benchtoolbox", "s.toml", "--remove-columns", "x"]).is_err());
    }

    #[test]
    fn test_list_mode() {
        let cli = Cli::parse_from(["benchtoolbox", "s.toml", "--list", "tree"]);
        assert_eq!(cli.list, Some(ListMode::Tree));
    }
}
