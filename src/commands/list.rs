use crate::cli::ListMode;
use benchtoolbox::converter::BenchmarkConverter;
use benchtoolbox::host::{BenchmarkRunInfo, ImmutableConfig};
use benchtoolbox::suite::SuiteDefinition;
use colored::*;

/// Distinct full names of the converted benchmarks, in conversion order
pub fn benchmark_names(run_infos: &[BenchmarkRunInfo]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for case in run_infos.iter().flat_map(|r| &r.cases) {
        let name = case.full_name();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Nests dotted names, two spaces per level
pub fn render_tree(names: &[String]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut previous: Vec<&str> = Vec::new();
    for name in names {
        let parts: Vec<&str> = name.split('.').collect();
        let shared = previous
            .iter()
            .zip(&parts)
            .take_while(|(a, b)| a == b)
            .count();
        for (depth, part) in parts.iter().enumerate().skip(shared) {
            lines.push(format!("{}{}", "  ".repeat(depth), part));
        }
        previous = parts;
    }
    lines
}

/// Prints the benchmarks of a suite that pass the config's filters
pub fn list_benchmarks(suite: &SuiteDefinition, config: &ImmutableConfig, mode: ListMode) {
    let run_infos = BenchmarkConverter::suite_to_run_infos(suite, Some(config));
    let names = benchmark_names(&run_infos);
    if names.is_empty() {
        eprintln!("{} No benchmarks match.", "[X]".red());
        return;
    }

    let lines = match mode {
        ListMode::Flat => names,
        ListMode::Tree => render_tree(&names),
    };
    for line in lines {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchtoolbox::suite::SuiteFormat;

    const SUITE: &str = r#"
[[benchmark]]
type = "Sorting"
namespace = "Algo"

[[benchmark.params]]
name = "size"
values = [1, 2]

[[benchmark.methods]]
name = "Quick"
command = "true"

[[benchmark.methods]]
name = "Merge"
command = "true"

[[benchmark]]
type = "Hashing"
namespace = "Algo"

[[benchmark.methods]]
name = "Sha"
command = "true"
"#;

    fn names() -> Vec<String> {
        let suite = SuiteDefinition::parse(SUITE, SuiteFormat::Toml).unwrap();
        let run_infos = BenchmarkConverter::suite_to_run_infos(&suite, None);
        benchmark_names(&run_infos)
    }

    #[test]
    fn test_names_are_distinct() {
        assert_eq!(
            names(),
            vec!["Algo.Sorting.Quick", "Algo.Sorting.Merge", "Algo.Hashing.Sha"]
        );
    }

    #[test]
    fn test_tree() {
        assert_eq!(
            render_tree(&names()),
            vec!["Algo", "  Sorting", "    Quick", "    Merge", "  Hashing", "    Sha"]
        );
    }
}
