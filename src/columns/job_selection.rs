use crate::columns::{Column, ColumnCategory, ExtendedCategory, JobCharacteristicColumn, UnitType};
use crate::error::{Result, ToolboxError};
use crate::host::case::BenchmarkCase;
use crate::host::job::{CharacteristicGroup, JobCharacteristic};
use crate::host::summary::Summary;
use crate::providers::{ColumnProvider, JOB_SELECTION_PROVIDER};
use std::collections::HashSet;
use std::rc::Rc;

/// Wraps a job column to replace its legend
pub struct JobCharacteristicColumnWithLegend {
    inner: Rc<dyn Column>,
    legend: String,
}

impl JobCharacteristicColumnWithLegend {
    pub fn new(inner: Rc<dyn Column>, legend: impl Into<String>) -> Self {
        Self {
            inner,
            legend: legend.into(),
        }
    }
}

impl Column for JobCharacteristicColumnWithLegend {
    fn id(&self) -> String {
        self.inner.id()
    }

    fn column_name(&self) -> String {
        self.inner.column_name()
    }

    fn value(&self, summary: &Summary, case: &BenchmarkCase) -> String {
        self.inner.value(summary, case)
    }

    fn is_default(&self, summary: &Summary, case: &BenchmarkCase) -> bool {
        self.inner.is_default(summary, case)
    }

    fn is_available(&self, summary: &Summary) -> bool {
        self.inner.is_available(summary)
    }

    fn always_show(&self) -> bool {
        self.inner.always_show()
    }

    fn category(&self) -> ColumnCategory {
        self.inner.category()
    }

    fn extended_category(&self) -> ExtendedCategory {
        self.inner.extended_category()
    }

    fn priority_in_category(&self) -> i32 {
        self.inner.priority_in_category()
    }

    fn is_numeric(&self) -> bool {
        self.inner.is_numeric()
    }

    fn unit_type(&self) -> UnitType {
        self.inner.unit_type()
    }

    fn legend(&self) -> String {
        self.legend.clone()
    }
}

/// Job columns reduced to a user-defined selection.
///
/// The expression is a space separated list of `-Name` (hide) and `+Name` or
/// `Name` (show) entries, applied left to right on top of "everything visible".
/// A name is a characteristic id, a group name or alias (`Run`, `RunMode`, ...),
/// `Job`/`Id` for the job name, or `All`. Names are case-insensitive.
///
/// Values of hidden columns that differ between jobs are listed in the legend of
/// the first visible job column, unless disabled.
#[derive(Debug, Clone)]
pub struct JobColumnSelectionProvider {
    hidden: HashSet<JobCharacteristic>,
    show_hidden_values_in_legend: bool,
}

impl JobColumnSelectionProvider {
    pub fn new(expression: &str, show_hidden_values_in_legend: bool) -> Result<Self> {
        let mut hidden = HashSet::new();
        for token in expression.split_whitespace() {
            let (hide, name) = match token.as_bytes()[0] {
                b'-' => (true, &token[1..]),
                b'+' => (false, &token[1..]),
                _ => (false, token),
            };
            for characteristic in Self::lookup(name)? {
                if hide {
                    hidden.insert(characteristic);
                } else {
                    hidden.remove(&characteristic);
                }
            }
        }
        Ok(Self {
            hidden,
            show_hidden_values_in_legend,
        })
    }

    fn lookup(name: &str) -> Result<Vec<JobCharacteristic>> {
        if name.eq_ignore_ascii_case("All") {
            return Ok(JobCharacteristic::ALL.to_vec());
        }
        if name.eq_ignore_ascii_case("Job") || name.eq_ignore_ascii_case("Id") {
            return Ok(vec![JobCharacteristic::Id]);
        }
        if let Some(c) = JobCharacteristic::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(name))
        {
            return Ok(vec![c]);
        }
        if let Some(group) = CharacteristicGroup::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(name) || g.alias().eq_ignore_ascii_case(name))
        {
            return Ok(JobCharacteristic::ALL
                .into_iter()
                .filter(|c| c.group() == Some(group))
                .collect());
        }
        Err(ToolboxError::InvalidArgument(format!(
            "unknown job column '{}'",
            name
        )))
    }
}

/// Selection state of one characteristic for a given summary.
///
/// A column with the same value everywhere is neither hidden nor visible: it ends
/// up in the common header list either way.
struct Selection {
    characteristic: JobCharacteristic,
    column: Rc<dyn Column>,
    hide: bool,
    multi_value: bool,
}

impl Selection {
    fn is_hidden(&self) -> bool {
        self.multi_value && self.hide
    }

    fn is_visible(&self) -> bool {
        self.multi_value && !self.hide
    }
}

impl ColumnProvider for JobColumnSelectionProvider {
    fn name(&self) -> &str {
        JOB_SELECTION_PROVIDER
    }

    fn columns(&self, summary: &Summary) -> Vec<Rc<dyn Column>> {
        let cases: Vec<_> = summary.cases().cloned().collect();
        let mut selections: Vec<Selection> = JobCharacteristic::ALL
            .into_iter()
            .map(|characteristic| {
                let column: Rc<dyn Column> = Rc::new(JobCharacteristicColumn::new(characteristic));
                let available = column.is_available(summary);
                let distinct: HashSet<String> =
                    cases.iter().map(|c| column.value(summary, c)).collect();
                Selection {
                    characteristic,
                    hide: self.hidden.contains(&characteristic),
                    multi_value: available && distinct.len() > 1,
                    column,
                }
            })
            .collect();

        if self.show_hidden_values_in_legend {
            if let Some(mut legend_index) = selections.iter().position(|s| s.is_visible()) {
                let id_index = selections
                    .iter()
                    .position(|s| s.characteristic == JobCharacteristic::Id);
                if let Some(id) = id_index.filter(|i| !selections[*i].is_hidden()) {
                    legend_index = id;
                }

                let hidden: Vec<&Selection> = selections
                    .iter()
                    .filter(|s| s.is_hidden() && s.characteristic != JobCharacteristic::Id)
                    .collect();

                let legend = if !hidden.is_empty() {
                    let pad = cases.iter().map(|c| c.job.id.len()).max().unwrap_or(0) + 4;
                    let mut lines: Vec<String> = Vec::new();
                    for case in &cases {
                        let values: Vec<String> = hidden
                            .iter()
                            .map(|s| {
                                format!("{}={}", s.characteristic.id(), s.column.value(summary, case))
                            })
                            .collect();
                        let line = format!("{:>pad$}: {}", case.job.id, values.join(", "), pad = pad);
                        if !lines.contains(&line) {
                            lines.push(line);
                        }
                    }
                    let head = if Some(legend_index) == id_index {
                        "Job name"
                    } else {
                        "Job characteristic"
                    };
                    Some(format!(
                        "{}. Some job columns have been hidden:\n{}",
                        head,
                        lines.join("\n")
                    ))
                } else if id_index.is_some_and(|i| selections[i].is_hidden()) {
                    let mut names: Vec<&str> = Vec::new();
                    for case in &cases {
                        if !names.contains(&case.job.id.as_str()) {
                            names.push(&case.job.id);
                        }
                    }
                    Some(format!(
                        "Job characteristic. Hidden job names: {}",
                        names.join(", ")
                    ))
                } else {
                    None
                };

                if let Some(legend) = legend {
                    let target = &mut selections[legend_index];
                    target.column = Rc::new(JobCharacteristicColumnWithLegend::new(
                        target.column.clone(),
                        legend,
                    ));
                }
            }
        }

        selections
            .into_iter()
            .filter(|s| !s.is_hidden())
            .map(|s| s.column)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::case::Descriptor;
    use crate::host::config::ImmutableConfig;
    use crate::host::job::Job;
    use crate::host::params::ParameterInstances;
    use crate::host::testing::summary_of;

    fn case_with_job(job: Job) -> Rc<BenchmarkCase> {
        BenchmarkCase::create(
            Rc::new(Descriptor {
                type_name: "T".to_string(),
                method_name: "M".to_string(),
                ..Default::default()
            }),
            Rc::new(job),
            Rc::new(ParameterInstances::default()),
            Rc::new(ImmutableConfig::empty()),
        )
    }

    fn two_jobs() -> Summary {
        summary_of(vec![
            (case_with_job(Job::dry()), Vec::new()),
            (case_with_job(Job::short_run()), Vec::new()),
        ])
    }

    fn names(columns: &[Rc<dyn Column>]) -> Vec<String> {
        columns.iter().map(|c| c.column_name()).collect()
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = JobColumnSelectionProvider::new("-Bogus", true).unwrap_err();
        assert!(matches!(err, ToolboxError::InvalidArgument(_)));
    }

    #[test]
    fn test_hide_all_but_job() {
        let provider = JobColumnSelectionProvider::new("-all +JOB", false).unwrap();
        let columns = provider.columns(&two_jobs());
        // single-valued columns survive, they are folded into the header instead
        assert!(names(&columns).contains(&"Job".to_string()));
        assert!(!names(&columns).contains(&"IterationCount".to_string()));
        assert!(!names(&columns).contains(&"RunStrategy".to_string()));
        assert!(names(&columns).contains(&"Shell".to_string()));
    }

    #[test]
    fn test_group_alias() {
        let by_name = JobColumnSelectionProvider::new("-Run", false).unwrap();
        let by_alias = JobColumnSelectionProvider::new("-runmode", false).unwrap();
        assert_eq!(by_name.hidden, by_alias.hidden);
        assert_eq!(by_name.hidden.len(), 3);
    }

    #[test]
    fn test_hidden_values_go_to_job_legend() {
        let provider = JobColumnSelectionProvider::new("-Run", true).unwrap();
        let columns = provider.columns(&two_jobs());
        let job = columns
            .iter()
            .find(|c| c.column_name() == "Job")
            .unwrap();
        let legend = job.legend();
        assert!(legend.starts_with("Job name. Some job columns have been hidden:"));
        assert!(legend.contains("Dry: RunStrategy=ColdStart"));
        assert!(legend.contains("ShortRun: RunStrategy=Throughput"));
    }
}
