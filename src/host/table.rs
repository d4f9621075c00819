use crate::columns::{Column, ColumnCategory};
use crate::host::logger::{LogKind, Logger};
use crate::host::summary::Summary;
use crate::providers::ColumnProviderNode;
use std::collections::HashSet;
use std::rc::Rc;

/// A visible column of a [`SummaryTable`]
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub header: String,
    pub is_numeric: bool,
    pub legend: String,
}

/// Summary values laid out as rows and columns.
///
/// Job columns that hold the same value in every row are pulled out of the table
/// and listed above it.
#[derive(Debug, Clone, Default)]
pub struct SummaryTable {
    columns: Vec<TableColumn>,
    common: Vec<(String, String)>,
    rows: Vec<Vec<String>>,
}

impl SummaryTable {
    pub fn build(summary: &Summary, providers: &[ColumnProviderNode]) -> Self {
        let mut seen = HashSet::new();
        let mut candidates: Vec<Rc<dyn Column>> = providers
            .iter()
            .flat_map(|p| p.columns(summary))
            .filter(|c| seen.insert(c.id()))
            .filter(|c| c.is_available(summary))
            .collect();
        candidates.sort_by_key(|c| (c.category(), c.priority_in_category()));

        let cases: Vec<_> = summary.cases().cloned().collect();
        let mut table = SummaryTable::default();
        let mut values_by_column: Vec<Vec<String>> = Vec::new();

        for column in candidates {
            if !cases.is_empty() && cases.iter().all(|c| column.is_default(summary, c)) {
                continue;
            }
            let values: Vec<String> = cases.iter().map(|c| column.value(summary, c)).collect();
            let is_common = !column.always_show()
                && column.category() == ColumnCategory::Job
                && values.first().is_some_and(|v| values.iter().all(|x| x == v));
            if is_common {
                table.common.push((column.column_name(), values[0].clone()));
                continue;
            }
            table.columns.push(TableColumn {
                header: column.column_name(),
                is_numeric: column.is_numeric(),
                legend: column.legend(),
            });
            values_by_column.push(values);
        }

        table.rows = (0..cases.len())
            .map(|row| values_by_column.iter().map(|v| v[row].clone()).collect())
            .collect();
        table
    }

    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    pub fn common_columns(&self) -> &[(String, String)] {
        &self.common
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_values(&self, header: &str) -> Option<Vec<&str>> {
        let index = self.columns.iter().position(|c| c.header == header)?;
        Some(self.rows.iter().map(|r| r[index].as_str()).collect())
    }

    pub fn print_common_columns(&self, logger: &dyn Logger) {
        if self.common.is_empty() {
            return;
        }
        let text = self
            .common
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("  ");
        logger.write_line_kind(LogKind::Info, &text);
    }

    /// Markdown lines of the table: header, separator, one line per row
    pub fn to_markdown(&self) -> Vec<String> {
        if self.columns.is_empty() {
            return Vec::new();
        }
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                self.rows
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(c.header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(&c.header, *w, c.is_numeric))
            .collect();
        lines.push(format!("| {} |", header.join(" | ")));

        let separator: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| {
                if c.is_numeric {
                    format!("{}:", "-".repeat(*w + 1))
                } else {
                    "-".repeat(*w + 2)
                }
            })
            .collect();
        lines.push(format!("|{}|", separator.join("|")));

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(self.columns.iter().zip(&widths))
                .map(|(v, (c, w))| pad(v, *w, c.is_numeric))
                .collect();
            lines.push(format!("| {} |", cells.join(" | ")));
        }
        lines
    }

    /// `Header : legend` lines for visible columns that carry a legend
    pub fn legends(&self) -> Vec<String> {
        let width = self
            .columns
            .iter()
            .map(|c| c.header.chars().count())
            .max()
            .unwrap_or(0);
        self.columns
            .iter()
            .filter(|c| !c.legend.is_empty())
            .map(|c| format!("  {:<width$} : {}", c.header, c.legend, width = width))
            .collect()
    }
}

fn pad(text: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{:>width$}", text, width = width)
    } else {
        format!("{:<width$}", text, width = width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::{ParamColumn, StatisticColumn, TargetMethodColumn};
    use crate::host::report::Measurement;
    use crate::host::testing::{case, summary_of};
    use crate::providers::SimpleColumnProvider;

    fn providers() -> Vec<ColumnProviderNode> {
        vec![ColumnProviderNode::Simple(SimpleColumnProvider::new(vec![
            Rc::new(StatisticColumn::mean()),
            Rc::new(TargetMethodColumn::method()),
            Rc::new(TargetMethodColumn::namespace()),
            Rc::new(ParamColumn::new("size", 0)),
        ]))]
    }

    #[test]
    fn test_columns_ordered_by_category() {
        let a = case("Sorting", "Quick", &[("size", "10")]);
        let b = case("Sorting", "Merge", &[("size", "20")]);
        let summary = summary_of(vec![
            (a, vec![Measurement::new(0, 1, 100.0)]),
            (b, vec![Measurement::new(0, 1, 200.0)]),
        ]);
        let table = SummaryTable::build(&summary, &providers());
        let headers: Vec<&str> = table.columns().iter().map(|c| c.header.as_str()).collect();
        assert_eq!(headers, vec!["Method", "size", "Mean"]);
        assert_eq!(table.column_values("Method").unwrap(), vec!["Quick", "Merge"]);
    }

    #[test]
    fn test_common_job_columns_move_above_table() {
        let a = case("Sorting", "Quick", &[]);
        let b = case("Sorting", "Merge", &[]);
        let summary = summary_of(vec![(a, Vec::new()), (b, Vec::new())]);
        let table = SummaryTable::build(&summary, &providers());
        assert_eq!(
            table.common_columns(),
            &[("Namespace".to_string(), "bench".to_string())]
        );
    }

    #[test]
    fn test_markdown_alignment() {
        let a = case("Sorting", "Quick", &[("size", "10")]);
        let summary = summary_of(vec![(a, vec![Measurement::new(0, 1, 5.0)])]);
        let lines = SummaryTable::build(&summary, &providers()).to_markdown();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("| Method | size |"));
        assert!(lines[1].ends_with(":|"));
    }
}
