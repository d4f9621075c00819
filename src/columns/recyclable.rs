use crate::columns::{Column, ColumnCategory};
use crate::host::case::BenchmarkCase;
use crate::host::params::NULL_PARAMETER_TEXT;
use crate::host::summary::Summary;
use crate::providers::{ColumnProvider, RECYCLABLE_PARAMS_PROVIDER};
use std::rc::Rc;

/// Parameter at a fixed position, whatever its name
#[derive(Debug, Clone)]
pub struct RecyclableParamColumn {
    index: usize,
    name: String,
    is_real_name: bool,
}

impl RecyclableParamColumn {
    pub fn new(index: usize, name: impl Into<String>, is_real_name: bool) -> Self {
        Self {
            index,
            name: name.into(),
            is_real_name,
        }
    }
}

impl Column for RecyclableParamColumn {
    fn id(&self) -> String {
        format!("RecyclableParamColumn.{}", self.index)
    }

    fn column_name(&self) -> String {
        self.name.clone()
    }

    fn value(&self, _summary: &Summary, case: &BenchmarkCase) -> String {
        case.parameters
            .get(self.index)
            .map(|p| p.to_display_text())
            .unwrap_or_else(|| NULL_PARAMETER_TEXT.to_string())
    }

    fn always_show(&self) -> bool {
        true
    }

    fn category(&self) -> ColumnCategory {
        ColumnCategory::Params
    }

    fn priority_in_category(&self) -> i32 {
        self.index as i32
    }

    fn legend(&self) -> String {
        if self.is_real_name {
            format!("Value of the '{}' parameter", self.name)
        } else {
            format!("Value of the parameter at position {}", self.index + 1)
        }
    }
}

/// One column per parameter position instead of per parameter name, so benchmarks
/// with differently named parameters share columns.
#[derive(Debug, Clone)]
pub struct RecyclableParamsColumnProvider {
    try_keep_param_name: bool,
    generic_name: String,
}

impl RecyclableParamsColumnProvider {
    pub fn new(try_keep_param_name: bool, generic_name: impl Into<String>) -> Self {
        Self {
            try_keep_param_name,
            generic_name: generic_name.into(),
        }
    }
}

impl Default for RecyclableParamsColumnProvider {
    fn default() -> Self {
        Self::new(true, "Param")
    }
}

impl ColumnProvider for RecyclableParamsColumnProvider {
    fn name(&self) -> &str {
        RECYCLABLE_PARAMS_PROVIDER
    }

    fn columns(&self, summary: &Summary) -> Vec<Rc<dyn Column>> {
        let max_count = summary
            .cases()
            .map(|c| c.parameters.count())
            .max()
            .unwrap_or(0);

        let mut columns: Vec<Rc<dyn Column>> = Vec::with_capacity(max_count);
        for index in 0..max_count {
            let mut names: Vec<&str> = Vec::new();
            for case in summary.cases() {
                if let Some(param) = case.parameters.get(index) {
                    if !names.contains(&param.name.as_str()) {
                        names.push(&param.name);
                    }
                }
            }
            let is_real_name = self.try_keep_param_name && names.len() == 1;
            let name = if is_real_name {
                names[0].to_string()
            } else {
                format!("{}{}", self.generic_name, index + 1)
            };
            columns.push(Rc::new(RecyclableParamColumn::new(index, name, is_real_name)));
        }
        columns
    }
}
