use crate::error::{Result, ToolboxError};
use crate::host::case::BenchmarkCase;
use glob::{MatchOptions, Pattern};
use std::any::Any;
use std::rc::Rc;

/// Decides whether a benchmark case is executed.
///
/// A case runs only if every filter of its config accepts it.
pub trait Filter {
    fn predicate(&self, case: &Rc<BenchmarkCase>) -> bool;

    fn as_any(&self) -> &dyn Any;
}

/// Whether `filter` is the object behind `this`
pub fn is_same_filter(filter: &Rc<dyn Filter>, this: &dyn Filter) -> bool {
    std::ptr::eq(
        Rc::as_ptr(filter) as *const u8,
        this as *const dyn Filter as *const u8,
    )
}

/// Accepts cases whose full name matches any of the glob patterns
#[derive(Debug)]
pub struct GlobFilter {
    patterns: Vec<Pattern>,
}

impl GlobFilter {
    pub fn new(patterns: &[String]) -> Result<Self> {
        if patterns.is_empty() {
            return Err(ToolboxError::InvalidArgument(
                "glob filter needs at least one pattern".to_string(),
            ));
        }
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    ToolboxError::InvalidArgument(format!("invalid pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }
}

impl Filter for GlobFilter {
    fn predicate(&self, case: &Rc<BenchmarkCase>) -> bool {
        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };
        let full_name = case.full_name();
        self.patterns
            .iter()
            .any(|p| p.matches_with(&full_name, options))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Accepts cases that carry at least one of the given categories
#[derive(Debug)]
pub struct AnyCategoriesFilter {
    categories: Vec<String>,
}

impl AnyCategoriesFilter {
    pub fn new(categories: Vec<String>) -> Self {
        Self { categories }
    }
}

impl Filter for AnyCategoriesFilter {
    fn predicate(&self, case: &Rc<BenchmarkCase>) -> bool {
        case.descriptor
            .categories
            .iter()
            .any(|c| self.categories.iter().any(|wanted| wanted.eq_ignore_ascii_case(c)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
