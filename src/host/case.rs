use crate::host::config::ImmutableConfig;
use crate::host::job::Job;
use crate::host::params::ParameterInstances;
use std::fmt;
use std::rc::Rc;

/// Identifies one benchmark method of a benchmark type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Descriptor {
    pub type_name: String,
    pub namespace: String,
    pub method_name: String,
    /// Command template, `{param}` placeholders are replaced per case
    pub command: String,
    pub baseline: bool,
    pub categories: Vec<String>,
}

impl Descriptor {
    /// `namespace.Type`, or just `Type` without a namespace
    pub fn full_type_name(&self) -> String {
        if self.namespace.is_empty() {
            self.type_name.clone()
        } else {
            format!("{}.{}", self.namespace, self.type_name)
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}.{}", self.full_type_name(), self.method_name)
    }

    pub fn display_info(&self) -> String {
        format!("{}.{}", self.type_name, self.method_name)
    }
}

/// A single runnable combination of method, job and parameter values.
///
/// Cases are shared through `Rc`; two handles denote the same case only if they
/// point to the same allocation.
pub struct BenchmarkCase {
    pub descriptor: Rc<Descriptor>,
    pub job: Rc<Job>,
    pub parameters: Rc<ParameterInstances>,
    pub config: Rc<ImmutableConfig>,
}

impl BenchmarkCase {
    pub fn create(
        descriptor: Rc<Descriptor>,
        job: Rc<Job>,
        parameters: Rc<ParameterInstances>,
        config: Rc<ImmutableConfig>,
    ) -> Rc<Self> {
        Rc::new(Self {
            descriptor,
            job,
            parameters,
            config,
        })
    }

    /// `Type.Method: Job [p=1]`
    pub fn display_info(&self) -> String {
        let params = self.parameters.display_info();
        if params.is_empty() {
            format!("{}: {}", self.descriptor.display_info(), self.job.id)
        } else {
            format!(
                "{}: {} {}",
                self.descriptor.display_info(),
                self.job.id,
                params
            )
        }
    }

    pub fn full_name(&self) -> String {
        self.descriptor.full_name()
    }
}

impl fmt::Debug for BenchmarkCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BenchmarkCase")
            .field(&self.display_info())
            .finish()
    }
}

/// Cases converted from one benchmark type
#[derive(Debug, Clone)]
pub struct BenchmarkRunInfo {
    pub cases: Vec<Rc<BenchmarkCase>>,
    pub type_name: String,
    pub config: Rc<ImmutableConfig>,
}

impl BenchmarkRunInfo {
    pub fn new(
        cases: Vec<Rc<BenchmarkCase>>,
        type_name: impl Into<String>,
        config: Rc<ImmutableConfig>,
    ) -> Self {
        Self {
            cases,
            type_name: type_name.into(),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::params::{ParamWrapper, ParameterInstance};

    fn descriptor() -> Descriptor {
        Descriptor {
            type_name: "Sorting".to_string(),
            namespace: "algos".to_string(),
            method_name: "Quick".to_string(),
            command: "true".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_descriptor_names() {
        let d = descriptor();
        assert_eq!(d.full_type_name(), "algos.Sorting");
        assert_eq!(d.full_name(), "algos.Sorting.Quick");
        assert_eq!(d.display_info(), "Sorting.Quick");
    }

    #[test]
    fn test_case_display_info() {
        let config = Rc::new(ImmutableConfig::empty());
        let params = ParameterInstances::new(vec![ParameterInstance::new(
            "n",
            Some(ParamWrapper::new("3".to_string(), None)),
        )]);
        let case = BenchmarkCase::create(
            Rc::new(descriptor()),
            Rc::new(Job::dry()),
            Rc::new(params),
            config,
        );
        assert_eq!(case.display_info(), "Sorting.Quick: Dry [n=3]");
    }
}
