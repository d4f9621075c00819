use std::fmt;

/// Text shown for a parameter without a value.
pub const NULL_PARAMETER_TEXT: &str = "?";

/// Associates a strongly typed parameter value with the text shown in logs and summaries.
///
/// The wrapper owns its value, so the payload is released together with the wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamWrapper<T> {
    /// The strongly typed parameter value
    pub value: T,
    /// The associated display text
    pub display_text: Option<String>,
}

impl<T> ParamWrapper<T> {
    pub fn new(value: T, display_text: Option<String>) -> Self {
        Self {
            value,
            display_text,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: fmt::Display> fmt::Display for ParamWrapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_text {
            Some(text) => f.write_str(text),
            None => write!(f, "{}", self.value),
        }
    }
}

/// One named parameter value of a benchmark case
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInstance {
    pub name: String,
    pub value: Option<ParamWrapper<String>>,
}

impl ParameterInstance {
    pub fn new(name: impl Into<String>, value: Option<ParamWrapper<String>>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Raw value used for command substitution
    pub fn raw_value(&self) -> Option<&str> {
        self.value.as_ref().map(|v| v.value.as_str())
    }

    pub fn to_display_text(&self) -> String {
        self.value
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| NULL_PARAMETER_TEXT.to_string())
    }
}

/// Ordered parameter values of a benchmark case
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterInstances {
    items: Vec<ParameterInstance>,
}

impl ParameterInstances {
    pub fn new(items: Vec<ParameterInstance>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ParameterInstance] {
        &self.items
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ParameterInstance> {
        self.items.get(index)
    }

    pub fn by_name(&self, name: &str) -> Option<&ParameterInstance> {
        self.items.iter().find(|p| p.name == name)
    }

    /// `[size=10, mode=fast]`, or an empty string without parameters
    pub fn display_info(&self) -> String {
        if self.items.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = self
            .items
            .iter()
            .map(|p| format!("{}={}", p.name, p.to_display_text()))
            .collect();
        format!("[{}]", pairs.join(", "))
    }
}
