use crate::host::case::BenchmarkCase;
use serde::Serialize;
use std::rc::Rc;

/// One measured iteration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    pub iteration_index: u32,
    pub operations: u64,
    pub nanoseconds: f64,
}

impl Measurement {
    pub fn new(iteration_index: u32, operations: u64, nanoseconds: f64) -> Self {
        Self {
            iteration_index,
            operations,
            nanoseconds,
        }
    }

    pub fn nanoseconds_per_op(&self) -> f64 {
        if self.operations == 0 {
            return self.nanoseconds;
        }
        self.nanoseconds / self.operations as f64
    }
}

/// Describes the kind of value a [`Metric`] carries
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MetricDescriptor {
    pub id: String,
    pub display_name: String,
    pub legend: String,
    pub unit: String,
}

impl MetricDescriptor {
    pub fn output_size() -> Self {
        Self {
            id: "OutputSize".to_string(),
            display_name: "Output".to_string(),
            legend: "Bytes written to stdout per iteration".to_string(),
            unit: "B".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub descriptor: MetricDescriptor,
    pub value: f64,
}

impl Metric {
    pub fn new(descriptor: MetricDescriptor, value: f64) -> Self {
        Self { descriptor, value }
    }
}

/// Basic descriptive statistics over workload measurements, in nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    pub n: usize,
    pub mean: f64,
    pub standard_deviation: f64,
    pub standard_error: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl Statistics {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let standard_deviation = variance.sqrt();

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };

        Some(Self {
            n,
            mean,
            standard_deviation,
            standard_error: standard_deviation / (n as f64).sqrt(),
            min: sorted[0],
            max: sorted[n - 1],
            median,
        })
    }
}

/// Outcome of executing one benchmark case
#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    pub case: Rc<BenchmarkCase>,
    pub success: bool,
    pub measurements: Vec<Measurement>,
    pub metrics: Vec<Metric>,
}

impl BenchmarkReport {
    pub fn new(
        case: Rc<BenchmarkCase>,
        success: bool,
        measurements: Vec<Measurement>,
        metrics: Vec<Metric>,
    ) -> Self {
        Self {
            case,
            success,
            measurements,
            metrics,
        }
    }

    pub fn statistics(&self) -> Option<Statistics> {
        let values: Vec<f64> = self
            .measurements
            .iter()
            .map(Measurement::nanoseconds_per_op)
            .collect();
        Statistics::from_values(&values)
    }
}

/// Unit used to present a group of durations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Nanosecond,
    Microsecond,
    Millisecond,
    Second,
}

impl TimeUnit {
    /// Largest unit in which `nanoseconds` is still at least 1
    pub fn best_for(nanoseconds: f64) -> Self {
        let abs = nanoseconds.abs();
        if abs >= 1e9 {
            TimeUnit::Second
        } else if abs >= 1e6 {
            TimeUnit::Millisecond
        } else if abs >= 1e3 {
            TimeUnit::Microsecond
        } else {
            TimeUnit::Nanosecond
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TimeUnit::Nanosecond => "ns",
            TimeUnit::Microsecond => "us",
            TimeUnit::Millisecond => "ms",
            TimeUnit::Second => "s",
        }
    }

    pub fn nanoseconds(&self) -> f64 {
        match self {
            TimeUnit::Nanosecond => 1.0,
            TimeUnit::Microsecond => 1e3,
            TimeUnit::Millisecond => 1e6,
            TimeUnit::Second => 1e9,
        }
    }

    pub fn format(&self, nanoseconds: f64) -> String {
        format!("{:.3} {}", nanoseconds / self.nanoseconds(), self.name())
    }
}
