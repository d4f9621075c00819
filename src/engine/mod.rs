pub mod command;
pub mod runner;

use crate::host::case::BenchmarkCase;
use crate::host::report::BenchmarkReport;
use async_trait::async_trait;
use std::rc::Rc;

pub use command::CommandEngine;
pub use runner::BenchmarkRunner;

/// Executes benchmark cases
#[async_trait(?Send)]
pub trait Engine {
    fn name(&self) -> &str;

    /// Runs warmup and measured iterations of one case.
    ///
    /// Failures are reported through [`BenchmarkReport::success`], not as errors,
    /// so one broken case does not stop the run.
    async fn run(&self, case: &Rc<BenchmarkCase>) -> BenchmarkReport;
}
