pub mod list;
pub mod run;

pub use list::list_benchmarks;
pub use run::{build_config, run_suite};
