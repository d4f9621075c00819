//! Column, configuration and what-if tooling for command-line benchmarks.
//!
//! Benchmarks are described in a suite file, converted into cases, run by an
//! [`engine::Engine`] and presented as summary tables whose columns come from
//! configurable column providers.

pub mod columns;
pub mod converter;
pub mod engine;
pub mod error;
pub mod host;
pub mod providers;
pub mod replace;
pub mod run_infos;
pub mod settings;
pub mod suite;
pub mod ui;
pub mod whatif;

pub use error::{Result, ToolboxError};
