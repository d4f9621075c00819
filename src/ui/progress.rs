use colored::*;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

fn bar_style(title: &str) -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{spinner:.green}} {} [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{percent}}%) {{msg}}",
            title
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░ ")
}

fn spinner_style(name: &str) -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_strings(TICKS)
        .template(&format!("  {{spinner:.cyan}} {}: {{msg}}", name))
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Progress of a benchmark run: one bar over all cases plus a spinner for the
/// case currently executing
pub struct RunProgress {
    multi: MultiProgress,
    main_bar: ProgressBar,
}

impl RunProgress {
    pub fn new(total: usize, title: &str) -> Self {
        let multi = MultiProgress::new();
        let main_bar = multi.add(ProgressBar::new(total as u64));
        main_bar.set_style(bar_style(title));
        Self { multi, main_bar }
    }

    /// Progress that draws nothing, for tests and non-interactive output
    pub fn hidden(total: usize) -> Self {
        let multi = MultiProgress::with_draw_target(indicatif::ProgressDrawTarget::hidden());
        let main_bar = multi.add(ProgressBar::new(total as u64));
        Self { multi, main_bar }
    }

    pub fn start_case(&self, name: &str) -> ProgressBar {
        let spinner = self.multi.add(ProgressBar::new_spinner());
        spinner.set_style(spinner_style(name));
        spinner.set_message("running");
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }

    pub fn finish_case(&self, spinner: &ProgressBar, success: bool, elapsed: Duration) {
        let status = if success { "done".green() } else { "failed".red() };
        spinner.finish_with_message(format!("{} ({}ms)", status, elapsed.as_millis()));
        self.main_bar.inc(1);
    }

    pub fn finish(&self, succeeded: usize, total: usize) {
        self.main_bar.finish_with_message(format!(
            "{} (succeeded: {}, failed: {})",
            "✓".green().bold(),
            succeeded.to_string().green(),
            (total - succeeded).to_string().red()
        ));
    }

    pub fn position(&self) -> u64 {
        self.main_bar.position()
    }
}
