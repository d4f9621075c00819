use colored::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Kind of a log line, decides how the console presents it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Default,
    Help,
    Header,
    Result,
    Statistic,
    Info,
    Error,
    Hint,
}

/// Sink for user-facing output
pub trait Logger {
    /// Unique name, used when replacing loggers
    fn id(&self) -> &str;

    fn write(&self, kind: LogKind, text: &str);

    fn write_line(&self) {
        self.write(LogKind::Default, "\n");
    }

    fn write_line_kind(&self, kind: LogKind, text: &str) {
        self.write(kind, text);
        self.write(kind, "\n");
    }

    fn write_line_header(&self, text: &str) {
        self.write_line_kind(LogKind::Header, text);
    }

    fn write_line_info(&self, text: &str) {
        self.write_line_kind(LogKind::Info, text);
    }

    fn write_line_error(&self, text: &str) {
        self.write_line_kind(LogKind::Error, text);
    }
}

/// Writes colored output to stdout
#[derive(Debug, Default)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn id(&self) -> &str {
        "console"
    }

    fn write(&self, kind: LogKind, text: &str) {
        let styled = match kind {
            LogKind::Default | LogKind::Result => text.normal(),
            LogKind::Help => text.dimmed(),
            LogKind::Header => text.magenta().bold(),
            LogKind::Statistic => text.cyan(),
            LogKind::Info => text.yellow(),
            LogKind::Error => text.red().bold(),
            LogKind::Hint => text.green(),
        };
        print!("{}", styled);
    }
}

/// Collects plain text, used to inspect output
#[derive(Debug, Default)]
pub struct AccumulationLogger {
    buffer: RefCell<String>,
}

impl AccumulationLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> String {
        self.buffer.borrow().clone()
    }

    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
    }
}

impl Logger for AccumulationLogger {
    fn id(&self) -> &str {
        "accumulation"
    }

    fn write(&self, _kind: LogKind, text: &str) {
        self.buffer.borrow_mut().push_str(text);
    }
}

/// Forwards every write to a list of loggers
#[derive(Default)]
pub struct CompositeLogger {
    loggers: Vec<Rc<dyn Logger>>,
}

impl CompositeLogger {
    pub fn new(loggers: Vec<Rc<dyn Logger>>) -> Self {
        Self { loggers }
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

impl Logger for CompositeLogger {
    fn id(&self) -> &str {
        "composite"
    }

    fn write(&self, kind: LogKind, text: &str) {
        for logger in &self.loggers {
            logger.write(kind, text);
        }
    }
}

/// One captured write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub kind: LogKind,
    pub text: String,
}

/// Records every write together with its kind
#[derive(Debug, Default)]
pub struct LogCapture {
    lines: RefCell<Vec<OutputLine>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captured_output(&self) -> Vec<OutputLine> {
        self.lines.borrow().clone()
    }
}

impl Logger for LogCapture {
    fn id(&self) -> &str {
        "capture"
    }

    fn write(&self, kind: LogKind, text: &str) {
        self.lines.borrow_mut().push(OutputLine {
            kind,
            text: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulation_logger() {
        let logger = AccumulationLogger::new();
        logger.write_line_header("// * Summary *");
        logger.write_line();
        logger.write(LogKind::Default, "done");
        assert_eq!(logger.log(), "// * Summary *\n\ndone");
        logger.clear();
        assert!(logger.log().is_empty());
    }

    #[test]
    fn test_log_capture_keeps_kinds() {
        let capture = LogCapture::new();
        capture.write_line_info("info");
        capture.write(LogKind::Statistic, "| A |");
        let lines = capture.captured_output();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].kind, LogKind::Info);
        assert_eq!(lines[2].kind, LogKind::Statistic);
    }

    #[test]
    fn test_composite_logger_forwards() {
        let a = Rc::new(AccumulationLogger::new());
        let b = Rc::new(AccumulationLogger::new());
        let loggers: Vec<Rc<dyn Logger>> = vec![a.clone(), b.clone()];
        let composite = CompositeLogger::new(loggers);
        composite.write_line_info("x");
        assert_eq!(a.log(), "x\n");
        assert_eq!(b.log(), "x\n");
    }
}
