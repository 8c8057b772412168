use serde_json::Value;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Observability capability handed to each component.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str, fields: Value);
    fn warn(&self, message: &str, fields: Value);
    fn error(&self, message: &str, fields: Value);
    fn debug(&self, message: &str, fields: Value);
}

/// Forwards to `tracing`. Debug records are dropped unless `debug_enabled`.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    debug_enabled: bool,
}

impl TracingLogger {
    pub fn new(debug_enabled: bool) -> Self {
        Self { debug_enabled }
    }
}

impl Logger for TracingLogger {
    fn info(&self, message: &str, fields: Value) {
        tracing::info!(fields = %fields, "{}", message);
    }

    fn warn(&self, message: &str, fields: Value) {
        tracing::warn!(fields = %fields, "{}", message);
    }

    fn error(&self, message: &str, fields: Value) {
        tracing::error!(fields = %fields, "{}", message);
    }

    fn debug(&self, message: &str, fields: Value) {
        if self.debug_enabled {
            tracing::debug!(fields = %fields, "{}", message);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub fields: Value,
}

/// Keeps every record in memory so callers can assert on what was logged.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.level == level)
            .map(|entry| entry.message)
            .collect()
    }

    pub fn contains(&self, message: &str) -> bool {
        self.entries().iter().any(|entry| entry.message == message)
    }

    fn push(&self, level: LogLevel, message: &str, fields: Value) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(LogEntry {
                level,
                message: message.to_string(),
                fields,
            });
        }
    }
}

impl Logger for MemoryLogger {
    fn info(&self, message: &str, fields: Value) {
        self.push(LogLevel::Info, message, fields);
    }

    fn warn(&self, message: &str, fields: Value) {
        self.push(LogLevel::Warn, message, fields);
    }

    fn error(&self, message: &str, fields: Value) {
        self.push(LogLevel::Error, message, fields);
    }

    fn debug(&self, message: &str, fields: Value) {
        self.push(LogLevel::Debug, message, fields);
    }
}

fn build_filter(level: &str, debug: bool) -> EnvFilter {
    let level = if debug { "debug" } else { level };
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("user_registration={},info", level)))
}

pub fn init_cli_logger(verbose: bool) {
    let filter = if verbose {
        build_filter("debug", true)
    } else {
        build_filter("info", false)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_lambda_logger(level: &str, debug: bool) {
    tracing_subscriber::registry()
        .with(build_filter(level, debug))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .without_time()
                .json(), // CloudWatch indexes JSON fields
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{self, Write};
    use std::sync::Arc;
    use tracing::Level;

    #[derive(Clone, Default)]
    struct CaptureBuffer(Arc<Mutex<Vec<u8>>>);

    impl CaptureBuffer {
        fn contents(&self) -> String {
            let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    impl Write for CaptureBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture<F: FnOnce()>(emit: F) -> String {
        let buffer = CaptureBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, emit);
        buffer.contents()
    }

    #[test]
    fn test_tracing_logger_debug_requires_flag() {
        let quiet = capture(|| {
            let logger = TracingLogger::new(false);
            logger.debug("hidden record", json!({ "userId": "u-1" }));
            logger.info("visible record", json!({}));
        });
        assert!(!quiet.contains("hidden record"));
        assert!(quiet.contains("visible record"));

        let verbose = capture(|| {
            TracingLogger::new(true).debug("shown record", json!({ "userId": "u-1" }));
        });
        assert!(verbose.contains("shown record"));
        assert!(verbose.contains("DEBUG"));
        assert!(verbose.contains("u-1"));
    }

    #[test]
    fn test_memory_logger_records_levels_in_order() {
        let logger = MemoryLogger::new();
        logger.info("first", json!({}));
        logger.warn("second", json!({ "field": "email" }));
        logger.error("third", json!(null));

        let entries = logger.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].level, LogLevel::Info);
        assert_eq!(entries[1].fields["field"], "email");
        assert_eq!(logger.messages(LogLevel::Error), vec!["third".to_string()]);
        assert!(logger.contains("second"));
        assert!(!logger.contains("fourth"));
    }
}
