use crate::domains::logger::DomainLogger;
use std::sync::Arc;

/// Forwards every message to a primary and an optional secondary logger.
pub struct MultiLogger {
    primary: Arc<dyn DomainLogger>,
    secondary: Option<Arc<dyn DomainLogger>>,
}

impl MultiLogger {
    pub fn new(primary: Arc<dyn DomainLogger>, secondary: Option<Arc<dyn DomainLogger>>) -> Self {
        Self { primary, secondary }
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.primary.info(msg);
        if let Some(sec) = &self.secondary {
            sec.info(msg);
        }
    }

    fn warn(&self, msg: &str) {
        self.primary.warn(msg);
        if let Some(sec) = &self.secondary {
            sec.warn(msg);
        }
    }

    fn error(&self, msg: &str) {
        self.primary.error(msg);
        if let Some(sec) = &self.secondary {
            sec.error(msg);
        }
    }
}

/// File logger with the console as secondary, or the console alone when the
/// file logger cannot be installed.
///
/// `fast_log` already mirrors to stdout, so the console secondary is only
/// attached when `mirror_console` is set.
pub fn init_combined_logger(
    path: &str,
    level: log::LevelFilter,
    mirror_console: bool,
) -> Arc<dyn DomainLogger> {
    let console = super::init_console_logger();
    match super::init_file_logger(path, level) {
        Ok(file_logger) => {
            let secondary = mirror_console.then_some(console);
            Arc::new(MultiLogger::new(file_logger, secondary)) as Arc<dyn DomainLogger>
        }
        Err(e) => {
            console.warn(&format!("{}; logging to console only", e));
            console
        }
    }
}
