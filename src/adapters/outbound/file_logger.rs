use crate::domains::logger::{DomainLogger, FileLogger};
use std::sync::Arc;

/// Installs `fast_log` and returns a `FileLogger` handle the runner can be
/// given. Fails if a global logger is already installed.
pub fn init_file_logger(path: &str, level: log::LevelFilter) -> Result<Arc<dyn DomainLogger>, String> {
    FileLogger::init(path, level).map_err(|e| format!("Failed to initialize fast_log: {}", e))?;
    Ok(Arc::new(FileLogger))
}
