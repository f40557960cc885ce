use crate::library::logger::interface::{LogLevel, Logger};
use chrono::Utc;
use std::io::Write;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LoggerConsole {
    namespace: Option<String>,
    timezone: chrono::FixedOffset,
    min_level: LogLevel,
}

impl LoggerConsole {
    pub fn new(timezone: chrono::FixedOffset, min_level: LogLevel) -> Self {
        Self {
            namespace: None,
            timezone,
            min_level,
        }
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn format_line(&self, level: LogLevel, message: &str) -> String {
        let local_time = Utc::now().with_timezone(&self.timezone);
        let formatted = local_time.format("%Y-%m-%d %I:%M:%S%.3f %p");
        match &self.namespace {
            Some(namespace) => format!(
                "[{}] {:<5} {}: {}",
                formatted,
                level.as_str(),
                namespace,
                message
            ),
            None => format!("[{}] {:<5} {}", formatted, level.as_str(), message),
        }
    }
}

impl Logger for LoggerConsole {
    fn log(
        &self,
        level: LogLevel,
        message: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if !self.is_enabled(level) {
            return Ok(());
        }
        let line = self.format_line(level, message);
        // stderr keeps the console display's panel on stdout readable
        writeln!(std::io::stderr().lock(), "{}", line)?;
        Ok(())
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        let new_namespace = match &self.namespace {
            Some(current) => format!("{}:{}", current, namespace),
            None => namespace.to_string(),
        };

        Arc::new(LoggerConsole {
            namespace: Some(new_namespace),
            timezone: self.timezone,
            min_level: self.min_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> chrono::FixedOffset {
        chrono::FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_namespaces_are_joined() {
        let logger = LoggerConsole::new(utc(), LogLevel::Info);
        let nested = LoggerConsole {
            namespace: Some("live_classifier:capture_session".to_string()),
            ..logger.clone()
        };

        let line = nested.format_line(LogLevel::Info, "started");

        assert!(line.ends_with("INFO  live_classifier:capture_session: started"));
    }

    #[test]
    fn test_below_min_level_is_dropped() {
        let info = LoggerConsole::new(utc(), LogLevel::Info);
        let debug = LoggerConsole::new(utc(), LogLevel::Debug);

        assert!(!info.is_enabled(LogLevel::Debug));
        assert!(info.is_enabled(LogLevel::Info));
        assert!(debug.is_enabled(LogLevel::Debug));
        assert!(debug.is_enabled(LogLevel::Info));
    }
}
