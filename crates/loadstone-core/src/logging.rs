//! Process-wide logging callback registry.
//!
//! Embedding hosts register a single callback that receives every log event
//! the library emits. The registry is global state with an explicit
//! lifecycle: [`set_logging_callback`] replaces any previous callback, and
//! [`clear_logging_callback`] must run before host teardown so the library
//! never calls into a runtime that no longer exists.
//!
//! Events may be dispatched from any thread, including threads the library
//! creates itself. The registry lock is never held while a callback runs,
//! so a callback may re-register or clear itself.

use std::sync::{Arc, Mutex, OnceLock};

/// Severity of a log event, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl LogLevel {
    /// Lowercase identifier, as surfaced to hosts.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }
}

type Callback = Arc<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn registry() -> &'static Mutex<Option<Callback>> {
    static REGISTRY: OnceLock<Mutex<Option<Callback>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(None))
}

/// Register `callback` to receive all subsequent log events.
///
/// Only one callback exists at a time; registering a new one replaces the
/// old. The callback must tolerate invocation from arbitrary threads.
pub fn set_logging_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    *registry().lock().unwrap() = Some(Arc::new(callback));
}

/// Drop the registered callback, if any.
///
/// Hosts must call this before their runtime is torn down.
pub fn clear_logging_callback() {
    *registry().lock().unwrap() = None;
}

/// Dispatch one event to the registered callback and mirror it to `tracing`.
pub(crate) fn emit(level: LogLevel, message: &str) {
    match level {
        LogLevel::Trace => tracing::trace!(target: "loadstone", "{message}"),
        LogLevel::Debug => tracing::debug!(target: "loadstone", "{message}"),
        LogLevel::Info => tracing::info!(target: "loadstone", "{message}"),
        LogLevel::Warning => tracing::warn!(target: "loadstone", "{message}"),
        LogLevel::Error | LogLevel::Fatal => tracing::error!(target: "loadstone", "{message}"),
    }

    // Clone out of the lock so the callback runs without holding it.
    let callback = registry().lock().unwrap().clone();
    if let Some(callback) = callback {
        callback(level, message);
    }
}

/// Serialises tests that touch the global registry; cargo runs tests on
/// multiple threads within one process.
#[cfg(test)]
pub(crate) fn test_guard() -> std::sync::MutexGuard<'static, ()> {
    static GUARD: Mutex<()> = Mutex::new(());
    GUARD.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
    }

    #[test]
    fn callback_replacement_and_clearing() {
        let _guard = test_guard();
        let marker = "callback_replacement_and_clearing-event";
        let first: Arc<Mutex<Vec<(LogLevel, String)>>> = Arc::new(Mutex::new(Vec::new()));
        let second: Arc<Mutex<Vec<(LogLevel, String)>>> = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&first);
        set_logging_callback(move |level, message| {
            sink.lock().unwrap().push((level, message.to_string()));
        });
        emit(LogLevel::Warning, marker);

        let sink = Arc::clone(&second);
        set_logging_callback(move |level, message| {
            sink.lock().unwrap().push((level, message.to_string()));
        });
        emit(LogLevel::Info, marker);

        clear_logging_callback();
        emit(LogLevel::Error, marker);

        let first_events: Vec<_> = first
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, m)| m == marker)
            .cloned()
            .collect();
        let second_events: Vec<_> = second
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, m)| m == marker)
            .cloned()
            .collect();

        assert_eq!(first_events, vec![(LogLevel::Warning, marker.to_string())]);
        assert_eq!(second_events, vec![(LogLevel::Info, marker.to_string())]);
    }

    #[test]
    fn callback_may_clear_itself() {
        let _guard = test_guard();
        set_logging_callback(|_, _| clear_logging_callback());
        emit(LogLevel::Debug, "self-clearing callback");
        // Reaching this point without deadlocking is the assertion.
        clear_logging_callback();
    }
}
