//! Best-effort forwarding of plugin log records to the host's central log.
//!
//! Delivery is one-way and unacknowledged: the host never replies, and a
//! host that is not running simply loses the records. The host decides
//! whether verbose records are kept; plugins cannot detect or control that.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelayLevel {
    Error,
    Verbose,
}

/// One forwarded log record: severity, caller-supplied tag, message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMessage {
    pub level: RelayLevel,
    pub tag: String,
    pub message: String,
}

/// Forwards plugin log records to the host, fire-and-forget.
///
/// The sink is injected at construction; there is no process-wide instance
/// to reach for. Every delivery failure is swallowed, because logging must
/// never affect plugin behavior. Tags are supplied by the caller rather
/// than recovered from the call stack, so wrapping the relay in helper
/// layers costs nothing.
pub struct LogRelay {
    sink: Box<dyn Write + Send>,
}

impl LogRelay {
    pub fn new(sink: Box<dyn Write + Send>) -> Self {
        Self { sink }
    }

    /// A relay that drops everything; stands in when no host sink exists.
    pub fn disconnected() -> Self {
        Self {
            sink: Box::new(io::sink()),
        }
    }

    pub fn verbose(&mut self, tag: &str, message: impl Into<String>) {
        self.send(LogMessage {
            level: RelayLevel::Verbose,
            tag: tag.to_string(),
            message: message.into(),
        });
    }

    pub fn error(&mut self, tag: &str, message: impl Into<String>) {
        self.send(LogMessage {
            level: RelayLevel::Error,
            tag: tag.to_string(),
            message: message.into(),
        });
    }

    /// Forward an error record together with a failure's rendered cause
    /// chain. When the chain contains a host-unreachable network error the
    /// chain text is omitted: routine disconnects should not fill the host
    /// log with traces.
    pub fn error_with_cause(
        &mut self,
        tag: &str,
        message: impl Into<String>,
        cause: &(dyn StdError + 'static),
    ) {
        let mut message = message.into();
        if !chain_is_host_unreachable(cause) {
            message.push('\n');
            message.push_str(&render_chain(cause));
        }
        self.send(LogMessage {
            level: RelayLevel::Error,
            tag: tag.to_string(),
            message,
        });
    }

    fn send(&mut self, record: LogMessage) {
        let Ok(json) = serde_json::to_string(&record) else {
            return;
        };
        if let Err(err) = writeln!(self.sink, "{json}").and_then(|()| self.sink.flush()) {
            tracing::debug!(error = %err, "log relay delivery failed");
        }
    }
}

fn chain_is_host_unreachable(error: &(dyn StdError + 'static)) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(error);
    while let Some(err) = current {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            if matches!(
                io_err.kind(),
                io::ErrorKind::ConnectionRefused
                    | io::ErrorKind::HostUnreachable
                    | io::ErrorKind::NetworkUnreachable
                    | io::ErrorKind::TimedOut
            ) {
                return true;
            }
        }
        current = err.source();
    }
    false
}

fn render_chain(error: &(dyn StdError + 'static)) -> String {
    let mut text = error.to_string();
    let mut current = error.source();
    while let Some(err) = current {
        text.push_str("\ncaused by: ");
        text.push_str(&err.to_string());
        current = err.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedSink(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "host gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "host gone"))
        }
    }

    #[derive(Debug)]
    struct WrappedError {
        inner: io::Error,
    }

    impl fmt::Display for WrappedError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "refresh failed")
        }
    }

    impl StdError for WrappedError {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.inner)
        }
    }

    fn records(sink: &SharedSink) -> Vec<LogMessage> {
        let bytes = sink.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn records_carry_level_tag_and_message() {
        let sink = SharedSink::default();
        let mut relay = LogRelay::new(Box::new(sink.clone()));
        relay.verbose("DemoReceiver", "toggling mute status");
        relay.error("DemoReceiver", "no configuration");

        let records = records(&sink);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].level, RelayLevel::Verbose);
        assert_eq!(records[0].tag, "DemoReceiver");
        assert_eq!(records[0].message, "toggling mute status");
        assert_eq!(records[1].level, RelayLevel::Error);
    }

    #[test]
    fn delivery_failure_is_swallowed() {
        let mut relay = LogRelay::new(Box::new(FailingSink));
        // must not panic or surface anything
        relay.error("DemoReceiver", "message into the void");
        relay.verbose("DemoReceiver", "more of the same");
    }

    #[test]
    fn host_unreachable_cause_chain_is_suppressed() {
        let sink = SharedSink::default();
        let mut relay = LogRelay::new(Box::new(sink.clone()));
        let cause = WrappedError {
            inner: io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
        };
        relay.error_with_cause("DemoReceiver", "refresh failed", &cause);

        let records = records(&sink);
        assert_eq!(records[0].message, "refresh failed");
    }

    #[test]
    fn other_cause_chains_are_rendered() {
        let sink = SharedSink::default();
        let mut relay = LogRelay::new(Box::new(sink.clone()));
        let cause = WrappedError {
            inner: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        };
        relay.error_with_cause("DemoReceiver", "refresh failed", &cause);

        let records = records(&sink);
        assert!(records[0].message.contains("caused by: access denied"));
    }
}
