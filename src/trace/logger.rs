use std::{fs::OpenOptions, io::Write, path::Path};

use crate::trace::trace::TraceEvent;

/// JSONL sink for guard trace events, owned by a single guard.
///
/// Steps are numbered here in recording order. The first write failure
/// detaches the sink; tracing never fails the guard.
pub struct TraceLogger {
    sink: Option<Box<dyn Write + Send>>,
    recorded: u64,
}

impl TraceLogger {
    /// Append to `path`, creating it if needed. Falls back to a disabled
    /// logger when the file cannot be opened.
    pub fn to_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self::to_writer(file),
            Err(e) => {
                tracing::warn!(path = %path.display(), "could not open trace file: {}", e);
                Self::disabled()
            }
        }
    }

    pub fn to_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Some(Box::new(writer)),
            recorded: 0,
        }
    }

    pub fn disabled() -> Self {
        Self {
            sink: None,
            recorded: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Number of events handed to the sink so far.
    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    pub fn record(&mut self, mut event: TraceEvent) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };

        self.recorded += 1;
        event.step = self.recorded;

        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(phase = ?event.phase, "failed to serialize trace event: {}", e);
                return;
            }
        };

        let written = writeln!(sink, "{}", line).and_then(|_| sink.flush());
        if let Err(e) = written {
            tracing::warn!("trace sink failed, tracing disabled: {}", e);
            self.sink = None;
        }
    }
}
