//! Diagnostic sinks for tracing the signal path.
//!
//! A [`Machine`](crate::Machine) reports each conversion to the sink it was
//! constructed with. Events are built only when [`DiagnosticSink::enabled`]
//! returns true, so the default [`NullSink`] costs nothing on the conversion
//! path.
//!
//! For one symbol the events arrive in this order:
//!
//! ```text
//! Stepped -> Input -> Plugboard -> Forward (slot n-1 .. 1) -> Reflected
//!         -> Backward (slot 1 .. n-1) -> Output
//! ```

use crate::core::alphabet::Alphabet;

/// One observation on the path of a single symbol through the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// Rotor settings of slots `1..n` after stepping, before conversion.
    Stepped {
        /// Settings as alphabet indices, leftmost first.
        settings: Vec<usize>,
    },
    /// The index entering the machine.
    Input(usize),
    /// The index after the first plugboard pass.
    Plugboard(usize),
    /// The output of a rotor on the forward pass (slot `n-1` down to `1`).
    Forward {
        /// Slot of the rotor.
        slot: usize,
        /// Index leaving the rotor.
        output: usize,
    },
    /// The index leaving the reflector in slot 0.
    Reflected(usize),
    /// The output of a rotor on the backward pass (slot `1` up to `n-1`).
    Backward {
        /// Slot of the rotor.
        slot: usize,
        /// Index leaving the rotor.
        output: usize,
    },
    /// The index leaving the machine after the second plugboard pass.
    Output(usize),
}

/// Receiver of [`TraceEvent`]s.
pub trait DiagnosticSink {
    /// Whether the machine should build events at all.
    fn enabled(&self) -> bool {
        true
    }

    /// Records one event. `alphabet` renders indices as symbols.
    fn record(&mut self, alphabet: &Alphabet, event: TraceEvent);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn enabled(&self) -> bool {
        false
    }

    fn record(&mut self, _alphabet: &Alphabet, _event: TraceEvent) {}
}

/// Writes one `log::trace!` line per converted symbol, e.g.
///
/// ```text
/// [AXLF] F -> F -> N -> ... -> Q
/// ```
#[derive(Debug, Default, Clone)]
pub struct LogSink {
    line: String,
}

impl LogSink {
    /// Creates a sink with an empty line buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticSink for LogSink {
    fn enabled(&self) -> bool {
        log::log_enabled!(log::Level::Trace)
    }

    fn record(&mut self, alphabet: &Alphabet, event: TraceEvent) {
        match event {
            TraceEvent::Stepped { settings } => {
                self.line.clear();
                self.line.push('[');
                self.line
                    .extend(settings.iter().map(|&s| alphabet.symbol_at(s)));
                self.line.push_str("] ");
            }
            TraceEvent::Input(c)
            | TraceEvent::Plugboard(c)
            | TraceEvent::Reflected(c)
            | TraceEvent::Forward { output: c, .. }
            | TraceEvent::Backward { output: c, .. } => {
                self.line.push(alphabet.symbol_at(c));
                self.line.push_str(" -> ");
            }
            TraceEvent::Output(c) => {
                self.line.push(alphabet.symbol_at(c));
                log::trace!("{}", self.line);
                self.line.clear();
            }
        }
    }
}

/// Keeps every event, for inspection in tests and tools.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    events: Vec<TraceEvent>,
}

impl Recorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Takes the recorded events, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<TraceEvent> {
        std::mem::take(&mut self.events)
    }
}

impl DiagnosticSink for Recorder {
    fn record(&mut self, _alphabet: &Alphabet, event: TraceEvent) {
        self.events.push(event);
    }
}

/// Shares a sink between a machine and its owner, so the owner can read
/// what was recorded after handing the sink over.
impl<S: DiagnosticSink> DiagnosticSink for std::sync::Arc<std::sync::Mutex<S>> {
    fn enabled(&self) -> bool {
        self.lock().map(|s| s.enabled()).unwrap_or(false)
    }

    fn record(&mut self, alphabet: &Alphabet, event: TraceEvent) {
        if let Ok(mut sink) = self.lock() {
            sink.record(alphabet, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(sink: &mut impl DiagnosticSink, alphabet: &Alphabet) {
        let events = [
            TraceEvent::Stepped {
                settings: vec![0, 23, 11, 5],
            },
            TraceEvent::Input(5),
            TraceEvent::Plugboard(5),
            TraceEvent::Forward {
                slot: 1,
                output: 13,
            },
            TraceEvent::Reflected(2),
            TraceEvent::Backward {
                slot: 1,
                output: 16,
            },
        ];
        for event in events {
            sink.record(alphabet, event);
        }
    }

    #[test]
    fn test_log_sink_line() {
        let alphabet = Alphabet::latin();
        let mut sink = LogSink::new();
        path(&mut sink, &alphabet);
        assert_eq!(sink.line, "[AXLF] F -> F -> N -> C -> Q -> ");
        sink.record(&alphabet, TraceEvent::Output(16));
        assert!(sink.line.is_empty());
    }

    #[test]
    fn test_null_sink_disabled() {
        assert!(!NullSink.enabled());
    }

    #[test]
    fn test_shared_recorder() {
        let alphabet = Alphabet::latin();
        let shared = std::sync::Arc::new(std::sync::Mutex::new(Recorder::new()));
        let mut handle = shared.clone();
        assert!(handle.enabled());
        path(&mut handle, &alphabet);
        let events = shared.lock().map(|mut r| r.take()).unwrap_or_default();
        assert_eq!(events.len(), 6);
        assert_eq!(events[1], TraceEvent::Input(5));
        let drained = shared.lock().map(|r| r.events().is_empty());
        assert!(drained.unwrap_or(false));
    }
}
