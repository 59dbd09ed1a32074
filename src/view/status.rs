//! Status line output
//!
//! Decouples comparison logic from the process streams.

use owo_colors::{OwoColorize, Style};

use crate::model::Verdict;

/// Destination for per-package status lines
pub trait StatusSink {
    /// A passing (OK or WARNING) status line
    fn info(&mut self, line: &str);

    /// A failing status line, already coloured
    fn error(&mut self, line: &str);
}

/// Route a verdict's message to the sink, colouring failures bright red
pub fn emit(sink: &mut dyn StatusSink, verdict: &Verdict) {
    let message = verdict.message();
    if verdict.status.is_failure() {
        sink.error(&message.style(Style::new().bright_red()).to_string());
    } else {
        sink.info(&message);
    }
}

/// Writes to stdout, failures to stderr
pub struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn info(&mut self, line: &str) {
        println!("{line}");
    }

    fn error(&mut self, line: &str) {
        eprintln!("{line}");
    }
}

/// Keeps lines in memory, for tests and for callers that batch output
#[derive(Debug, Default)]
pub struct BufferSink {
    pub info: Vec<String>,
    pub errors: Vec<String>,
}

impl StatusSink for BufferSink {
    fn info(&mut self, line: &str) {
        self.info.push(line.to_string());
    }

    fn error(&mut self, line: &str) {
        self.errors.push(line.to_string());
    }
}
