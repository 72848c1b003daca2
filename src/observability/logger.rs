//! Structured JSON logger.
//!
//! One log line = one event. Output is deterministic: `event`, `level`
//! and `component` come first, remaining fields are sorted by key.
//! Writes are synchronous and unbuffered so lines survive a crash.

use std::fmt;
use std::io::{self, Write};

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured logger.
///
/// `component` names the engine component emitting the event
/// (`registry`, `scanner`, `repair`, `ops`) so one stream can be split
/// per concern downstream.
pub struct Logger;

impl Logger {
    pub fn trace(component: &str, event: &str, fields: &[(&str, &str)]) {
        Self::write(LogLevel::Trace, component, event, fields, &mut io::stdout());
    }

    pub fn info(component: &str, event: &str, fields: &[(&str, &str)]) {
        Self::write(LogLevel::Info, component, event, fields, &mut io::stdout());
    }

    pub fn warn(component: &str, event: &str, fields: &[(&str, &str)]) {
        Self::write(LogLevel::Warn, component, event, fields, &mut io::stdout());
    }

    /// Errors go to stderr.
    pub fn error(component: &str, event: &str, fields: &[(&str, &str)]) {
        Self::write(LogLevel::Error, component, event, fields, &mut io::stderr());
    }

    fn write<W: Write>(
        level: LogLevel,
        component: &str,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let mut line = String::with_capacity(192);

        line.push_str("{\"event\":\"");
        escape_into(&mut line, event);
        line.push_str("\",\"level\":\"");
        line.push_str(level.as_str());
        line.push_str("\",\"component\":\"");
        escape_into(&mut line, component);
        line.push('"');

        let mut sorted: Vec<&(&str, &str)> = fields.iter().collect();
        sorted.sort_by_key(|(key, _)| *key);
        for (key, value) in sorted {
            line.push_str(",\"");
            escape_into(&mut line, key);
            line.push_str("\":\"");
            escape_into(&mut line, value);
            line.push('"');
        }

        line.push_str("}\n");

        // One write_all call per line keeps lines whole under
        // concurrent logging.
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
}

#[cfg(test)]
fn render(level: LogLevel, component: &str, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    Logger::write(level, component, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}
