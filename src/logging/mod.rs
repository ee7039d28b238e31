//! Browser-console sink for `tracing`.
//!
//! The fmt subscriber formats each event into a buffer; the buffer is flushed
//! to `console.error` / `console.warn` / `console.log` depending on level.

use std::io;
use std::str::FromStr;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConsoleLevel {
    Error,
    Warn,
    Log,
}

impl ConsoleLevel {
    fn for_level(level: &Level) -> Self {
        if *level == Level::ERROR {
            Self::Error
        } else if *level == Level::WARN {
            Self::Warn
        } else {
            Self::Log
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ConsoleMakeWriter;

pub(crate) struct ConsoleWriter {
    level: ConsoleLevel,
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }

        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if !line.is_empty() {
            let msg = wasm_bindgen::JsValue::from_str(line);
            match self.level {
                ConsoleLevel::Error => web_sys::console::error_1(&msg),
                ConsoleLevel::Warn => web_sys::console::warn_1(&msg),
                ConsoleLevel::Log => web_sys::console::log_1(&msg),
            }
        }
        self.buf.clear();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: ConsoleLevel::Log,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: ConsoleLevel::for_level(meta.level()),
            buf: Vec::new(),
        }
    }
}

/// Parse a level name, defaulting to INFO for anything unrecognized.
pub(crate) fn parse_level(s: &str) -> Level {
    Level::from_str(s.trim()).unwrap_or(Level::INFO)
}

/// Install the global subscriber. Safe to call more than once.
pub(crate) fn init(level: &str) {
    let result = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(parse_level(level))
        .with_target(true)
        .with_ansi(false)
        .without_time()
        .try_init();

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
