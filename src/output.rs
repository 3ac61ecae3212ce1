use std::io::{self, Write};

use crate::error::Result;
use crate::status::StatusRecord;

/// Line-oriented sink for status emissions.
///
/// Every emission is one complete newline-terminated buffer written in a
/// single call and flushed immediately, so consumers never observe a
/// partial record.
#[derive(Debug)]
pub struct OutputSink<W: Write> {
    writer: W,
}

impl OutputSink<io::Stdout> {
    /// Sink over the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputSink<W> {
    /// Wrap an arbitrary writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Serialize `record` and append it as one line.
    ///
    /// # Errors
    /// Returns an error if the writer fails; the output stream is required
    /// for the reporter to fulfil its contract, so callers treat this as
    /// fatal.
    pub fn write_record(&mut self, record: &StatusRecord) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Emit the reset record: exactly one empty line.
    ///
    /// # Errors
    /// Returns an error if the writer fails.
    pub fn write_reset(&mut self) -> Result<()> {
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Unwrap the sink, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
