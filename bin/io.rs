use std::fmt::Display;
use std::io::{self, BufRead, BufReader, Lines, Read, Write};
use tracing::instrument;

/// A line oriented terminal.
#[derive(Debug)]
pub struct Io<W: Write, R: Read> {
    writer: W,
    reader: Lines<BufReader<R>>,
}

impl<W: Write, R: Read> Io<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Io {
            writer,
            reader: BufReader::new(reader).lines(),
        }
    }

    /// Receive the next non-blank line, or `None` once the input is exhausted.
    #[instrument(level = "trace", skip(self), ret, err)]
    pub fn recv(&mut self) -> io::Result<Option<String>> {
        for line in &mut self.reader {
            let line = line?;
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }

        Ok(None)
    }

    /// Send a line.
    #[instrument(level = "trace", skip(self, msg), err, fields(%msg))]
    pub fn send<T: Display>(&mut self, msg: T) -> io::Result<()> {
        writeln!(&mut self.writer, "{}", msg)
    }

    /// Prompt for input and flush the internal buffers.
    #[instrument(level = "trace", skip(self), err)]
    pub fn prompt(&mut self, prompt: &str) -> io::Result<()> {
        write!(&mut self.writer, "{}", prompt)?;
        self.writer.flush()
    }
}
