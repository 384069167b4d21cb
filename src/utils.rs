//! Miscellaneous utility functions.

use anyhow::Context as _;
use colored::Colorize;
use std::io::Write;
use std::io::{self, ErrorKind};

use crate::value::{Value, ValueKind};

/// Which optional lines [`write_summary`] prints besides the root kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryOptions {
    /// Print the number of members/elements of the root
    pub count: bool,
    /// Print the depth of the document
    pub depth: bool,
}

/// Write a short colorized description of a parsed document to `writer`:
/// the root kind, then the lines selected by `options`.
///
/// Silently returns `Ok(())` on broken pipe so that piping to tools like
/// `head` exits cleanly.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_summary<W: Write>(
    writer: &mut W,
    source: &str,
    value: &Value,
    options: SummaryOptions,
) -> anyhow::Result<()> {
    let result = (|| -> io::Result<()> {
        writeln!(
            writer,
            "{}: {}",
            source.bold().magenta(),
            value.kind().to_string().green()
        )?;

        if options.count {
            let label = match value.kind() {
                ValueKind::Object => "members",
                _ => "elements",
            };
            let count = value.child_count().unwrap_or(0);
            writeln!(writer, "{label}: {}", count.to_string().yellow())?;
        }

        if options.depth {
            writeln!(writer, "depth: {}", value.depth().to_string().yellow())?;
        }

        Ok(())
    })();

    match result {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err).context("write summary to stdout"),
    }
}
