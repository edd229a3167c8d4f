//! Report row output: JSON Lines or a single JSON array

use serde::Serialize;
use std::io::{BufWriter, Write};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportWriterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// One JSON object per line
    #[default]
    Jsonl,
    /// One pretty-printed JSON array
    Json,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Jsonl => "jsonl",
            ReportFormat::Json => "json",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jsonl" => Ok(ReportFormat::Jsonl),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format '{}' (expected jsonl or json)", other)),
        }
    }
}

pub struct ReportWriter<W: Write> {
    writer: BufWriter<W>,
    format: ReportFormat,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(inner: W, format: ReportFormat) -> Self {
        Self {
            writer: BufWriter::new(inner),
            format,
        }
    }

    /// Write one report's rows. An empty report is an empty array in JSON
    /// mode and no output at all in JSONL mode.
    pub fn write_rows<T: Serialize>(&mut self, rows: &[T]) -> Result<(), ReportWriterError> {
        match self.format {
            ReportFormat::Jsonl => {
                for row in rows {
                    serde_json::to_writer(&mut self.writer, row)?;
                    writeln!(self.writer)?;
                }
            }
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut self.writer, rows)?;
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }

    /// Write a single document (e.g. the filter catalog)
    pub fn write_one<T: Serialize>(&mut self, value: &T) -> Result<(), ReportWriterError> {
        match self.format {
            ReportFormat::Jsonl => serde_json::to_writer(&mut self.writer, value)?,
            ReportFormat::Json => serde_json::to_writer_pretty(&mut self.writer, value)?,
        }
        writeln!(self.writer)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), ReportWriterError> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W, ReportWriterError> {
        self.writer
            .into_inner()
            .map_err(|e| ReportWriterError::Io(e.into_error()))
    }
}
