//! Record sinks
//!
//! The crawler hands every finished [`ArtworkRecord`] to a [`RecordEmitter`].

use std::io::Write;

use crate::error::Result;
use crate::types::ArtworkRecord;

/// Destination for finished records
pub trait RecordEmitter {
    fn emit(&mut self, record: ArtworkRecord) -> Result<()>;

    /// Called once after the crawl drains
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Keeps records in memory
#[derive(Debug, Default)]
pub struct VecEmitter {
    records: Vec<ArtworkRecord>,
}

impl VecEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ArtworkRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ArtworkRecord> {
        self.records
    }
}

impl RecordEmitter for VecEmitter {
    fn emit(&mut self, record: ArtworkRecord) -> Result<()> {
        self.records.push(record);
        Ok(())
    }
}

/// Writes one JSON object per line
pub struct JsonLinesEmitter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordEmitter for JsonLinesEmitter<W> {
    fn emit(&mut self, record: ArtworkRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
