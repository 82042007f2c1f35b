//! src/mappers/mod.rs
use anyhow::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

mod word_counter;

pub use word_counter::WordCounter;

/// Sink for the words a mapper extracts from one input file.
pub trait MapEmitter {
    fn emit(&mut self, word: &str) -> Result<(), anyhow::Error>;
}

impl<E: MapEmitter + ?Sized> MapEmitter for &mut E {
    fn emit(&mut self, word: &str) -> Result<(), anyhow::Error> {
        (**self).emit(word)
    }
}

/// Tokenizer half of the map phase: built around an emitter, fed one
/// input file's contents.
pub trait Mapper {
    type Emitter: MapEmitter;
    fn build(emitter: Self::Emitter) -> Self;
    fn map(&mut self, contents: &str) -> Result<(), anyhow::Error>;
}

/// Buffered emitter producing one intermediate record per word
/// occurrence, `"word", 1`, in the task's temp file. Counts are never
/// pre-aggregated here; repeated tokens become repeated records.
pub struct RecordFileEmitter {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl RecordFileEmitter {
    pub fn create(temp_dir: &Path, task_id: u32) -> Result<Self, anyhow::Error> {
        std::fs::create_dir_all(temp_dir).context(format!(
            "Failed to create temp directory: {}",
            temp_dir.display()
        ))?;
        let path = temp_dir.join(format!("map_{task_id}.txt"));
        let file = File::create(&path).context(format!(
            "Failed to create intermediate file: {}",
            path.display()
        ))?;
        Ok(Self {
            writer: BufWriter::with_capacity(8192, file),
            path,
        })
    }

    /// Flushes and hands back the temp file path for the read-back step.
    pub fn close(mut self) -> Result<PathBuf, anyhow::Error> {
        self.writer
            .flush()
            .context("Failed to flush intermediate records")?;
        Ok(self.path)
    }
}

impl MapEmitter for RecordFileEmitter {
    fn emit(&mut self, word: &str) -> Result<(), anyhow::Error> {
        writeln!(self.writer, "\"{word}\", 1").context("Failed to write intermediate record")
    }
}
