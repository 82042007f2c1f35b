//! src/mappers/word_counter.rs
use crate::mappers::{MapEmitter, Mapper, RecordFileEmitter};
use crate::registry::{MapperDyn, MapperRegistration};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Splits a file's contents into lowercase alphabetic tokens and emits
/// one record per occurrence.
pub struct WordCounter<E: MapEmitter> {
    emitter: E,
}

impl<E: MapEmitter> Mapper for WordCounter<E> {
    type Emitter = E;

    fn build(emitter: E) -> Self {
        Self { emitter }
    }

    fn map(&mut self, contents: &str) -> Result<(), anyhow::Error> {
        for word in contents.to_lowercase().split(|c: char| !c.is_alphabetic()) {
            if !word.is_empty() {
                self.emitter.emit(word)?;
            }
        }
        Ok(())
    }
}

/// Registry face of [`WordCounter`]: reads one input file and writes its
/// intermediate records under the temp directory, keyed by task id.
struct WordCounterMapper;

impl MapperDyn for WordCounterMapper {
    fn name(&self) -> &str {
        "word_counter"
    }

    fn run(&self, task_id: u32, input: &Path, temp_dir: &Path) -> Result<PathBuf, anyhow::Error> {
        let contents = std::fs::read_to_string(input)
            .context(format!("Failed to read input file: {}", input.display()))?;
        let mut emitter = RecordFileEmitter::create(temp_dir, task_id)?;
        let mut mapper = WordCounter::build(&mut emitter);
        mapper.map(&contents)?;
        emitter.close()
    }
}

inventory::submit! {
    MapperRegistration {
        name: "word_counter",
        factory: || Box::new(WordCounterMapper),
    }
}
