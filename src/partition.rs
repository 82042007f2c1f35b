//! src/partition.rs
use crate::trie::Trie;
use std::ops::RangeInclusive;
use std::sync::Mutex;

/// One independently lockable partition of the word-count structure,
/// selected by the key range its words' first characters fall into.
pub struct Shard {
    range: RangeInclusive<char>,
    trie: Mutex<Trie>,
}

impl Shard {
    fn new(range: RangeInclusive<char>) -> Self {
        Self {
            range,
            trie: Mutex::new(Trie::new()),
        }
    }

    pub fn covers(&self, ch: char) -> bool {
        self.range.contains(&ch)
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.range.start(), self.range.end())
    }

    pub fn trie(&self) -> &Mutex<Trie> {
        &self.trie
    }
}

/// Both shards of a run, in fixed reduce/merge order: `a-m` first, then
/// `n-z`. Run-scoped: created by the orchestrator and dropped with it.
pub struct ShardSet {
    shards: [Shard; 2],
}

impl Default for ShardSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ShardSet {
    pub fn new() -> Self {
        Self {
            shards: [Shard::new('a'..='m'), Shard::new('n'..='z')],
        }
    }

    pub fn shards(&self) -> &[Shard] {
        &self.shards
    }

    /// The shard covering `word`'s first character. Words starting outside
    /// `a..=z` (digits, uppercase, punctuation, empty) route nowhere; the
    /// pipeline's policy is to drop them rather than guess a home.
    fn shard_for(&self, word: &str) -> Option<&Shard> {
        let first = word.chars().next()?;
        self.shards.iter().find(|shard| shard.covers(first))
    }

    /// Routes every well-formed record into its shard's trie.
    ///
    /// The lock scope is a single record's search-plus-insert-or-increment,
    /// so any interleaving of concurrent callers ends with the same counts
    /// as a sequential run. Malformed records are logged and skipped.
    #[tracing::instrument(name = "Distribute records", skip_all, fields(records = records.len()))]
    pub fn distribute(&self, records: &[String]) -> Result<(), anyhow::Error> {
        for record in records {
            let Some(word) = extract_word(record) else {
                tracing::error!("Malformed intermediate record: {record:?}");
                continue;
            };
            let Some(shard) = self.shard_for(word) else {
                tracing::debug!("No shard covers word, dropping: {word:?}");
                continue;
            };
            let mut trie = shard
                .trie
                .lock()
                .map_err(|_| anyhow::anyhow!("Shard {} lock poisoned", shard.label()))?;
            if trie.search(word) == 0 {
                trie.insert(word);
            } else {
                trie.increment(word);
            }
        }
        Ok(())
    }
}

/// The word is the substring between the first two `"` characters of the
/// line; a line without both quotes fails the intermediate-record
/// contract.
fn extract_word(line: &str) -> Option<&str> {
    let start = line.find('"')?;
    let rest = &line[start + 1..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}
