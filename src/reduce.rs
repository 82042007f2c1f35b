//! src/reduce.rs
use crate::trie::{CorruptTrie, Trie};

/// Serializes one shard's trie as `"word", count` lines in traversal
/// (lexicographic) order, quoting words the same way the intermediate
/// records do.
///
/// An empty trie reduces to an empty block. The only failure mode is a
/// structurally inconsistent trie; the orchestrator must treat that as a
/// whole-run failure rather than persist partial output.
#[tracing::instrument(name = "Reduce shard", skip_all)]
pub fn reduce(trie: &Trie) -> Result<String, CorruptTrie> {
    let mut block = String::new();
    for entry in trie.words() {
        let (word, count) = entry?;
        block.push_str(&format!("\"{word}\", {count}\n"));
    }
    Ok(block)
}
