//! src/trie.rs
use crate::error::error_chain_fmt;
use std::collections::BTreeMap;

/// One character position along some word's path from the shard root.
///
/// `terminal` means "a word ends exactly here", not "this node has no
/// children": after inserting `test` and `testing`, the node for the final
/// `t` of `test` is terminal and still carries the `ing` chain below it.
/// `count` is only meaningful on terminal nodes.
#[derive(Default)]
struct Node {
    children: BTreeMap<char, Node>,
    terminal: bool,
    count: u64,
}

/// Ordered word-count structure for one shard.
///
/// Words sharing a prefix share a path, and walking children in ascending
/// character order yields words in lexicographic order, so the reduce
/// phase never needs a separate sort. The tree owns its nodes; dropping
/// the trie releases all of them.
#[derive(Default)]
pub struct Trie {
    root: Node,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Occurrence count for an exact terminal match, or 0 when the word
    /// was never inserted. A live entry never holds a zero count, so 0
    /// doubles as "absent".
    pub fn search(&self, word: &str) -> u64 {
        let mut node = &self.root;
        for ch in word.chars() {
            match node.children.get(&ch) {
                Some(child) => node = child,
                None => return 0,
            }
        }
        if node.terminal {
            node.count
        } else {
            0
        }
    }

    /// Records the first occurrence of `word`, creating any missing path
    /// nodes. Callers must have checked `search(word) == 0` first:
    /// inserting a word that is already present resets its count to 1.
    pub fn insert(&mut self, word: &str) {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.terminal = true;
        node.count = 1;
    }

    /// Adds one occurrence to a word already in the trie. Callers must
    /// have checked `search(word) != 0` first: incrementing an absent
    /// word leaves the trie unchanged.
    pub fn increment(&mut self, word: &str) {
        let mut node = &mut self.root;
        for ch in word.chars() {
            match node.children.get_mut(&ch) {
                Some(child) => node = child,
                None => return,
            }
        }
        if node.terminal {
            node.count += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Lazy traversal yielding `(word, count)` for every terminal node in
    /// strictly ascending lexicographic order. Restartable: each call
    /// starts a fresh walk from the root.
    pub fn words(&self) -> Words<'_> {
        let mut stack = Vec::new();
        for (ch, child) in self.root.children.iter().rev() {
            stack.push((ch.to_string(), child));
        }
        Words { stack }
    }
}

impl std::fmt::Debug for Trie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.words().filter_map(Result::ok))
            .finish()
    }
}

/// A reachable node that neither completes a word nor prefixes one.
///
/// Normal insert/increment use cannot produce this shape; encountering it
/// means the shard structure itself is broken, and the reduce that owns
/// the traversal must fail rather than emit partial output.
#[derive(thiserror::Error)]
#[error("trie is structurally inconsistent: non-terminal leaf node at {prefix:?}")]
pub struct CorruptTrie {
    pub prefix: String,
}

impl std::fmt::Debug for CorruptTrie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(f, self)
    }
}

/// Explicit-stack pre-order walk over a trie. Children are pushed in
/// descending character order so the smallest is popped first, and a
/// terminal node is emitted before its own children, which together give
/// lexicographic output order.
pub struct Words<'a> {
    stack: Vec<(String, &'a Node)>,
}

impl<'a> Iterator for Words<'a> {
    type Item = Result<(String, u64), CorruptTrie>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((word, node)) = self.stack.pop() {
            for (ch, child) in node.children.iter().rev() {
                let mut longer = word.clone();
                longer.push(*ch);
                self.stack.push((longer, child));
            }
            if node.terminal {
                return Some(Ok((word, node.count)));
            }
            if node.children.is_empty() {
                return Some(Err(CorruptTrie { prefix: word }));
            }
        }
        None
    }
}
