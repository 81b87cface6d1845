//! The vocabulary store: a dense, ordered list of entries plus an
//! open-addressing hash index pointing into it.
//!
//! Entry 0 is always the sentence boundary token `</s>`. Indices handed out by
//! [`Vocab::lookup`] and [`Vocab::insert`] stay valid only until the next call
//! to [`Vocab::prune`] or [`Vocab::sort_and_finalize`]; both move entries and
//! rebuild the whole index, so any index held across them must be looked up
//! again.

// imports
use crate::error::{Result, Word2VecError};
use crate::hash::word_hash;
use crate::tokenizer::{WordReader, SENTENCE_END};

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::io::{BufRead, Write};


/// One vocabulary word with its corpus count and, once encoded, its Huffman
/// code and the internal tree nodes along that code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub word: Vec<u8>,
    pub count: u64,
    pub code: Vec<u8>,
    pub path: Vec<u32>,
}

impl VocabEntry {

    fn new(word: Vec<u8>) -> Self {
        Self {
            word,
            count: 0,
            code: Vec::new(),
            path: Vec::new()
        }
    }

    pub fn codelen(&self) -> usize {
        self.code.len()
    }

    pub fn word_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.word)
    }
}


/// How the dense entry list reserves room when it runs out of capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthPolicy {
    Doubling,
    Increment(usize),
}

impl GrowthPolicy {
    fn next_capacity(&self, current: usize) -> usize {
        match *self {
            GrowthPolicy::Doubling => (current * 2).max(1),
            GrowthPolicy::Increment(step) => current + step.max(1),
        }
    }
}


#[derive(Clone, Debug, PartialEq)]
pub struct VocabOptions {
    pub hash_size: usize,
    pub initial_capacity: usize,
    pub growth: GrowthPolicy,
    pub max_code_len: usize,
}

impl Default for VocabOptions {
    fn default() -> Self {
        Self {
            hash_size: 30_000_000,
            initial_capacity: 1000,
            growth: GrowthPolicy::Doubling,
            max_code_len: 40
        }
    }
}


pub struct Vocab {
    entries: Vec<VocabEntry>,
    index: Vec<Option<u32>>,
    capacity: usize,
    growth: GrowthPolicy,
    max_code_len: usize,
    train_words: u64,
}

impl Vocab {

    /// Creates a vocabulary holding only the `</s>` entry.
    pub fn new(options: &VocabOptions) -> Self {

        let hash_size = options.hash_size.max(1);
        let mut vocab = Self {
            entries: Vec::with_capacity(options.initial_capacity),
            index: vec![None; hash_size],
            capacity: options.initial_capacity,
            growth: options.growth,
            max_code_len: options.max_code_len,
            train_words: 0
        };
        vocab.reset();
        vocab
    }

    /// Drops every entry except a fresh `</s>` and clears the hash index.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.index.iter_mut().for_each(|slot| *slot = None);
        self.train_words = 0;
        self.push_entry(SENTENCE_END.to_vec(), 0);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hash_size(&self) -> usize {
        self.index.len()
    }

    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }

    /// Sum of the counts kept by the last [`Vocab::sort_and_finalize`].
    pub fn train_words(&self) -> u64 {
        self.train_words
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [VocabEntry] {
        &mut self.entries
    }

    pub fn get(&self, i: usize) -> Option<&VocabEntry> {
        self.entries.get(i)
    }

    pub fn word_count(&self, i: usize) -> u64 {
        self.entries[i].count
    }

    /// Adds one occurrence to entry `i`, saturating at `u64::MAX`.
    pub fn increment(&mut self, i: usize) {
        let entry = &mut self.entries[i];
        entry.count = entry.count.saturating_add(1);
    }

    pub fn lookup(&self, word: &[u8]) -> Option<usize> {

        let size = self.index.len();
        let mut slot = word_hash(word, size);

        for _ in 0..size {
            match self.index[slot] {
                None => return None,
                Some(i) if self.entries[i as usize].word == word => return Some(i as usize),
                Some(_) => slot = (slot + 1) % size
            }
        }
        None
    }

    fn free_slot(&self, word: &[u8]) -> Option<usize> {

        let size = self.index.len();
        let mut slot = word_hash(word, size);

        for _ in 0..size {
            if self.index[slot].is_none() {
                return Some(slot);
            }
            slot = (slot + 1) % size;
        }
        None
    }

    fn push_entry(&mut self, word: Vec<u8>, count: u64) -> Option<usize> {

        let slot = self.free_slot(&word)?;

        if self.entries.len() >= self.capacity {
            self.capacity = self.growth.next_capacity(self.capacity);
            self.entries.reserve_exact(self.capacity - self.entries.len());
        }

        let i = self.entries.len();
        let mut entry = VocabEntry::new(word);
        entry.count = count;
        self.entries.push(entry);
        self.index[slot] = Some(i as u32);
        Some(i)
    }

    /// Appends `word` with a zero count and returns its index.
    ///
    /// The caller is expected to have checked [`Vocab::lookup`] first; this
    /// never replaces an existing slot.
    pub fn insert(&mut self, word: &[u8]) -> Result<usize> {
        self.push_entry(word.to_vec(), 0)
            .ok_or(Word2VecError::HashIndexFull { size: self.index.len() })
    }

    /// Rebuilds the hash index from the current entry order.
    pub fn rebuild_index(&mut self) {

        self.index.iter_mut().for_each(|slot| *slot = None);

        for i in 0..self.entries.len() {
            // the index has at least as many slots as entries held before the rebuild
            if let Some(slot) = self.free_slot(&self.entries[i].word) {
                self.index[slot] = Some(i as u32);
            }
        }
    }

    /// Keeps `</s>` and every entry with `count > min_reduce`, then rebuilds
    /// the hash index. Invalidates all previously returned indices.
    pub fn prune(&mut self, min_reduce: u64) {

        let mut position = 0;
        self.entries.retain(|entry| {
            let keep = position == 0 || entry.count > min_reduce;
            position += 1;
            keep
        });
        self.rebuild_index();
    }

    /// Sorts every entry after `</s>` by descending count, drops those below
    /// `min_count` and readies `code`/`path` buffers for the Huffman encoder.
    /// Invalidates all previously returned indices.
    pub fn sort_and_finalize(&mut self, min_count: u64) {

        // stable, so equal counts keep their insertion order
        self.entries[1..].sort_by(|a, b| b.count.cmp(&a.count));

        let mut position = 0;
        self.entries.retain(|entry| {
            let keep = position == 0 || entry.count >= min_count;
            position += 1;
            keep
        });
        self.entries.shrink_to_fit();
        self.capacity = self.entries.len();

        self.train_words = self.entries
            .iter()
            .fold(0u64, |sum, entry| sum.saturating_add(entry.count));
        self.rebuild_index();

        let max_code_len = self.max_code_len;
        for entry in self.entries.iter_mut() {
            entry.code = Vec::with_capacity(max_code_len);
            entry.path = Vec::with_capacity(max_code_len);
        }
    }

    /// Reads one word and resolves it against the vocabulary.
    ///
    /// Returns `None` at the end of the stream and `Some(None)` for a word
    /// that is not in the vocabulary.
    pub fn read_word_index<R: BufRead>(&self, reader: &mut WordReader<R>) -> Result<Option<Option<usize>>> {
        Ok(reader.read_word()?.map(|word| self.lookup(&word)))
    }

    /// Writes one `"<word> <count>"` line per entry, in the current order.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        for entry in &self.entries {
            writer.write_all(&entry.word)?;
            writeln!(writer, " {}", entry.count)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Rebuilds a vocabulary from the format produced by [`Vocab::write_to`]
    /// and finalizes it with `min_count`.
    pub fn read_from<R: BufRead>(reader: R, options: &VocabOptions, min_count: u64) -> Result<Vocab> {

        let mut vocab = Vocab::new(options);
        let mut seen_sentinel = false;

        for (n, line) in reader.split(b'\n').enumerate() {

            let line_no = n + 1;
            let mut line = line?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            if line.is_empty() {
                continue;
            }

            let split = line.iter().rposition(|&b| b == b' ').ok_or_else(|| Word2VecError::Parse {
                line: line_no,
                message: "expected '<word> <count>'".to_string()
            })?;
            let (word, count) = (&line[..split], &line[split + 1..]);

            let count: u64 = std::str::from_utf8(count)
                .ok()
                .and_then(|c| c.parse().ok())
                .ok_or_else(|| Word2VecError::Parse {
                    line: line_no,
                    message: format!("invalid count '{}'", String::from_utf8_lossy(count))
                })?;

            let i = match vocab.lookup(word) {
                Some(0) if !seen_sentinel => {
                    seen_sentinel = true;
                    0
                },
                Some(_) => return Err(Word2VecError::Parse {
                    line: line_no,
                    message: format!("duplicate word '{}'", String::from_utf8_lossy(word))
                }),
                None => vocab.insert(word)?
            };
            vocab.entries[i].count = count;
        }

        vocab.sort_and_finalize(min_count);
        Ok(vocab)
    }

}
