
// imports
use crate::error::Result;
use crate::tokenizer::WordReader;
use crate::vocab::{Vocab, VocabOptions};

use log::{debug, info, warn};
use std::io::BufRead;


/// Fraction of hash slots that may be occupied before the vocabulary is pruned.
pub const MAX_LOAD_FACTOR: f64 = 0.7;

const PROGRESS_EVERY: u64 = 100_000;


/// What to do with the rest of the corpus once the hash index gets too full
/// and the vocabulary has been pruned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Stop reading; the remainder of the corpus is never counted.
    Stop,
    /// Keep reading with the pruned vocabulary.
    Continue,
}


#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub tokens_read: u64,
    pub train_words: u64,
    pub vocab_size: usize,
    pub prunes: usize,
    pub truncated: bool,
}


pub struct VocabBuilder {
    options: VocabOptions,
    min_count: u64,
    min_reduce: u64,
    on_overflow: OverflowPolicy,
}

impl VocabBuilder {

    pub fn new(options: VocabOptions, min_count: u64, min_reduce: u64, on_overflow: OverflowPolicy) -> Self {
        Self {
            options,
            min_count,
            min_reduce,
            on_overflow
        }
    }

    /// The prune threshold the next prune will use.
    pub fn min_reduce(&self) -> u64 {
        self.min_reduce
    }

    /// Counts every word of `reader` into a fresh vocabulary, then sorts and
    /// filters it by `min_count`.
    pub fn learn_from_corpus<R: BufRead>(&mut self, reader: &mut WordReader<R>) -> Result<(Vocab, BuildStats)> {

        let mut vocab = Vocab::new(&self.options);
        let mut stats = BuildStats::default();
        let prune_above = MAX_LOAD_FACTOR * vocab.hash_size() as f64;

        while let Some(word) = reader.read_word()? {

            stats.tokens_read += 1;
            if stats.tokens_read % PROGRESS_EVERY == 0 {
                debug!("{}K words read", stats.tokens_read / 1000);
            }

            match vocab.lookup(&word) {
                Some(i) => vocab.increment(i),
                None => {
                    let i = vocab.insert(&word)?;
                    vocab.increment(i);
                }
            }

            if vocab.len() as f64 > prune_above {
                info!("reducing vocabulary of {} words, min_reduce {}", vocab.len(), self.min_reduce);
                vocab.prune(self.min_reduce);
                self.min_reduce += 1;
                stats.prunes += 1;

                if self.on_overflow == OverflowPolicy::Stop {
                    warn!("hash index overflow after {} words, the rest of the corpus is ignored", stats.tokens_read);
                    stats.truncated = true;
                    break;
                }
            }
        }

        info!("sorting vocabulary of {} words", vocab.len());
        vocab.sort_and_finalize(self.min_count);

        stats.train_words = vocab.train_words();
        stats.vocab_size = vocab.len();
        info!("vocab size: {}, words in train file: {}", stats.vocab_size, stats.train_words);

        Ok((vocab, stats))
    }

}
