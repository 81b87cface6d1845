
mod builder;
mod config;
mod error;
mod hash;
mod huffman;
mod logging;
mod pipeline;
mod sigmoid;
mod tokenizer;
mod unigram;
mod vocab;

pub use builder::{BuildStats, OverflowPolicy, VocabBuilder, MAX_LOAD_FACTOR};
pub use config::{files_handling, Config, ModelKind, Params};
pub use error::{Result, Word2VecError};
pub use hash::word_hash;
pub use huffman::encode;
pub use logging::setup_logging;
pub use pipeline::{Model, Pipeline};
pub use sigmoid::SigmoidTable;
pub use tokenizer::{WordReader, SENTENCE_END};
pub use unigram::{UnigramTable, UNIGRAM_POWER};
pub use vocab::{GrowthPolicy, Vocab, VocabEntry, VocabOptions};
