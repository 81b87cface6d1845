
// imports
use crate::builder::{BuildStats, VocabBuilder};
use crate::config::files_handling::{self, open_corpus, write_vocab};
use crate::config::Params;
use crate::error::Result;
use crate::huffman;
use crate::sigmoid::SigmoidTable;
use crate::tokenizer::WordReader;
use crate::unigram::UnigramTable;
use crate::vocab::Vocab;

use log::{info, warn};
use std::fs::File;
use std::io::BufReader;
use std::time::Instant;


/// Everything a trainer needs, frozen once built.
pub struct Model {
    vocab: Vocab,
    sigmoid: SigmoidTable,
    unigram: Option<UnigramTable>,
    stats: BuildStats,
}

impl Model {

    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    pub fn sigmoid(&self) -> &SigmoidTable {
        &self.sigmoid
    }

    /// Present when negative sampling is enabled.
    pub fn unigram(&self) -> Option<&UnigramTable> {
        self.unigram.as_ref()
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }
}


pub struct Pipeline {}

impl Pipeline {

    // runs the preprocessing steps in order -
    // -> vocabulary, learned from the corpus or read from a vocabulary file
    // -> huffman codes
    // -> unigram table for negative sampling
    // -> sigmoid table

    pub fn build(params: &Params) -> Result<Model> {

        let timer = Instant::now();
        let (mut vocab, stats) = match &params.in_vocab_file {
            Some(in_vocab_file) => {
                info!("reading vocabulary from {}", in_vocab_file);
                let f = BufReader::new(File::open(in_vocab_file)?);
                let vocab = Vocab::read_from(f, &params.vocab, params.min_count)?;
                let stats = BuildStats {
                    train_words: vocab.train_words(),
                    vocab_size: vocab.len(),
                    ..BuildStats::default()
                };
                (vocab, stats)
            },
            None => {
                info!("learning vocabulary from training file {}", params.corpus_file);
                let mut reader = WordReader::new(open_corpus(&params.corpus_file)?, params.max_string_len);
                let mut builder = VocabBuilder::new(params.vocab.clone(), params.min_count, params.min_reduce, params.on_overflow);
                builder.learn_from_corpus(&mut reader)?
            }
        };
        info!("finished vocabulary with {} words, took {} seconds ...", vocab.len(), timer.elapsed().as_secs());

        if let Some(out_vocab_file) = &params.out_vocab_file {
            info!("saving vocabulary to {}", out_vocab_file);
            write_vocab(out_vocab_file, &vocab)?;
        }

        if vocab.len() < 2 {
            warn!("no word reached min_count {}, skipping huffman codes", params.min_count);
        } else {
            let timer = Instant::now();
            huffman::encode(&mut vocab)?;
            info!("finished huffman codes, took {} seconds ...", timer.elapsed().as_secs());
        }

        let unigram = if params.negative > 0 {
            let timer = Instant::now();
            let table = UnigramTable::new(&vocab, params.table_size)?;
            info!("finished unigram table, took {} seconds ...", timer.elapsed().as_secs());
            Some(table)
        } else {
            None
        };

        let sigmoid = SigmoidTable::new(params.exp_table_size, params.max_exp);

        Ok(Model { vocab, sigmoid, unigram, stats })
    }

    /// Writes every artifact of `model` under `output_dir`.
    pub fn save(model: &Model, output_dir: &str) -> Result<()> {

        files_handling::save_output(output_dir, "vocab", model.vocab())?;
        files_handling::save_output(output_dir, "codes", model.vocab().entries())?;
        files_handling::save_output(output_dir, "sigmoid", model.sigmoid())?;
        if let Some(unigram) = model.unigram() {
            files_handling::save_output(output_dir, "unigram", unigram)?;
        }
        info!("saved artifacts to {}", output_dir);
        Ok(())
    }

    pub fn run(params: &Params) -> Result<Model> {
        info!("{}", params);
        let model = Pipeline::build(params)?;
        Pipeline::save(&model, &params.output_dir)?;
        Ok(model)
    }

}
