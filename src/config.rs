
// imports
use crate::builder::OverflowPolicy;
use crate::error::{Result, Word2VecError};
use crate::sigmoid::{DEFAULT_EXP_TABLE_SIZE, DEFAULT_MAX_EXP};
use crate::unigram::DEFAULT_TABLE_SIZE;
use crate::vocab::{GrowthPolicy, VocabOptions};

use serde_json::Value;
use std::fmt::Display;
use std::fs;
use std::io::BufReader;
use std::path::Path;


/// Presets for the two kinds of corpora the reference tool handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelKind {
    Word,
    Phrase,
}

impl ModelKind {

    fn hash_size(&self) -> usize {
        match self {
            ModelKind::Word => 30_000_000,
            ModelKind::Phrase => 500_000_000,
        }
    }

    fn vocab_capacity(&self) -> usize {
        match self {
            ModelKind::Word => 1000,
            ModelKind::Phrase => 10_000,
        }
    }

    fn max_string_len(&self) -> usize {
        match self {
            ModelKind::Word => 100,
            ModelKind::Phrase => 60,
        }
    }
}


#[derive(Clone, Debug, PartialEq)]
pub struct Params {
    pub corpus_file: String,
    pub output_dir: String,
    pub output_file: String,
    pub binary: bool,
    pub model: ModelKind,
    pub min_count: u64,
    pub min_reduce: u64,
    pub vocab: VocabOptions,
    pub on_overflow: OverflowPolicy,
    pub max_string_len: usize,
    pub table_size: usize,
    pub exp_table_size: usize,
    pub max_exp: f64,
    pub negative: usize,
    pub hs: bool,
    pub in_vocab_file: Option<String>,
    pub out_vocab_file: Option<String>,
    pub debug_mode: u8,
}

impl Display for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "using hyper-params:
        corpus_file: {}
        output_dir: {}
        output_file: {}
        binary: {}
        model: {:?}
        min_count: {}
        min_reduce: {}
        vocab_hash_size: {}
        vocab_capacity: {}
        growth: {:?}
        on_overflow: {:?}
        max_string_len: {}
        max_code_len: {}
        table_size: {}
        exp_table_size: {}
        max_exp: {}
        negative: {}
        hs: {}
        in_vocab_file: {:?}
        out_vocab_file: {:?}
        debug_mode: {}",
        self.corpus_file, self.output_dir, self.output_file, self.binary, self.model, self.min_count,
        self.min_reduce, self.vocab.hash_size, self.vocab.initial_capacity, self.vocab.growth,
        self.on_overflow, self.max_string_len, self.vocab.max_code_len, self.table_size,
        self.exp_table_size, self.max_exp, self.negative, self.hs, self.in_vocab_file,
        self.out_vocab_file, self.debug_mode
        )
    }
}


fn invalid(message: String) -> Word2VecError {
    Word2VecError::Config(message)
}

fn get_u64(json: &Value, key: &str, default: u64) -> Result<u64> {
    match json.get(key) {
        Some(value) => value.as_u64().ok_or_else(|| invalid(format!("{} must be a non-negative integer", key))),
        None => Ok(default)
    }
}

fn get_usize(json: &Value, key: &str, default: usize) -> Result<usize> {
    get_u64(json, key, default as u64).map(|v| v as usize)
}

fn get_f64(json: &Value, key: &str, default: f64) -> Result<f64> {
    match json.get(key) {
        Some(value) => value.as_f64().ok_or_else(|| invalid(format!("{} must be numeric", key))),
        None => Ok(default)
    }
}

fn get_bool(json: &Value, key: &str, default: bool) -> Result<bool> {
    match json.get(key) {
        Some(value) => value.as_bool().ok_or_else(|| invalid(format!("{} must be a boolean", key))),
        None => Ok(default)
    }
}

fn get_str<'a>(json: &'a Value, key: &str) -> Result<Option<&'a str>> {
    match json.get(key) {
        Some(value) => value.as_str().map(Some).ok_or_else(|| invalid(format!("{} must be a string", key))),
        None => Ok(None)
    }
}

fn required_str<'a>(json: &'a Value, key: &str) -> Result<&'a str> {
    get_str(json, key)?.ok_or_else(|| invalid(format!("{} was not supplied through json", key)))
}


pub struct Config {
    params: Params
}

impl Config {

    pub fn get_params(&self) -> Params {
        self.params.clone()
    }

    /// Expects the program name followed by the path to a json config file.
    pub fn new(args: &[String]) -> Result<Config> {

        if args.len() != 2 {
            return Err(invalid("input should be a path to json file only".to_string()));
        }

        let f = BufReader::new(fs::File::open(&args[1])?);
        let json: Value = serde_json::from_reader(f)?;
        Config::from_json(&json)
    }

    pub fn from_json(json: &Value) -> Result<Config> {

        let corpus_file = required_str(json, "corpus_file")?;
        let output_dir = required_str(json, "output_dir")?;
        let output_file = get_str(json, "output_file")?.unwrap_or("vectors.txt");

        let model = match get_str(json, "model")? {
            None | Some("word") => ModelKind::Word,
            Some("phrase") => ModelKind::Phrase,
            Some(other) => return Err(invalid(format!("unknown model '{}', expected 'word' or 'phrase'", other)))
        };

        let growth = match json.get("growth") {
            None => GrowthPolicy::Doubling,
            Some(Value::String(s)) if s == "double" => GrowthPolicy::Doubling,
            Some(value) => match value.as_u64() {
                Some(step) if step > 0 => GrowthPolicy::Increment(step as usize),
                _ => return Err(invalid("growth must be \"double\" or a positive integer".to_string()))
            }
        };

        let on_overflow = match get_str(json, "on_overflow")? {
            None | Some("stop") => OverflowPolicy::Stop,
            Some("continue") => OverflowPolicy::Continue,
            Some(other) => return Err(invalid(format!("unknown on_overflow '{}', expected 'stop' or 'continue'", other)))
        };

        let vocab = VocabOptions {
            hash_size: get_usize(json, "vocab_hash_size", model.hash_size())?,
            initial_capacity: get_usize(json, "vocab_capacity", model.vocab_capacity())?,
            growth,
            max_code_len: get_usize(json, "max_code_len", 40)?
        };

        let params = Params {
            corpus_file: corpus_file.to_owned(),
            output_dir: output_dir.to_owned(),
            output_file: output_file.to_owned(),
            binary: get_bool(json, "binary", false)?,
            model,
            min_count: get_u64(json, "min_count", 5)?,
            min_reduce: get_u64(json, "min_reduce", 1)?,
            vocab,
            on_overflow,
            max_string_len: get_usize(json, "max_string_len", model.max_string_len())?,
            table_size: get_usize(json, "table_size", DEFAULT_TABLE_SIZE)?,
            exp_table_size: get_usize(json, "exp_table_size", DEFAULT_EXP_TABLE_SIZE)?,
            max_exp: get_f64(json, "max_exp", DEFAULT_MAX_EXP)?,
            negative: get_usize(json, "negative", 5)?,
            hs: get_bool(json, "hs", false)?,
            in_vocab_file: get_str(json, "in_vocab_file")?.map(str::to_owned),
            out_vocab_file: get_str(json, "out_vocab_file")?.map(str::to_owned),
            debug_mode: get_u64(json, "debug_mode", 2)?.min(u8::MAX as u64) as u8
        };

        Config::validate(&params)?;
        Ok(Self { params })
    }

    fn validate(params: &Params) -> Result<()> {

        if params.binary {
            let extension = Path::new(&params.output_file)
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default();
            if extension != "bin" {
                return Err(invalid(format!("Specified binary output but output file has '.{}'", extension)));
            }
        }

        let positive = [
            ("vocab_hash_size", params.vocab.hash_size),
            ("max_code_len", params.vocab.max_code_len),
            ("max_string_len", params.max_string_len),
            ("exp_table_size", params.exp_table_size),
        ];
        for (key, value) in positive {
            if value == 0 {
                return Err(invalid(format!("{} must be positive", key)));
            }
        }

        if params.negative > 0 && params.table_size == 0 {
            return Err(invalid("table_size must be positive when negative sampling is used".to_string()));
        }
        if !(params.max_exp > 0.0) {
            return Err(invalid("max_exp must be positive".to_string()));
        }

        Ok(())
    }

}


/// Reading and writing of pipeline inputs and artifacts.
pub mod files_handling {

    use crate::error::Result;
    use crate::sigmoid::SigmoidTable;
    use crate::unigram::UnigramTable;
    use crate::vocab::{Vocab, VocabEntry};

    use flate2::read::GzDecoder;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use ndarray::Array1;
    use ndarray_npy::{read_npy, write_npy};
    use std::fs::{self, File};
    use std::io::{BufRead, BufReader, BufWriter, Write};


    /// Opens a corpus for reading, decompressing it when the path ends in `.gz`.
    pub fn open_corpus(file_path: &str) -> Result<Box<dyn BufRead>> {
        let f = File::open(file_path)?;
        if file_path.ends_with(".gz") {
            Ok(Box::new(BufReader::new(GzDecoder::new(BufReader::new(f)))))
        } else {
            Ok(Box::new(BufReader::new(f)))
        }
    }

    pub fn write_vocab(file_path: &str, vocab: &Vocab) -> Result<()> {
        let mut f = BufWriter::new(File::create(file_path)?);
        vocab.write_to(&mut f)
    }

    pub fn read_input<R: ReadFile>(file_path: &str) -> Result<R> {
        R::read_file(file_path)
    }

    pub fn save_output<S: SaveFile + ?Sized>(output_dir: &str, file_name: &str, item: &S) -> Result<()> {
        fs::create_dir_all(output_dir)?;
        item.save_file(output_dir, file_name)
    }


    pub trait ReadFile: Sized {
        fn read_file(file_path: &str) -> Result<Self>;
    }

    impl ReadFile for Vec<VocabEntry> {
        fn read_file(file_path: &str) -> Result<Self> {
            let in_file = file_path.to_string() + ".bin.gz";
            let reader = GzDecoder::new(BufReader::new(File::open(in_file)?));
            Ok(bincode::deserialize_from(reader)?)
        }
    }

    impl ReadFile for UnigramTable {
        fn read_file(file_path: &str) -> Result<Self> {
            let in_file = file_path.to_string() + ".npy";
            let table: Array1<u32> = read_npy(in_file)?;
            Ok(UnigramTable::from(table))
        }
    }

    impl ReadFile for Array1<f64> {
        fn read_file(file_path: &str) -> Result<Self> {
            let in_file = file_path.to_string() + ".npy";
            Ok(read_npy(in_file)?)
        }
    }


    pub trait SaveFile {
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<()>;
    }

    impl SaveFile for Vocab {
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<()> {
            let out = output_dir.to_string() + "/" + file_name + ".txt";
            write_vocab(&out, self)
        }
    }

    // codes and paths, which the text vocabulary does not carry
    impl SaveFile for [VocabEntry] {
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<()> {
            let out = output_dir.to_string() + "/" + file_name + ".bin.gz";
            let f = BufWriter::new(File::create(out)?);
            let mut writer = GzEncoder::new(f, Compression::default());
            bincode::serialize_into(&mut writer, self)?;
            writer.finish()?.flush()?;
            Ok(())
        }
    }

    impl SaveFile for UnigramTable {
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<()> {
            let out = output_dir.to_string() + "/" + file_name + ".npy";
            write_npy(out, self.as_array())?;
            Ok(())
        }
    }

    impl SaveFile for SigmoidTable {
        fn save_file(&self, output_dir: &str, file_name: &str) -> Result<()> {
            let out = output_dir.to_string() + "/" + file_name + ".npy";
            write_npy(out, self.as_array())?;
            Ok(())
        }
    }

}
