
use std::collections::HashMap;
use std::{env, error::Error, fs::File, io::{self, BufRead}};
use word2vec_trainer::files_handling::read_input;
use word2vec_trainer::VocabEntry;


// prints the huffman code and tree path of words from a finished preprocessing run.
// treated as binary executable so it can be ran independently from main
//
// arguments: path to the output directory of a run, path to a file with one word per line
// example: ... Output words.txt

fn main() -> Result<(), Box<dyn Error>> {

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        return Err("usage: inspect <output_dir> <words file>".into());
    }

    let entries: Vec<VocabEntry> = read_input(&(args[1].to_string() + "/codes"))?;
    let w2i: HashMap<&[u8], usize> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| (entry.word.as_slice(), i))
        .collect();
    println!("loaded {} words", entries.len());

    let lines = io::BufReader::new(File::open(&args[2])?).lines();
    for line in lines {
        let line = line?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }

        match w2i.get(word.as_bytes()) {
            Some(&i) => {
                let entry = &entries[i];
                let code: String = entry.code.iter().map(|b| if *b == 0 { '0' } else { '1' }).collect();
                println!("{}\tindex {}\tcount {}\tcode {}\tpath {:?}", word, i, entry.count, code, entry.path);
            },
            None => println!("{}\tnot in vocabulary", word)
        }
    }

    Ok(())
}
