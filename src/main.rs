
use log::{error, info};
use std::env;
use std::process;
use std::time::Instant;
use word2vec_trainer::{setup_logging, Config, Pipeline};

fn main() {

    let args: Vec<String> = env::args().collect();

    let params = match Config::new(&args) {
        Ok(config) => config.get_params(),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    if let Err(e) = setup_logging(params.debug_mode) {
        eprintln!("could not set up logging: {}", e);
    }

    let timer = Instant::now();
    match Pipeline::run(&params) {
        Ok(model) => info!(
            "preprocessing done: {} words in vocabulary, {} training words, took {} seconds ...",
            model.vocab().len(), model.stats().train_words, timer.elapsed().as_secs()
        ),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
