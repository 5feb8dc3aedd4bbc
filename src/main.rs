use std::env;
use std::path::PathBuf;
use std::time::Instant;

use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use corpus_ngram::pipeline::{self, PipelineConfig};

const DEFAULT_CORPUS_ARCHIVE: &str = "data/corpus.tar.gz";
const DEFAULT_BIGRAM_OUT: &str = "data/bigram.txt";
const DEFAULT_TRIGRAM_OUT: &str = "data/trigram.txt";
const DEFAULT_WORDS_OUT: &str = "data/words.txt";
const DEFAULT_DICTIONARY: &str = "data/dic.txt";

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config();
    info!("corpus archive: {}", config.corpus_archive.display());
    info!("dictionary: {}", config.dictionary.display());
    info!(
        "model outputs: {} / {} / {}",
        config.bigram_out.display(),
        config.trigram_out.display(),
        config.words_out.display()
    );

    let start = Instant::now();
    let report = pipeline::run(&config)?;
    info!("pipeline finished in {} ms", start.elapsed().as_millis());
    info!(
        "bigrams exported: {}, trigrams exported: {}, candidate words: {}, dictionary size: {}",
        report.bigrams_exported,
        report.trigrams_exported,
        report.words_exported,
        report.dictionary_size
    );
    Ok(())
}

fn load_config() -> PipelineConfig {
    let mut config = PipelineConfig {
        corpus_archive: env_path("CORPUS_ARCHIVE", DEFAULT_CORPUS_ARCHIVE),
        bigram_out: env_path("BIGRAM_OUT", DEFAULT_BIGRAM_OUT),
        trigram_out: env_path("TRIGRAM_OUT", DEFAULT_TRIGRAM_OUT),
        words_out: env_path("WORDS_OUT", DEFAULT_WORDS_OUT),
        dictionary: env_path("DICTIONARY", DEFAULT_DICTIONARY),
    };
    for arg in env::args().skip(1) {
        if let Some(path) = arg.strip_prefix("--corpus=") {
            config.corpus_archive = PathBuf::from(path);
        } else if let Some(path) = arg.strip_prefix("--bigram-out=") {
            config.bigram_out = PathBuf::from(path);
        } else if let Some(path) = arg.strip_prefix("--trigram-out=") {
            config.trigram_out = PathBuf::from(path);
        } else if let Some(path) = arg.strip_prefix("--words-out=") {
            config.words_out = PathBuf::from(path);
        } else if let Some(path) = arg.strip_prefix("--dictionary=") {
            config.dictionary = PathBuf::from(path);
        } else {
            eprintln!("ignoring unrecognized argument: {arg}");
        }
    }
    config
}

fn env_path(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
