//! End-to-end pipeline: scan, export, merge.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::archive::CorpusArchive;
use crate::stats::CorpusStats;
use crate::{export, merge};

/// Input and output locations for one run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub corpus_archive: PathBuf,
    pub bigram_out: PathBuf,
    pub trigram_out: PathBuf,
    pub words_out: PathBuf,
    pub dictionary: PathBuf,
}

/// Totals reported after a completed run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunReport {
    pub lines: u64,
    pub word_occurrences: u64,
    pub chars: u64,
    pub distinct_words: usize,
    pub bigrams_exported: usize,
    pub trigrams_exported: usize,
    pub words_exported: usize,
    pub dictionary_size: usize,
}

/// Run the whole pipeline: scan the corpus, export both gram tables and the
/// candidate word list, then merge the candidates into the dictionary.
///
/// An unopenable archive or a merge write failure aborts with an error;
/// export failures are logged and the remaining stages still run.
pub fn run(config: &PipelineConfig) -> Result<RunReport> {
    let stats = scan_corpus(&config.corpus_archive)?;
    info!(
        "corpus scanned: {} lines, {} word occurrences, {} characters, {} distinct words",
        stats.lines,
        stats.word_occurrences,
        stats.chars,
        stats.distinct_words.len()
    );

    let bigrams_exported = export_stage("bigram model", || {
        export::write_gram_file(&stats.bigrams, &config.bigram_out)
    });
    let trigrams_exported = export_stage("trigram model", || {
        export::write_gram_file(&stats.trigrams, &config.trigram_out)
    });
    let words_exported = export_stage("extracted words", || {
        export::write_word_file(&stats.distinct_words, &config.words_out)
    });

    let dictionary_size = merge::merge(
        &[config.words_out.as_path(), config.dictionary.as_path()],
        &config.dictionary,
    )
    .context("merging extracted words into the dictionary")?;
    info!(
        "dictionary merged: {} words at {}",
        dictionary_size,
        config.dictionary.display()
    );

    Ok(RunReport {
        lines: stats.lines,
        word_occurrences: stats.word_occurrences,
        chars: stats.chars,
        distinct_words: stats.distinct_words.len(),
        bigrams_exported,
        trigrams_exported,
        words_exported,
        dictionary_size,
    })
}

fn scan_corpus(path: &Path) -> Result<CorpusStats> {
    let mut archive = CorpusArchive::open(path)?;
    let mut stats = CorpusStats::new();
    for entry in archive.entries()? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable archive entry: {err}");
                continue;
            }
        };
        debug!("scanning {}", entry.name());
        match entry.text() {
            Ok(text) => {
                for line in text.lines() {
                    stats.observe_line(line);
                }
            }
            Err(err) => warn!("skipping entry: {err}"),
        }
    }
    Ok(stats)
}

fn export_stage(what: &str, write: impl FnOnce() -> Result<usize>) -> usize {
    match write() {
        Ok(count) => {
            info!("{what}: {count} entries written");
            count
        }
        Err(err) => {
            warn!("{what} export failed: {err:#}");
            0
        }
    }
}
