//! Consolidation of word-list files into a single dictionary.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

/// Merge the words of every source file into `target`, one word per line.
///
/// The result is the deduplicated union of all sources, sorted; the target is
/// overwritten even when it appears among the sources (all reading happens
/// before any writing). A missing source contributes nothing. Returns the
/// merged word count.
pub fn merge<P: AsRef<Path>>(sources: &[P], target: &Path) -> Result<usize> {
    let mut merged = BTreeSet::new();
    for source in sources {
        let path = source.as_ref();
        if !path.exists() {
            warn!("dictionary source {} is missing, skipping", path.display());
            continue;
        }
        read_words(path, &mut merged)?;
    }

    let file = File::create(target)
        .with_context(|| format!("create merged dictionary {}", target.display()))?;
    let mut writer = BufWriter::new(file);
    for word in &merged {
        writeln!(writer, "{word}")
            .with_context(|| format!("write merged dictionary {}", target.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush merged dictionary {}", target.display()))?;
    Ok(merged.len())
}

fn read_words(path: &Path, into: &mut BTreeSet<String>) -> Result<()> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line =
            line.with_context(|| format!("read line {} in {}", lineno + 1, path.display()))?;
        let word = line.trim();
        if !word.is_empty() {
            into.insert(word.to_string());
        }
    }
    Ok(())
}
