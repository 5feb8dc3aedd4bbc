//! Serialization of the accumulated model files.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::script;

/// Grams seen fewer times than this are discarded as noise.
pub const MIN_GRAM_COUNT: u64 = 2;

/// Write a pruned frequency table as `KEY -> COUNT` lines.
///
/// Entries below [`MIN_GRAM_COUNT`] are dropped; the rest are ordered by
/// count descending with ascending key as the tie-break, so output is stable
/// across runs. Overwrites the target file. Returns the number of entries
/// written.
pub fn write_gram_file(grams: &HashMap<String, u64>, path: &Path) -> Result<usize> {
    let mut kept: Vec<(&str, u64)> = grams
        .iter()
        .filter(|(_, count)| **count >= MIN_GRAM_COUNT)
        .map(|(key, count)| (key.as_str(), *count))
        .collect();
    kept.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for (key, count) in &kept {
        writeln!(writer, "{key} -> {count}")
            .with_context(|| format!("write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(kept.len())
}

/// Write the dictionary-eligible subset of the distinct words, sorted, one
/// word per line. Overwrites the target file. Returns the number of words
/// written.
pub fn write_word_file(words: &HashSet<String>, path: &Path) -> Result<usize> {
    let mut kept: Vec<&str> = words
        .iter()
        .filter(|word| script::is_dictionary_word(word))
        .map(String::as_str)
        .collect();
    kept.sort_unstable();

    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for word in &kept {
        writeln!(writer, "{word}").with_context(|| format!("write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(kept.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn prunes_singletons_and_sorts_by_count() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("bigram.txt");
        let grams = HashMap::from([
            ("一:二".to_string(), 5),
            ("三:四".to_string(), 1),
            ("五:六".to_string(), 2),
            ("七:八".to_string(), 5),
        ]);
        let written = write_gram_file(&grams, &path).expect("export");
        assert_eq!(written, 3);
        let contents = fs::read_to_string(&path).expect("read back");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["一:二 -> 5", "七:八 -> 5", "五:六 -> 2"]);
    }

    #[test]
    fn word_export_filters_and_sorts() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("words.txt");
        let words = HashSet::from([
            "中国".to_string(),
            "中".to_string(),
            "abc".to_string(),
            "天安门".to_string(),
            String::new(),
        ]);
        let written = write_word_file(&words, &path).expect("export");
        assert_eq!(written, 2);
        let contents = fs::read_to_string(&path).expect("read back");
        assert_eq!(contents, "中国\n天安门\n");
    }

    #[test]
    fn export_overwrites_previous_contents() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("bigram.txt");
        fs::write(&path, "stale -> 99\n").expect("seed");
        let grams = HashMap::from([("一:二".to_string(), 2)]);
        write_gram_file(&grams, &path).expect("export");
        assert_eq!(fs::read_to_string(&path).expect("read back"), "一:二 -> 2\n");
    }

    #[test]
    fn unwritable_target_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("bigram.txt");
        let grams = HashMap::from([("一:二".to_string(), 2)]);
        assert!(write_gram_file(&grams, &path).is_err());
    }
}
