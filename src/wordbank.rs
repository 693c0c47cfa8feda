use crate::info_log;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const EMBEDDED_DICTIONARY: &str = include_str!("resources/dictionary.txt");

/// File name looked up in the working directory and the per-user data dir.
pub const DICTIONARY_FILE_NAME: &str = "dictionary.txt";

/// Where a dictionary came from, for the startup banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    File(PathBuf),
    Embedded,
}

fn normalize_word(line: &str) -> Option<String> {
    let word = line.trim().to_lowercase();
    if !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(word)
    } else {
        None
    }
}

fn collect_distinct<I: IntoIterator<Item = String>>(words: I) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .into_iter()
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

/// Trims and lowercases every word, drops anything that is not all letters,
/// and keeps the first occurrence of each word.
pub(crate) fn normalize_dictionary<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    collect_distinct(
        words
            .into_iter()
            .filter_map(|word| normalize_word(word.as_ref())),
    )
}

/// Parses one word per line.
pub fn load_dictionary_from_str(data: &str) -> Vec<String> {
    normalize_dictionary(data.lines())
}

pub fn load_dictionary_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize_word(&line?) {
            words.push(word);
        }
    }
    Ok(collect_distinct(words))
}

/// `<data dir>/hangman/dictionary.txt`, when the platform has a data dir.
pub fn default_dictionary_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("hangman").join(DICTIONARY_FILE_NAME))
}

/// Picks the dictionary to play with.
///
/// An explicit path must load. Otherwise `./dictionary.txt` and then the
/// per-user default are tried, and the embedded list is the last resort.
pub fn resolve_dictionary(explicit: Option<&Path>) -> io::Result<(Vec<String>, DictionarySource)> {
    if let Some(path) = explicit {
        let words = load_dictionary_from_file(path)?;
        return Ok((words, DictionarySource::File(path.to_path_buf())));
    }

    let local = PathBuf::from(DICTIONARY_FILE_NAME);
    for path in std::iter::once(local).chain(default_dictionary_path()) {
        if !path.is_file() {
            continue;
        }
        match load_dictionary_from_file(&path) {
            Ok(words) if !words.is_empty() => {
                info_log!("Loaded {} words from {}", words.len(), path.display());
                return Ok((words, DictionarySource::File(path)));
            }
            Ok(_) => {
                info_log!("{} has no usable words, skipping", path.display());
            }
            Err(e) => {
                info_log!("Could not read {}: {}", path.display(), e);
            }
        }
    }

    Ok((
        load_dictionary_from_str(EMBEDDED_DICTIONARY),
        DictionarySource::Embedded,
    ))
}
