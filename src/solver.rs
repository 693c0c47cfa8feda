use crate::debug_log;
use std::collections::{BTreeSet, HashMap};

/// Zero-based indices at which a guessed letter occurs in the secret word.
pub type Positions = BTreeSet<usize>;

/// Letters already guessed, or otherwise excluded from consideration.
pub type LetterSet = BTreeSet<char>;

/// The set of dictionary words still consistent with every piece of position
/// feedback seen so far.
///
/// Candidates keep their dictionary order. That order matters: it is what
/// breaks ties in [`WordFilter::recommend`].
#[derive(Debug, Clone)]
pub struct WordFilter {
    length: usize,
    candidates: Vec<String>,
}

impl WordFilter {
    /// Keeps the dictionary words that are exactly `length` characters long.
    ///
    /// An empty result is not an error; `recommend` just returns `None` and
    /// the caller falls back to [`fallback_letter`].
    pub fn new(dictionary: &[String], length: usize) -> Self {
        let candidates: Vec<String> = dictionary
            .iter()
            .filter(|word| word.chars().count() == length)
            .cloned()
            .collect();
        debug_log!(
            "WordFilter::new() - {} of {} words have length {}",
            candidates.len(),
            dictionary.len(),
            length
        );
        Self { length, candidates }
    }

    pub fn word_length(&self) -> usize {
        self.length
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Number of candidate words containing each letter, ignoring `ignored`.
    ///
    /// A letter counts once per word no matter how often it repeats. Entries
    /// come back in first-encounter order: candidates in dictionary order,
    /// each word scanned left to right.
    pub fn letter_counts(&self, ignored: &LetterSet) -> Vec<(char, usize)> {
        let mut counts: Vec<(char, usize)> = Vec::new();
        let mut slots: HashMap<char, usize> = HashMap::new();

        for word in &self.candidates {
            let mut seen: Vec<char> = Vec::with_capacity(self.length);
            for c in word.chars() {
                if ignored.contains(&c) || seen.contains(&c) {
                    continue;
                }
                seen.push(c);
                match slots.get(&c) {
                    Some(&slot) => counts[slot].1 += 1,
                    None => {
                        slots.insert(c, counts.len());
                        counts.push((c, 1));
                    }
                }
            }
        }
        counts
    }

    /// The letter appearing in the most candidate words, skipping `ignored`.
    ///
    /// Ties go to the letter encountered first when scanning the candidates in
    /// dictionary order, left to right within each word: a later letter only
    /// wins with a strictly higher count. For `["car", "can"]` both `c` and
    /// `a` appear in two words and `c` is returned.
    pub fn recommend(&self, ignored: &LetterSet) -> Option<char> {
        let mut best = None;
        let mut highest = 0;
        for (letter, count) in self.letter_counts(ignored) {
            if count > highest {
                highest = count;
                best = Some(letter);
            }
        }
        debug_log!(
            "WordFilter::recommend() - {:?} ({} of {} candidates)",
            best,
            highest,
            self.candidates.len()
        );
        best
    }

    /// Keeps only the words that hold `letter` at exactly `positions` and
    /// nowhere else.
    ///
    /// An empty `positions` set removes every word containing `letter`.
    /// Applying the same feedback twice leaves the set unchanged.
    pub fn apply_feedback(&mut self, letter: char, positions: &Positions) {
        let before = self.candidates.len();
        self.candidates
            .retain(|word| matches_feedback(word, letter, positions));
        debug_log!(
            "WordFilter::apply_feedback('{}', {:?}) - {} -> {} candidates",
            letter,
            positions,
            before,
            self.candidates.len()
        );
    }
}

/// Whether `word` places `letter` at exactly `positions`.
pub fn matches_feedback(word: &str, letter: char, positions: &Positions) -> bool {
    let mut length = 0;
    for (i, c) in word.chars().enumerate() {
        if (c == letter) != positions.contains(&i) {
            return false;
        }
        length += 1;
    }
    positions.iter().all(|&i| i < length)
}

/// First letter of `a..=z` not in `ignored`.
pub fn fallback_letter(ignored: &LetterSet) -> Option<char> {
    ('a'..='z').find(|c| !ignored.contains(c))
}
