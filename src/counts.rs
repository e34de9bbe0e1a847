//! Word and word pair counts, and the word count file format
//!
//! One entry per line, `key|count`. A key is a single (space-joined) topic word, or two of them
//! joined with `|` smaller first. The reserved key `!!<TOTAL_WINDOWS>!!` holds the number of
//! windows evaluated over the whole corpus.
use std::io::{BufRead, Write};
use std::path::Path;

use crate::corpus::open_text;
use crate::errors::*;
use crate::farm::{new_farm, FarmMap};

/// Key of the corpus-wide window total
pub const TOTAL_WINDOWS_KEY: &str = "!!<TOTAL_WINDOWS>!!";
/// Separates the words of a pair key, and the key from its count
pub const PAIR_SEP: char = '|';

/// Canonical key for a pair of words; the same whichever order they are given in
pub fn pair_key(a: &str, b: &str) -> String {
    let (first, second) = if a > b { (b, a) } else { (a, b) };
    let mut key = String::with_capacity(first.len() + second.len() + 1);
    key.push_str(first);
    key.push(PAIR_SEP);
    key.push_str(second);
    key
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WordCounts {
    counts: FarmMap<String, u64>,
}

impl WordCounts {
    pub fn new() -> Self {
        WordCounts { counts: new_farm() }
    }

    /// Add one to a key, allocating only the first time the key is seen
    pub fn increment(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.to_string(), 1);
            }
        }
    }

    pub fn add(&mut self, key: &str, n: u64) {
        match self.counts.get_mut(key) {
            Some(count) => *count += n,
            None => {
                self.counts.insert(key.to_string(), n);
            }
        }
    }

    /// Record evaluated windows; the total key exists afterwards even when `n` is zero
    pub fn add_windows(&mut self, n: u64) {
        self.add(TOTAL_WINDOWS_KEY, n);
    }

    /// Raw lookup, 0 for absent keys
    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).cloned().unwrap_or(0)
    }

    pub fn total_windows(&self) -> u64 {
        self.get(TOTAL_WINDOWS_KEY)
    }

    /// Count of windows holding both words; a word paired with itself is just its own count
    pub fn pair(&self, a: &str, b: &str) -> u64 {
        if a == b {
            self.get(a)
        } else {
            self.get(&pair_key(a, b))
        }
    }

    /// Add every count of `other` into this map, key by key
    pub fn merge(&mut self, other: WordCounts) {
        if self.counts.is_empty() {
            self.counts = other.counts;
            return;
        }
        for (key, n) in other.counts {
            *self.counts.entry(key).or_insert(0) += n;
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(key, &n)| (key.as_str(), n))
    }

    /// Entries in key order, as they are written out
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Write the word count file, one `key|count` line per entry in key order
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<()> {
        for (key, n) in self.sorted() {
            writeln!(out, "{}{}{}", key, PAIR_SEP, n)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Parse a word count file
    ///
    /// Pair lines are re-canonicalized, so files with either word order load the same. Any
    /// line that is not two or three `|` separated fields ending in a count aborts the parse.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self> {
        let mut counts = WordCounts::new();
        for (ix, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            let malformed = || Error::MalformedCount { line: ix + 1, content: line.clone() };
            let fields: Vec<&str> = trimmed.split(PAIR_SEP).collect();
            let (key, count) = match fields.as_slice() {
                [key, count] => (key.to_string(), count),
                [a, b, count] => (pair_key(a, b), count),
                _ => return Err(malformed()),
            };
            let count: u64 = count.parse().map_err(|_| malformed())?;
            counts.counts.insert(key, count);
        }
        Ok(counts)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        WordCounts::read_from(open_text(path)?).map_err(|err| match err {
            Error::IOError(err) => Error::FileError(path.to_owned(), err),
            other => other,
        })
    }
}
