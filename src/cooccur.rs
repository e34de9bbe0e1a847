//! Windowed topic word cooccurrence counting
//!
//! A window slides across each document (one line of a partition, split at any Unicode line
//! boundary). In every window the maximal runs of known tokens, and every contiguous sub-run of
//! those, are rebuilt as space-joined strings; the ones that are topic words become the window's
//! candidates. Each candidate is counted once per window, each related pair of candidates once
//! per window, and every window adds one to the window total whatever it holds.
//!
//! With a window size `w > 0` a document of `L` tokens gives `L + w - 1` windows: the first
//! ones grow from the start of the document and the last ones shrink towards its end. A window
//! size of 0 makes the whole document a single window.
use std::io::BufRead;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::aggregate::Aggregator;
use crate::corpus::{for_each_document, open_text};
use crate::counts::{pair_key, WordCounts};
use crate::errors::*;
use crate::farm::{new_farm_set, FarmSet};
use crate::vocab::{TopicIndex, Token};

/// Window size used when none is given
pub const DEFAULT_WINDOW_SIZE: usize = 20;

/// Number of windows evaluated for a document of `doc_len` tokens
pub fn window_count(doc_len: usize, window_size: usize) -> usize {
    if window_size == 0 {
        1
    } else {
        doc_len + window_size - 1
    }
}

/// The windows of one document, in order
pub fn windows<'a>(
    tokens: &'a [Token],
    window_size: usize,
) -> impl Iterator<Item = &'a [Token]> + 'a {
    (1..=window_count(tokens.len(), window_size)).map(move |tail| {
        if window_size == 0 {
            return tokens;
        }
        let head = tail.saturating_sub(window_size).min(tokens.len());
        &tokens[head..tail.min(tokens.len())]
    })
}

/// Counts one partition at a time against a shared, read-only topic index
#[derive(Clone, Copy, Debug)]
pub struct WindowCounter<'a> {
    index: &'a TopicIndex,
    window_size: usize,
}

impl<'a> WindowCounter<'a> {
    pub fn new(index: &'a TopicIndex, window_size: usize) -> Self {
        WindowCounter { index, window_size }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Distinct topic words found in a window
    ///
    /// Candidates never span an unknown token.
    pub fn candidates(&self, window: &[Token]) -> FarmSet<String> {
        let vocabulary = &self.index.vocabulary;
        let relation = &self.index.relation;
        let mut found = new_farm_set();
        for segment in window.split(|token| *token == Token::Unknown) {
            let unigrams: Vec<&str> = segment
                .iter()
                .filter_map(|token| match *token {
                    Token::Known(id) => vocabulary.unigram(id),
                    Token::Unknown => None,
                })
                .collect();
            for start in 0..unigrams.len() {
                let mut term = String::new();
                for unigram in &unigrams[start..] {
                    if !term.is_empty() {
                        term.push(' ');
                    }
                    term.push_str(unigram);
                    if relation.contains(&term) && !found.contains(&term) {
                        found.insert(term.clone());
                    }
                }
            }
        }
        found
    }

    /// Count the candidates and related candidate pairs of one window
    pub fn count_window(&self, window: &[Token], counts: &mut WordCounts) {
        let candidates: Vec<String> = self.candidates(window).into_iter().collect();
        if !candidates.is_empty() {
            trace!("Window candidates: {:?}", candidates);
        }
        for term in &candidates {
            counts.increment(term);
        }
        for (i, first) in candidates.iter().enumerate() {
            for second in &candidates[i + 1..] {
                if self.index.relation.related(first, second) {
                    counts.increment(&pair_key(first, second));
                }
            }
        }
    }

    /// Count every window of one document, returning how many windows it had
    pub fn count_document(&self, document: &str, counts: &mut WordCounts) -> u64 {
        let tokens = self.index.vocabulary.tokenize(document);
        let mut evaluated = 0;
        for window in windows(&tokens, self.window_size) {
            evaluated += 1;
            self.count_window(window, counts);
        }
        evaluated
    }

    /// Count a stream of documents, one per line (see `corpus::for_each_document`)
    ///
    /// The result always carries the window total, zero for an empty stream.
    pub fn count_reader<R: BufRead>(&self, reader: R) -> Result<WordCounts> {
        let mut counts = WordCounts::new();
        let mut total_windows = 0;
        for_each_document(reader, |document| {
            total_windows += self.count_document(document, &mut counts);
        })?;
        counts.add_windows(total_windows);
        Ok(counts)
    }

    /// Count one partition file
    pub fn count_partition<P: AsRef<Path>>(&self, path: P) -> Result<WordCounts> {
        let path = path.as_ref();
        self.count_reader(open_text(path)?).map_err(|err| match err {
            Error::IOError(err) => Error::FileError(path.to_owned(), err),
            other => other,
        })
    }
}

/// Count every partition in parallel and merge the results
///
/// Runs on the rayon pool, one task per partition. The first partition that fails fails the
/// whole run; nothing is returned for a corpus that was only partly counted.
pub fn count_corpus(
    index: &TopicIndex,
    partitions: &[PathBuf],
    window_size: usize,
) -> Result<WordCounts> {
    let counter = WindowCounter::new(index, window_size);
    let aggregator = Aggregator::new();
    partitions.par_iter().try_for_each(|partition| -> Result<()> {
        info!("Counting corpus partition {}", partition.display());
        let partial = counter.count_partition(partition)?;
        aggregator.merge(partial);
        Ok(())
    })?;
    info!(
        "Merged {} partitions using {} worker threads",
        aggregator.partitions(),
        rayon::current_num_threads()
    );
    Ok(aggregator.into_counts())
}
