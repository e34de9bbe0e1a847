//! Topic vocabulary and topic-word relation
//!
//! Both are built once from the topic file, before any partition is counted, and are only read
//! afterwards. The vocabulary maps every unigram that appears in a topic word (collocations are
//! split into their parts) to a dense id, assigned in sorted order so the ids do not depend on
//! the order of the topic lines. The relation records which cleaned topic words shared a topic
//! line, which is what bounds the pairs worth counting.
use std::collections::BTreeSet;
use std::io::BufRead;
use std::path::Path;

use crate::corpus::read_lines;
use crate::errors::*;
use crate::farm::{new_farm, new_farm_set, FarmMap, FarmSet};

/// Joins the unigrams of a collocation in topic files, as in `new_york`
pub const COLLOCATION_SEP: char = '_';

/// Expand a topic word to the space-joined form used for counting (`new_york` -> `new york`)
pub fn decollocate(word: &str) -> String {
    word.split(COLLOCATION_SEP).collect::<Vec<&str>>().join(" ")
}

/// A corpus token after vocabulary lookup
///
/// Unknown tokens break candidate spans; no term is ever built across one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// Id into the vocabulary, 1..=N
    Known(u32),
    Unknown,
}

/// Sorted unigram list with its reverse index
#[derive(Debug, Default)]
pub struct Vocabulary {
    unigrams: Vec<String>,
    ids: FarmMap<String, u32>,
}

impl Vocabulary {
    /// Build from any collection of unigrams; duplicates collapse, ids follow sorted order
    pub fn from_unigrams<I, S>(unigrams: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unigrams: Vec<String> = unigrams
            .into_iter()
            .map(Into::into)
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();
        let mut ids = new_farm();
        for (ix, unigram) in unigrams.iter().enumerate() {
            ids.insert(unigram.clone(), ix as u32 + 1);
        }
        Vocabulary { unigrams, ids }
    }

    pub fn len(&self) -> usize {
        self.unigrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unigrams.is_empty()
    }

    /// All unigrams in id order (index 0 holds id 1)
    pub fn unigrams(&self) -> &[String] {
        &self.unigrams
    }

    pub fn token(&self, unigram: &str) -> Token {
        match self.ids.get(unigram) {
            Some(&id) => Token::Known(id),
            None => Token::Unknown,
        }
    }

    pub fn unigram(&self, id: u32) -> Option<&str> {
        if id == 0 {
            return None;
        }
        self.unigrams.get(id as usize - 1).map(String::as_str)
    }

    /// Whitespace tokenization followed by vocabulary lookup
    pub fn tokenize(&self, document: &str) -> Vec<Token> {
        document.split_whitespace().map(|word| self.token(word)).collect()
    }
}

/// Symmetric "appeared on the same topic line" relation over cleaned topic words
#[derive(Debug, Default)]
pub struct TopicWordRelation {
    related: FarmMap<String, FarmSet<String>>,
}

impl TopicWordRelation {
    fn relate(&mut self, word: &str, other: &str) {
        let set = self
            .related
            .entry(word.to_string())
            .or_insert_with(new_farm_set);
        if word != other {
            set.insert(other.to_string());
        }
    }

    /// Whether the word is a relation key, i.e. it is worth counting at all
    pub fn contains(&self, word: &str) -> bool {
        self.related.contains_key(word)
    }

    /// Whether the two words share a topic line, checked in either direction
    pub fn related(&self, a: &str, b: &str) -> bool {
        self.related.get(a).map_or(false, |set| set.contains(b))
            || self.related.get(b).map_or(false, |set| set.contains(a))
    }

    /// Number of words with at least one related word
    pub fn len(&self) -> usize {
        self.related.len()
    }

    pub fn is_empty(&self) -> bool {
        self.related.is_empty()
    }
}

/// Everything a counting worker needs to know about the topics
#[derive(Debug, Default)]
pub struct TopicIndex {
    pub vocabulary: Vocabulary,
    pub relation: TopicWordRelation,
}

impl TopicIndex {
    /// Build from topic lines: whitespace separated topic words, collocations joined with `_`
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unigrams = BTreeSet::new();
        let mut relation = TopicWordRelation::default();
        for line in lines {
            let words: Vec<&str> = line.as_ref().split_whitespace().collect();
            for word in &words {
                unigrams.extend(word.split(COLLOCATION_SEP).map(str::to_string));
            }
            for (i, word) in words.iter().enumerate() {
                for other in &words[i + 1..] {
                    if word == other {
                        continue;
                    }
                    let (word, other) = (decollocate(word), decollocate(other));
                    relation.relate(&word, &other);
                    relation.relate(&other, &word);
                }
            }
        }
        let vocabulary = Vocabulary::from_unigrams(unigrams);
        info!(
            "Topic vocabulary has {} unigrams, {} related topic words",
            vocabulary.len(),
            relation.len()
        );
        TopicIndex { vocabulary, relation }
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let lines = reader.lines().collect::<::std::io::Result<Vec<String>>>()?;
        Ok(TopicIndex::from_lines(lines))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(TopicIndex::from_lines(read_lines(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decollocate_splits_on_underscore() {
        assert_eq!(decollocate("new_york_city"), "new york city");
        assert_eq!(decollocate("space"), "space");
    }

    #[test]
    fn ids_follow_sorted_order() {
        let vocab = Vocabulary::from_unigrams(vec!["space", "earth", "moon", "earth"]);
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.token("earth"), Token::Known(1));
        assert_eq!(vocab.token("moon"), Token::Known(2));
        assert_eq!(vocab.token("space"), Token::Known(3));
        assert_eq!(vocab.token("the"), Token::Unknown);
        assert_eq!(vocab.unigram(2), Some("moon"));
        assert_eq!(vocab.unigram(0), None);
        assert_eq!(vocab.unigram(4), None);
    }

    #[test]
    fn ids_ignore_topic_line_order() {
        let a = TopicIndex::from_lines(vec!["space earth", "new_york city"]);
        let b = TopicIndex::from_lines(vec!["city new_york", "earth space"]);
        assert_eq!(a.vocabulary.unigrams(), b.vocabulary.unigrams());
        assert_eq!(
            a.vocabulary.unigrams(),
            &["city", "earth", "new", "space", "york"]
        );
    }

    #[test]
    fn tokenize_marks_unknown_words() {
        let index = TopicIndex::from_lines(vec!["space earth"]);
        assert_eq!(
            index.vocabulary.tokenize("space the  earth\n"),
            vec![Token::Known(2), Token::Unknown, Token::Known(1)]
        );
    }

    #[test]
    fn relation_is_symmetric_and_line_scoped() {
        let index = TopicIndex::from_lines(vec!["space earth new_york", "city moon"]);
        let rel = &index.relation;
        assert!(rel.related("space", "earth"));
        assert!(rel.related("earth", "space"));
        assert!(rel.related("new york", "space"));
        assert!(!rel.related("new_york", "space"));
        assert!(!rel.related("space", "moon"));
        assert!(rel.contains("new york"));
        assert!(!rel.contains("new"));
        assert_eq!(rel.len(), 5);
    }

    #[test]
    fn lonely_and_repeated_words_are_not_related() {
        let index = TopicIndex::from_lines(vec!["space", "", "earth earth"]);
        assert!(index.relation.is_empty());
        assert_eq!(index.vocabulary.len(), 2);
    }
}
