//! Observed topic coherence from a word count file
//!
//! All three metrics use base-10 logarithms and never fail on missing counts: PMI and NPMI score
//! a pair 0.0 when any count is zero, LCP falls back to a smoothed estimate.
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::counts::WordCounts;
use crate::errors::*;
use crate::vocab::decollocate;

/// Number of leading topic words scored when none is given
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    /// Pointwise mutual information
    Pmi,
    /// PMI normalised to [-1, 1]
    Npmi,
    /// Log conditional probability of the second word given the first
    Lcp,
}

impl Metric {
    pub const NAMES: &'static [&'static str] = &["pmi", "npmi", "lcp"];

    /// Association of two (already de-collocated) words
    pub fn association(self, counts: &WordCounts, w1: &str, w2: &str) -> f64 {
        let total = counts.total_windows() as f64;
        let joint = counts.pair(w1, w2);
        let c1 = counts.get(w1);
        let c2 = counts.get(w2);
        match self {
            Metric::Pmi | Metric::Npmi => {
                if c1 == 0 || c2 == 0 || joint == 0 || total == 0.0 {
                    return 0.0;
                }
                let joint = joint as f64;
                let pmi = ((joint * total) / (c1 as f64 * c2 as f64)).log10();
                if self == Metric::Npmi {
                    let norm = -(joint / total).log10();
                    // a pair present in every window
                    if norm == 0.0 {
                        return 1.0;
                    }
                    pmi / norm
                } else {
                    pmi
                }
            }
            Metric::Lcp => {
                if total == 0.0 {
                    return 0.0;
                }
                if joint == 0 {
                    let seen = if c2 == 0 { 1.0 } else { c2 as f64 };
                    (seen / total).log10()
                } else {
                    // c1 can only be below the joint count in a hand-edited file
                    (joint as f64 / c1.max(joint) as f64).log10()
                }
            }
        }
    }

    /// Mean association over the pairs of a topic, earlier word first
    ///
    /// Topic words are given as they appear in the topic file, collocations included. A topic
    /// with no pair of distinct words scores 0.0.
    pub fn topic_coherence<S: AsRef<str>>(self, counts: &WordCounts, topic: &[S]) -> f64 {
        let mut sum = 0.0;
        let mut pairs = 0;
        for (i, first) in topic.iter().enumerate() {
            let w1 = decollocate(first.as_ref());
            for second in &topic[i + 1..] {
                if first.as_ref() == second.as_ref() {
                    continue;
                }
                sum += self.association(counts, &w1, &decollocate(second.as_ref()));
                pairs += 1;
            }
        }
        if pairs == 0 {
            warn!("Topic {:?} has no word pairs to score", join(topic));
            return 0.0;
        }
        sum / pairs as f64
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pmi" => Ok(Metric::Pmi),
            "npmi" => Ok(Metric::Npmi),
            "lcp" => Ok(Metric::Lcp),
            other => Err(Error::Other(format!(
                "Unknown metric {:?}, expected one of {:?}",
                other,
                Metric::NAMES
            ))),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Metric::Pmi => "pmi",
            Metric::Npmi => "npmi",
            Metric::Lcp => "lcp",
        };
        write!(f, "{}", name)
    }
}

/// Coherence of one topic line, scored over its first `top_n` words
#[derive(Clone, Debug, PartialEq)]
pub struct TopicScore {
    pub words: Vec<String>,
    pub coherence: f64,
}

/// Score every topic line in order
pub fn score_topics<I, S>(
    counts: &WordCounts,
    metric: Metric,
    topics: I,
    top_n: usize,
) -> Vec<TopicScore>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    topics
        .into_iter()
        .map(|line| {
            let words: Vec<String> = line
                .as_ref()
                .split_whitespace()
                .take(top_n)
                .map(str::to_string)
                .collect();
            let coherence = metric.topic_coherence(counts, &words[..]);
            TopicScore { words, coherence }
        })
        .collect()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Median, averaging the middle two for an even count
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

fn join<S: AsRef<str>>(words: &[S]) -> String {
    words.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join(" ")
}
