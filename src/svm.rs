//! SVM rank input for the word intrusion task
//!
//! Every topic becomes one query (`qid`). Each distinct topic word gets a line of features
//! describing how it associates with the other words of its topic: PMI, P(word|other) and
//! P(other|word) for every other word, each family min-max normalised within the topic. The
//! intruder is ranked 2 and comes first, every other word is ranked 1.
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::counts::WordCounts;
use crate::errors::*;
use crate::farm::{new_farm, FarmMap};
use crate::vocab::decollocate;

/// Number of cross validation folds when none is given
pub const DEFAULT_FOLDS: usize = 10;

/// One SVM rank line: `<target> qid:<qid> 1:<f1> 2:<f2> ... #<word>`
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureLine {
    pub target: u8,
    pub qid: usize,
    pub features: Vec<f64>,
    pub word: String,
}

impl fmt::Display for FeatureLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} qid:{}", self.target, self.qid)?;
        for (ix, value) in self.features.iter().enumerate() {
            write!(f, " {}:{:?}", ix + 1, value)?;
        }
        write!(f, " #{}", self.word)
    }
}

/// Query id of an SVM rank line, the second field (`qid:N`)
pub fn qid(line: &str) -> Option<u32> {
    let field = line.split_whitespace().nth(1)?;
    let mut parts = field.split(':');
    parts.next()?;
    parts.next()?.parse().ok()
}

/// The word a line describes, from its trailing `#word` comment
pub fn comment(line: &str) -> Option<&str> {
    let last = line.split_whitespace().last()?;
    Some(last.strip_prefix('#').unwrap_or(last))
}

/// P(x|y) from the joint count and the count of y, 0.0 when y was never seen
pub fn cond_prob(joint: u64, given: u64) -> f64 {
    if given == 0 {
        0.0
    } else {
        joint as f64 / given as f64
    }
}

/// Min-max scale into [0, 1]; a constant family is left as it is
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        value
    } else {
        (value - min) / (max - min)
    }
}

/// Builds feature lines from a word count file
#[derive(Clone, Copy, Debug)]
pub struct FeatureGenerator<'a> {
    counts: &'a WordCounts,
    normalised: bool,
}

/// Pairwise values for one topic, keyed by (word, other word)
struct Family<'t> {
    values: FarmMap<(&'t str, &'t str), f64>,
    min: f64,
    max: f64,
}

impl<'t> Family<'t> {
    fn new() -> Self {
        Family { values: new_farm(), min: f64::INFINITY, max: f64::NEG_INFINITY }
    }

    fn insert(&mut self, w1: &'t str, w2: &'t str, value: f64) {
        self.values.insert((w1, w2), value);
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn normalized(&self, w1: &'t str, w2: &'t str) -> f64 {
        let value = self.values.get(&(w1, w2)).cloned().unwrap_or(0.0);
        normalize(value, self.min, self.max)
    }
}

impl<'a> FeatureGenerator<'a> {
    /// `normalised` selects NPMI instead of PMI
    pub fn new(counts: &'a WordCounts, normalised: bool) -> Self {
        FeatureGenerator { counts, normalised }
    }

    fn count(&self, word: &str) -> u64 {
        self.counts.get(&decollocate(word))
    }

    fn joint(&self, w1: &str, w2: &str) -> u64 {
        self.counts.pair(&decollocate(w1), &decollocate(w2))
    }

    /// PMI in bits (NPMI if normalised), 0.0 when any count or the window total is zero
    pub fn pmi(&self, w1: &str, w2: &str) -> f64 {
        let (c1, c2, joint) = (self.count(w1), self.count(w2), self.joint(w1, w2));
        let total = self.counts.total_windows() as f64;
        if c1 == 0 || c2 == 0 || joint == 0 || total == 0.0 {
            return 0.0;
        }
        let joint = joint as f64;
        let pmi = ((joint * total) / (c1 as f64 * c2 as f64)).log2();
        if !self.normalised {
            return pmi;
        }
        let norm = -(joint / total).log2();
        if norm == 0.0 {
            1.0
        } else {
            pmi / norm
        }
    }

    /// Feature lines for one topic, intruder first
    ///
    /// `intruder` is the 0-based position of the intruder word, `qid` the 1-based topic number.
    pub fn topic_features<S: AsRef<str>>(
        &self,
        topic: &[S],
        intruder: usize,
        qid: usize,
    ) -> Result<Vec<FeatureLine>> {
        let words: Vec<&str> = topic.iter().map(AsRef::as_ref).collect();
        if words.len() < 2 {
            return Err(Error::Other(format!(
                "Topic {} needs at least two words for features, got {:?}",
                qid, words
            )));
        }
        let intruder_word = *words.get(intruder).ok_or_else(|| {
            Error::Other(format!(
                "Intruder position {} is past the end of topic {} ({} words)",
                intruder + 1,
                qid,
                words.len()
            ))
        })?;

        let mut pmi = Family::new();
        let mut given_other = Family::new();
        let mut given_word = Family::new();
        for (j, &w1) in words.iter().enumerate() {
            for (k, &w2) in words.iter().enumerate() {
                if j == k {
                    continue;
                }
                let joint = self.joint(w1, w2);
                given_other.insert(w1, w2, cond_prob(joint, self.count(w2)));
                given_word.insert(w1, w2, cond_prob(joint, self.count(w1)));
                pmi.insert(w1, w2, self.pmi(w1, w2));
            }
        }
        debug!(
            "Topic {}: pmi in [{}, {}], P(w|o) in [{}, {}], P(o|w) in [{}, {}]",
            qid, pmi.min, pmi.max, given_other.min, given_other.max, given_word.min, given_word.max
        );

        let mut targets = vec![intruder_word];
        for &word in &words {
            if !targets.contains(&word) {
                targets.push(word);
            }
        }

        let lines = targets
            .into_iter()
            .map(|target| {
                let mut features = vec![];
                for &other in words.iter().filter(|&&other| other != target) {
                    features.push(pmi.normalized(other, target));
                    features.push(given_other.normalized(target, other));
                    features.push(given_word.normalized(target, other));
                }
                FeatureLine {
                    target: if target == intruder_word { 2 } else { 1 },
                    qid,
                    features,
                    word: target.to_string(),
                }
            })
            .collect();
        Ok(lines)
    }

    /// Write feature lines for every topic; `intruders` holds 1-based positions, one per topic
    pub fn write_features<W: Write, S: AsRef<str>>(
        &self,
        mut out: W,
        topics: &[Vec<S>],
        intruders: &[usize],
    ) -> Result<()> {
        if intruders.len() < topics.len() {
            return Err(Error::Other(format!(
                "{} topics but only {} intruder positions",
                topics.len(),
                intruders.len()
            )));
        }
        for (ix, (topic, &intruder)) in topics.iter().zip(intruders).enumerate() {
            if intruder == 0 {
                return Err(Error::Other(format!(
                    "Intruder positions start at 1 (topic {})",
                    ix + 1
                )));
            }
            for line in self.topic_features(&topic[..], intruder - 1, ix + 1)? {
                writeln!(out, "{}", line)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

/// Group SVM rank lines into queries, each run of lines with the same qid forming one group
pub fn group_by_qid<I, S>(lines: I) -> Result<Vec<Vec<String>>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut groups: Vec<Vec<String>> = vec![];
    let mut current = None;
    for (ix, line) in lines.into_iter().enumerate() {
        let line = line.as_ref().trim();
        let id = qid(line).ok_or_else(|| Error::MalformedSvm {
            line: ix + 1,
            content: line.to_string(),
        })?;
        match groups.last_mut() {
            Some(group) if current == Some(id) => group.push(line.to_string()),
            _ => {
                groups.push(vec![line.to_string()]);
                current = Some(id);
            }
        }
    }
    Ok(groups)
}

/// Range of groups held out as test data for one fold
///
/// Boundaries are rounded half away from zero, so folds differ in size by at most one group.
pub fn fold_bounds(groups: usize, folds: usize, fold: usize) -> (usize, usize) {
    let per_fold = groups as f64 / folds as f64;
    let start = (fold as f64 * per_fold).round() as usize;
    let end = ((fold + 1) as f64 * per_fold).round() as usize;
    (start.min(groups), end.min(groups))
}

/// Write `test.dat.<i>` and `train.dat.<i>` for every fold into `dir`
pub fn write_folds<P: AsRef<Path>>(groups: &[Vec<String>], folds: usize, dir: P) -> Result<()> {
    let dir = dir.as_ref();
    if folds == 0 {
        return Err(Error::Other("Need at least one fold".into()));
    }
    for fold in 0..folds {
        let (start, end) = fold_bounds(groups.len(), folds, fold);
        info!("Fold {}: testing on queries {}..{} of {}", fold, start, end, groups.len());

        let test_path = dir.join(format!("test.dat.{}", fold));
        let mut test = BufWriter::new(
            File::create(&test_path).map_err(|err| Error::FileError(test_path.clone(), err))?,
        );
        for line in groups[start..end].iter().flatten() {
            writeln!(test, "{}", line)?;
        }
        test.flush()?;

        let train_path = dir.join(format!("train.dat.{}", fold));
        let mut train = BufWriter::new(
            File::create(&train_path).map_err(|err| Error::FileError(train_path.clone(), err))?,
        );
        for line in groups[..start].iter().chain(&groups[end..]).flatten() {
            writeln!(train, "{}", line)?;
        }
        train.flush()?;
    }
    Ok(())
}
