//! Model precision on the word intrusion task
//!
//! Scores SVM rank predictions against the feature file they were made for. Within a query the
//! first line is always the true intruder; the model's pick is the line with the highest
//! prediction, the earliest one on ties.
use std::collections::BTreeMap;

use crate::errors::*;
use crate::svm::{comment, qid};

#[derive(Clone, Debug, PartialEq)]
pub struct Judgement {
    pub qid: u32,
    /// 1.0 when the model picked the true intruder, 0.0 otherwise
    pub hit: f64,
    pub chosen: String,
    pub intruder: String,
}

/// Parse an SVM prediction file, one score per line
pub fn parse_predictions<I, S>(lines: I) -> Result<Vec<f64>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| -> Result<f64> { Ok(line.as_ref().trim().parse::<f64>()?) })
        .collect()
}

/// Judge every query of a test file, in qid order
pub fn judge<S: AsRef<str>>(test_lines: &[S], predictions: &[f64]) -> Result<Vec<Judgement>> {
    if predictions.len() < test_lines.len() {
        return Err(Error::Other(format!(
            "{} test lines but only {} predictions",
            test_lines.len(),
            predictions.len()
        )));
    }

    let mut queries: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (ix, line) in test_lines.iter().enumerate() {
        let line = line.as_ref();
        let id = qid(line).ok_or_else(|| Error::MalformedSvm {
            line: ix + 1,
            content: line.to_string(),
        })?;
        queries.entry(id).or_insert_with(Vec::new).push(ix);
    }

    let word = |ix: usize| -> Result<String> {
        let line = test_lines[ix].as_ref();
        comment(line).map(str::to_string).ok_or_else(|| Error::MalformedSvm {
            line: ix + 1,
            content: line.to_string(),
        })
    };

    let mut judgements = vec![];
    for (id, lines) in queries {
        let intruder = lines[0];
        let mut chosen = intruder;
        for &ix in &lines[1..] {
            if predictions[ix] > predictions[chosen] {
                chosen = ix;
            }
        }
        judgements.push(Judgement {
            qid: id,
            hit: if chosen == intruder { 1.0 } else { 0.0 },
            chosen: word(chosen)?,
            intruder: word(intruder)?,
        });
    }
    Ok(judgements)
}

/// Mean precision over judged queries
pub fn precision(judgements: &[Judgement]) -> Option<f64> {
    if judgements.is_empty() {
        None
    } else {
        Some(judgements.iter().map(|j| j.hit).sum::<f64>() / judgements.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST: &[&str] = &[
        "2 qid:1 1:0.1 #mars",
        "1 qid:1 1:0.9 #space",
        "1 qid:1 1:0.8 #earth",
        "2 qid:2 1:0.5 #banana",
        "1 qid:2 1:0.2 #rock",
    ];

    #[test]
    fn picks_highest_prediction() {
        let predictions = vec![0.2, 0.9, 0.4, 1.5, 1.5];
        let judgements = judge(TEST, &predictions).unwrap();
        assert_eq!(judgements.len(), 2);

        assert_eq!(judgements[0].qid, 1);
        assert_eq!(judgements[0].hit, 0.0);
        assert_eq!(judgements[0].chosen, "space");
        assert_eq!(judgements[0].intruder, "mars");

        // ties keep the true intruder
        assert_eq!(judgements[1].hit, 1.0);
        assert_eq!(judgements[1].chosen, "banana");

        assert_eq!(precision(&judgements), Some(0.5));
    }

    #[test]
    fn too_few_predictions_is_an_error() {
        assert!(judge(TEST, &[1.0, 2.0]).is_err());
    }

    #[test]
    fn malformed_lines_are_reported() {
        match judge(&["2 qid:1 #a", "oops"], &[0.0, 0.0]) {
            Err(Error::MalformedSvm { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected MalformedSvm, got {:?}", other),
        }
    }

    #[test]
    fn parses_predictions() {
        assert_eq!(parse_predictions(vec!["0.5", " -1.25\n"]).unwrap(), vec![0.5, -1.25]);
        assert!(parse_predictions(vec!["x"]).is_err());
    }
}
