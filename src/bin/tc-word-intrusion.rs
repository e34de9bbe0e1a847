//! Model precision for the word intrusion task
//!
//! Compares SVM rank predictions with the test data they were made on. For every topic, prints
//! whether the model picked the true intruder, which word it picked and which word was intruded.

// argument parsing
#[macro_use]
extern crate clap;
// logging
#[macro_use]
extern crate log;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use topic_coherence::corpus::read_lines;
use topic_coherence::errors::*;
use topic_coherence::intrusion::{judge, parse_predictions, precision};

pub fn main() {
    env_logger::init();
    // Main can't return a Result, so report whatever went wrong and exit nonzero
    if let Err(err) = inner_main() {
        error!("{}", err);
        process::exit(1);
    }
}

pub fn inner_main() -> Result<()> {
    let args = app_from_crate!()
        .arg_from_usage("<topic_file> 'file that contains the topics'")
        .arg_from_usage("<test_data> 'test data input for SVM'")
        .arg_from_usage("<predictions_output> 'predictions output from SVM'")
        .arg_from_usage("-s, --scores-only 'print only the hit (1.0 or 0.0) for each topic'")
        .get_matches();

    let topic_file = value_t!(args, "topic_file", PathBuf).unwrap_or_else(|e| e.exit());
    let test_data = value_t!(args, "test_data", PathBuf).unwrap_or_else(|e| e.exit());
    let predictions_file = value_t!(args, "predictions_output", PathBuf).unwrap_or_else(|e| e.exit());
    let scores_only = args.is_present("scores-only");

    let predictions = parse_predictions(read_lines(&predictions_file)?)?;
    let test_lines = read_lines(&test_data)?;
    let topics = read_lines(&topic_file)?;
    let judgements = judge(&test_lines[..], &predictions)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for judgement in &judgements {
        if scores_only {
            writeln!(out, "{:.1}", judgement.hit)?;
            continue;
        }
        let topic = (judgement.qid as usize)
            .checked_sub(1)
            .and_then(|ix| topics.get(ix))
            .map(|line| line.split_whitespace().collect::<Vec<&str>>().join(" "))
            .unwrap_or_default();
        writeln!(out, "[{:.1}] {}", judgement.hit, topic)?;
        writeln!(out, "\tSystem Chosen Intruder Word = {}", judgement.chosen)?;
        writeln!(out, "\tTrue Intruder Word = {}", judgement.intruder)?;
        writeln!(out)?;
    }
    if let Some(mean_precision) = precision(&judgements) {
        info!("Model precision over {} topics = {}", judgements.len(), mean_precision);
    }
    out.flush()?;
    Ok(())
}
