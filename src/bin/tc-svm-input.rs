//! SVM rank features for the word intrusion task
//!
//! Needs the topics (intruder included), the 1-based position of each topic's intruder (one per
//! line) and a word count file. Writes one query per topic to stdout: PMI and conditional
//! probability features of each topic word against the others.

// argument parsing
#[macro_use]
extern crate clap;
// logging
#[macro_use]
extern crate log;

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

use clap::Arg;

use topic_coherence::corpus::read_lines;
use topic_coherence::counts::WordCounts;
use topic_coherence::errors::*;
use topic_coherence::svm::FeatureGenerator;

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
        .arg_from_usage("<intruder_file> 'file that contains the intruder word position for each topic'")
        .arg(Arg::from_usage("<pmi_type> 'pmi or normalised pmi'").possible_values(&["pmi", "npmi"]))
        .arg_from_usage("<wordcount_file> 'file that contains the word counts'")
        .get_matches();

    let topic_file = value_t!(args, "topic_file", PathBuf).unwrap_or_else(|e| e.exit());
    let intruder_file = value_t!(args, "intruder_file", PathBuf).unwrap_or_else(|e| e.exit());
    let wordcount_file = value_t!(args, "wordcount_file", PathBuf).unwrap_or_else(|e| e.exit());
    let normalised = args.value_of("pmi_type") == Some("npmi");

    let topics: Vec<Vec<String>> = read_lines(&topic_file)?
        .iter()
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect();
    let intruders = read_lines(&intruder_file)?
        .iter()
        .map(|line| line.trim().parse::<usize>())
        .collect::<::std::result::Result<Vec<usize>, _>>()?;
    let counts = WordCounts::from_path(&wordcount_file)?;
    info!(
        "Generating features for {} topics from {} word counts",
        topics.len(),
        counts.len()
    );

    let stdout = io::stdout();
    FeatureGenerator::new(&counts, normalised).write_features(
        BufWriter::new(stdout.lock()),
        &topics[..],
        &intruders,
    )
}
