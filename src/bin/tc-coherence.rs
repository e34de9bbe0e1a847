//! Observed coherence of topics, given a word count file
//!
//! Each topic is scored as the mean PMI, NPMI or LCP over the pairs of its top-N words. Prints
//! one `[score] words` line per topic followed by the mean and median over all topics.

// argument parsing
#[macro_use]
extern crate clap;
// logging
#[macro_use]
extern crate log;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Arg;

use topic_coherence::corpus::read_lines;
use topic_coherence::counts::WordCounts;
use topic_coherence::errors::*;
use topic_coherence::metrics::{self, Metric, DEFAULT_TOP_N};

pub fn main() {
    env_logger::init();
    // Main can't return a Result, so report whatever went wrong and exit nonzero
    if let Err(err) = inner_main() {
        error!("{}", err);
        process::exit(1);
    }
}

pub fn inner_main() -> Result<()> {
    let default_top_n = DEFAULT_TOP_N.to_string();
    let args = app_from_crate!()
        .arg_from_usage("<topic_file> 'file that contains the topics'")
        .arg(Arg::from_usage("<metric> 'type of evaluation metric'").possible_values(Metric::NAMES))
        .arg_from_usage("<wordcount_file> 'file that contains the word counts'")
        .arg(
            Arg::from_usage("-t, --topn=[N] 'top-N topic words to consider for computing coherence'")
                .default_value(&default_top_n),
        )
        .arg_from_usage("-s, --scores-only 'print one bare score per topic and no summary'")
        .get_matches();

    let topic_file = value_t!(args, "topic_file", PathBuf).unwrap_or_else(|e| e.exit());
    let wordcount_file = value_t!(args, "wordcount_file", PathBuf).unwrap_or_else(|e| e.exit());
    let top_n = value_t!(args, "topn", usize).unwrap_or_else(|e| e.exit());
    let metric: Metric = args.value_of("metric").unwrap_or_default().parse()?;
    let scores_only = args.is_present("scores-only");

    let counts = WordCounts::from_path(&wordcount_file)?;
    info!(
        "Loaded {} word counts over {} windows",
        counts.len(),
        counts.total_windows()
    );
    let topics = read_lines(&topic_file)?;
    let scores = metrics::score_topics(&counts, metric, &topics, top_n);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for score in &scores {
        if scores_only {
            writeln!(out, "{}", score.coherence)?;
        } else {
            writeln!(out, "[{:.2}] {}", score.coherence, score.words.join(" "))?;
        }
    }

    let values: Vec<f64> = scores.iter().map(|score| score.coherence).collect();
    if let (Some(mean), Some(median)) = (metrics::mean(&values), metrics::median(&values)) {
        info!("{} topics, mean {} coherence {}", values.len(), metric, mean);
        if !scores_only {
            writeln!(out, "{}", "=".repeat(74))?;
            writeln!(out, "Average Topic Coherence = {}", mean)?;
            writeln!(out, "Median Topic Coherence = {}", median)?;
            writeln!(out, "{}\t{}", mean, median)?;
        }
    }
    out.flush()?;
    Ok(())
}
