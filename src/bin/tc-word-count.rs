//! Word counts for topic coherence
//!
//! Reads a topic file (one topic per line, collocations joined with `_`) and a directory of
//! reference corpus partitions (one document per line), and counts in how many sliding windows
//! each topic word, and each pair of words from a common topic, occurs. Partitions are counted
//! in parallel and merged.
//!
//! The output on stdout is the word count file: `key|count` lines sorted by key, where the key
//! is a word, a `word|word` pair, or `!!<TOTAL_WINDOWS>!!` for the total number of windows.

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

use topic_coherence::cooccur::{count_corpus, DEFAULT_WINDOW_SIZE};
use topic_coherence::corpus::list_partitions;
use topic_coherence::errors::*;
use topic_coherence::vocab::TopicIndex;

pub fn main() {
    env_logger::init();
    // Main can't return a Result, so report whatever went wrong and exit nonzero
    if let Err(err) = inner_main() {
        error!("{}", err);
        process::exit(1);
    }
}

pub fn inner_main() -> Result<()> {
    let default_window = DEFAULT_WINDOW_SIZE.to_string();
    let args = app_from_crate!()
        .arg_from_usage("<topic_file> 'file that contains the topics'")
        .arg_from_usage("<ref_corpus_dir> 'directory that contains the reference corpus partitions'")
        .arg(
            Arg::from_usage("-w, --window-size=[SIZE] 'size of the sliding window; 0 uses the whole document'")
                .default_value(&default_window),
        )
        .arg_from_usage("-j, --threads=[N] 'number of worker threads (defaults to one per core)'")
        .get_matches();

    let topic_file = value_t!(args, "topic_file", PathBuf).unwrap_or_else(|e| e.exit());
    let corpus_dir = value_t!(args, "ref_corpus_dir", PathBuf).unwrap_or_else(|e| e.exit());
    let window_size = value_t!(args, "window-size", usize).unwrap_or_else(|e| e.exit());
    if args.is_present("threads") {
        let threads = value_t!(args, "threads", usize).unwrap_or_else(|e| e.exit());
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|err| Error::Other(format!("Could not start worker pool: {}", err)))?;
    }

    let index = TopicIndex::from_path(&topic_file)?;
    let partitions = list_partitions(&corpus_dir)?;
    info!(
        "Counting {} partitions of {} with window size {}",
        partitions.len(),
        corpus_dir.display(),
        window_size
    );
    let counts = count_corpus(&index, &partitions, window_size)?;
    info!("{} entries, {} windows", counts.len(), counts.total_windows());

    let stdout = io::stdout();
    counts.write_to(BufWriter::new(stdout.lock()))
}
