//! Split SVM rank input into folds for cross validation
//!
//! Reads the feature file on stdin and writes `test.dat.<i>` and `train.dat.<i>` for every fold
//! into the output directory. Queries are never split across test and train.

// argument parsing
#[macro_use]
extern crate clap;
// logging
#[macro_use]
extern crate log;

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;

use clap::Arg;

use topic_coherence::errors::*;
use topic_coherence::svm::{group_by_qid, write_folds, DEFAULT_FOLDS};

pub fn main() {
    env_logger::init();
    // Main can't return a Result, so report whatever went wrong and exit nonzero
    if let Err(err) = inner_main() {
        error!("{}", err);
        process::exit(1);
    }
}

pub fn inner_main() -> Result<()> {
    let default_folds = DEFAULT_FOLDS.to_string();
    let args = app_from_crate!()
        .arg_from_usage("<output_dir> 'directory in which to write the folds'")
        .arg(Arg::from_usage("-k, --folds=[K] 'number of folds'").default_value(&default_folds))
        .get_matches();

    let output_dir = value_t!(args, "output_dir", PathBuf).unwrap_or_else(|e| e.exit());
    let folds = value_t!(args, "folds", usize).unwrap_or_else(|e| e.exit());

    let stdin = io::stdin();
    let lines = stdin.lock().lines().collect::<io::Result<Vec<String>>>()?;
    let groups = group_by_qid(&lines)?;
    info!("{} queries into {} folds", groups.len(), folds);
    write_folds(&groups, folds, &output_dir)
}
