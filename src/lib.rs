//! Word and word pair counts for topic coherence and word intrusion evaluation
//!
//! The counting binary scans a reference corpus split into partition files and records, for the
//! words of a set of topics, how many sliding windows contain each topic word and each pair of
//! topic words from the same topic. The other binaries turn that word count file into observed
//! coherence scores (PMI, NPMI, LCP) or into features for the word intrusion task.

#[macro_use]
extern crate log;

pub mod aggregate;
pub mod cooccur;
pub mod corpus;
pub mod counts;
pub mod errors;
pub mod farm;
pub mod intrusion;
pub mod metrics;
pub mod svm;
pub mod vocab;
